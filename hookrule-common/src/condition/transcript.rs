//! Transcript-backed "every Nth prompt" predicate.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::ConditionError;

/// Count transcript entries of type `user` that belong to `session_id`.
///
/// The transcript is newline-delimited JSON. Blank lines are ignored and
/// lines that fail to parse, including lines that are not UTF-8, are skipped
/// with a warning.
pub fn count_user_entries(path: &Path, session_id: &str) -> std::io::Result<u64> {
    let reader = BufReader::new(File::open(path)?);
    let mut count = 0;

    for (line_no, line) in reader.split(b'\n').enumerate() {
        let line = line?;
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        let entry: serde_json::Value = match serde_json::from_slice(&line) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(
                    "Skipping malformed transcript line {} in {}: {}",
                    line_no + 1,
                    path.display(),
                    e
                );
                continue;
            }
        };

        let is_user = entry.get("type").and_then(|v| v.as_str()) == Some("user");
        let entry_session = entry
            .get("sessionId")
            .or_else(|| entry.get("session_id"))
            .and_then(|v| v.as_str());
        if is_user && entry_session == Some(session_id) {
            count += 1;
        }
    }

    Ok(count)
}

/// Whether the prompt being submitted now is a multiple of `interval`.
///
/// `interval` is the raw condition value and must be a positive integer.
pub fn is_every_nth_prompt(
    interval: &str,
    transcript_path: &str,
    session_id: &str,
) -> Result<bool, ConditionError> {
    let n = interval
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| ConditionError::InvalidInterval(interval.to_string()))?;

    let prior = count_user_entries(Path::new(transcript_path), session_id).map_err(|e| {
        ConditionError::Transcript {
            path: transcript_path.to_string(),
            reason: e.to_string(),
        }
    })?;

    // The prompt under evaluation is not in the transcript yet
    let current = prior as i64 + 1;
    Ok(current % n == 0)
}
