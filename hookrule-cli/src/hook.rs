//! Hook processing: one JSON event in, one emission out.

use std::io::{self, Write};

use hookrule_common::{Dispatcher, Event, EventKind, HookError};

/// What the process writes before exiting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emission {
    /// The JSON output, written to stdout with exit code 0.
    Json(String),
    /// Legacy exit: `message` goes to stdout for code 0, stderr otherwise.
    Exit { code: i32, message: String },
}

impl Emission {
    /// Write the emission and return the process exit code.
    pub fn write(&self, stdout: &mut impl Write, stderr: &mut impl Write) -> io::Result<i32> {
        match self {
            Emission::Json(json) => {
                stdout.write_all(json.as_bytes())?;
                stdout.write_all(b"\n")?;
                stdout.flush()?;
                Ok(0)
            }
            Emission::Exit { code, message } => {
                let stream: &mut dyn Write = if *code == 0 { stdout } else { stderr };
                if !message.is_empty() {
                    stream.write_all(message.as_bytes())?;
                    stream.write_all(b"\n")?;
                }
                stream.flush()?;
                Ok(*code)
            }
        }
    }
}

/// Decode `input`, dispatch it, and decide what to emit.
///
/// Only decode failures and a kind mismatch against `expected` are errors.
/// Rule errors are logged; they have already shaped the output.
pub fn process(
    input: &str,
    dispatcher: &Dispatcher,
    expected: Option<EventKind>,
) -> Result<Emission, HookError> {
    let event = Event::decode(input.trim())?;
    let kind = event.kind();

    if let Some(expected) = expected {
        if expected != kind {
            return Err(HookError::EventMismatch {
                expected,
                actual: kind,
            });
        }
    }

    let outcome = dispatcher.dispatch(&event);
    if !outcome.errors.is_empty() {
        tracing::warn!(
            event = %kind,
            "{} rule error(s):\n{}",
            outcome.errors.len(),
            outcome.errors
        );
    }

    if let Some(exit) = outcome.exit {
        tracing::debug!(event = %kind, code = exit.code, "legacy exit requested");
        return Ok(Emission::Exit {
            code: exit.code,
            message: exit.message,
        });
    }

    let json = outcome.output.to_json();
    tracing::debug!(event = %kind, output = %json, "hook processed");
    Ok(Emission::Json(json))
}
