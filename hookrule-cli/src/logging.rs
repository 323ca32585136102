//! Tracing setup. Logs go to stderr; stdout carries only the JSON output.

use tracing_subscriber::EnvFilter;

/// Filter directive used by `--debug`.
pub const DEBUG_FILTER: &str = "hookrule=debug,hookrule_common=debug";

/// Build the filter: debug crates with `--debug`, else `RUST_LOG`, else `warn`.
pub fn env_filter(debug: bool) -> EnvFilter {
    if debug {
        EnvFilter::new(DEBUG_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}

/// Install the global fmt subscriber writing to stderr.
pub fn init(debug: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(debug))
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_debug_filter() {
        let filter = env_filter(true).to_string();
        assert!(filter.contains("hookrule=debug"));
        assert!(filter.contains("hookrule_common=debug"));
    }

    #[test]
    #[serial]
    fn test_default_filter_is_warn() {
        std::env::remove_var("RUST_LOG");
        assert_eq!(env_filter(false).to_string(), "warn");
    }

    #[test]
    #[serial]
    fn test_rust_log_is_honoured() {
        std::env::set_var("RUST_LOG", "hookrule_common=trace");
        let filter = env_filter(false).to_string();
        std::env::remove_var("RUST_LOG");
        assert_eq!(filter, "hookrule_common=trace");
    }
}
