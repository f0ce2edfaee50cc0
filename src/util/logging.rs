// Memoria - util/logging.rs
//
// Structured logging with runtime-selectable debug mode.
//
// Activation:
//   - Environment variable: RUST_LOG=debug (or trace)
//   - CLI flag: --debug
//   - Config file: [logging] level = "debug"
//
// Output: stderr, so stdout stays clean for exported data.

use tracing_subscriber::EnvFilter;

/// Choose the filter directive when RUST_LOG is not set.
///
/// Priority: CLI --debug flag > config level > default "info".
fn resolve_directive(debug_flag: bool, config_level: Option<&str>) -> &str {
    if debug_flag {
        "debug"
    } else {
        config_level.unwrap_or(super::constants::DEFAULT_LOG_LEVEL)
    }
}

/// Initialise the logging subsystem.
///
/// `debug_flag` is true when the user passed --debug on the CLI.
/// `config_level` is the validated level from config.toml (if present).
///
/// Safe to call more than once; later calls are ignored.
pub fn init(debug_flag: bool, config_level: Option<&str>) {
    // RUST_LOG takes highest priority when set.
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(resolve_directive(debug_flag, config_level))
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(
            app = super::constants::APP_NAME,
            version = super::constants::APP_VERSION,
            "Logging initialised"
        );
    }
}

/// Shorten `text` to at most `max` characters for log output.
pub fn preview(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        assert_eq!(preview("😀 Happy", 2), "😀 ");
        assert_eq!(preview("Sad", 10), "Sad");
        assert_eq!(preview("", 3), "");
    }

    #[test]
    fn test_debug_flag_beats_config_level() {
        assert_eq!(resolve_directive(true, Some("warn")), "debug");
    }

    #[test]
    fn test_config_level_used_without_flag() {
        assert_eq!(resolve_directive(false, Some("trace")), "trace");
    }

    #[test]
    fn test_default_level() {
        assert_eq!(resolve_directive(false, None), "info");
    }
}
