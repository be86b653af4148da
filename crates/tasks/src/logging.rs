//! Tracing subscriber setup for the CLI.
//!
//! Logs go to stderr so command output on stdout stays clean.

use tracing_subscriber::EnvFilter;

/// Level used when nothing else asks for one
pub const DEFAULT_LEVEL: &str = "warn";

/// Pick the filter directive when `RUST_LOG` is not set.
///
/// `--debug` (or `global.debug`) wins over the configured `logLevel`.
pub fn default_directive(debug: bool, config_level: Option<&str>) -> &'static str {
    if debug {
        return "debug";
    }

    match config_level.map(|l| l.trim().to_ascii_lowercase()).as_deref() {
        Some("trace") => "trace",
        Some("debug") => "debug",
        Some("info") => "info",
        Some("warn" | "warning") => "warn",
        Some("error") => "error",
        Some("silent" | "off" | "none") => "off",
        _ => DEFAULT_LEVEL,
    }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(debug: bool, config_level: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(debug, config_level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
