//! Diagnostic logging setup (`tracing`). User-facing status lines go
//! through `ui::messages`; this is for `-v` / `RUST_LOG` troubleshooting.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber, writing to stderr.
///
/// Precedence: `-v` flags, then `RUST_LOG`, then the configured level.
pub fn enable_logging(verbosity: u8, configured: Option<&str>) {
    let level = match verbosity {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    };

    let filter = match level {
        Some(l) => EnvFilter::new(format!("{}={l}", env!("CARGO_PKG_NAME"))),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME"),
                configured.unwrap_or("warn")
            ))
        }),
    };

    // A second init (e.g. in tests) is not an error worth surfacing.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
