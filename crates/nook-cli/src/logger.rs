//! Logging infrastructure for the nook CLI.
//!
//! Structured logging via the `tracing` ecosystem with verbosity flags and
//! `RUST_LOG` support.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber.
///
/// Call once at startup before any logging occurs.
///
/// Level resolution order:
/// 1. `--verbose`: DEBUG for nook crates
/// 2. `--quiet`: errors only
/// 3. `RUST_LOG` environment variable
/// 4. Default: INFO for nook crates
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = if verbose {
        EnvFilter::new("nook_cli=debug,nook_config=debug,nook_discovery=debug,nook_embed=debug")
    } else if quiet {
        EnvFilter::new("nook_cli=error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("nook_cli=info,nook_config=info,nook_discovery=info,nook_embed=info")
        })
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    // The subscriber is global and can only be installed once per process,
    // so these only exercise filter construction.

    #[test]
    fn test_verbose_filter_parses() {
        let _ = EnvFilter::new(
            "nook_cli=debug,nook_config=debug,nook_discovery=debug,nook_embed=debug",
        );
    }

    #[test]
    fn test_quiet_filter_parses() {
        let _ = EnvFilter::new("nook_cli=error");
    }
}
