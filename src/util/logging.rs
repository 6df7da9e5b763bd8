//! Structured logging setup for launchpad
//!
//! Logs go to stderr so that progress lines and the run summary on stdout stay readable.
//! `RUST_LOG`, when set, takes precedence over the configured level.
//!
//! # Example
//!
//! ```no_run
//! use launchpad::util::logging;
//!
//! // With environment: LAUNCHPAD_LOG_LEVEL=debug
//! logging::init_from_env();
//!
//! tracing::info!(repo = "todo", "Publishing");
//! ```

use std::env;
use std::io;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Noisy dependencies capped at `warn` unless `RUST_LOG` says otherwise
const QUIET_TARGETS: &[&str] = &["h2", "hyper", "hyper_util", "reqwest", "rustls", "ignore"];

/// Configuration for logging initialization
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum level for launchpad's own events
    pub level: Level,

    /// Emit one JSON object per event instead of formatted lines
    pub use_json: bool,

    /// Include the module target (e.g. `launchpad::publish`)
    pub include_target: bool,

    /// Include file and line number
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            use_json: false,
            include_target: false,
            include_location: false,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// Verbose setup for debugging a run
    pub fn development() -> Self {
        Self {
            level: Level::DEBUG,
            use_json: false,
            include_target: true,
            include_location: true,
        }
    }
}

/// Parses a log level, case-insensitively; unknown names fall back to `INFO`
pub fn parse_level(level_str: &str) -> Level {
    match level_str.trim().to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn build_filter(level: Level) -> EnvFilter {
    let explicit = env::var("RUST_LOG").is_ok();
    let mut filter = if explicit {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(format!("launchpad={}", level.as_str().to_lowercase()))
    };

    if !explicit {
        for target in QUIET_TARGETS {
            if let Ok(directive) = format!("{}=warn", target).parse::<Directive>() {
                filter = filter.add_directive(directive);
            }
        }
    }
    filter
}

/// Installs the global subscriber; later calls are ignored
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = build_filter(config.level);
        let layer = fmt::layer()
            .with_writer(io::stderr)
            .with_target(config.include_target)
            .with_file(config.include_location)
            .with_line_number(config.include_location);

        // try_init: a test harness may already have installed a subscriber
        let _ = if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(layer.json())
                .try_init()
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
        };
    });
}

/// Initializes logging from `LAUNCHPAD_LOG_LEVEL` and `LAUNCHPAD_LOG_JSON`
pub fn init_from_env() {
    let level = env::var("LAUNCHPAD_LOG_LEVEL")
        .map(|v| parse_level(&v))
        .unwrap_or(Level::WARN);

    let use_json = env::var("LAUNCHPAD_LOG_JSON")
        .ok()
        .and_then(|v| v.parse::<bool>().ok())
        .unwrap_or(false);

    init_logging(LoggingConfig {
        level,
        use_json,
        ..Default::default()
    });
}
