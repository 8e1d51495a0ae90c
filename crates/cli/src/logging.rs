use std::env;
use std::io;

use shopcart_core::config::{AppConfig, LogFormat};
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Events go to stderr; stdout carries the shop dialogue.
pub fn init(config: &AppConfig) {
    let directive = filter_directive(&config.logging.level, env::var("RUST_LOG").ok().as_deref());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|error| {
        eprintln!("ignoring log filter `{directive}`: {error}");
        EnvFilter::new("warn")
    });
    let builder =
        tracing_subscriber::fmt().with_writer(io::stderr).with_target(false).with_env_filter(filter);

    let installed = match config.logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    if let Err(error) = installed {
        eprintln!("logging was already initialised: {error}");
    }
}

/// `RUST_LOG` directives, when present, replace the configured level.
fn filter_directive(configured_level: &str, rust_log: Option<&str>) -> String {
    match rust_log.map(str::trim) {
        Some(directives) if !directives.is_empty() => directives.to_string(),
        _ => configured_level.trim().to_ascii_lowercase(),
    }
}
