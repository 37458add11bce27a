//! Logging utilities for the Wheel screener.
//!
//! Logs are written to stderr so that scored results on stdout stay
//! machine-readable. `RUST_LOG` overrides the configured level.

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::ObservabilityConfig;

/// Build the filter directives for the configured level and exclusions.
fn build_directives(log_level: &str, excluded_targets: &[String]) -> String {
    let mut directives = String::from(log_level);

    for target in excluded_targets {
        directives.push_str(&format!(",{}=warn", target.trim()));
    }

    directives
}

/// Build the EnvFilter, preferring `RUST_LOG` when it is set.
fn build_filter(config: &ObservabilityConfig) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    EnvFilter::new(build_directives(
        &config.log_level,
        &config.excluded_targets,
    ))
}

/// `log_format` is matched case-insensitively, as validation does.
fn is_json_format(log_format: &str) -> bool {
    log_format.eq_ignore_ascii_case("json")
}

/// Initialize logging with the given configuration.
///
/// `log_format` selects `json` for structured output or `pretty` for
/// human-readable lines. Calling this twice is harmless; the second
/// subscriber is dropped.
pub fn init_logging(config: &ObservabilityConfig) {
    let filter = build_filter(config);

    let subscriber = tracing_subscriber::registry().with(filter);

    if is_json_format(&config.log_format) {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_span_events(FmtSpan::CLOSE)
            .with_current_span(true)
            .with_target(true)
            .with_file(true)
            .with_line_number(true);
        let _ = subscriber.with(fmt_layer).try_init();
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(true)
            .with_file(false)
            .with_line_number(false);
        let _ = subscriber.with(fmt_layer).try_init();
    }

    tracing::debug!(
        log_level = %config.log_level,
        log_format = %config.log_format,
        excluded = config.excluded_targets.len(),
        "Logging initialized"
    );
}

/// Generate a new identifier for one screening run.
pub fn generate_run_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
