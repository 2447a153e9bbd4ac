//! Logging setup
//!
//! `RUST_LOG` wins when set; otherwise the configured level applies to this
//! crate's targets and the HTTP trace layer.

use std::io::IsTerminal;

use tracing::Subscriber;
use tracing_subscriber::{
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::LoggingConfig;

/// Install the global subscriber, writing to stdout. Later calls are no-ops.
pub fn init_tracing(config: &LoggingConfig) {
    install(subscriber(config, std::io::stdout, true));
}

/// Install the global subscriber, writing to stderr.
///
/// For commands whose stdout carries data (JSON, CSV). Colors only when
/// stderr is a terminal.
pub fn init_cli_tracing(config: &LoggingConfig) {
    let ansi = std::io::stderr().is_terminal();
    install(subscriber(config, std::io::stderr, ansi));
}

fn install(subscriber: Box<dyn Subscriber + Send + Sync>) {
    if let Err(e) = subscriber.try_init() {
        tracing::debug!("Tracing already initialized: {}", e);
    }
}

fn subscriber<W>(config: &LoggingConfig, writer: W, ansi: bool) -> Box<dyn Subscriber + Send + Sync>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.level)));

    let registry = tracing_subscriber::registry().with(filter);

    if config.format.eq_ignore_ascii_case("json") {
        Box::new(registry.with(fmt::layer().json().with_writer(writer).with_ansi(ansi)))
    } else {
        Box::new(registry.with(fmt::layer().with_writer(writer).with_ansi(ansi)))
    }
}

fn default_directives(level: &str) -> String {
    format!(
        "covid_dashboard={0},covid_dashboard_api={0},tower_http={0}",
        level
    )
}
