//! Logger built on `tracing-subscriber`.
//!
//! Console output with colour control and an optional append-only file
//! output in `full`, `compact` or `json` format.

pub mod config;
pub mod error;
pub(crate) mod writer;

pub use self::config::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig, VALID_LOG_LEVELS};
pub use error::LoggerError;

use std::io::IsTerminal;

use tracing::Subscriber;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use writer::LogFileWriter;

type BoxedSubscriber = Box<dyn Subscriber + Send + Sync>;

/// Installs the global subscriber. Fails if one is already installed.
pub fn init_logger(config: LoggerConfig) -> anyhow::Result<()> {
    build_subscriber(&config)?.try_init()?;
    Ok(())
}

/// Builds the subscriber for `config` without installing it.
pub(crate) fn build_subscriber(config: &LoggerConfig) -> anyhow::Result<BoxedSubscriber> {
    config.validate()?;

    let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));

    match (config.console.enabled, config.file.enabled) {
        (true, true) => build_both(config, filter),
        (true, false) => Ok(build_console_only(&config.console, filter)),
        (false, true) => build_file_only(&config.file, filter),
        (false, false) => anyhow::bail!("At least one output (console or file) must be enabled"),
    }
}

fn use_ansi(config: &ConsoleConfig) -> bool {
    config.colored && std::io::stdout().is_terminal()
}

fn console_layer<S>(config: &ConsoleConfig) -> fmt::Layer<S> {
    fmt::layer()
        .with_ansi(use_ansi(config))
        .with_target(true)
        .with_level(true)
}

fn build_console_only(config: &ConsoleConfig, filter: EnvFilter) -> BoxedSubscriber {
    Box::new(
        tracing_subscriber::registry()
            .with(filter)
            .with(console_layer(config)),
    )
}

fn build_file_only(config: &FileConfig, filter: EnvFilter) -> anyhow::Result<BoxedSubscriber> {
    let writer = LogFileWriter::new(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let subscriber: BoxedSubscriber = match config.format {
        LogFormat::Full => Box::new(registry.with(fmt::layer().with_ansi(false).with_writer(writer))),
        LogFormat::Compact => Box::new(
            registry.with(fmt::layer().with_ansi(false).compact().with_writer(writer)),
        ),
        LogFormat::Json => Box::new(
            registry.with(fmt::layer().with_ansi(false).json().with_writer(writer)),
        ),
    };
    Ok(subscriber)
}

fn build_both(config: &LoggerConfig, filter: EnvFilter) -> anyhow::Result<BoxedSubscriber> {
    let writer = LogFileWriter::new(&config.file)?;
    let registry = tracing_subscriber::registry().with(filter);

    // File layer goes first so span fields are formatted without ANSI codes.
    let subscriber: BoxedSubscriber = match config.file.format {
        LogFormat::Full => Box::new(
            registry
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .with(console_layer(&config.console)),
        ),
        LogFormat::Compact => Box::new(
            registry
                .with(fmt::layer().with_ansi(false).compact().with_writer(writer))
                .with(console_layer(&config.console)),
        ),
        LogFormat::Json => Box::new(
            registry
                .with(fmt::layer().with_ansi(false).json().with_writer(writer))
                .with(console_layer(&config.console)),
        ),
    };
    Ok(subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn file_config(dir: &TempDir, format: LogFormat) -> FileConfig {
        FileConfig {
            enabled: true,
            path: dir.path().join(format!("{}.log", format.as_str())),
            append: false,
            format,
        }
    }

    #[test]
    fn test_console_and_file_for_every_format() {
        let dir = TempDir::new().unwrap();

        for format in [LogFormat::Full, LogFormat::Compact, LogFormat::Json] {
            let config = LoggerConfig {
                console: ConsoleConfig::new(true, false),
                file: file_config(&dir, format),
                level: "info".to_string(),
            };
            let path = config.file.path.clone();

            let subscriber = build_subscriber(&config).unwrap();
            tracing::subscriber::with_default(subscriber, || {
                tracing::info!(format = format.as_str(), "written to both outputs");
                tracing::debug!("filtered out");
            });

            let contents = std::fs::read_to_string(&path).unwrap();
            assert!(contents.contains("written to both outputs"), "{format:?}: {contents}");
            assert!(!contents.contains("filtered out"), "{format:?}");
            if format == LogFormat::Json {
                let line = contents.lines().next().unwrap();
                assert!(serde_json::from_str::<serde_json::Value>(line).is_ok());
            }
        }
    }

    #[test]
    fn test_file_only_for_every_format() {
        let dir = TempDir::new().unwrap();

        for format in [LogFormat::Full, LogFormat::Compact, LogFormat::Json] {
            let config = LoggerConfig {
                console: ConsoleConfig::new(false, false),
                file: file_config(&dir, format),
                level: "debug".to_string(),
            };
            let path = config.file.path.clone();

            let subscriber = build_subscriber(&config).unwrap();
            tracing::subscriber::with_default(subscriber, || tracing::debug!("file only"));

            let contents = std::fs::read_to_string(&path).unwrap();
            assert!(contents.contains("file only"), "{format:?}: {contents}");
        }
    }

    #[test]
    fn test_console_only_builds() {
        assert!(build_subscriber(&LoggerConfig::default()).is_ok());
    }

    #[test]
    fn test_no_output_is_rejected() {
        let config = LoggerConfig {
            console: ConsoleConfig::new(false, false),
            ..Default::default()
        };
        assert!(build_subscriber(&config).is_err());
    }
}
