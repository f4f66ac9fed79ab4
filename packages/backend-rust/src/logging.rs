use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const LOG_FILE_PREFIX: &str = "ivf-estimator.log";

/// Keeps the non-blocking file writer alive; drop it to flush.
pub struct FileLogGuard {
    _guard: WorkerGuard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct LoggingOptions {
    pub level: String,
    pub format: LogFormat,
    /// Daily rolling file output when set
    pub file_dir: Option<PathBuf>,
}

impl LoggingOptions {
    /// `LOG_FORMAT=json`, `ENABLE_FILE_LOGS=true|1`, `LOG_DIR` (default `./logs`)
    pub fn from_env(level: &str) -> Self {
        let format = match std::env::var("LOG_FORMAT") {
            Ok(v) if v.trim().eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        let file_dir = std::env::var("ENABLE_FILE_LOGS")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false)
            .then(|| {
                PathBuf::from(std::env::var("LOG_DIR").unwrap_or_else(|_| "./logs".to_string()))
            });

        Self {
            level: level.to_string(),
            format,
            file_dir,
        }
    }
}

fn stdout_layer<S>(format: LogFormat) -> Box<dyn Layer<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    match format {
        LogFormat::Pretty => fmt::layer().with_target(true).boxed(),
        LogFormat::Json => fmt::layer().with_target(true).json().boxed(),
    }
}

pub fn init_tracing(options: &LoggingOptions) -> Option<FileLogGuard> {
    let env_filter =
        EnvFilter::try_new(&options.level).unwrap_or_else(|_| EnvFilter::new("info"));

    let mut guard = None;
    let file_layer = match &options.file_dir {
        Some(dir) => match std::fs::create_dir_all(dir) {
            Ok(()) => {
                let appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX);
                let (writer, worker_guard) = tracing_appender::non_blocking(appender);
                guard = Some(FileLogGuard {
                    _guard: worker_guard,
                });
                Some(
                    fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false)
                        .with_target(true),
                )
            }
            Err(err) => {
                eprintln!("failed to create log directory {}: {err}", dir.display());
                None
            }
        },
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer(options.format))
        .with(file_layer)
        .init();

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_options_keep_level() {
        let options = LoggingOptions::from_env("ivf_backend_rust=debug");
        assert_eq!(options.level, "ivf_backend_rust=debug");
    }
}
