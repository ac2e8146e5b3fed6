use anyhow::Result;
use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_LOG_FILTER: &str = "info,rag_chunk_embedder=debug";
const LOG_FILE_PREFIX: &str = "chunk-embedder";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

/// Logger options, read from `RUST_LOG`, `LOG_FORMAT` and `LOG_DIR`.
#[derive(Debug, Clone, PartialEq)]
pub struct LogOptions {
    pub filter: String,
    pub format: LogFormat,
    pub dir: PathBuf,
}

impl LogOptions {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            filter: lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            format: lookup("LOG_FORMAT").map_or(LogFormat::Pretty, |f| LogFormat::parse(&f)),
            dir: lookup("LOG_DIR").map_or_else(|| PathBuf::from("logs"), PathBuf::from),
        }
    }
}

pub fn init_logger() -> Result<()> {
    init_with(&LogOptions::from_env())
}

/// Stdout plus a daily rolling `<dir>/chunk-embedder.<date>.log`.
pub fn init_with(options: &LogOptions) -> Result<()> {
    let filter = EnvFilter::try_new(&options.filter)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .build(&options.dir)?;

    match options.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stdout).with_target(true))
            .with(fmt::layer().json().with_writer(file_appender).with_target(true))
            .try_init()?,
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty().with_writer(std::io::stdout).with_target(true))
            .with(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_target(true)
                    .with_ansi(false),
            )
            .try_init()?,
    }

    Ok(())
}
