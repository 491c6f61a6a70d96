use crate::error::{CliError, Result};
use std::fs::File;
use std::path::PathBuf;
use tracing::Subscriber;
use tracing_subscriber::{
    Layer,
    filter::LevelFilter,
    fmt::{self},
    prelude::*,
    registry::LookupSpan,
};

/// Console level for the given `-v` count. `--quiet` keeps errors only.
pub fn level_for(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// The log file always records at least INFO, whatever the console shows.
pub fn file_level(console: LevelFilter) -> LevelFilter {
    console.max(LevelFilter::INFO)
}

fn console_layer<S>(level: LevelFilter) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .compact()
        .with_filter(level)
}

fn file_layer<S>(file: File, level: LevelFilter) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_thread_ids(true)
        .with_target(true)
        .with_filter(level)
}

pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<PathBuf>) -> Result<()> {
    let level_filter = level_for(verbosity, quiet);
    let subscriber = tracing_subscriber::registry().with(console_layer(level_filter));

    if let Some(path) = log_file {
        let file = File::create(&path).map_err(CliError::Io)?;
        subscriber
            .with(file_layer(file, file_level(level_filter)))
            .init();
    } else {
        subscriber.init();
    }

    Ok(())
}
