//! Tracing initialization for the command line.
//!
//! Events go to stderr so they never mix with the plan or JSON on stdout.
//! The level comes from [`LogLevel`]; `RUST_LOG` is not consulted.

use chrono::Local;
use clap::ValueEnum;
use std::fmt as stdfmt;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt as tsfmt;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// Verbosity of diagnostic logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogLevel {
    /// Errors only.
    Quiet,
    /// Warnings and errors.
    #[default]
    Normal,
    /// Pipeline milestones.
    Info,
    /// Every planned and completed move.
    Debug,
}

impl LogLevel {
    pub fn level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Quiet => LevelFilter::ERROR,
            LogLevel::Normal => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
        }
    }
}

/// DD/MM/YY HH:MM:SS in local time.
struct LocalHumanTime;

impl FormatTime for LocalHumanTime {
    fn format_time(&self, w: &mut tsfmt::format::Writer<'_>) -> stdfmt::Result {
        write!(w, "{}", Local::now().format("%d/%m/%y %H:%M:%S"))
    }
}

/// Installs the global subscriber. Fails if one is already set.
pub fn init_tracing(level: LogLevel, json: bool) -> Result<(), TryInitError> {
    let filter = EnvFilter::default().add_directive(level.level_filter().into());
    let layer = tsfmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(LocalHumanTime)
        .with_level(true)
        .with_target(false);

    if json {
        registry().with(filter).with(layer.json()).try_init()
    } else {
        registry().with(filter).with(layer.compact()).try_init()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_mapping() {
        assert_eq!(LogLevel::Quiet.level_filter(), LevelFilter::ERROR);
        assert_eq!(LogLevel::Normal.level_filter(), LevelFilter::WARN);
        assert_eq!(LogLevel::Info.level_filter(), LevelFilter::INFO);
        assert_eq!(LogLevel::Debug.level_filter(), LevelFilter::DEBUG);
        assert_eq!(LogLevel::default(), LogLevel::Normal);
    }

    #[test]
    fn test_parse_from_cli_value() {
        assert_eq!(LogLevel::from_str("debug", true), Ok(LogLevel::Debug));
        assert!(LogLevel::from_str("loud", true).is_err());
    }
}
