use std::str::FromStr;
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use crate::errors::ConfigError;

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {h({l})} {t} - {m}{n}";

/// Sets up logging to both console and file
///
/// # Arguments
///
/// * 'log_path' - path to the log file
/// * 'log_level' - root log level (error, warn, info, debug, trace)
pub fn setup_logger(log_path: &str, log_level: &str) -> Result<(), ConfigError> {
    let level = parse_level(log_level)?;

    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();

    let file = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build(log_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .appender(Appender::builder().build("file", Box::new(file)))
        .build(Root::builder().appender("stdout").appender("file").build(level))?;

    log4rs::init_config(config)?;

    Ok(())
}

/// Parses a log level name
///
/// # Arguments
///
/// * 'log_level' - level name, case insensitive
fn parse_level(log_level: &str) -> Result<LevelFilter, ConfigError> {
    LevelFilter::from_str(log_level)
        .map_err(|_| ConfigError(format!("unknown log level '{}'", log_level)))
}
