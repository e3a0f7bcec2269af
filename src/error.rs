use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid BPM '{0}': expected a positive number")]
    InvalidBpm(String),

    #[error("invalid precision {0}: expected a value from 0 to 4")]
    InvalidPrecision(u32),

    #[error("failed to load settings: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("failed to initialise logging: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
