use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::{self, OpenOptions};
use std::io::{Error, ErrorKind};
use std::path::PathBuf;

pub const APP_DIR: &str = "delaycalc";

/// `$HOME/.local/share/delaycalc/logs`
pub fn log_dir() -> Result<PathBuf, Error> {
    let home = std::env::var("HOME")
        .map_err(|_| Error::new(ErrorKind::NotFound, "HOME environment variable not set"))?;

    Ok(PathBuf::from(home)
        .join(".local")
        .join("share")
        .join(APP_DIR)
        .join("logs"))
}

/// Logs to `app.log` in [`log_dir`]. Used by the terminal UI, where anything
/// written to stdout or stderr would land on the screen.
pub fn init_file_logger(level: LevelFilter) -> crate::Result<()> {
    let log_dir = log_dir()?;
    fs::create_dir_all(&log_dir)?;

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("app.log"))?;

    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .build();

    WriteLogger::init(level, config, log_file)?;
    Ok(())
}

/// Logs to stderr; `RUST_LOG` overrides `level`.
pub fn init_stderr_logger(level: LevelFilter) -> crate::Result<()> {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init()?;
    Ok(())
}
