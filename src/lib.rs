pub mod cli;
pub mod clock;
pub mod config;
pub mod convert;
pub mod error;
pub mod event_loop;
pub mod logging;
pub mod notes;
pub mod report;
pub mod session;
pub mod tap;
pub mod tui;

pub use cli::Args;
pub use convert::{compute_table, round_bpm, ConversionResult, ConversionTable, DisplayMode};
pub use error::{Error, Result};
pub use session::Session;
pub use tap::TapEstimator;
