use crate::config::SettingsOverrides;
use crate::convert::DisplayMode;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Starting tempo in beats per minute
    #[arg(short, long, value_parser = parse_bpm_arg)]
    pub bpm: Option<f64>,

    /// Starting unit for the table
    #[arg(short, long, value_enum)]
    pub unit: Option<UnitArg>,

    /// Starting number of decimal places (0-4)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(0..=4))]
    pub precision: Option<u32>,

    /// Print the table once and exit instead of starting the terminal UI
    #[arg(long)]
    pub print: bool,

    /// Settings file (TOML, YAML or JSON)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnitArg {
    Ms,
    Hz,
}

impl From<UnitArg> for DisplayMode {
    fn from(unit: UnitArg) -> Self {
        match unit {
            UnitArg::Ms => DisplayMode::Milliseconds,
            UnitArg::Hz => DisplayMode::Hertz,
        }
    }
}

impl Args {
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            bpm: self.bpm,
            unit: self.unit.map(DisplayMode::from),
            precision: self.precision,
        }
    }
}

fn parse_bpm_arg(value: &str) -> Result<f64, String> {
    crate::convert::parse_bpm(value).map_err(|e| e.to_string())
}
