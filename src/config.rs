// config.rs

use crate::convert::{DisplayMode, DEFAULT_PRECISION};
use crate::session::{Session, DEFAULT_BPM};
use crate::Result;
use config::{Config, Environment, File};
use log::{debug, info};
use serde::Deserialize;
use std::path::Path;

pub const ENV_PREFIX: &str = "DELAYCALC";

/// Startup values for a session. Nothing is ever written back.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub bpm: f64,
    pub unit: DisplayMode,
    pub precision: u32,
}

/// Values given on the command line; they win over every other source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsOverrides {
    pub bpm: Option<f64>,
    pub unit: Option<DisplayMode>,
    pub precision: Option<u32>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            bpm: DEFAULT_BPM,
            unit: DisplayMode::default(),
            precision: DEFAULT_PRECISION,
        }
    }
}

fn unit_key(unit: DisplayMode) -> &'static str {
    match unit {
        DisplayMode::Milliseconds => "ms",
        DisplayMode::Hertz => "hz",
    }
}

impl Settings {
    /// Layers built-in defaults, the optional settings file, `DELAYCALC_*`
    /// environment variables and finally `overrides`.
    pub fn load(file: Option<&Path>, overrides: &SettingsOverrides) -> Result<Self> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("bpm", defaults.bpm)?
            .set_default("unit", unit_key(defaults.unit))?
            .set_default("precision", i64::from(defaults.precision))?;

        if let Some(path) = file {
            info!("Loading settings from {}", path.display());
            builder = builder.add_source(File::from(path.to_path_buf()).required(true));
        }

        let settings: Settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .set_override_option("bpm", overrides.bpm)?
            .set_override_option("unit", overrides.unit.map(unit_key))?
            .set_override_option("precision", overrides.precision.map(i64::from))?
            .build()?
            .try_deserialize()?;

        debug!("Resolved settings: {:?}", settings);
        Ok(settings)
    }

    /// Builds a session from these settings, rejecting an unusable BPM or
    /// precision.
    pub fn session(&self) -> Result<Session> {
        Session::new(self.bpm, self.unit, self.precision)
    }
}
