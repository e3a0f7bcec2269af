// convert.rs

use crate::notes::{NoteDivision, NOTE_DIVISIONS};
use serde::Deserialize;
use std::fmt;

pub const MS_PER_MINUTE: f64 = 60_000.0;
pub const DOTTED_RATIO: f64 = 1.5;

/// Decimal places selectable in the UI; a preset's position is its value.
pub const PRECISION_PRESETS: [u32; 5] = [0, 1, 2, 3, 4];
pub const DEFAULT_PRECISION: u32 = 2;
/// Past this an f64 has no more decimal digits worth showing.
pub const MAX_DISPLAY_PRECISION: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum DisplayMode {
    #[default]
    #[serde(rename = "ms", alias = "milliseconds", alias = "MS")]
    Milliseconds,
    #[serde(rename = "hz", alias = "hertz", alias = "Hz", alias = "HZ")]
    Hertz,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Milliseconds => DisplayMode::Hertz,
            DisplayMode::Hertz => DisplayMode::Milliseconds,
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            DisplayMode::Milliseconds => "ms",
            DisplayMode::Hertz => "Hz",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.unit())
    }
}

/// Values for one note division, unrounded, in the table's unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionResult {
    pub division: NoteDivision,
    pub straight: f64,
    pub dotted: f64,
    pub triplet: f64,
}

impl ConversionResult {
    pub fn rounded(&self, precision: u32) -> Self {
        Self {
            division: self.division,
            straight: round_to(self.straight, precision),
            dotted: round_to(self.dotted, precision),
            triplet: round_to(self.triplet, precision),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionTable {
    pub bpm: f64,
    pub mode: DisplayMode,
    pub precision: u32,
    pub rows: Vec<ConversionResult>,
}

impl ConversionTable {
    /// Rows as they are displayed at the table's precision.
    pub fn rounded_rows(&self) -> Vec<ConversionResult> {
        self.rows
            .iter()
            .map(|row| row.rounded(self.precision))
            .collect()
    }

    pub fn format_value(&self, value: f64) -> String {
        format!("{:.*}", self.precision.min(MAX_DISPLAY_PRECISION) as usize, value)
    }
}

/// Computes one row per entry of [`NOTE_DIVISIONS`], in order.
///
/// `bpm` must already be validated as finite and positive; nothing is
/// checked here. `precision` is capped at [`MAX_DISPLAY_PRECISION`].
pub fn compute_table(bpm: f64, mode: DisplayMode, precision: u32) -> ConversionTable {
    let precision = precision.min(MAX_DISPLAY_PRECISION);
    let ms_per_beat = MS_PER_MINUTE / bpm;

    let rows = NOTE_DIVISIONS
        .iter()
        .map(|division| convert_division(ms_per_beat, *division, mode))
        .collect();

    ConversionTable {
        bpm,
        mode,
        precision,
        rows,
    }
}

fn convert_division(
    ms_per_beat: f64,
    division: NoteDivision,
    mode: DisplayMode,
) -> ConversionResult {
    let period_ms = ms_per_beat * division.factor;

    // Dotted lengthens the period and triplet shortens it, so in Hz the ratios flip.
    let (straight, dotted, triplet) = match mode {
        DisplayMode::Milliseconds => (
            period_ms,
            period_ms * DOTTED_RATIO,
            period_ms / DOTTED_RATIO,
        ),
        DisplayMode::Hertz => {
            let hz = 1000.0 / period_ms;
            (hz, hz / DOTTED_RATIO, hz * DOTTED_RATIO)
        }
    };

    ConversionResult {
        division,
        straight,
        dotted,
        triplet,
    }
}

/// Rounds half away from zero to `precision` decimal places.
pub fn round_to(value: f64, precision: u32) -> f64 {
    let scale = 10f64.powi(precision.min(MAX_DISPLAY_PRECISION) as i32);
    (value * scale).round() / scale
}

pub fn round_bpm(bpm: f64) -> i64 {
    bpm.round() as i64
}

/// Like [`round_bpm`], but `None` when the result would not fit in an `i64`.
pub fn checked_round_bpm(bpm: f64) -> Option<i64> {
    let rounded = bpm.round();
    // i64::MAX as f64 is 2^63, one past the largest i64.
    if rounded.is_finite() && rounded >= i64::MIN as f64 && rounded < i64::MAX as f64 {
        Some(rounded as i64)
    } else {
        None
    }
}

/// Tap estimates are shown with a single decimal regardless of table precision.
pub fn format_tap_bpm(bpm: f64) -> String {
    format!("{:.1}", bpm)
}

/// Accepts only finite, positive numbers.
pub fn parse_bpm(input: &str) -> crate::Result<f64> {
    match input.trim().parse::<f64>() {
        Ok(bpm) if bpm.is_finite() && bpm > 0.0 => Ok(bpm),
        _ => Err(crate::Error::InvalidBpm(input.to_string())),
    }
}
