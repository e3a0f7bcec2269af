// session.rs

use crate::convert::{
    checked_round_bpm, compute_table, format_tap_bpm, parse_bpm, ConversionTable, DisplayMode,
    DEFAULT_PRECISION, PRECISION_PRESETS,
};
use crate::tap::TapEstimator;
use crate::{Error, Result};
use log::{debug, info};

pub const DEFAULT_BPM: f64 = 120.0;

/// Everything one interactive calculator owns: the BPM field, the selected
/// unit and precision, the tap history and the table currently shown.
#[derive(Debug, Clone)]
pub struct Session {
    bpm_input: String,
    bpm: f64,
    mode: DisplayMode,
    precision: u32,
    taps: TapEstimator,
    table: ConversionTable,
}

impl Default for Session {
    fn default() -> Self {
        Self::with_valid(DEFAULT_BPM, DisplayMode::default(), DEFAULT_PRECISION)
    }
}

impl Session {
    pub fn new(bpm: f64, mode: DisplayMode, precision: u32) -> Result<Self> {
        if !(bpm.is_finite() && bpm > 0.0) {
            return Err(Error::InvalidBpm(bpm.to_string()));
        }
        check_precision(precision)?;
        Ok(Self::with_valid(bpm, mode, precision))
    }

    fn with_valid(bpm: f64, mode: DisplayMode, precision: u32) -> Self {
        Session {
            bpm_input: bpm.to_string(),
            bpm,
            mode,
            precision,
            taps: TapEstimator::new(),
            table: compute_table(bpm, mode, precision),
        }
    }

    fn recompute(&mut self) {
        self.table = compute_table(self.bpm, self.mode, self.precision);
        debug!(
            "Table recomputed: bpm={}, mode={}, precision={}",
            self.bpm, self.mode, self.precision
        );
    }

    /// Stores the text of the BPM field and recomputes when it holds a valid
    /// BPM. Otherwise the previous table stays in place.
    pub fn set_bpm_input(&mut self, text: &str) -> Result<f64> {
        self.bpm_input = text.to_string();
        let bpm = parse_bpm(text)?;
        self.bpm = bpm;
        self.recompute();
        Ok(bpm)
    }

    pub fn push_input_char(&mut self, c: char) -> Result<f64> {
        let mut text = self.bpm_input.clone();
        text.push(c);
        self.set_bpm_input(&text)
    }

    pub fn pop_input_char(&mut self) -> Result<f64> {
        let mut text = self.bpm_input.clone();
        text.pop();
        self.set_bpm_input(&text)
    }

    pub fn set_mode(&mut self, mode: DisplayMode) {
        if self.mode != mode {
            info!("Display mode changed: {} -> {}", self.mode, mode);
        }
        self.mode = mode;
        self.recompute();
    }

    pub fn toggle_mode(&mut self) -> DisplayMode {
        self.set_mode(self.mode.toggled());
        self.mode
    }

    pub fn set_precision(&mut self, precision: u32) -> Result<()> {
        check_precision(precision)?;
        self.precision = precision;
        self.recompute();
        Ok(())
    }

    pub fn precision_up(&mut self) -> u32 {
        let next = PRECISION_PRESETS
            .iter()
            .copied()
            .find(|p| *p > self.precision)
            .unwrap_or(self.precision);
        self.precision = next;
        self.recompute();
        next
    }

    pub fn precision_down(&mut self) -> u32 {
        let next = PRECISION_PRESETS
            .iter()
            .rev()
            .copied()
            .find(|p| *p < self.precision)
            .unwrap_or(self.precision);
        self.precision = next;
        self.recompute();
        next
    }

    /// Feeds a tap into the estimator. When an estimate is available the BPM
    /// field shows it to one decimal and the table follows the exact value.
    pub fn tap(&mut self, now_ms: f64) -> Option<f64> {
        let bpm = self.taps.record_tap(now_ms)?;
        self.bpm_input = format_tap_bpm(bpm);
        self.bpm = bpm;
        self.recompute();
        info!("Tap tempo: {} BPM", self.bpm_input);
        Some(bpm)
    }

    /// Rounds the BPM field to a whole number. Does nothing if the field does
    /// not hold a valid BPM.
    pub fn round_bpm(&mut self) -> Option<i64> {
        let bpm = match parse_bpm(&self.bpm_input) {
            Ok(bpm) => bpm,
            Err(e) => {
                debug!("Round ignored: {}", e);
                return None;
            }
        };

        // Anything in (0, 0.5) rounds to zero, which is not a usable tempo.
        let rounded = match checked_round_bpm(bpm) {
            Some(rounded) if rounded > 0 => rounded,
            other => {
                debug!("Round ignored: {} rounds to {:?}", bpm, other);
                return None;
            }
        };

        self.bpm_input = rounded.to_string();
        self.bpm = rounded as f64;
        self.recompute();
        Some(rounded)
    }

    pub fn table(&self) -> &ConversionTable {
        &self.table
    }

    pub fn bpm(&self) -> f64 {
        self.bpm
    }

    pub fn bpm_input(&self) -> &str {
        &self.bpm_input
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn tap_count(&self) -> usize {
        self.taps.len()
    }
}

fn check_precision(precision: u32) -> Result<()> {
    if PRECISION_PRESETS.contains(&precision) {
        Ok(())
    } else {
        Err(Error::InvalidPrecision(precision))
    }
}
