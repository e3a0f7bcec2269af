// tap.rs

use crate::convert::MS_PER_MINUTE;
use log::{debug, trace};
use std::collections::VecDeque;

/// Number of timestamps kept; the estimate averages the gaps between them.
pub const MAX_TAP_HISTORY: usize = 5;

#[derive(Debug, Default, Clone)]
pub struct TapEstimator {
    history: VecDeque<f64>,
}

impl TapEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a tap at `timestamp_ms` and returns the BPM implied by the
    /// retained taps, or `None` until there are at least two of them.
    ///
    /// There is no timeout: a tap after a long pause is averaged in with the
    /// earlier ones until it ages out of the window.
    pub fn record_tap(&mut self, timestamp_ms: f64) -> Option<f64> {
        self.history.push_back(timestamp_ms);
        if self.history.len() > MAX_TAP_HISTORY {
            self.history.pop_front();
        }
        trace!("Tap recorded at {} ms, history: {:?}", timestamp_ms, self.history);

        if self.history.len() <= 1 {
            return None;
        }

        let intervals = self.history.len() - 1;
        let total: f64 = self
            .history
            .iter()
            .zip(self.history.iter().skip(1))
            .map(|(earlier, later)| later - earlier)
            .sum();
        let mean_interval = total / intervals as f64;
        if mean_interval <= 0.0 {
            debug!("Ignoring non-positive mean tap interval: {}", mean_interval);
            return None;
        }

        let bpm = MS_PER_MINUTE / mean_interval;
        debug!(
            "Estimated BPM {:.3} from {} intervals (mean {:.3} ms)",
            bpm, intervals, mean_interval
        );
        Some(bpm)
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn history(&self) -> impl Iterator<Item = f64> + '_ {
        self.history.iter().copied()
    }
}
