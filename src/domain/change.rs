//! Change detection between a new observation and stored history

use crate::shared::types::{History, Observation};

pub const DEFAULT_DROP_THRESHOLD: i64 = 50;

/// Compares a fresh observation against the most recent prior one for the
/// same apartment and decides which alerts are warranted. The first
/// observation for an apartment establishes the baseline silently.
pub struct ChangeDetector {
    drop_threshold: i64,
}

impl ChangeDetector {
    pub fn new(drop_threshold: i64) -> Self {
        Self { drop_threshold }
    }

    /// Zero, one or both of: a price-drop alert (previous minimum exceeds
    /// the current one by strictly more than the threshold) and a
    /// new-special alert (none -> some transitions only; a special that
    /// merely changed wording does not fire).
    pub fn detect(&self, history: &History, current: &Observation) -> Vec<String> {
        let Some(previous) = history.latest_for(&current.apartment) else {
            return Vec::new();
        };

        let mut alerts = Vec::new();

        let drop = previous.min_price as i64 - current.min_price as i64;
        if drop > self.drop_threshold {
            alerts.push(format!(
                "💰 {}: Price dropped ${}! Now starting at ${}",
                current.apartment, drop, current.min_price
            ));
        }

        if let Some(special) = &current.special {
            if previous.special.is_none() {
                alerts.push(format!(
                    "🎉 {}: New special detected - \"{}\"",
                    current.apartment, special
                ));
            }
        }

        alerts
    }
}

impl Default for ChangeDetector {
    fn default() -> Self {
        Self::new(DEFAULT_DROP_THRESHOLD)
    }
}
