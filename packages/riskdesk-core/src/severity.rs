//! Severity tier for stress-scenario outcomes.

use serde::{Deserialize, Serialize};

/// Losses deeper than this fraction of portfolio value are highlighted.
pub const SEVERE_LOSS_THRESHOLD: f64 = -0.15;

/// Visual emphasis tier of a simulation result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Normal,
    Severe,
}

impl Severity {
    pub fn is_severe(&self) -> bool {
        matches!(self, Severity::Severe)
    }
}

/// Classify a signed fractional loss. NaN is never escalated.
pub fn classify(percentage_loss: f64) -> Severity {
    // NaN compares false, so it falls through to Normal
    if percentage_loss < SEVERE_LOSS_THRESHOLD {
        Severity::Severe
    } else {
        Severity::Normal
    }
}
