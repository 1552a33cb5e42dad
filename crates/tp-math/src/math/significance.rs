//! Significance labels for p-values.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Coarse reading of a p-value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SignificanceLabel {
    /// p < 0.05
    Significant,
    /// 0.05 <= p < 0.10
    Marginal,
    NotSignificant,
}

impl SignificanceLabel {
    pub fn from_p_value(p: f64) -> Self {
        if p < 0.05 {
            SignificanceLabel::Significant
        } else if p < 0.10 {
            SignificanceLabel::Marginal
        } else {
            SignificanceLabel::NotSignificant
        }
    }
}

impl std::fmt::Display for SignificanceLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignificanceLabel::Significant => write!(f, "significant"),
            SignificanceLabel::Marginal => write!(f, "marginal"),
            SignificanceLabel::NotSignificant => write!(f, "not_significant"),
        }
    }
}
