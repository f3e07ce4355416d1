use serde::{Deserialize, Serialize};

/// Scoring convention in effect for one payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreScale {
    /// Legacy schema: a single `icp_match_score` out of 10.
    Ten,
    /// Current schema: ICP and business value scores out of 100.
    Hundred,
}

impl ScoreScale {
    pub fn max(self) -> f64 {
        match self {
            Self::Ten => 10.0,
            Self::Hundred => 100.0,
        }
    }

    /// Inclusive lower bounds of the `High` and `Medium` bands.
    pub fn cut_points(self) -> (f64, f64) {
        match self {
            Self::Ten => (7.0, 5.0),
            Self::Hundred => (70.0, 40.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    High,
    Medium,
    Low,
}

impl Tier {
    pub fn classify(value: f64, scale: ScoreScale) -> Self {
        let (high, medium) = scale.cut_points();
        if value >= high {
            Self::High
        } else if value >= medium {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Canonical tier-count record both historical summary schemas resolve into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCounts {
    pub high: u64,
    pub medium: u64,
    pub low: u64,
    pub not_a_fit: u64,
}
