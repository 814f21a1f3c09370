//! Per-region aggregate statistics.

use super::RiskLevel;
use serde::{Deserialize, Serialize};

/// All-time aggregate for one region.
///
/// `count` and `risk_score` cover every event ever attributed to the region,
/// including events already evicted from the buffer. `percentage` is derived
/// when the stats are queried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionStats {
    /// Region name
    pub name: String,
    /// Events attributed to this region
    pub count: u64,
    /// Share of all events, in percent
    pub percentage: f64,
    /// Sum of risk weights
    pub risk_score: u64,
}

impl RegionStats {
    /// Chart band for this region relative to the leading region's score.
    ///
    /// A zero `top_score` normalises against 1.
    pub fn relative_risk(&self, top_score: u64) -> RiskLevel {
        let normalised = self.risk_score as f64 / top_score.max(1) as f64;
        if normalised > 0.8 {
            RiskLevel::High
        } else if normalised > 0.5 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(risk_score: u64) -> RegionStats {
        RegionStats {
            name: "Goa".to_string(),
            count: 10,
            percentage: 10.0,
            risk_score,
        }
    }

    #[test]
    fn test_relative_risk_bands() {
        assert_eq!(stats(100).relative_risk(100), RiskLevel::High);
        assert_eq!(stats(81).relative_risk(100), RiskLevel::High);
        assert_eq!(stats(80).relative_risk(100), RiskLevel::Medium);
        assert_eq!(stats(51).relative_risk(100), RiskLevel::Medium);
        assert_eq!(stats(50).relative_risk(100), RiskLevel::Low);
    }

    #[test]
    fn test_relative_risk_zero_top_score() {
        assert_eq!(stats(0).relative_risk(0), RiskLevel::Low);
        assert_eq!(stats(1).relative_risk(0), RiskLevel::High);
    }
}
