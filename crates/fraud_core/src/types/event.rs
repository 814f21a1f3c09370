//! Fraud event record and its classifications.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Severity classification of a fraud event.
///
/// Each level carries a fixed weight used for aggregate risk scoring only;
/// display ordering never depends on it.
///
/// # Examples
///
/// ```
/// use fraud_core::types::RiskLevel;
///
/// assert_eq!(RiskLevel::High.weight(), 3);
/// assert_eq!(RiskLevel::from_roll(0.5), RiskLevel::Medium);
/// assert_eq!(RiskLevel::Low.to_string(), "LOW");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    /// Highest severity (weight 3)
    High,
    /// Medium severity (weight 2)
    Medium,
    /// Lowest severity (weight 1)
    Low,
}

impl RiskLevel {
    /// All risk levels, most severe first.
    pub const ALL: [RiskLevel; 3] = [RiskLevel::High, RiskLevel::Medium, RiskLevel::Low];

    /// Scoring weight for aggregates.
    pub fn weight(self) -> u64 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }

    /// Map a uniform draw in `[0, 1)` onto the fixed 30/40/30 distribution.
    pub fn from_roll(roll: f64) -> Self {
        if roll < 0.3 {
            Self::High
        } else if roll < 0.7 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Upper-case label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }

    /// Map marker color for this level.
    pub fn color_hex(self) -> &'static str {
        match self {
            Self::High => "#EA384C",
            Self::Medium => "#F97316",
            Self::Low => "#FACC15",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Device the fraudulent payment originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceType {
    /// Android handset
    Android,
    /// iPhone or iPad
    #[serde(rename = "iOS")]
    Ios,
    /// Desktop browser
    Desktop,
    /// Anything else
    Other,
}

impl DeviceType {
    /// Every device type.
    pub const ALL: [DeviceType; 4] = [
        DeviceType::Android,
        DeviceType::Ios,
        DeviceType::Desktop,
        DeviceType::Other,
    ];

    /// Mobile device types; the only ones drawn for high-risk events.
    pub const MOBILE: [DeviceType; 2] = [DeviceType::Android, DeviceType::Ios];

    /// Display label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Android => "Android",
            Self::Ios => "iOS",
            Self::Desktop => "Desktop",
            Self::Other => "Other",
        }
    }

    /// Whether this is a mobile device.
    pub fn is_mobile(self) -> bool {
        matches!(self, Self::Android | Self::Ios)
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Opaque unique event identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    /// Build an identifier from 16 random bytes, laid out as a v4 UUID.
    pub fn from_random_bytes(bytes: [u8; 16]) -> Self {
        Self(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }

    /// Underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// One synthetic fraud occurrence.
///
/// Events are created by the generator and shared afterwards as
/// `Arc<FraudEvent>`; nothing mutates them once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FraudEvent {
    /// Unique identifier
    pub id: EventId,
    /// Creation time, milliseconds since the Unix epoch
    #[serde(rename = "timestamp")]
    pub timestamp_ms: i64,
    /// Region (state) name
    pub region: String,
    /// Named locality or `"<region> Region"`
    pub locality: String,
    /// Amount in whole rupees
    pub amount: u64,
    /// Severity
    pub risk_level: RiskLevel,
    /// Originating device
    pub device_type: DeviceType,
    /// Jittered latitude
    pub latitude: f64,
    /// Jittered longitude
    pub longitude: f64,
}

impl FraudEvent {
    /// Scoring weight of this event's risk level.
    pub fn risk_weight(&self) -> u64 {
        self.risk_level.weight()
    }
}
