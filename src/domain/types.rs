use serde::{Deserialize, Serialize};
use std::fmt;

use super::ConditionLabel;

// ============================================================================
// Search Domain
// ============================================================================

/// Integer tilt angle in degrees, 0 (flat) through 90 (vertical)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct AngleCandidate(u8);

impl AngleCandidate {
    pub const MIN: AngleCandidate = AngleCandidate(0);
    pub const MAX: AngleCandidate = AngleCandidate(90);

    pub fn new(degrees: u8) -> Option<Self> {
        (degrees <= Self::MAX.0).then_some(Self(degrees))
    }

    pub fn degrees(&self) -> u8 {
        self.0
    }

    pub fn as_f64(&self) -> f64 {
        f64::from(self.0)
    }

    /// Every candidate in ascending order (91 values)
    pub fn all() -> impl Iterator<Item = AngleCandidate> {
        (Self::MIN.0..=Self::MAX.0).map(AngleCandidate)
    }
}

impl TryFrom<u8> for AngleCandidate {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("tilt angle {}° outside 0..=90", value))
    }
}

impl From<AngleCandidate> for u8 {
    fn from(angle: AngleCandidate) -> Self {
        angle.0
    }
}

impl fmt::Display for AngleCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.0)
    }
}

/// Site latitude in degrees. Deliberately unbounded: out-of-range values are
/// still answered deterministically.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Latitude(pub f64);

impl Latitude {
    pub fn degrees(&self) -> f64 {
        self.0
    }
}

impl From<f64> for Latitude {
    fn from(degrees: f64) -> Self {
        Self(degrees)
    }
}

// ============================================================================
// Results
// ============================================================================

/// Estimated conversion efficiency in percent, always within [0, 99]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EfficiencyEstimate(f64);

impl EfficiencyEstimate {
    pub const FLOOR: f64 = 0.0;
    pub const CEILING: f64 = 99.0;

    /// Clamp a raw model value into the valid range. NaN maps to the floor.
    pub fn clamped(raw: f64) -> Self {
        if raw.is_nan() {
            return Self(Self::FLOOR);
        }
        Self(raw.clamp(Self::FLOOR, Self::CEILING))
    }

    pub fn percent(&self) -> f64 {
        self.0
    }

    /// Value rounded to two decimals for display
    pub fn rounded(&self) -> f64 {
        (self.0 * 100.0).round() / 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub angle: AngleCandidate,
    pub efficiency: EfficiencyEstimate,
    pub condition: ConditionLabel,
}

// ============================================================================
// Inputs
// ============================================================================

/// Encoded panel photo as handed to the classifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelImage {
    /// e.g. "image/jpeg"
    pub mime_type: String,
    /// Base64 encoded image bytes
    pub data: String,
}

impl PanelImage {
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
