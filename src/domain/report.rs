use serde::{Deserialize, Serialize};

use super::{ConditionLabel, OptimizationResult};

/// How the condition label for an analysis was obtained
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssessmentSource {
    /// No image supplied, clean assumed
    NoImage,
    /// Classifier answer matched the vocabulary
    Classified { raw: String },
    /// Classifier answered outside the vocabulary, clean assumed
    Unrecognized { raw: String },
    /// Classifier call failed or timed out, clean assumed
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionAssessment {
    pub label: ConditionLabel,
    pub source: AssessmentSource,
}

impl ConditionAssessment {
    /// True when the label is a fallback rather than a classifier verdict
    pub fn is_degraded(&self) -> bool {
        !matches!(self.source, AssessmentSource::Classified { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// Latitude or image missing; nothing was computed
    NoInput,
    Analyzed {
        result: OptimizationResult,
        assessment: ConditionAssessment,
    },
}

/// Display triple for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TiltReport {
    /// Recommended tilt with degree suffix, e.g. "24°"
    pub angle: String,
    /// Title-cased condition, e.g. "Bird Drop"
    pub condition: String,
    /// Efficiency percent rounded to two decimals
    pub efficiency: f64,
}

impl TiltReport {
    pub const NO_INPUT_ANGLE: &'static str = "No input";
    pub const NO_INPUT_CONDITION: &'static str = "N/A";

    pub fn no_input() -> Self {
        Self {
            angle: Self::NO_INPUT_ANGLE.to_string(),
            condition: Self::NO_INPUT_CONDITION.to_string(),
            efficiency: 0.0,
        }
    }
}

impl From<&OptimizationResult> for TiltReport {
    fn from(result: &OptimizationResult) -> Self {
        Self {
            angle: result.angle.to_string(),
            condition: result.condition.title_case(),
            efficiency: result.efficiency.rounded(),
        }
    }
}

impl From<&AnalysisOutcome> for TiltReport {
    fn from(outcome: &AnalysisOutcome) -> Self {
        match outcome {
            AnalysisOutcome::NoInput => Self::no_input(),
            AnalysisOutcome::Analyzed { result, .. } => Self::from(result),
        }
    }
}
