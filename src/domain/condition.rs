//! Panel condition vocabulary and the defect loss lookup.
//!
//! The condition classifier answers in free text. Everything it says is funneled
//! through [`normalize_label`], which maps it onto the closed [`ConditionLabel`]
//! vocabulary and falls back to [`ConditionLabel::Clean`] when nothing matches.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

/// Physical condition of a panel as reported by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum ConditionLabel {
    #[serde(rename = "clean")]
    Clean,
    #[serde(rename = "dusty")]
    Dusty,
    #[serde(rename = "bird drop")]
    BirdDrop,
    #[serde(rename = "snow covered")]
    SnowCovered,
    #[serde(rename = "electrical damage")]
    ElectricalDamage,
    #[serde(rename = "physical damage")]
    PhysicalDamage,
}

impl ConditionLabel {
    /// Lower-case key used for matching classifier output
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::Dusty => "dusty",
            Self::BirdDrop => "bird drop",
            Self::SnowCovered => "snow covered",
            Self::ElectricalDamage => "electrical damage",
            Self::PhysicalDamage => "physical damage",
        }
    }

    /// Human readable form, e.g. "Bird Drop"
    pub fn title_case(&self) -> String {
        self.as_str()
            .split(' ')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// All labels in lookup order
    pub fn all() -> impl Iterator<Item = ConditionLabel> {
        Self::iter()
    }

    /// Percentage-point loss attributed to this condition
    pub fn loss_percent(&self) -> f64 {
        DefectLossTable::standard().loss(*self)
    }
}

impl Default for ConditionLabel {
    fn default() -> Self {
        Self::Clean
    }
}

impl std::fmt::Display for ConditionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ConditionLabel {
    type Err = String;

    /// Exact (case-insensitive) parse; use [`normalize_label`] for classifier text.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::iter()
            .find(|label| label.as_str() == wanted)
            .ok_or_else(|| format!("Unknown panel condition: {}", s))
    }
}

/// Immutable mapping from condition to energy loss in percentage points.
///
/// Iteration order is significant: [`normalize_label`] returns the first entry
/// whose key occurs in the classifier's answer.
#[derive(Debug, Clone, PartialEq)]
pub struct DefectLossTable {
    entries: Vec<(ConditionLabel, f64)>,
}

static STANDARD_TABLE: Lazy<DefectLossTable> = Lazy::new(|| DefectLossTable {
    entries: vec![
        (ConditionLabel::Clean, 0.0),
        (ConditionLabel::Dusty, 20.0),
        (ConditionLabel::BirdDrop, 30.0),
        (ConditionLabel::SnowCovered, 40.0),
        (ConditionLabel::ElectricalDamage, 50.0),
        (ConditionLabel::PhysicalDamage, 60.0),
    ],
});

impl DefectLossTable {
    /// The process-wide table, built on first use
    pub fn standard() -> &'static DefectLossTable {
        &STANDARD_TABLE
    }

    pub fn loss(&self, label: ConditionLabel) -> f64 {
        self.entries
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, loss)| *loss)
            .unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ConditionLabel, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// First label (in table order) whose key is a substring of `text`
    pub fn first_match(&self, text: &str) -> Option<ConditionLabel> {
        self.entries
            .iter()
            .map(|(label, _)| *label)
            .find(|label| text.contains(label.as_str()))
    }
}

/// Vocabulary label contained in raw classifier text, if any
pub fn match_label(raw: &str) -> Option<ConditionLabel> {
    DefectLossTable::standard().first_match(&raw.trim().to_lowercase())
}

/// Map raw classifier output onto the condition vocabulary.
///
/// `None`, blank text and unrecognised answers all yield `Clean`.
pub fn normalize_label(raw: Option<&str>) -> ConditionLabel {
    raw.and_then(match_label).unwrap_or_default()
}
