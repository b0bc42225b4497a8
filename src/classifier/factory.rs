use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use super::{ClassifierError, ConditionClassifier, GeminiClassifier, StaticClassifier};
use crate::config::ClassifierConfig;

/// Which classifier backend to construct
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierMode {
    /// Google Gemini multimodal model over HTTPS
    Gemini,
    /// Fixed answer, no network access
    Static,
}

impl std::fmt::Display for ClassifierMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Gemini => "gemini",
            Self::Static => "static",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for ClassifierMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "static" => Ok(Self::Static),
            _ => Err(format!("Unknown classifier mode: {}", s)),
        }
    }
}

/// Build the classifier once at startup so it can be injected into the advisor
pub fn build_classifier(cfg: &ClassifierConfig) -> Result<Arc<dyn ConditionClassifier>, ClassifierError> {
    let classifier: Arc<dyn ConditionClassifier> = match cfg.mode {
        ClassifierMode::Gemini => {
            let api_key = cfg.api_key.clone().ok_or(ClassifierError::MissingApiKey)?;
            Arc::new(GeminiClassifier::new(
                cfg.base_url.clone(),
                cfg.model.clone(),
                api_key,
                Duration::from_secs(cfg.timeout_seconds.max(1)),
            )?)
        }
        ClassifierMode::Static => Arc::new(StaticClassifier::new(cfg.static_label.clone())),
    };

    info!(mode = %cfg.mode, classifier = classifier.name(), "condition classifier ready");
    Ok(classifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing() {
        assert_eq!("GEMINI".parse::<ClassifierMode>(), Ok(ClassifierMode::Gemini));
        assert_eq!("static".parse::<ClassifierMode>(), Ok(ClassifierMode::Static));
        assert!("vision".parse::<ClassifierMode>().is_err());
    }

    #[test]
    fn test_static_mode_builds_offline() {
        let cfg = ClassifierConfig {
            mode: ClassifierMode::Static,
            ..ClassifierConfig::default()
        };
        let classifier = build_classifier(&cfg).unwrap();
        assert_eq!(classifier.name(), "static");
    }

    #[test]
    fn test_gemini_mode_requires_key() {
        let cfg = ClassifierConfig {
            mode: ClassifierMode::Gemini,
            api_key: None,
            ..ClassifierConfig::default()
        };
        assert!(matches!(build_classifier(&cfg), Err(ClassifierError::MissingApiKey)));
    }

    #[test]
    fn test_gemini_mode_with_key() {
        let cfg = ClassifierConfig {
            mode: ClassifierMode::Gemini,
            api_key: Some("test-key".to_string()),
            ..ClassifierConfig::default()
        };
        assert_eq!(build_classifier(&cfg).unwrap().name(), "gemini");
    }
}
