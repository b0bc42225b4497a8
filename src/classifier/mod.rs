//! Panel condition classification.
//!
//! The classifier is an external, unreliable collaborator: it answers with free
//! text that may be empty, off-vocabulary or missing entirely. Callers must pass
//! its output through [`crate::domain::normalize_label`].

pub mod factory;
pub mod gemini;
pub mod fixed;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::PanelImage;

pub use factory::*;
pub use fixed::*;
pub use gemini::*;

/// Classifier-specific errors
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Classifier returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Failed to decode classifier response: {0}")]
    Decode(String),
    #[error("Classifier returned an empty answer")]
    EmptyResponse,
    #[error("Classifier did not answer within {0:?}")]
    Timeout(std::time::Duration),
    #[error("Classifier API key is not configured")]
    MissingApiKey,
}

/// Upper bound, in characters, for error text surfaced to API clients
pub const MAX_REASON_CHARS: usize = 200;

impl ClassifierError {
    /// Bounded description for API responses; the full error belongs in logs
    pub fn summary(&self) -> String {
        match self {
            Self::Status { status, body } => {
                format!("HTTP {}: {}", status, truncate_chars(body.trim(), MAX_REASON_CHARS))
            }
            other => truncate_chars(&other.to_string(), MAX_REASON_CHARS),
        }
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConditionClassifier: Send + Sync {
    /// Short name used in logs and health output
    fn name(&self) -> &'static str;

    /// Raw text verdict for the image
    async fn classify(&self, image: &PanelImage) -> Result<String, ClassifierError>;
}
