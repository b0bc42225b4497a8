use async_trait::async_trait;

use super::{ClassifierError, ConditionClassifier};
use crate::domain::PanelImage;

/// Offline classifier that gives the same answer for every image.
///
/// Useful for demos and for running the service without API credentials.
#[derive(Debug, Clone)]
pub struct StaticClassifier {
    answer: String,
}

impl StaticClassifier {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
        }
    }
}

impl Default for StaticClassifier {
    fn default() -> Self {
        Self::new("clean")
    }
}

#[async_trait]
impl ConditionClassifier for StaticClassifier {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn classify(&self, _image: &PanelImage) -> Result<String, ClassifierError> {
        if self.answer.trim().is_empty() {
            return Err(ClassifierError::EmptyResponse);
        }
        Ok(self.answer.clone())
    }
}
