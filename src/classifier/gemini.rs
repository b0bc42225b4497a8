//! Google Gemini `generateContent` client for panel condition classification

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

use super::{ClassifierError, ConditionClassifier};
use crate::domain::PanelImage;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

const SYSTEM_INSTRUCTION: &str = "You are a solar panel expert. Return exactly one label matching the image condition. \
Options: clean, dusty, bird drop, snow covered, physical damage, electrical damage. \
Only return the label name, nothing else.";

const USER_PROMPT: &str = "Analyze this solar panel image and classify its condition.";

/// Gemini API client
#[derive(Clone)]
pub struct GeminiClassifier {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClassifier {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ClassifierError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ClassifierError::MissingApiKey);
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("panel-tilt-advisor/", env!("CARGO_PKG_VERSION"))),
        );
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            model: model.into(),
            api_key,
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    fn request_body(image: &PanelImage) -> GenerateContentRequest<'_> {
        GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part::Text { text: SYSTEM_INSTRUCTION }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![
                    Part::Text { text: USER_PROMPT },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: &image.mime_type,
                            data: &image.data,
                        },
                    },
                ],
            }],
        }
    }
}

#[async_trait]
impl ConditionClassifier for GeminiClassifier {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn classify(&self, image: &PanelImage) -> Result<String, ClassifierError> {
        let url = self.url();
        debug!(%url, model = %self.model, mime_type = %image.mime_type, "requesting panel classification");

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::request_body(image))
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            error!(status = status.as_u16(), "Gemini API returned error status");
            return Err(ClassifierError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|e| ClassifierError::Decode(e.to_string()))?;

        let text = parsed.answer_text();
        if text.trim().is_empty() {
            return Err(ClassifierError::EmptyResponse);
        }

        debug!(answer = %text.trim(), "classifier answered");
        Ok(text)
    }
}

// Gemini API request structures
#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text { text: &'a str },
    InlineData { inline_data: InlineData<'a> },
}

#[derive(Debug, Serialize)]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

// Gemini API response structures
#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate
    fn answer_text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}
