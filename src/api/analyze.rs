use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use validator::{Validate, ValidationError};

use crate::{
    api::{error::ApiError, response::ApiResponse},
    controller::AppState,
    domain::{AnalysisOutcome, ConditionAssessment, ConditionLabel, PanelImage, TiltReport},
};

/// Request body for POST /api/v1/analyze. Both fields may be omitted.
#[derive(Debug, Deserialize, Validate)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    #[validate(nested)]
    pub image: Option<ImagePayload>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ImagePayload {
    #[validate(custom(function = "validate_image_mime"))]
    pub mime_type: String,
    /// Base64 encoded image bytes
    #[validate(length(min = 1, message = "image data must not be empty"))]
    pub data: String,
}

#[allow(clippy::ptr_arg)]
fn validate_image_mime(mime_type: &String) -> Result<(), ValidationError> {
    if mime_type.trim().to_lowercase().starts_with("image/") {
        Ok(())
    } else {
        let mut err = ValidationError::new("mime_type");
        err.message = Some("mime_type must be an image/* type".into());
        Err(err)
    }
}

impl From<ImagePayload> for PanelImage {
    fn from(payload: ImagePayload) -> Self {
        PanelImage::new(payload.mime_type.trim(), payload.data)
    }
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    #[serde(flatten)]
    pub report: TiltReport,
    /// Recommended tilt in whole degrees, absent for the no-input answer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle_deg: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition_label: Option<ConditionLabel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessment: Option<ConditionAssessment>,
}

impl From<AnalysisOutcome> for AnalyzeResponse {
    fn from(outcome: AnalysisOutcome) -> Self {
        let report = TiltReport::from(&outcome);
        match outcome {
            AnalysisOutcome::NoInput => Self {
                report,
                angle_deg: None,
                condition_label: None,
                assessment: None,
            },
            AnalysisOutcome::Analyzed { result, assessment } => Self {
                report,
                angle_deg: Some(result.angle.degrees()),
                condition_label: Some(result.condition),
                assessment: Some(assessment),
            },
        }
    }
}

/// POST /api/v1/analyze - Recommend a tilt angle for a panel photo and latitude
pub async fn analyze_panel(
    State(st): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<AnalyzeResponse>>, ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let started = Instant::now();
    let image = request.image.map(PanelImage::from);
    let outcome = st.advisor.analyze(image.as_ref(), request.latitude).await;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    Ok(Json(
        ApiResponse::success(AnalyzeResponse::from(outcome)).with_duration(elapsed_ms),
    ))
}
