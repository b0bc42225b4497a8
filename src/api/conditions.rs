use axum::Json;
use serde::Serialize;

use crate::{
    api::response::ApiResponse,
    domain::{ConditionLabel, DefectLossTable},
};

#[derive(Debug, Serialize)]
pub struct ConditionEntry {
    pub label: ConditionLabel,
    pub display: String,
    pub loss_percent: f64,
}

/// GET /api/v1/conditions - Condition vocabulary with its efficiency losses
pub async fn list_conditions() -> Json<ApiResponse<Vec<ConditionEntry>>> {
    let entries: Vec<ConditionEntry> = DefectLossTable::standard()
        .iter()
        .map(|(label, loss_percent)| ConditionEntry {
            label,
            display: label.title_case(),
            loss_percent,
        })
        .collect();
    let count = entries.len();
    Json(ApiResponse::success(entries).with_count(count))
}
