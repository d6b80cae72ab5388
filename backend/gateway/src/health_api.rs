//! Gateway Health API

use axum::{extract::State, Json};
use serde::Serialize;

use crate::server::GatewayState;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub ocr: String,
    pub chat: String,
}

/// Handler for `GET /api/health`
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok",
        service: "legalens",
        version: env!("CARGO_PKG_VERSION"),
        ocr: state.pipeline.extractor().ocr_name().to_string(),
        chat: state.chat.name().to_string(),
    })
}
