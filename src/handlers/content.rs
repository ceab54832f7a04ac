// src/handlers/content.rs

use axum::{Json, extract::State, response::IntoResponse};
use validator::Validate;

use crate::{
    error::AppError,
    gateway::prompts::{DEFAULT_LANGUAGE, request_summary, request_translation},
    models::content::{SummarizeRequest, SummarizeResponse, TranslateRequest, TranslateResponse},
    state::SharedGateway,
};

/// Summarizes the text into five bullet points.
pub async fn summarize(
    State(gateway): State<SharedGateway>,
    Json(payload): Json<SummarizeRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let summary = request_summary(gateway.as_ref(), &payload.text).await?;

    Ok(Json(SummarizeResponse { summary }))
}

/// Translates the text into the requested language.
pub async fn translate(
    State(gateway): State<SharedGateway>,
    Json(payload): Json<TranslateRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let language = payload
        .language
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

    let translation = request_translation(gateway.as_ref(), &payload.text, &language).await?;

    Ok(Json(TranslateResponse {
        language,
        translation,
    }))
}
