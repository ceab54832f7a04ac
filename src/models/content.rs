// src/models/content.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// DTO for requesting a summary.
#[derive(Debug, Deserialize, Validate)]
pub struct SummarizeRequest {
    #[validate(length(min = 1, max = 100000))]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    pub summary: String,
}

/// DTO for requesting a translation. `language` defaults to Hindi.
#[derive(Debug, Deserialize, Validate)]
pub struct TranslateRequest {
    #[validate(length(min = 1, max = 100000))]
    pub text: String,
    #[validate(length(min = 1, max = 50))]
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    pub language: String,
    pub translation: String,
}
