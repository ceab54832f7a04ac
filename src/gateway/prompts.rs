// src/gateway/prompts.rs

use super::{ChatMessage, CompletionOptions, GatewayError, ModelGateway};
use crate::models::quiz::QUESTIONS_PER_QUIZ;

pub const DEFAULT_DIFFICULTY: u8 = 5;
pub const DEFAULT_LANGUAGE: &str = "Hindi";

const QUIZ_SYSTEM_PROMPT: &str = "You are a teacher who creates multiple-choice quizzes. \
Return output strictly in JSON. Do not include any extra text, explanations, or markdown.";

const QUIZ_OPTIONS: CompletionOptions = CompletionOptions {
    max_tokens: 700,
    temperature: Some(0.7),
};

const SUMMARY_OPTIONS: CompletionOptions = CompletionOptions {
    max_tokens: 200,
    temperature: Some(0.3),
};

const TRANSLATION_OPTIONS: CompletionOptions = CompletionOptions {
    max_tokens: 500,
    temperature: None,
};

pub fn quiz_messages(text: &str, difficulty: u8) -> Vec<ChatMessage> {
    let user = format!(
        "Create {count} multiple-choice questions from the following text.\n\
Return a JSON array where each object has:\n\
- \"question\": the question text\n\
- \"options\": a list of 4 strings, each starting with A), B), C), D)\n\
- \"answer\": the correct option letter (\"A\", \"B\", \"C\", or \"D\")\n\
\n\
Difficulty: {difficulty}\n\
\n\
Text:\n\
{text}\n",
        count = QUESTIONS_PER_QUIZ,
    );
    vec![ChatMessage::system(QUIZ_SYSTEM_PROMPT), ChatMessage::user(user)]
}

pub fn summary_messages(text: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system("You are a concise summarizer."),
        ChatMessage::user(format!("Summarize this text into 5 bullet points:\n\n{}", text)),
    ]
}

pub fn translation_messages(text: &str, language: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system("You are a professional translator."),
        ChatMessage::user(format!("Translate this into {}:\n\n{}", language, text)),
    ]
}

/// Asks the model for a quiz. Returns the raw, possibly fenced, completion text.
pub async fn request_quiz(
    gateway: &dyn ModelGateway,
    text: &str,
    difficulty: u8,
) -> Result<String, GatewayError> {
    tracing::info!("Requesting quiz (difficulty {}, {} chars)", difficulty, text.len());
    gateway.complete(&quiz_messages(text, difficulty), QUIZ_OPTIONS).await
}

pub async fn request_summary(gateway: &dyn ModelGateway, text: &str) -> Result<String, GatewayError> {
    tracing::info!("Requesting summary ({} chars)", text.len());
    gateway.complete(&summary_messages(text), SUMMARY_OPTIONS).await
}

pub async fn request_translation(
    gateway: &dyn ModelGateway,
    text: &str,
    language: &str,
) -> Result<String, GatewayError> {
    tracing::info!("Requesting translation into {} ({} chars)", language, text.len());
    gateway
        .complete(&translation_messages(text, language), TRANSLATION_OPTIONS)
        .await
}
