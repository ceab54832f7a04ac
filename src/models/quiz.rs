// src/models/quiz.rs

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use validator::Validate;

use crate::models::session::SubmitOutcome;

/// Number of questions the model is asked to produce per quiz.
pub const QUESTIONS_PER_QUIZ: usize = 5;

/// Number of options every question carries.
pub const OPTIONS_PER_QUESTION: usize = 4;

/// Label of one of the four options of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnswerLetter {
    A,
    B,
    C,
    D,
}

impl AnswerLetter {
    pub const ALL: [AnswerLetter; OPTIONS_PER_QUESTION] =
        [AnswerLetter::A, AnswerLetter::B, AnswerLetter::C, AnswerLetter::D];

    pub fn as_char(self) -> char {
        match self {
            AnswerLetter::A => 'A',
            AnswerLetter::B => 'B',
            AnswerLetter::C => 'C',
            AnswerLetter::D => 'D',
        }
    }

    /// Whether an option text is labelled with this letter.
    pub fn labels(self, option: &str) -> bool {
        option.starts_with(self.as_char())
    }
}

impl fmt::Display for AnswerLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for AnswerLetter {
    type Err = String;

    /// Accepts a single letter `A`-`D`, case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(AnswerLetter::A),
            "B" => Ok(AnswerLetter::B),
            "C" => Ok(AnswerLetter::C),
            "D" => Ok(AnswerLetter::D),
            _ => Err(format!("invalid answer letter {:?}, expected one of A, B, C, D", s)),
        }
    }
}

impl Serialize for AnswerLetter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AnswerLetter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A multiple-choice question as produced by the language model.
///
/// Field names match the JSON the model is asked for:
/// `{"question": "...", "options": ["A) ..", "B) ..", "C) ..", "D) .."], "answer": "B"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,

    /// Exactly four options, each expected to start with its letter label.
    pub options: [String; OPTIONS_PER_QUESTION],

    /// The letter of the correct option.
    #[serde(rename = "answer")]
    pub answer_letter: AnswerLetter,
}

impl QuizQuestion {
    /// First option labelled with the answer letter.
    ///
    /// `None` when the model claimed a letter that none of its options carry.
    pub fn correct_option(&self) -> Option<&str> {
        self.options
            .iter()
            .find(|opt| self.answer_letter.labels(opt))
            .map(String::as_str)
    }

    pub fn is_answer_resolvable(&self) -> bool {
        self.correct_option().is_some()
    }
}

/// DTO for sending a question to the page (excludes the answer until submitted).
#[derive(Debug, Serialize)]
pub struct PublicQuestion {
    pub index: usize,
    pub question: String,
    pub options: Vec<String>,
    pub submitted: bool,
}

/// DTO for requesting a new quiz.
#[derive(Debug, Deserialize, Validate)]
pub struct GenerateQuizRequest {
    #[validate(length(
        min = 1,
        max = 100000,
        message = "Text length must be between 1 and 100000 characters."
    ))]
    pub text: String,

    #[validate(range(min = 1, max = 10, message = "Difficulty must be between 1 and 10."))]
    pub difficulty: Option<u8>,
}

/// DTO for submitting the answer to one question.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitAnswerRequest {
    /// The full text of the chosen option, e.g. "B) 4".
    #[validate(length(min = 1, max = 1000))]
    pub choice: String,
}

/// DTO returned after generating a quiz.
/// `warnings` carries non-fatal problems with the model output (e.g. unparseable JSON).
#[derive(Debug, Serialize)]
pub struct GenerateQuizResponse {
    pub questions: Vec<PublicQuestion>,
    pub total: usize,
    pub warnings: Vec<String>,
}

/// DTO for the current state of the quiz.
#[derive(Debug, Serialize)]
pub struct QuizView {
    pub questions: Vec<PublicQuestion>,
    pub score: u32,
    pub total: usize,
    pub created_at: DateTime<Utc>,
}

/// DTO returned after grading one answer.
#[derive(Debug, Serialize)]
pub struct SubmitAnswerResponse {
    #[serde(flatten)]
    pub outcome: SubmitOutcome,
    pub message: String,
    /// Set when the quiz data itself is inconsistent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
    pub score: u32,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub score: u32,
    pub total: usize,
}
