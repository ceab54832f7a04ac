// src/models/session.rs

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::quiz::{PublicQuestion, QuizQuestion};

/// The mutable record of a generated quiz plus submission and scoring progress.
///
/// Created fresh for every generation request; only `submit_answer` mutates it.
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    submitted: Vec<bool>,
    score: u32,
    created_at: DateTime<Utc>,
}

/// Result of submitting an answer to one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum SubmitOutcome {
    Correct,
    /// `correct_option` is `None` when the answer letter matches no option.
    Incorrect { correct_option: Option<String> },
    /// The question was already graded; nothing changed.
    AlreadySubmitted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    IndexOutOfRange { index: usize, total: usize },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::IndexOutOfRange { index, total } => write!(
                f,
                "Question index {} is out of range (quiz has {} questions)",
                index, total
            ),
        }
    }
}

impl std::error::Error for SessionError {}

impl QuizSession {
    /// Starts a new session. Always succeeds, even with no questions.
    pub fn start(questions: Vec<QuizQuestion>) -> Self {
        let submitted = vec![false; questions.len()];
        Self {
            questions,
            submitted,
            score: 0,
            created_at: Utc::now(),
        }
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn submitted(&self) -> &[bool] {
        &self.submitted
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Grades the chosen option text for question `index`, exactly once.
    ///
    /// * Correct when `chosen` starts with the question's answer letter; score += 1.
    /// * A second submit for the same index is a no-op returning `AlreadySubmitted`.
    pub fn submit_answer(
        &mut self,
        index: usize,
        chosen: &str,
    ) -> Result<SubmitOutcome, SessionError> {
        let total = self.questions.len();
        let question = self
            .questions
            .get(index)
            .ok_or(SessionError::IndexOutOfRange { index, total })?;

        if self.submitted[index] {
            return Ok(SubmitOutcome::AlreadySubmitted);
        }

        let outcome = if question.answer_letter.labels(chosen) {
            self.score += 1;
            SubmitOutcome::Correct
        } else {
            let correct_option = question.correct_option().map(str::to_string);
            if correct_option.is_none() {
                tracing::warn!(
                    "Answer lookup failed for question {}: letter {} matches none of {:?}",
                    index,
                    question.answer_letter,
                    question.options
                );
            }
            SubmitOutcome::Incorrect { correct_option }
        };

        self.submitted[index] = true;
        Ok(outcome)
    }

    /// Returns (score, total).
    pub fn current_score(&self) -> (u32, usize) {
        (self.score, self.questions.len())
    }

    /// Question views with answers hidden.
    pub fn public_questions(&self) -> Vec<PublicQuestion> {
        self.questions
            .iter()
            .zip(&self.submitted)
            .enumerate()
            .map(|(index, (q, submitted))| PublicQuestion {
                index,
                question: q.question.clone(),
                options: q.options.to_vec(),
                submitted: *submitted,
            })
            .collect()
    }
}
