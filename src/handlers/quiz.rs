// src/handlers/quiz.rs

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError,
    gateway::prompts::{DEFAULT_DIFFICULTY, request_quiz},
    models::{
        quiz::{
            GenerateQuizRequest, GenerateQuizResponse, QUESTIONS_PER_QUIZ, QuizQuestion, QuizView,
            ScoreResponse, SubmitAnswerRequest, SubmitAnswerResponse,
        },
        session::{QuizSession, SubmitOutcome},
    },
    state::{SessionStore, SharedGateway},
    utils::{quiz_parser::parse, sanitize::sanitize},
};

/// Questions recovered from one model completion, plus anything worth telling the user.
#[derive(Debug, Default)]
struct BuiltQuiz {
    questions: Vec<QuizQuestion>,
    warnings: Vec<String>,
}

/// Turns raw model output into gradable questions.
///
/// Never fails: unparseable output yields no questions and a warning. Questions whose
/// answer letter matches none of their options are dropped so grading stays well-defined.
fn build_quiz(raw: &str) -> BuiltQuiz {
    let parsed = match parse(&sanitize(raw)) {
        Ok(questions) => questions,
        Err(e) => {
            tracing::warn!("{}", e);
            return BuiltQuiz {
                questions: Vec::new(),
                warnings: vec![format!("⚠️ {}", e)],
            };
        }
    };

    let mut built = BuiltQuiz::default();
    for (i, question) in parsed.into_iter().enumerate() {
        if question.is_answer_resolvable() {
            built.questions.push(question);
        } else {
            tracing::warn!(
                "Dropping question {}: answer {} matches none of {:?}",
                i + 1,
                question.answer_letter,
                question.options
            );
            built.warnings.push(format!(
                "⚠️ Question {} was dropped: its answer {} matches none of its options",
                i + 1,
                question.answer_letter
            ));
        }
    }

    if built.questions.len() != QUESTIONS_PER_QUIZ {
        tracing::warn!(
            "Expected {} questions, model output gave {}",
            QUESTIONS_PER_QUIZ,
            built.questions.len()
        );
        built.warnings.push(format!(
            "⚠️ Expected {} questions but got {}",
            QUESTIONS_PER_QUIZ,
            built.questions.len()
        ));
    }

    built
}

/// Generates a new quiz from the given text and replaces the current session.
///
/// * Gateway failures surface as 502/504 and leave the previous session in place.
/// * Malformed model output is not an error: the new session is empty and `warnings` says why.
pub async fn generate_quiz(
    State(gateway): State<SharedGateway>,
    State(store): State<SessionStore>,
    Json(payload): Json<GenerateQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let difficulty = payload.difficulty.unwrap_or(DEFAULT_DIFFICULTY);
    let raw = request_quiz(gateway.as_ref(), &payload.text, difficulty).await?;

    let built = build_quiz(&raw);
    let session = QuizSession::start(built.questions);
    let response = GenerateQuizResponse {
        questions: session.public_questions(),
        total: session.questions().len(),
        warnings: built.warnings,
    };

    if session.is_empty() {
        tracing::warn!("Started an empty quiz session: no usable questions in model output");
    } else {
        tracing::info!("Started quiz session with {} questions", response.total);
    }
    *store.lock().await = Some(session);

    Ok(Json(response))
}

/// Returns the current quiz without answers.
pub async fn get_quiz(State(store): State<SessionStore>) -> Result<impl IntoResponse, AppError> {
    let guard = store.lock().await;
    let session = guard.as_ref().ok_or_else(no_quiz)?;
    let (score, total) = session.current_score();

    Ok(Json(QuizView {
        questions: session.public_questions(),
        score,
        total,
        created_at: session.created_at(),
    }))
}

/// Grades the answer to one question.
///
/// Each question is graded once; later submits return `already_submitted` and do not re-score.
pub async fn submit_answer(
    State(store): State<SessionStore>,
    Path(index): Path<usize>,
    Json(payload): Json<SubmitAnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let mut guard = store.lock().await;
    let session = guard.as_mut().ok_or_else(no_quiz)?;

    let outcome = session.submit_answer(index, &payload.choice)?;
    let (score, total) = session.current_score();

    let (message, diagnostic) = grading_message(index, &session.questions()[index], &outcome);

    Ok(Json(SubmitAnswerResponse {
        outcome,
        message,
        diagnostic,
        score,
        total,
    }))
}

/// Returns the running score as (score, total).
pub async fn get_score(State(store): State<SessionStore>) -> Result<impl IntoResponse, AppError> {
    let guard = store.lock().await;
    let session = guard.as_ref().ok_or_else(no_quiz)?;
    let (score, total) = session.current_score();

    Ok(Json(ScoreResponse { score, total }))
}

/// User-facing message for a graded answer, plus a diagnostic when the quiz data is inconsistent.
fn grading_message(
    index: usize,
    question: &QuizQuestion,
    outcome: &SubmitOutcome,
) -> (String, Option<String>) {
    match outcome {
        SubmitOutcome::Correct => ("✅ Correct!".to_string(), None),
        SubmitOutcome::Incorrect {
            correct_option: Some(option),
        } => (format!("❌ Wrong! Correct answer: {}", option), None),
        SubmitOutcome::Incorrect {
            correct_option: None,
        } => (
            "❌ Wrong!".to_string(),
            Some(format!(
                "The quiz for question {} names answer {} but none of its options carries that letter",
                index + 1,
                question.answer_letter
            )),
        ),
        SubmitOutcome::AlreadySubmitted => (
            format!("Question {} was already submitted", index + 1),
            None,
        ),
    }
}

fn no_quiz() -> AppError {
    AppError::NotFound("No quiz has been generated yet".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::quiz::AnswerLetter;

    fn question_json(n: usize, answer: &str) -> String {
        format!(
            r#"{{"question":"Q{n}","options":["A) a{n}","B) b{n}","C) c{n}","D) d{n}"],"answer":"{answer}"}}"#
        )
    }

    fn quiz_json(answers: &[&str]) -> String {
        let items: Vec<String> = answers
            .iter()
            .enumerate()
            .map(|(n, a)| question_json(n, a))
            .collect();
        format!("[{}]", items.join(","))
    }

    #[test]
    fn test_build_quiz_full() {
        let raw = format!("```json\n{}\n```", quiz_json(&["A", "B", "C", "D", "A"]));
        let built = build_quiz(&raw);
        assert_eq!(built.questions.len(), 5);
        assert!(built.warnings.is_empty());
        assert_eq!(built.questions[3].answer_letter, AnswerLetter::D);
    }

    #[test]
    fn test_build_quiz_garbage() {
        let built = build_quiz("not json at all");
        assert!(built.questions.is_empty());
        assert_eq!(built.warnings.len(), 1);
        assert!(built.warnings[0].contains("Could not parse quiz"));
    }

    #[test]
    fn test_build_quiz_short_count_is_kept_with_warning() {
        let built = build_quiz(&quiz_json(&["B", "C"]));
        assert_eq!(built.questions.len(), 2);
        assert_eq!(built.warnings, vec!["⚠️ Expected 5 questions but got 2".to_string()]);
    }

    #[test]
    fn test_build_quiz_drops_unresolvable_answer() {
        let mut items: Vec<String> = (0..4).map(|n| question_json(n, "A")).collect();
        items.push(r#"{"question":"bad","options":["1","2","3","4"],"answer":"B"}"#.to_string());
        let built = build_quiz(&format!("[{}]", items.join(",")));

        assert_eq!(built.questions.len(), 4);
        assert!(built.questions.iter().all(|q| q.question != "bad"));
        assert_eq!(built.warnings.len(), 2);
        assert!(built.warnings[0].contains("Question 5 was dropped"));
    }

    #[test]
    fn test_grading_message_for_unresolvable_answer() {
        let question = QuizQuestion {
            question: "2+2?".to_string(),
            options: [
                "3".to_string(),
                "4".to_string(),
                "5".to_string(),
                "6".to_string(),
            ],
            answer_letter: AnswerLetter::B,
        };
        let mut session = QuizSession::start(vec![question]);
        let outcome = session.submit_answer(0, "A) 3").unwrap();

        let (message, diagnostic) = grading_message(0, &session.questions()[0], &outcome);
        assert_eq!(message, "❌ Wrong!");
        assert_eq!(
            diagnostic.as_deref(),
            Some("The quiz for question 1 names answer B but none of its options carries that letter")
        );

        let response = SubmitAnswerResponse {
            outcome,
            message,
            diagnostic,
            score: 0,
            total: 1,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["result"], "incorrect");
        assert!(json["correct_option"].is_null());
        assert!(json["diagnostic"].as_str().unwrap().contains("answer B"));
    }

    #[test]
    fn test_grading_message_for_resolved_outcomes() {
        let question: QuizQuestion = serde_json::from_str(&question_json(0, "B")).unwrap();

        let (message, diagnostic) = grading_message(0, &question, &SubmitOutcome::Correct);
        assert_eq!(message, "✅ Correct!");
        assert!(diagnostic.is_none());

        let wrong = SubmitOutcome::Incorrect {
            correct_option: question.correct_option().map(str::to_string),
        };
        let (message, diagnostic) = grading_message(0, &question, &wrong);
        assert_eq!(message, "❌ Wrong! Correct answer: B) b0");
        assert!(diagnostic.is_none());

        let (message, _) = grading_message(2, &question, &SubmitOutcome::AlreadySubmitted);
        assert_eq!(message, "Question 3 was already submitted");
    }
}
