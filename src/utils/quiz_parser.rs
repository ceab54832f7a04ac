// src/utils/quiz_parser.rs

use std::fmt;

use crate::models::quiz::QuizQuestion;

/// Model output that could not be decoded into quiz questions.
#[derive(Debug)]
pub struct ParseError {
    cause: serde_json::Error,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Could not parse quiz: {}", self.cause)
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}

/// Decodes sanitized model output into a list of questions.
///
/// Expects a JSON array of `{question, options[4], answer}` objects. Does not check
/// that the answer letter matches one of the options; see `QuizQuestion::correct_option`.
pub fn parse(sanitized: &str) -> Result<Vec<QuizQuestion>, ParseError> {
    serde_json::from_str(sanitized).map_err(|cause| ParseError { cause })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::quiz::AnswerLetter;
    use crate::utils::sanitize::sanitize;

    const SCENARIO_A: &str =
        r#"[{"question":"2+2?","options":["A) 3","B) 4","C) 5","D) 6"],"answer":"B"}]"#;

    fn five_questions() -> Vec<QuizQuestion> {
        AnswerLetter::ALL
            .iter()
            .chain(std::iter::once(&AnswerLetter::A))
            .enumerate()
            .map(|(i, letter)| QuizQuestion {
                question: format!("Question {}", i + 1),
                options: [
                    format!("A) first {}", i),
                    format!("B) second {}", i),
                    format!("C) third {}", i),
                    format!("D) fourth {}", i),
                ],
                answer_letter: *letter,
            })
            .collect()
    }

    #[test]
    fn test_parse_single_question() {
        let questions = parse(SCENARIO_A).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question, "2+2?");
        assert_eq!(questions[0].answer_letter, AnswerLetter::B);
        assert_eq!(questions[0].options[1], "B) 4");
    }

    #[test]
    fn test_parse_recovers_serialized_quiz() {
        let quiz = five_questions();
        let json = serde_json::to_string_pretty(&quiz).unwrap();
        assert_eq!(parse(&json).unwrap(), quiz);
    }

    #[test]
    fn test_parse_fenced_output_after_sanitizing() {
        let raw = format!("```json\n{}\n```", SCENARIO_A);
        let questions = parse(&sanitize(&raw)).unwrap();
        assert_eq!(questions.len(), 1);
        assert!(parse(&raw).is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse("not json at all").unwrap_err();
        assert!(err.to_string().starts_with("Could not parse quiz"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_parse_rejects_structural_problems() {
        let cases = [
            // missing answer
            r#"[{"question":"q","options":["A) a","B) b","C) c","D) d"]}]"#,
            // three options
            r#"[{"question":"q","options":["A) a","B) b","C) c"],"answer":"A"}]"#,
            // five options
            r#"[{"question":"q","options":["A) a","B) b","C) c","D) d","E) e"],"answer":"A"}]"#,
            // letter outside A-D
            r#"[{"question":"q","options":["A) a","B) b","C) c","D) d"],"answer":"E"}]"#,
            // object instead of array
            r#"{"question":"q","options":["A) a","B) b","C) c","D) d"],"answer":"A"}"#,
            // truncated
            r#"[{"question":"q","options":["A) a""#,
            "",
        ];
        for case in cases {
            assert!(parse(case).is_err(), "should reject: {}", case);
        }
    }

    #[test]
    fn test_parse_accepts_lowercase_letter_and_extra_fields() {
        let raw = r#"[{"question":"q","options":["A) a","B) b","C) c","D) d"],"answer":"c","explanation":"x"}]"#;
        let questions = parse(raw).unwrap();
        assert_eq!(questions[0].answer_letter, AnswerLetter::C);
    }

    #[test]
    fn test_parse_keeps_unresolvable_answer() {
        let raw = r#"[{"question":"q","options":["a","b","c","d"],"answer":"A"}]"#;
        let questions = parse(raw).unwrap();
        assert_eq!(questions[0].correct_option(), None);
    }
}
