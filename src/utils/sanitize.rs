// src/utils/sanitize.rs

use std::sync::LazyLock;

use regex::Regex;

const FENCE: &str = "```";

/// A bare identifier directly after the fence, alone on its line, e.g. "javascript\n".
static LANGUAGE_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9_+-]*[ \t]*\r?\n").expect("language tag pattern is valid")
});

/// Strips the code fence the language model tends to wrap its output in.
///
/// * Input that does not start with a triple-backtick fence is returned unchanged.
/// * Otherwise the opening backticks are removed, then a language tag that starts right
///   after them (`json` in any case, or any other bare word on its own line), then the
///   closing backticks, and the rest is trimmed.
/// * An unlabelled fence keeps all of its content, including a bare first line.
///
/// The result never starts with a fence, so applying it twice is the same as once.
pub fn sanitize(raw: &str) -> String {
    let mut text = raw;
    while text.starts_with(FENCE) {
        let body = strip_language_tag(text.trim_start_matches('`'));
        text = body.trim_end_matches('`').trim();
    }
    text.to_string()
}

/// `body` is the text immediately after the opening backticks, untrimmed.
fn strip_language_tag(body: &str) -> &str {
    let json_label = body.get(..4).is_some_and(|prefix| prefix.eq_ignore_ascii_case("json"))
        && !body[4..].starts_with(|c: char| c.is_ascii_alphanumeric() || c == '_');
    if json_label {
        return &body[4..];
    }
    match LANGUAGE_TAG.find(body) {
        Some(tag) => &body[tag.end()..],
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "",
        "[]",
        "  [1, 2]  \n",
        "not json at all",
        "```",
        "``````",
        "```json\n[{\"a\": 1}]\n```",
        "```JSON\n[]```",
        "```json[1]```",
        "```\n[2]\n```",
        "```javascript\n[3]\n```",
        "``` ```[4]```",
        "```json\n[\"has `tick` inside\"]\n```",
        "json without fence",
        "```\nhello\nworld\n```",
        "```jsonish[7]```",
        "``` json\n[5]\n```",
    ];

    #[test]
    fn test_unfenced_input_is_untouched() {
        for raw in ["", "[]", "  [1, 2]  \n", "not json at all", "json without fence", "`[1]`"] {
            assert_eq!(sanitize(raw), raw);
        }
    }

    #[test]
    fn test_idempotent() {
        for raw in SAMPLES {
            let once = sanitize(raw);
            assert_eq!(sanitize(&once), once, "input: {:?}", raw);
        }
    }

    #[test]
    fn test_strips_json_fence() {
        let raw = "```json\n[{\"question\":\"2+2?\"}]\n```";
        assert_eq!(sanitize(raw), "[{\"question\":\"2+2?\"}]");
    }

    #[test]
    fn test_strips_label_case_insensitive_and_without_newline() {
        assert_eq!(sanitize("```JSON\n[]```"), "[]");
        assert_eq!(sanitize("```json[1]```"), "[1]");
    }

    #[test]
    fn test_strips_unlabelled_and_other_labels() {
        assert_eq!(sanitize("```\n[2]\n```"), "[2]");
        assert_eq!(sanitize("```javascript\n[3]\n```"), "[3]");
    }

    #[test]
    fn test_nested_fence_markers() {
        assert_eq!(sanitize("``` ```[4]```"), "[4]");
    }

    #[test]
    fn test_inner_backticks_survive() {
        assert_eq!(
            sanitize("```json\n[\"has `tick` inside\"]\n```"),
            "[\"has `tick` inside\"]"
        );
    }

    #[test]
    fn test_unlabelled_fence_keeps_first_line() {
        assert_eq!(sanitize("```\nhello\nworld\n```"), "hello\nworld");
        assert_eq!(sanitize("```\n[1,\n2]\n```"), "[1,\n2]");
        assert_eq!(sanitize("``` json\n[5]\n```"), "json\n[5]");
    }

    #[test]
    fn test_label_must_be_a_whole_word() {
        assert_eq!(sanitize("```jsonc\n[6]\n```"), "[6]");
        assert_eq!(sanitize("```jsonish[7]```"), "jsonish[7]");
    }

    #[test]
    fn test_empty_fence() {
        assert_eq!(sanitize("```"), "");
        assert_eq!(sanitize("``````"), "");
    }
}
