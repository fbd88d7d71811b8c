//! Response processing — turns a raw provider response into a finished letter.
//!
//! Stages, with no state retained between calls:
//! 1. status check (non-2xx → `LlmError::Api` with the raw body)
//! 2. envelope decode (→ `LlmError::Decode`)
//! 3. `output_text` extraction from the first output item (→ `LlmError::EmptyContent`)
//! 4. structured `{title, cover_letter}` parse, degrading to "whole text is the body"
//!
//! Cleaning, name substitution and the contact header are applied afterwards by
//! `finalize_content`.

use serde::Deserialize;
use tracing::warn;

use crate::llm_client::{LlmError, RawResponse, ResponsesEnvelope};
use crate::models::history::PLACEHOLDER_TITLE;
use crate::models::profile::UserProfile;

/// Literal token the model sometimes leaves in the sign-off.
pub const NAME_PLACEHOLDER: &str = "[Your Name]";

const CODE_FENCE: &str = "```";
const HORIZONTAL_RULE: &str = "---";
const HEADER_MARKER: char = '#';

/// Extracted model output, before cleaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterPayload {
    pub title: String,
    pub cover_letter: String,
    /// False when the model ignored the JSON contract and the whole text was
    /// taken as the body under the placeholder title.
    pub structured: bool,
}

#[derive(Debug, Deserialize)]
struct StructuredLetter {
    title: String,
    cover_letter: String,
}

/// Runs stages 1–4 on a raw response.
pub fn parse_response(raw: &RawResponse) -> Result<LetterPayload, LlmError> {
    if !(200..=299).contains(&raw.status) {
        let message = match std::str::from_utf8(&raw.body) {
            Ok(text) if !text.trim().is_empty() => text.to_string(),
            _ => "Server error".to_string(),
        };
        return Err(LlmError::Api {
            status: raw.status,
            message,
        });
    }

    let envelope: ResponsesEnvelope = serde_json::from_slice(&raw.body)?;
    let text = envelope.output_text().ok_or(LlmError::EmptyContent)?;

    Ok(parse_letter_text(text))
}

/// Stage 4. Never fails: unparseable text becomes a degraded letter.
pub fn parse_letter_text(text: &str) -> LetterPayload {
    match serde_json::from_str::<StructuredLetter>(strip_json_fence(text)) {
        Ok(letter) => LetterPayload {
            title: letter.title,
            cover_letter: letter.cover_letter,
            structured: true,
        },
        Err(e) => {
            warn!("Model output was not the expected JSON object ({e}); using raw text as body");
            LetterPayload {
                title: PLACEHOLDER_TITLE.to_string(),
                cover_letter: text.to_string(),
                structured: false,
            }
        }
    }
}

/// Strips a ```json ... ``` wrapper around the structured payload, if present.
fn strip_json_fence(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix(CODE_FENCE) else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest).trim_start();
    rest.strip_suffix(CODE_FENCE).map(str::trim).unwrap_or(rest)
}

/// Removes markdown artifacts line by line: fence lines and horizontal rules are
/// dropped, header markers are stripped, everything else passes through.
pub fn clean_artifacts(text: &str) -> String {
    text.lines()
        .filter_map(|line| {
            let trimmed = line.trim();
            if trimmed.starts_with(CODE_FENCE) || trimmed.starts_with(HORIZONTAL_RULE) {
                None
            } else if trimmed.starts_with(HEADER_MARKER) {
                Some(trimmed.trim_start_matches(HEADER_MARKER).trim_start())
            } else {
                Some(line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Produces the text that is displayed and stored: cleaned body, name
/// placeholder filled in, contact header on top.
pub fn finalize_content(body: &str, profile: &UserProfile) -> String {
    let mut content = clean_artifacts(body);

    if let Some(name) = profile.name() {
        content = content.replace(NAME_PLACEHOLDER, name);
    }

    let header = profile.contact_header();
    if header.is_empty() {
        content
    } else {
        format!("{header}\n\n{content}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope_with_text(text: &str) -> Vec<u8> {
        serde_json::to_vec(&serde_json::json!({
            "output": [
                { "content": [ { "type": "output_text", "text": text } ] }
            ]
        }))
        .unwrap()
    }

    fn ok(body: Vec<u8>) -> RawResponse {
        RawResponse { status: 200, body }
    }

    #[test]
    fn test_structured_payload_round_trips() {
        let inner = r#"{"title": "Senior Dev at Apple", "cover_letter": "This is a generated cover letter."}"#;
        let payload = parse_response(&ok(envelope_with_text(inner))).unwrap();
        assert_eq!(payload.title, "Senior Dev at Apple");
        assert_eq!(payload.cover_letter, "This is a generated cover letter.");
        assert!(payload.structured);
    }

    #[test]
    fn test_unstructured_text_degrades_to_placeholder_title() {
        let payload = parse_response(&ok(envelope_with_text("Dear Hiring Manager,"))).unwrap();
        assert_eq!(payload.title, PLACEHOLDER_TITLE);
        assert_eq!(payload.cover_letter, "Dear Hiring Manager,");
        assert!(!payload.structured);
    }

    #[test]
    fn test_fenced_json_payload_is_unwrapped() {
        let inner = "```json\n{\"title\": \"T\", \"cover_letter\": \"C\"}\n```";
        let payload = parse_letter_text(inner);
        assert!(payload.structured);
        assert_eq!(payload.title, "T");
        assert_eq!(payload.cover_letter, "C");
    }

    #[test]
    fn test_json_missing_field_degrades() {
        let payload = parse_letter_text(r#"{"title": "Only a title"}"#);
        assert!(!payload.structured);
        assert_eq!(payload.cover_letter, r#"{"title": "Only a title"}"#);
    }

    #[test]
    fn test_server_error_with_empty_body_is_api_error() {
        let err = parse_response(&RawResponse {
            status: 500,
            body: Vec::new(),
        })
        .unwrap_err();
        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Server error");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_error_status_carries_raw_body() {
        let err = parse_response(&RawResponse {
            status: 401,
            body: br#"{"error":{"message":"Incorrect API key"}}"#.to_vec(),
        })
        .unwrap_err();
        assert!(err.to_string().contains("Incorrect API key"));
    }

    #[test]
    fn test_non_utf8_error_body_uses_generic_message() {
        let err = parse_response(&RawResponse {
            status: 502,
            body: vec![0xff, 0xfe, 0xfd],
        })
        .unwrap_err();
        assert!(matches!(err, LlmError::Api { ref message, .. } if message == "Server error"));
    }

    #[test]
    fn test_malformed_envelope_is_decode_error() {
        let err = parse_response(&ok(b"{\"choices\": []}".to_vec())).unwrap_err();
        assert!(matches!(err, LlmError::Decode(_)));

        let err = parse_response(&ok(b"not json".to_vec())).unwrap_err();
        assert!(matches!(err, LlmError::Decode(_)));
    }

    #[test]
    fn test_envelope_without_output_text_is_empty_content() {
        let body = br#"{"output":[{"content":[{"type":"refusal","text":"no"}]}]}"#.to_vec();
        assert!(matches!(
            parse_response(&ok(body)).unwrap_err(),
            LlmError::EmptyContent
        ));
        assert!(matches!(
            parse_response(&ok(br#"{"output":[]}"#.to_vec())).unwrap_err(),
            LlmError::EmptyContent
        ));
    }

    #[test]
    fn test_clean_removes_fences_rules_and_header_markers() {
        let input = "```\n## Cover Letter\nDear Hiring Manager,\n---\nI am excited.\n   ### Closing\n```";
        assert_eq!(
            clean_artifacts(input),
            "Cover Letter\nDear Hiring Manager,\nI am excited.\nClosing"
        );
    }

    #[test]
    fn test_clean_preserves_plain_lines_and_inner_whitespace() {
        let input = "\n\nMarch 3, 2026\n\n  Indented line\nA # mid-line hash\n\n";
        assert_eq!(
            clean_artifacts(input),
            "March 3, 2026\n\n  Indented line\nA # mid-line hash"
        );
    }

    #[test]
    fn test_clean_is_idempotent_on_clean_text() {
        let clean = "Jane Doe\n\nDear Hiring Manager,\n\nI would love to join.\n\nSincerely,\nJane";
        let once = clean_artifacts(clean);
        assert_eq!(once, clean);
        assert_eq!(clean_artifacts(&once), once);
    }

    #[test]
    fn test_finalize_without_profile_only_cleans() {
        let content = finalize_content("# Hi\nBody\n\nSincerely,\n[Your Name]", &UserProfile::default());
        assert_eq!(content, "Hi\nBody\n\nSincerely,\n[Your Name]");
    }

    #[test]
    fn test_finalize_replaces_name_and_prepends_header() {
        let profile = UserProfile {
            full_name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            ..Default::default()
        };
        let content = finalize_content("Dear Team,\n\nSincerely,\n[Your Name]\n", &profile);
        assert_eq!(
            content,
            "Jane Doe\njane@example.com\n\nDear Team,\n\nSincerely,\nJane Doe"
        );
    }

    #[test]
    fn test_header_without_name_keeps_placeholder() {
        let profile = UserProfile {
            phone: "555-0100".into(),
            ..Default::default()
        };
        let content = finalize_content("Regards,\n[Your Name]", &profile);
        assert_eq!(content, "555-0100\n\nRegards,\n[Your Name]");
    }
}
