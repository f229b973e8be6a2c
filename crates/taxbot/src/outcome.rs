//! Domain model for remote query requests and replies.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Outbound query payload. Absent fields are omitted from the JSON body;
/// a call without a question is forwarded as-is and judged remotely.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialist: Option<String>,
}

impl QueryRequest {
    pub fn question(question: impl Into<String>) -> Self {
        Self {
            question: Some(question.into()),
            specialist: None,
        }
    }

    /// Destructure tool-call arguments. Structural only: no required-field
    /// or enum validation happens here.
    pub fn from_arguments(arguments: Option<&Map<String, Value>>) -> Self {
        let get = |key: &str| {
            arguments
                .and_then(|args| args.get(key))
                .and_then(Value::as_str)
                .map(String::from)
        };
        Self {
            question: get("question"),
            specialist: get("specialist"),
        }
    }
}

/// Decoded remote reply. Exactly one shape per call.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// The question is ambiguous across specialists; the caller must pick one.
    Clarification {
        prompt: String,
        options: Vec<SpecialistOption>,
    },
    /// A direct answer, with whichever extras the service attached.
    Answer(Answer),
}

/// One selectable specialist in a clarification reply.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpecialistOption {
    pub id: String,
    pub description: String,
}

/// A successful answer. Optional fields are populated only when the service
/// sent them; each one maps to exactly one suffix block in the rendered text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Answer {
    pub text: String,
    pub attachment_url: Option<String>,
    pub references: Vec<String>,
    pub followup_questions: Vec<String>,
    pub detected_language: Option<String>,
    pub specialist: Option<String>,
    pub conversation_continued: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_without_absent_fields() {
        let bare = QueryRequest {
            question: None,
            specialist: None,
        };
        assert_eq!(serde_json::to_string(&bare).unwrap(), "{}");

        let full = QueryRequest {
            question: Some("Qual é a taxa de IVA?".to_string()),
            specialist: Some("civa".to_string()),
        };
        let json = serde_json::to_string(&full).unwrap();
        assert!(json.contains("\"question\""));
        assert!(json.contains("\"specialist\":\"civa\""));
    }

    #[test]
    fn arguments_destructured_without_validation() {
        let args = json!({"question": "IVA rate?", "specialist": "not-a-real-code"});
        let request = QueryRequest::from_arguments(args.as_object());
        assert_eq!(request.question.as_deref(), Some("IVA rate?"));
        // Passed through verbatim; the schema enum is advisory only.
        assert_eq!(request.specialist.as_deref(), Some("not-a-real-code"));
    }

    #[test]
    fn missing_question_stays_absent() {
        let args = json!({"specialist": "cirs"});
        let request = QueryRequest::from_arguments(args.as_object());
        assert_eq!(request.question, None);
        assert_eq!(serde_json::to_string(&request).unwrap(), r#"{"specialist":"cirs"}"#);
    }

    #[test]
    fn no_arguments_at_all() {
        let request = QueryRequest::from_arguments(None);
        assert_eq!(request, QueryRequest { question: None, specialist: None });
    }
}
