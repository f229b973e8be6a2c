//! HTTP client for the remote tax-answering service.

use serde::Deserialize;
use tracing::debug;

use crate::api::QueryApi;
use crate::error::Error;
use crate::outcome::{Answer, QueryOutcome, QueryRequest, SpecialistOption};

/// Endpoint path on the service's base URL.
pub const QUERY_PATH: &str = "/api/mcp/query";

/// Fallback when a non-2xx body carries no usable message.
const GENERIC_API_ERROR: &str = "API request failed";

// ─────────────────────────────────────────────────────────────────────────────
// API Wire Types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiReply {
    response: String,
    #[serde(default)]
    requires_clarification: bool,
    #[serde(default)]
    clarification_options: Vec<SpecialistOption>,
    #[serde(default)]
    attachment: Option<ApiAttachment>,
    #[serde(default)]
    references: Vec<String>,
    #[serde(default)]
    followup_questions: Vec<ApiFollowup>,
    #[serde(default)]
    detected_language: Option<String>,
    #[serde(default)]
    specialist: Option<String>,
    #[serde(default)]
    conversation_continued: bool,
}

#[derive(Debug, Deserialize)]
struct ApiAttachment {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ApiFollowup {
    question: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl From<ApiReply> for QueryOutcome {
    fn from(reply: ApiReply) -> Self {
        if reply.requires_clarification {
            return QueryOutcome::Clarification {
                prompt: reply.response,
                options: reply.clarification_options,
            };
        }
        QueryOutcome::Answer(Answer {
            text: reply.response,
            attachment_url: reply.attachment.map(|a| a.url),
            references: reply.references,
            followup_questions: reply.followup_questions.into_iter().map(|f| f.question).collect(),
            detected_language: reply.detected_language,
            specialist: reply.specialist,
            conversation_continued: reply.conversation_continued,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Client
// ─────────────────────────────────────────────────────────────────────────────

/// Client for the remote service. Configuration is injected at construction
/// and never read from ambient state.
pub struct QueryClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl QueryClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key: api_key.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl QueryApi for QueryClient {
    async fn query(&self, request: QueryRequest) -> Result<QueryOutcome, Error> {
        let url = format!("{}{QUERY_PATH}", self.base_url);
        debug!(%url, "querying remote service");

        // One attempt, no timeout budget: transient failures surface
        // immediately and the host decides whether to retry.
        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api(extract_api_message(&body)));
        }

        let reply: ApiReply = response
            .json()
            .await
            .map_err(|e| Error::InvalidResponse(e.to_string()))?;

        Ok(reply.into())
    }
}

/// Pull a human-readable message out of a non-2xx body: `message`, then
/// `error`, then a generic fallback when the body is not JSON at all.
/// A present-but-empty field counts as absent.
fn extract_api_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| {
            b.message
                .filter(|m| !m.is_empty())
                .or(b.error.filter(|e| !e.is_empty()))
        })
        .unwrap_or_else(|| GENERIC_API_ERROR.to_string())
}
