//! Supervity QueryDocument client.
//!
//! Forwards a single question as a form-encoded POST, authenticated with the
//! organisation credentials from [`SupervitySettings`], and extracts the
//! `response` field from the JSON answer.

use crate::config::SupervitySettings;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Answer returned when the upstream reply carries no usable `response`.
pub const FALLBACK_ANSWER: &str = "No response received";

/// Number of question characters written to the request log line.
const QUESTION_PREVIEW_CHARS: usize = 50;

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Supervity API returned {status}")]
    Upstream { status: StatusCode, body: String },

    #[error("Request to Supervity API failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to parse Supervity API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Supervity API returned an unusable body: {0}")]
    Malformed(&'static str),
}

/// Answers a question against a document collection. The answer is
/// normally a string but is passed on as whatever JSON the upstream sent.
#[async_trait]
pub trait DocumentQuery: Send + Sync {
    async fn query(&self, question: &str) -> Result<Value, QueryError>;
}

/// Form fields of a QueryDocument call, in wire order.
#[derive(Debug, Serialize)]
struct QueryDocumentForm<'a> {
    question: &'a str,
    #[serde(rename = "collectionName")]
    collection_name: &'a str,
    #[serde(rename = "jsonData")]
    json_data: &'a str,
    #[serde(rename = "documentName")]
    document_name: &'a str,
    usertype: &'a str,
    chat_context: &'a str,
}

#[derive(Clone)]
pub struct SupervityClient {
    client: Client,
    settings: SupervitySettings,
}

impl SupervityClient {
    pub fn new(settings: SupervitySettings) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            settings,
        })
    }

    pub fn settings(&self) -> &SupervitySettings {
        &self.settings
    }

    fn form<'a>(&'a self, question: &'a str) -> QueryDocumentForm<'a> {
        QueryDocumentForm {
            question,
            collection_name: &self.settings.collection_name,
            json_data: "",
            document_name: "",
            usertype: &self.settings.usertype,
            chat_context: "",
        }
    }
}

#[async_trait]
impl DocumentQuery for SupervityClient {
    async fn query(&self, question: &str) -> Result<Value, QueryError> {
        tracing::info!(
            org_id = %self.settings.org_id,
            collection_name = %self.settings.collection_name,
            question = %question_preview(question),
            "Making request to Supervity API"
        );

        let response = self
            .client
            .post(&self.settings.api_url)
            .header("x-orgId", &self.settings.org_id)
            .header("X-Api-Token", self.settings.api_token.expose_secret())
            .header("X-Api-Org", &self.settings.api_org)
            .form(&self.form(question))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            tracing::error!(status = %status, body = %body, "Error response from Supervity API");
            return Err(QueryError::Upstream { status, body });
        }

        let bytes = response.bytes().await?;
        let data: Value = serde_json::from_slice(&bytes)?;

        let answer = answer_from(data)?;

        tracing::info!("Received response from Supervity API");

        Ok(answer)
    }
}

/// Pick the answer out of a QueryDocument reply.
///
/// A `null` body is rejected. Missing, null, `false`, zero and empty-string
/// `response` values yield [`FALLBACK_ANSWER`]; anything else is returned
/// unchanged.
fn answer_from(data: Value) -> Result<Value, QueryError> {
    let answer = match data {
        Value::Null => return Err(QueryError::Malformed("null body")),
        Value::Object(mut fields) => fields.remove("response"),
        _ => None,
    };

    let answer = match answer {
        None | Some(Value::Null) | Some(Value::Bool(false)) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => None,
        other => other,
    };

    Ok(answer.unwrap_or_else(|| Value::from(FALLBACK_ANSWER)))
}

fn question_preview(question: &str) -> String {
    let mut preview: String = question.chars().take(QUESTION_PREVIEW_CHARS).collect();
    preview.push_str("...");
    preview
}
