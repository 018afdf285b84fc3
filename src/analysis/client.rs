// src/analysis/client.rs
//! Completion call for the idea analyzer.
//!
//! Failures are split into `Authentication` (the key was rejected) and every
//! other kind, so the caller can tell the user to re-check the key.

use super::prompt::build_analysis_prompt;
use crate::core::ServiceClient;
use crate::error::NavigatorError;
use crate::session::{Credential, CredentialKind, Session};
use crate::types::{AnalysisReport, IdeaAnalysisRequest};
use anyhow::Result;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info};

pub const ANTHROPIC_MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

pub const MODEL: &str = "claude-3-sonnet-20240229";
pub const MAX_TOKENS: u32 = 4000;

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(rename = "type")]
    error_type: String,
    message: String,
}

pub struct IdeaAnalyzer {
    service: ServiceClient,
    endpoint: String,
}

impl IdeaAnalyzer {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            service: ServiceClient::new(timeout)?,
            endpoint: endpoint.into(),
        })
    }

    /// Validates the key and the idea before any network traffic.
    pub async fn analyze_idea(
        &self,
        session: &Session,
        idea_text: &str,
    ) -> Result<AnalysisReport, NavigatorError> {
        session.credential(CredentialKind::AnthropicApiKey)?;
        let request = IdeaAnalysisRequest::new(idea_text)?;
        self.analyze(session, &request).await
    }

    pub async fn analyze(
        &self,
        session: &Session,
        request: &IdeaAnalysisRequest,
    ) -> Result<AnalysisReport, NavigatorError> {
        let api_key = session.credential(CredentialKind::AnthropicApiKey)?;
        info!("Starting idea analysis (API key length {})", api_key.len());

        let prompt = build_analysis_prompt(request);
        let markdown = self.complete(api_key, &prompt).await?;

        info!("Idea analysis completed ({} chars)", markdown.chars().count());
        Ok(AnalysisReport {
            markdown,
            model: MODEL.to_string(),
            generated_at: chrono::Utc::now(),
        })
    }

    async fn complete(&self, api_key: &Credential, prompt: &str) -> Result<String, NavigatorError> {
        let body = MessagesRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .service
            .http()
            .post(&self.endpoint)
            .header("x-api-key", api_key.expose())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| self.service.classify_transport(e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.service.classify_transport(e))?;

        if !status.is_success() {
            let err = classify_api_failure(status, &text);
            error!("Completion request failed: {}", err);
            return Err(err);
        }

        info!("Completion request succeeded");
        extract_completion(&text)
    }
}

fn classify_api_failure(status: StatusCode, body: &str) -> NavigatorError {
    let parsed = serde_json::from_str::<ApiErrorEnvelope>(body).ok();
    let message = parsed
        .as_ref()
        .map(|e| e.error.message.clone())
        .unwrap_or_else(|| format!("HTTP {}", status));

    let auth_rejected = matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
        || parsed.as_ref().is_some_and(|e| {
            matches!(
                e.error.error_type.as_str(),
                "authentication_error" | "permission_error"
            )
        });

    if auth_rejected {
        NavigatorError::Authentication(message)
    } else {
        NavigatorError::Remote(format!("HTTP {}: {}", status.as_u16(), message))
    }
}

/// First text block, untouched.
fn extract_completion(body: &str) -> Result<String, NavigatorError> {
    let response: MessagesResponse = serde_json::from_str(body).map_err(|e| {
        NavigatorError::Unclassified(format!("malformed completion response: {}", e))
    })?;

    response
        .content
        .into_iter()
        .find(|block| block.block_type == "text")
        .and_then(|block| block.text)
        .ok_or_else(|| NavigatorError::Unclassified("completion contained no text".to_string()))
}
