// src/web/types.rs
use crate::analysis::IdeaAnalyzer;
use crate::core::ConfigManager;
use crate::error::{NavigatorError, Severity};
use crate::session::{Session, SessionStore};
use crate::work24::{JobProjection, Work24Client};
use anyhow::Result;
use rocket::http::{ContentType, Status};
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket::{Request, Response};

/// Everything a handler needs, managed by Rocket.
pub struct AppState {
    pub jobs: Work24Client,
    pub analyzer: IdeaAnalyzer,
    pub sessions: SessionStore,
    /// Keys supplied by the operator through the environment.
    pub operator_credentials: Session,
}

impl AppState {
    pub fn from_config(config: &ConfigManager) -> Result<Self> {
        Ok(Self {
            jobs: Work24Client::new(config.service.work24_url.clone(), config.service.http_timeout())?,
            analyzer: IdeaAnalyzer::new(
                config.service.anthropic_url.clone(),
                config.service.llm_timeout(),
            )?,
            sessions: SessionStore::new(),
            operator_credentials: config.credentials.clone(),
        })
    }
}

pub type ApiError = (Status, Json<StandardErrorResponse>);

pub struct CsvResponse {
    pub data: Vec<u8>,
    pub filename: String,
}

impl<'r> Responder<'r, 'static> for CsvResponse {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        Response::build()
            .header(ContentType::CSV)
            .raw_header(
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", self.filename),
            )
            .sized_body(self.data.len(), std::io::Cursor::new(self.data))
            .ok()
    }
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum ResponseType {
    Text,
    Data,
    Error,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct TextResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DataResponse<T> {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    pub data: T,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardErrorResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub severity: Severity,
    pub suggestions: Vec<String>,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct SaveCredentialsRequest {
    pub work24_auth_key: Option<String>,
    pub anthropic_api_key: Option<String>,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct AnalyzeIdeaRequest {
    pub idea_text: String,
}

/// Only lengths leave the server, never the keys themselves.
#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct SessionInfo {
    pub work24_key_length: Option<usize>,
    pub anthropic_key_length: Option<usize>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct JobSearchData {
    pub status: String,
    pub start_page: u32,
    pub display: u32,
    #[serde(flatten)]
    pub projection: JobProjection,
}

impl TextResponse {
    pub fn success(message: String) -> Self {
        Self {
            response_type: ResponseType::Text,
            success: true,
            message,
        }
    }
}

impl<T> DataResponse<T> {
    pub fn success(message: String, data: T) -> Self {
        Self {
            response_type: ResponseType::Data,
            success: true,
            message,
            data,
        }
    }
}

impl StandardErrorResponse {
    pub fn new(
        error: String,
        error_code: String,
        severity: Severity,
        suggestions: Vec<String>,
    ) -> Self {
        Self {
            response_type: ResponseType::Error,
            success: false,
            error,
            error_code,
            severity,
            suggestions,
        }
    }
}

impl From<&NavigatorError> for StandardErrorResponse {
    fn from(err: &NavigatorError) -> Self {
        Self::new(
            err.user_message(),
            err.error_code().to_string(),
            err.severity(),
            err.suggestions(),
        )
    }
}

pub fn status_for(err: &NavigatorError) -> Status {
    match err {
        NavigatorError::MissingCredential(_) | NavigatorError::Authentication(_) => {
            Status::Unauthorized
        }
        NavigatorError::InvalidQuery(_) | NavigatorError::EmptyIdea => Status::BadRequest,
        NavigatorError::Transport(_) | NavigatorError::Remote(_) => Status::BadGateway,
        NavigatorError::NoResults => Status::NotFound,
        NavigatorError::Unclassified(_) => Status::InternalServerError,
    }
}

pub fn error_reply(err: &NavigatorError) -> ApiError {
    (status_for(err), Json(StandardErrorResponse::from(err)))
}
