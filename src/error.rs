// src/error.rs
//! Classified failures shared by the job search and idea analysis paths.
//!
//! Every network-facing operation returns `Result<_, NavigatorError>` so the
//! presentation layer only ever sees one of these variants, never a raw fault.

use crate::session::CredentialKind;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NavigatorError {
    #[error("{0} is not set")]
    MissingCredential(CredentialKind),

    #[error("invalid query parameter: {0}")]
    InvalidQuery(String),

    #[error("idea text is empty")]
    EmptyIdea,

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("remote API error: {0}")]
    Remote(String),

    #[error("no job listings returned")]
    NoResults,

    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("unclassified failure: {0}")]
    Unclassified(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl NavigatorError {
    pub fn error_code(&self) -> &'static str {
        match self {
            NavigatorError::MissingCredential(_) => "MISSING_CREDENTIAL",
            NavigatorError::InvalidQuery(_) => "INVALID_QUERY",
            NavigatorError::EmptyIdea => "EMPTY_IDEA",
            NavigatorError::Transport(_) => "TRANSPORT_ERROR",
            NavigatorError::Remote(_) => "REMOTE_ERROR",
            NavigatorError::NoResults => "NO_RESULTS",
            NavigatorError::Authentication(_) => "AUTHENTICATION_FAILED",
            NavigatorError::Unclassified(_) => "UNCLASSIFIED_ERROR",
        }
    }

    /// Empty results and blank input are warnings; everything else is an error.
    pub fn severity(&self) -> Severity {
        match self {
            NavigatorError::NoResults | NavigatorError::EmptyIdea => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Message meant for the person at the keyboard, distinct per variant.
    pub fn user_message(&self) -> String {
        match self {
            NavigatorError::MissingCredential(kind) => {
                format!("Please enter your {} first.", kind)
            }
            NavigatorError::InvalidQuery(msg) => format!("Invalid search parameter: {}", msg),
            NavigatorError::EmptyIdea => "Please enter your business idea.".to_string(),
            NavigatorError::Transport(msg) => format!("API request failed: {}", msg),
            NavigatorError::Remote(msg) => format!("The API reported an error: {}", msg),
            NavigatorError::NoResults => "The API returned no job listings.".to_string(),
            NavigatorError::Authentication(msg) => {
                format!("API key authentication failed: {}", msg)
            }
            NavigatorError::Unclassified(msg) => format!("An error occurred: {}", msg),
        }
    }

    pub fn suggestions(&self) -> Vec<String> {
        match self {
            NavigatorError::MissingCredential(kind) => vec![
                format!("Save the {} for this session", kind),
                format!("Or set the {} environment variable", kind.env_var()),
            ],
            NavigatorError::InvalidQuery(_) => vec![
                "Start page must be 1 or greater".to_string(),
                "Display count must be between 1 and 100".to_string(),
            ],
            NavigatorError::EmptyIdea => {
                vec!["Describe the idea in a sentence or two".to_string()]
            }
            NavigatorError::Transport(_) => vec![
                "Check your network connection".to_string(),
                "Try again in a few moments".to_string(),
            ],
            NavigatorError::Remote(_) | NavigatorError::NoResults => vec![
                "Check the auth key".to_string(),
                "Check the service application status on the Work24 site".to_string(),
            ],
            NavigatorError::Authentication(_) => vec![
                "Re-check the API key and save it again".to_string(),
                "Make sure the key has not been revoked".to_string(),
            ],
            NavigatorError::Unclassified(_) => {
                vec!["Try again; contact the operator if the problem persists".to_string()]
            }
        }
    }

    pub fn is_credential_problem(&self) -> bool {
        matches!(
            self,
            NavigatorError::MissingCredential(_) | NavigatorError::Authentication(_)
        )
    }
}
