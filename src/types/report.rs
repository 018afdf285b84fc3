// src/types/report.rs
use crate::error::NavigatorError;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdeaAnalysisRequest {
    idea_text: String,
}

impl IdeaAnalysisRequest {
    pub fn new(idea_text: impl Into<String>) -> Result<Self, NavigatorError> {
        let idea_text = idea_text.into();
        let trimmed = idea_text.trim();
        if trimmed.is_empty() {
            return Err(NavigatorError::EmptyIdea);
        }
        Ok(Self {
            idea_text: trimmed.to_string(),
        })
    }

    pub fn idea_text(&self) -> &str {
        &self.idea_text
    }
}

/// Markdown exactly as the model returned it.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub markdown: String,
    pub model: String,
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_idea_is_rejected() {
        assert!(matches!(
            IdeaAnalysisRequest::new(""),
            Err(NavigatorError::EmptyIdea)
        ));
        assert!(matches!(
            IdeaAnalysisRequest::new(" \n\t "),
            Err(NavigatorError::EmptyIdea)
        ));
        assert_eq!(
            IdeaAnalysisRequest::new("  반려동물 구독 서비스 ")
                .unwrap()
                .idea_text(),
            "반려동물 구독 서비스"
        );
    }
}
