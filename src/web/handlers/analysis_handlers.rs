// src/web/handlers/analysis_handlers.rs
use super::session_handlers::resolve_session;
use crate::error::Severity;
use crate::types::AnalysisReport;
use crate::web::types::*;

use rocket::http::CookieJar;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info, warn};

pub async fn analyze_idea_handler(
    request: Json<AnalyzeIdeaRequest>,
    cookies: &CookieJar<'_>,
    state: &State<AppState>,
) -> Result<Json<DataResponse<AnalysisReport>>, ApiError> {
    let session = resolve_session(cookies, state.inner())?;

    match state
        .analyzer
        .analyze_idea(&session, &request.idea_text)
        .await
    {
        Ok(report) => {
            info!("Idea analysis delivered ({} chars)", report.markdown.len());
            Ok(Json(DataResponse::success(
                "Analysis completed.".to_string(),
                report,
            )))
        }
        Err(e) => {
            match e.severity() {
                Severity::Warning => warn!("Idea analysis rejected: {}", e),
                Severity::Error => error!("Idea analysis failed: {}", e),
            }
            Err(error_reply(&e))
        }
    }
}
