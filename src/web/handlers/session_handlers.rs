// src/web/handlers/session_handlers.rs
use crate::error::Severity;
use crate::session::{Credential, CredentialKind, Session};
use crate::web::types::*;

use rocket::http::{Cookie, CookieJar, SameSite, Status};
use rocket::serde::json::Json;
use rocket::State;
use tracing::info;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "navigator_session";

pub fn session_id(cookies: &CookieJar<'_>) -> Option<Uuid> {
    cookies
        .get_private(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
}

/// The caller's saved keys, with operator keys filling any gaps.
pub fn resolve_session(cookies: &CookieJar<'_>, state: &AppState) -> Result<Session, ApiError> {
    let saved = match session_id(cookies) {
        Some(id) => state.sessions.get(&id).map_err(|e| error_reply(&e))?,
        None => None,
    };
    Ok(saved
        .unwrap_or_default()
        .merged_with(&state.operator_credentials))
}

fn session_info(session: &Session) -> SessionInfo {
    SessionInfo {
        work24_key_length: session
            .credential(CredentialKind::Work24AuthKey)
            .ok()
            .map(Credential::len),
        anthropic_key_length: session
            .credential(CredentialKind::AnthropicApiKey)
            .ok()
            .map(Credential::len),
    }
}

pub async fn save_credentials_handler(
    request: Json<SaveCredentialsRequest>,
    cookies: &CookieJar<'_>,
    state: &State<AppState>,
) -> Result<Json<DataResponse<SessionInfo>>, ApiError> {
    let request = request.into_inner();
    let updates: Vec<(CredentialKind, Credential)> = [
        (CredentialKind::Work24AuthKey, request.work24_auth_key),
        (CredentialKind::AnthropicApiKey, request.anthropic_api_key),
    ]
    .into_iter()
    .filter_map(|(kind, raw)| raw.and_then(Credential::new).map(|cred| (kind, cred)))
    .collect();

    if updates.is_empty() {
        return Err((
            Status::BadRequest,
            Json(StandardErrorResponse::new(
                "No API key was provided.".to_string(),
                "EMPTY_CREDENTIAL".to_string(),
                Severity::Warning,
                vec!["Enter a key before saving".to_string()],
            )),
        ));
    }

    let id = session_id(cookies).unwrap_or_else(Uuid::new_v4);
    let mut session = state
        .sessions
        .get(&id)
        .map_err(|e| error_reply(&e))?
        .unwrap_or_default();
    for (kind, credential) in updates {
        info!("Saving {} for session (length {})", kind, credential.len());
        session.set_credential(kind, credential);
    }

    let info = session_info(&session);
    state
        .sessions
        .replace(id, session)
        .map_err(|e| error_reply(&e))?;
    cookies.add_private(
        Cookie::build((SESSION_COOKIE, id.to_string()))
            .http_only(true)
            .same_site(SameSite::Strict),
    );

    Ok(Json(DataResponse::success(
        "API key saved.".to_string(),
        info,
    )))
}

pub async fn clear_session_handler(
    cookies: &CookieJar<'_>,
    state: &State<AppState>,
) -> Result<Json<TextResponse>, ApiError> {
    let removed = match session_id(cookies) {
        Some(id) => state.sessions.remove(&id).map_err(|e| error_reply(&e))?,
        None => false,
    };
    cookies.remove_private(SESSION_COOKIE);

    info!("Session cleared (had saved keys: {})", removed);
    Ok(Json(TextResponse::success("Session cleared.".to_string())))
}
