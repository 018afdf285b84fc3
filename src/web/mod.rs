// src/web/mod.rs
//! HTTP surface: session keys, job search, CSV export and idea analysis

pub mod handlers;
pub mod types;

pub use handlers::*;
pub use types::*;

use crate::core::ConfigManager;
use crate::types::AnalysisReport;
use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{CookieJar, Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, delete, get, options, post, routes, Build, Request, Response, Rocket, State};
use tracing::info;

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, DELETE, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

#[post("/session/credentials", data = "<request>")]
pub async fn save_credentials(
    request: Json<SaveCredentialsRequest>,
    cookies: &CookieJar<'_>,
    state: &State<AppState>,
) -> Result<Json<DataResponse<SessionInfo>>, ApiError> {
    handlers::save_credentials_handler(request, cookies, state).await
}

#[delete("/session")]
pub async fn clear_session(
    cookies: &CookieJar<'_>,
    state: &State<AppState>,
) -> Result<Json<TextResponse>, ApiError> {
    handlers::clear_session_handler(cookies, state).await
}

#[get("/jobs?<start_page>&<display>")]
pub async fn search_jobs(
    start_page: Option<&str>,
    display: Option<&str>,
    cookies: &CookieJar<'_>,
    state: &State<AppState>,
) -> Result<Json<DataResponse<JobSearchData>>, ApiError> {
    handlers::search_jobs_handler(start_page, display, cookies, state).await
}

#[get("/jobs/export?<start_page>&<display>")]
pub async fn export_jobs(
    start_page: Option<&str>,
    display: Option<&str>,
    cookies: &CookieJar<'_>,
    state: &State<AppState>,
) -> Result<CsvResponse, ApiError> {
    handlers::export_jobs_handler(start_page, display, cookies, state).await
}

#[post("/ideas/analyze", data = "<request>")]
pub async fn analyze_idea(
    request: Json<AnalyzeIdeaRequest>,
    cookies: &CookieJar<'_>,
    state: &State<AppState>,
) -> Result<Json<DataResponse<AnalysisReport>>, ApiError> {
    handlers::analyze_idea_handler(request, cookies, state).await
}

#[get("/health")]
pub async fn health() -> Json<&'static str> {
    handlers::health_handler().await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

fn catcher_response(error: &str, code: &str, suggestions: &[&str]) -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        error.to_string(),
        code.to_string(),
        crate::error::Severity::Error,
        suggestions.iter().map(|s| s.to_string()).collect(),
    ))
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    catcher_response(
        "Invalid request format",
        "BAD_REQUEST",
        &["Check your request JSON format"],
    )
}

#[rocket::catch(404)]
pub fn not_found() -> Json<StandardErrorResponse> {
    catcher_response("Unknown endpoint", "NOT_FOUND", &["Check the request path"])
}

#[rocket::catch(422)]
pub fn unprocessable() -> Json<StandardErrorResponse> {
    catcher_response(
        "Request body is missing required fields",
        "UNPROCESSABLE_ENTITY",
        &["Verify all required fields are present"],
    )
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    catcher_response(
        "Internal server error",
        "INTERNAL_ERROR",
        &["Try again in a few moments"],
    )
}

/// Assemble the server without launching it.
pub fn build_rocket(config: &ConfigManager) -> Result<Rocket<Build>> {
    let state = AppState::from_config(config)?;

    let figment = rocket::Config::figment()
        .merge(("address", config.server.address.clone()))
        .merge(("port", config.server.port));

    Ok(rocket::custom(figment)
        .attach(Cors)
        .manage(state)
        .register(
            "/api",
            catchers![bad_request, not_found, unprocessable, internal_error],
        )
        .mount(
            "/api",
            routes![
                save_credentials,
                clear_session,
                search_jobs,
                export_jobs,
                analyze_idea,
                health,
                options,
            ],
        ))
}

pub async fn start_web_server(config: ConfigManager) -> Result<()> {
    let rocket = build_rocket(&config)?;

    info!("Starting startup-navigator API server");
    info!("Server: http://{}:{}", config.server.address, config.server.port);
    info!("Work24 endpoint: {}", config.service.work24_url);
    info!("Completion endpoint: {}", config.service.anthropic_url);

    rocket
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Server failed: {}", e))?;

    Ok(())
}
