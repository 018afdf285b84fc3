// src/web/handlers/job_handlers.rs
use super::session_handlers::resolve_session;
use crate::error::NavigatorError;
use crate::types::job::{DEFAULT_DISPLAY, DEFAULT_START_PAGE};
use crate::types::{JobListing, JobListingQuery};
use crate::web::types::*;
use crate::work24::projection::{self, CSV_FILE_NAME};
use crate::work24::JobProjection;

use rocket::http::CookieJar;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info, warn};

/// Absent parameters take their defaults; anything present must parse.
fn parse_param(name: &str, raw: Option<&str>, default: u32) -> Result<u32, NavigatorError> {
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse::<u32>().map_err(|_| {
            NavigatorError::InvalidQuery(format!(
                "{} must be a positive whole number, got {:?}",
                name, value
            ))
        }),
    }
}

fn query_from_params(
    start_page: Option<&str>,
    display: Option<&str>,
) -> Result<JobListingQuery, NavigatorError> {
    JobListingQuery::new(
        parse_param("start_page", start_page, DEFAULT_START_PAGE)?,
        parse_param("display", display, DEFAULT_DISPLAY)?,
    )
}

async fn run_search(
    start_page: Option<&str>,
    display: Option<&str>,
    cookies: &CookieJar<'_>,
    state: &AppState,
) -> Result<(JobListingQuery, JobListing), ApiError> {
    let query = query_from_params(start_page, display).map_err(|e| {
        warn!("Rejected job search parameters: {}", e);
        error_reply(&e)
    })?;
    let session = resolve_session(cookies, state)?;

    match state.jobs.search(&session, &query).await {
        Ok(listing) => Ok((query, listing)),
        Err(e) => {
            match e {
                NavigatorError::NoResults => warn!("Job search returned no listings"),
                _ => error!("Job search failed: {}", e),
            }
            Err(error_reply(&e))
        }
    }
}

pub async fn search_jobs_handler(
    start_page: Option<&str>,
    display: Option<&str>,
    cookies: &CookieJar<'_>,
    state: &State<AppState>,
) -> Result<Json<DataResponse<JobSearchData>>, ApiError> {
    let (query, listing) = run_search(start_page, display, cookies, state.inner()).await?;

    let data = JobSearchData {
        status: listing.status().to_string(),
        start_page: query.start_page(),
        display: query.display(),
        projection: JobProjection::from_listing(&listing),
    };

    Ok(Json(DataResponse::success(
        format!("Loaded {} job listings.", listing.len()),
        data,
    )))
}

pub async fn export_jobs_handler(
    start_page: Option<&str>,
    display: Option<&str>,
    cookies: &CookieJar<'_>,
    state: &State<AppState>,
) -> Result<CsvResponse, ApiError> {
    let (_, listing) = run_search(start_page, display, cookies, state.inner()).await?;

    let data = projection::to_csv(listing.records()).map_err(|e| {
        error!("CSV serialization failed: {}", e);
        error_reply(&NavigatorError::Unclassified(format!(
            "could not build CSV: {}",
            e
        )))
    })?;

    info!("Exporting {} listings as {}", listing.len(), CSV_FILE_NAME);
    Ok(CsvResponse {
        data,
        filename: CSV_FILE_NAME.to_string(),
    })
}
