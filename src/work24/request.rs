// src/work24/request.rs
use crate::error::NavigatorError;
use crate::session::Credential;
use crate::types::JobListingQuery;
use reqwest::Url;

pub const WORK24_LIST_URL: &str =
    "https://www.work24.go.kr/cm/openApi/call/wk/callOpenApiSvcInfo210L01.do";

const CALL_TYPE_LIST: &str = "L";
const RETURN_TYPE_XML: &str = "XML";

/// Listing-search URL carrying exactly
/// `authKey, callTp, returnType, startPage, display`.
pub fn build_search_url(
    base_url: &str,
    auth_key: &Credential,
    query: &JobListingQuery,
) -> Result<Url, NavigatorError> {
    let mut url = Url::parse(base_url).map_err(|e| {
        NavigatorError::Unclassified(format!("invalid Work24 endpoint URL: {}", e))
    })?;

    url.query_pairs_mut()
        .clear()
        .append_pair("authKey", auth_key.expose())
        .append_pair("callTp", CALL_TYPE_LIST)
        .append_pair("returnType", RETURN_TYPE_XML)
        .append_pair("startPage", &query.start_page().to_string())
        .append_pair("display", &query.display().to_string());

    Ok(url)
}
