// src/work24/parser.rs
//! Work24 XML feed parsing.
//!
//! Extraction is defensive throughout: a `wantedInfo` entry missing any of its
//! child nodes yields an empty field, never an error.

use crate::error::NavigatorError;
use crate::types::{JobListing, JobListingResult, JobRecord};
use roxmltree::{Document, Node};
use tracing::{debug, warn};

/// Canonical error carrier in the feed.
pub const ERROR_TAG: &str = "error";
/// Older responses use this name for the same element.
pub const ERROR_TAG_ALIAS: &str = "errorMsg";

const LISTING_TAG: &str = "wantedInfo";

const COMPANY_PATH: &str = "corpInfo/corpNm";
const TITLE_PATH: &str = "wantedTitle";
const SALARY_TYPE_PATH: &str = "salTpNm";
const REGION_PATH: &str = "workRegion";
const EMPLOYMENT_TYPE_PATH: &str = "empTpNm";
const EXPERIENCE_PATH: &str = "enterTpNm";
const EDUCATION_PATH: &str = "eduNm";

pub fn parse_job_feed(body: &str) -> JobListingResult {
    let document = Document::parse(body).map_err(|e| {
        warn!("Work24 response is not well-formed XML: {}", e);
        NavigatorError::Unclassified(format!("malformed XML response: {}", e))
    })?;

    if let Some(message) = find_error_message(&document) {
        warn!("Work24 reported an error: {}", message);
        return Err(NavigatorError::Remote(message));
    }

    let records: Vec<JobRecord> = document
        .descendants()
        .filter(|node| node.has_tag_name(LISTING_TAG))
        .map(record_from_node)
        .collect();

    debug!("Parsed {} wantedInfo entries", records.len());
    JobListing::new(records)
}

fn find_error_message(document: &Document) -> Option<String> {
    document
        .descendants()
        .find(|node| node.has_tag_name(ERROR_TAG) || node.has_tag_name(ERROR_TAG_ALIAS))
        .map(|node| {
            let text = node_text(node);
            if text.is_empty() {
                "the API reported an error without a message".to_string()
            } else {
                text
            }
        })
}

fn record_from_node(node: Node) -> JobRecord {
    JobRecord {
        company: text_at(node, COMPANY_PATH),
        title: text_at(node, TITLE_PATH),
        salary_type: text_at(node, SALARY_TYPE_PATH),
        region: text_at(node, REGION_PATH),
        employment_type: text_at(node, EMPLOYMENT_TYPE_PATH),
        experience_level: text_at(node, EXPERIENCE_PATH),
        education: text_at(node, EDUCATION_PATH),
    }
}

/// Follows a `/`-separated child path; any missing step gives `""`.
fn text_at(node: Node, path: &str) -> String {
    let mut current = node;
    for segment in path.split('/') {
        match current.children().find(|child| child.has_tag_name(segment)) {
            Some(child) => current = child,
            None => return String::new(),
        }
    }
    node_text(current)
}

fn node_text(node: Node) -> String {
    node.text().map(str::trim).unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_ENTRY: &str = r#"
        <wantedInfo>
            <corpInfo><corpNm>한빛소프트</corpNm></corpInfo>
            <wantedTitle>백엔드 개발자 채용</wantedTitle>
            <salTpNm>연봉</salTpNm>
            <workRegion>서울 강남구</workRegion>
            <empTpNm>정규직</empTpNm>
            <enterTpNm>경력</enterTpNm>
            <eduNm>대졸(4년)</eduNm>
        </wantedInfo>"#;

    fn feed(entries: &str) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?><wantedRoot><total>2</total>{}</wantedRoot>",
            entries
        )
    }

    #[test]
    fn test_fully_populated_entry() {
        let listing = parse_job_feed(&feed(FULL_ENTRY)).unwrap();
        let record = &listing.records()[0];
        assert_eq!(record.company, "한빛소프트");
        assert_eq!(record.title, "백엔드 개발자 채용");
        assert_eq!(record.salary_type, "연봉");
        assert_eq!(record.region, "서울 강남구");
        assert_eq!(record.employment_type, "정규직");
        assert_eq!(record.experience_level, "경력");
        assert_eq!(record.education, "대졸(4년)");
    }

    #[test]
    fn test_missing_company_yields_empty_field() {
        let second = r#"
            <wantedInfo>
                <wantedTitle>물류 관리</wantedTitle>
                <workRegion>경기 화성시</workRegion>
            </wantedInfo>"#;
        let listing = parse_job_feed(&feed(&format!("{}{}", FULL_ENTRY, second))).unwrap();

        assert_eq!(listing.len(), 2);
        let record = &listing.records()[1];
        assert_eq!(record.company, "");
        assert_eq!(record.title, "물류 관리");
        assert_eq!(record.salary_type, "");
        assert_eq!(record.education, "");
    }

    #[test]
    fn test_corp_info_without_name_is_empty() {
        let entry = "<wantedInfo><corpInfo><reperNm>홍길동</reperNm></corpInfo></wantedInfo>";
        let listing = parse_job_feed(&feed(entry)).unwrap();
        assert_eq!(listing.records()[0], JobRecord::default());
    }

    #[test]
    fn test_empty_element_text_is_empty_string() {
        let entry = "<wantedInfo><corpInfo><corpNm/></corpInfo><wantedTitle>  </wantedTitle></wantedInfo>";
        let listing = parse_job_feed(&feed(entry)).unwrap();
        assert_eq!(listing.records()[0].company, "");
        assert_eq!(listing.records()[0].title, "");
    }

    #[test]
    fn test_error_element_wins_over_records() {
        let body = format!(
            "<wantedRoot><error>인증키가 유효하지 않습니다</error>{}</wantedRoot>",
            FULL_ENTRY
        );
        match parse_job_feed(&body) {
            Err(NavigatorError::Remote(msg)) => assert_eq!(msg, "인증키가 유효하지 않습니다"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_error_msg_alias_is_accepted() {
        let body = "<response><errorMsg>Invalid authKey</errorMsg></response>";
        assert!(matches!(
            parse_job_feed(body),
            Err(NavigatorError::Remote(msg)) if msg == "Invalid authKey"
        ));
    }

    #[test]
    fn test_empty_error_element_still_classified() {
        let body = "<wantedRoot><error/></wantedRoot>";
        assert!(matches!(
            parse_job_feed(body),
            Err(NavigatorError::Remote(_))
        ));
    }

    #[test]
    fn test_zero_entries_is_no_results() {
        assert!(matches!(
            parse_job_feed(&feed("")),
            Err(NavigatorError::NoResults)
        ));
    }

    #[test]
    fn test_malformed_xml_is_classified() {
        assert!(matches!(
            parse_job_feed("<html><body>Service Unavailable"),
            Err(NavigatorError::Unclassified(_))
        ));
    }

    #[test]
    fn test_source_order_is_preserved() {
        let entries: String = (1..=5)
            .map(|i| format!("<wantedInfo><wantedTitle>공고 {}</wantedTitle></wantedInfo>", i))
            .collect();
        let listing = parse_job_feed(&feed(&entries)).unwrap();
        let titles: Vec<&str> = listing.records().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["공고 1", "공고 2", "공고 3", "공고 4", "공고 5"]);
    }
}
