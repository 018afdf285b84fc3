// src/types/job.rs
//! Work24 job search data structures

use crate::error::NavigatorError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_START_PAGE: u32 = 1;
pub const MIN_DISPLAY: u32 = 1;
pub const MAX_DISPLAY: u32 = 100;
pub const DEFAULT_DISPLAY: u32 = 10;

pub const SUCCESS_MARKER: &str = "success";

/// Only constructible through `new`, `clamped` or `Default`, so the range
/// bounds always hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobListingQuery {
    start_page: u32,
    display: u32,
}

impl JobListingQuery {
    /// Rejects out-of-range values before any request is built.
    pub fn new(start_page: u32, display: u32) -> Result<Self, NavigatorError> {
        if start_page < 1 {
            return Err(NavigatorError::InvalidQuery(format!(
                "start page must be at least 1, got {}",
                start_page
            )));
        }
        if !(MIN_DISPLAY..=MAX_DISPLAY).contains(&display) {
            return Err(NavigatorError::InvalidQuery(format!(
                "display must be between {} and {}, got {}",
                MIN_DISPLAY, MAX_DISPLAY, display
            )));
        }
        Ok(Self {
            start_page,
            display,
        })
    }

    /// For bounded number inputs: pulls any value back into range.
    pub fn clamped(start_page: i64, display: i64) -> Self {
        Self {
            start_page: start_page.clamp(1, u32::MAX as i64) as u32,
            display: display.clamp(MIN_DISPLAY as i64, MAX_DISPLAY as i64) as u32,
        }
    }

    pub fn start_page(&self) -> u32 {
        self.start_page
    }

    pub fn display(&self) -> u32 {
        self.display
    }
}

impl Default for JobListingQuery {
    fn default() -> Self {
        Self {
            start_page: DEFAULT_START_PAGE,
            display: DEFAULT_DISPLAY,
        }
    }
}

/// One `wantedInfo` entry. Absent XML nodes are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub company: String,
    pub title: String,
    pub salary_type: String,
    pub region: String,
    pub employment_type: String,
    pub experience_level: String,
    pub education: String,
}

impl JobRecord {
    /// Field values in display column order.
    pub fn as_row(&self) -> [&str; 7] {
        [
            &self.company,
            &self.title,
            &self.salary_type,
            &self.region,
            &self.employment_type,
            &self.experience_level,
            &self.education,
        ]
    }
}

/// A successful search: never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobListing {
    records: Vec<JobRecord>,
    status: &'static str,
}

pub type JobListingResult = Result<JobListing, NavigatorError>;

impl JobListing {
    pub fn new(records: Vec<JobRecord>) -> JobListingResult {
        if records.is_empty() {
            return Err(NavigatorError::NoResults);
        }
        Ok(Self {
            records,
            status: SUCCESS_MARKER,
        })
    }

    pub fn records(&self) -> &[JobRecord] {
        &self.records
    }

    pub fn status(&self) -> &str {
        self.status
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
