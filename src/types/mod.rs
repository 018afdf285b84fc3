// src/types/mod.rs
pub mod job;
pub mod report;

pub use job::{JobListing, JobListingQuery, JobListingResult, JobRecord};
pub use report::{AnalysisReport, IdeaAnalysisRequest};
