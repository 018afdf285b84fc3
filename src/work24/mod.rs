// src/work24/mod.rs
//! Work24 job listing search: request, XML feed parsing and tabular projection

pub mod client;
pub mod parser;
pub mod projection;
pub mod request;

pub use client::Work24Client;
pub use parser::parse_job_feed;
pub use projection::{JobProjection, JobTable};
