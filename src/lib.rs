//! Startup navigator: Work24 job listing search and LLM-backed business idea analysis.

pub mod analysis;
pub mod cli;
pub mod core;
pub mod error;
pub mod session;
pub mod types;
pub mod utils;
pub mod web;
pub mod work24;

pub use error::NavigatorError;
pub use web::{build_rocket, start_web_server};
