// src/analysis/mod.rs
//! Business idea analysis through a hosted language model

pub mod client;
pub mod prompt;

pub use client::IdeaAnalyzer;
pub use prompt::build_analysis_prompt;
