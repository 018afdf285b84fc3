// src/core/mod.rs
//! Configuration and HTTP plumbing shared by both tools

pub mod config_manager;
pub mod service_client;

pub use config_manager::ConfigManager;
pub use service_client::ServiceClient;
