// Module declarations
pub mod auth;
pub mod cli_context;
pub mod client;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod formatting;
pub mod logging;
pub mod models;
pub mod reporting;

#[cfg(test)]
mod tests;

// Re-export commonly used items
pub use auth::{AuthScheme, HostingMode};
pub use client::{probe_connection, HttpTransport, JiraClient, QueryOutcome, ReqwestTransport};
pub use config::{load_config, save_config, Config, Credentials, ProxyConfig, ServerConfig};
pub use error::{JiraError, JiraResult};
pub use models::*;
pub use reporting::{JsonLinesReporter, PlanReporter, ReportingFailure, TaskRef};
