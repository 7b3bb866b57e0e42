// src/lib.rs

pub mod commands;
pub mod domain;
pub mod error;
pub mod extractor;
pub mod lifecycle;
pub mod service;
pub mod test_utils;

pub use domain::models::{Grade, HealthCategory, HealthIssue, HealthScoreResult, Severity};
pub use domain::snapshot::{CoreWebVitalsSnapshot, PageAuditSnapshot};
pub use service::health::analyze_health;
