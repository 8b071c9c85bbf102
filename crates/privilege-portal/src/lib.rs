pub mod catalog;
pub mod config;
pub mod eligibility;
pub mod error;
pub mod telemetry;
