//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand.

mod export;
mod factors;
mod recommend;

pub use export::run_export_triples;
pub use factors::run_factors;
pub use recommend::{parse_threshold, run_recommend};

// Re-export config types used by handlers
pub use crate::config::AppConfig;
