//! Command-line front end for temporal deduplication.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod query;
pub mod summary;
pub mod types;
