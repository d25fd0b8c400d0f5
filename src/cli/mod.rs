//! CLI command implementations

pub mod config;
pub mod git;
pub mod serve;
