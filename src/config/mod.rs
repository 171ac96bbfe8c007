//! JSON-backed configuration for command-line tools.

pub mod merge_job;
