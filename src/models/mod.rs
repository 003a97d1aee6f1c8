//! Configuration and upstream wire models.

pub mod config;
pub mod upstream;
