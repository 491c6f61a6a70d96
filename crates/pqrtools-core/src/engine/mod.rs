//! Configuration and error types shared by the workflows.

pub mod config;
pub mod error;
