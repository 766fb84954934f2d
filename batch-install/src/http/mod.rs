//! Outbound HTTP to the CI/CD API

pub mod batch;
pub mod classify;
pub mod client;
