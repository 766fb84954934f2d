//! ServiceNow CI/CD batch installer
//!
//! Submits a batch install manifest and polls the asynchronous job until it
//! succeeds, fails or is canceled.

pub mod app;
pub mod authn;
pub mod errors;
pub mod filesys;
pub mod http;
pub mod logs;
pub mod manifest;
pub mod models;
pub mod report;
pub mod utils;
pub mod workers;
