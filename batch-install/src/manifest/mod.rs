//! Batch manifest sources

pub mod payload;
