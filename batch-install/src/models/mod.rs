//! Wire models for the batch install API

pub mod batch;
