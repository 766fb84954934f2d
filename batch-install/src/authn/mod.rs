//! Authentication material for outbound calls

pub mod credentials;
