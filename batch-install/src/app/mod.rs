//! Application wiring: inputs, options and the install run

pub mod inputs;
pub mod options;
pub mod run;
