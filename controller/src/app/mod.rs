//! Application options and invocation wiring

pub mod options;
pub mod run;
