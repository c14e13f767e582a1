//! marathonctl library
//!
//! Deploys, inspects, scales and rolls back Marathon applications.

pub mod app;
pub mod deploy;
pub mod errors;
pub mod filesys;
pub mod http;
pub mod logs;
pub mod task;
pub mod utils;
