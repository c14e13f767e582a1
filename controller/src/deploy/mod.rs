//! Deployment decision engine

pub mod action;
pub mod endpoint;
pub mod engine;
pub mod interpret;
pub mod status;
