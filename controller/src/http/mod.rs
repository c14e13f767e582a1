//! Orchestrator transport

pub mod client;
