//! Marathon API wire models shared by the controller

pub mod models;

pub use models::*;
