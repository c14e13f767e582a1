//! Task definition handling

pub mod descriptor;
pub mod resolver;
pub mod template;
