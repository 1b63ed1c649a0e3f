//! User-specific domain logic, including the friendship graph.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
