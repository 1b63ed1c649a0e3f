//! Film-specific domain logic, including likes and popularity ranking.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
