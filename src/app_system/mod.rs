//! System orchestration, configuration, startup, and shutdown logic.

pub mod config;
pub mod filmorate_system;
pub mod telemetry;

pub use config::*;
pub use filmorate_system::*;
pub use telemetry::*;
