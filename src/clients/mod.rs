//! Typed clients in front of the resource actors.
//!
//! Clients run field validation and cross-store checks, then forward the
//! request to the owning store.

mod macros;

pub mod film_client;
pub mod user_client;

pub use film_client::FilmClient;
pub use user_client::UserClient;
