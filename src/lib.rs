//! # Filmorate
//!
//! In-memory film and user stores with a friendship graph and like-based
//! popularity ranking.
//!
//! ## Layout
//!
//! - **Stores** - each record kind lives in its own [`ResourceActor`], a task
//!   that owns the records and serves requests one at a time → [`Film`], [`User`]
//! - **Relations** - store-wide actions run inside the owning actor, so a
//!   friendship or like changes atomically → [`UserAction`], [`FilmAction`]
//! - **Clients** - cloneable handles that validate input and coordinate the
//!   two stores → [`UserClient`], [`FilmClient`]
//! - **System** - startup, configuration, and shutdown → [`FilmorateSystem`],
//!   [`SystemConfig`], [`setup_tracing`]
//!
//! ## Example Usage
//!
//! ```no_run
//! # use chrono::NaiveDate;
//! # use filmorate::{FilmCreate, FilmorateSystem, UserCreate};
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let system = FilmorateSystem::new();
//!
//! let release = NaiveDate::from_ymd_opt(1972, 3, 20).unwrap();
//! let film = system.film_client.add_film(FilmCreate::new("Solaris", release, 167)).await?;
//!
//! let birthday = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
//! let user = system.user_client.add_user(UserCreate::new("ann@mail.com", "ann", birthday)).await?;
//!
//! system.film_client.like(film.id, user.id).await?;
//! let top = system.film_client.popular(10).await?;
//!
//! system.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod actor_framework;
pub mod app_system;
pub mod clients;
pub mod domain;
pub mod film_actor;
pub mod user_actor;
pub mod validation;

#[cfg(test)]
mod mock_framework;

pub use actor_framework::{EntityId, FrameworkError, ResourceActor, ResourceClient};
pub use app_system::{setup_tracing, FilmorateSystem, SystemConfig};
pub use clients::{FilmClient, UserClient};
pub use domain::{Film, FilmCreate, FilmPatch, User, UserCreate, UserPatch};
pub use film_actor::{FilmAction, FilmError};
pub use user_actor::{UserAction, UserError};
