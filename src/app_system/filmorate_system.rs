use tracing::{error, info, warn};

use super::SystemConfig;
use crate::actor_framework::ResourceActor;
use crate::clients::{FilmClient, UserClient};
use crate::domain::{Film, User};

/// The main application system that orchestrates both stores.
///
/// Responsible for starting up the actors, wiring the clients together, and
/// handling shutdown.
pub struct FilmorateSystem {
    pub film_client: FilmClient,
    pub user_client: UserClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl FilmorateSystem {
    pub fn new() -> Self {
        Self::with_config(SystemConfig::default())
    }

    /// Starts both stores. Must be called from within a tokio runtime.
    ///
    /// A zero `channel_buffer_size` is raised to 1.
    pub fn with_config(config: SystemConfig) -> Self {
        info!(?config, "Starting filmorate system");

        let buffer = if config.channel_buffer_size == 0 {
            warn!("channel_buffer_size must be at least 1, using 1");
            1
        } else {
            config.channel_buffer_size
        };

        // 1. User store
        let (user_actor, user_resource_client) = ResourceActor::<User>::new(buffer);
        let user_client = UserClient::new(user_resource_client);
        let user_handle = tokio::spawn(user_actor.run());

        // 2. Film store, validating likes against the user store
        let (film_actor, film_resource_client) = ResourceActor::<Film>::new(buffer);
        let film_client = FilmClient::new(film_resource_client, user_client.clone(), config.default_popular_count);
        let film_handle = tokio::spawn(film_actor.run());

        Self {
            film_client,
            user_client,
            handles: vec![user_handle, film_handle],
        }
    }

    /// Drops the system's clients and waits for both actors to finish.
    ///
    /// Actors stop once every client clone is gone, so callers must drop any
    /// clones they still hold first.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.film_client);
        drop(self.user_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

impl Default for FilmorateSystem {
    fn default() -> Self {
        Self::new()
    }
}
