use tracing::{debug, error, info, instrument, warn};

use crate::actor_framework::{EntityId, ResourceClient};
use crate::clients::UserClient;
use crate::domain::{Film, FilmCreate, FilmPatch};
use crate::film_actor::{FilmAction, FilmActionResult, FilmError};
use crate::user_actor::UserError;
use crate::validation::{validate_film_patch, validate_new_film};

/// Client for interacting with the Film actor.
///
/// Likes reference users, so this client checks the user store before
/// forwarding `like`/`unlike` to the film store.
#[derive(Clone)]
pub struct FilmClient {
    inner: ResourceClient<Film>,
    user_client: UserClient,
    default_popular_count: usize,
}

impl FilmClient {
    pub fn new(inner: ResourceClient<Film>, user_client: UserClient, default_popular_count: usize) -> Self {
        Self {
            inner,
            user_client,
            default_popular_count,
        }
    }

    #[instrument(skip(self, params), fields(name = %params.name))]
    pub async fn add_film(&self, params: FilmCreate) -> Result<Film, FilmError> {
        if let Err(e) = validate_new_film(&params) {
            warn!(error = %e, "Rejected new film");
            return Err(e.into());
        }
        debug!("Sending request");
        let film = self.inner.create(params).await?;
        info!(film_id = film.id, "Film added");
        Ok(film)
    }

    /// Applies the supplied fields of `patch`. The id is checked first, then
    /// every supplied field, so a rejected patch changes nothing.
    #[instrument(skip(self, patch), fields(film_id = ?patch.id))]
    pub async fn update_film(&self, patch: FilmPatch) -> Result<Film, FilmError> {
        if patch.id.is_none() {
            warn!("Rejected film update without id");
            return Err(FilmError::InvalidArgument("Film id is required for update".into()));
        }
        if let Err(e) = validate_film_patch(&patch) {
            warn!(error = %e, "Rejected film update");
            return Err(e.into());
        }
        debug!("Sending request");
        let film = self.inner.update(patch).await?;
        info!("Film updated");
        Ok(film)
    }

    #[instrument(skip(self))]
    pub async fn like(&self, film_id: EntityId, user_id: EntityId) -> Result<(), FilmError> {
        self.ensure_user(user_id).await?;
        debug!("Sending request");
        match self.inner.perform_action(FilmAction::Like { film_id, user_id }).await? {
            FilmActionResult::Liked => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn unlike(&self, film_id: EntityId, user_id: EntityId) -> Result<(), FilmError> {
        self.ensure_user(user_id).await?;
        debug!("Sending request");
        match self.inner.perform_action(FilmAction::Unlike { film_id, user_id }).await? {
            FilmActionResult::Unliked => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    /// Films ordered by like count, most liked first, at most `count` of them.
    ///
    /// Films with equal counts come out in ascending id order.
    #[instrument(skip(self))]
    pub async fn popular(&self, count: i64) -> Result<Vec<Film>, FilmError> {
        let count = usize::try_from(count)
            .map_err(|_| FilmError::InvalidArgument(format!("count must not be negative, got {count}")))?;
        debug!("Sending request");
        match self.inner.perform_action(FilmAction::Popular(count)).await? {
            FilmActionResult::Popular(films) => Ok(films),
            other => Err(unexpected(other)),
        }
    }

    /// [`FilmClient::popular`] with the configured default count.
    pub async fn popular_default(&self) -> Result<Vec<Film>, FilmError> {
        let count = i64::try_from(self.default_popular_count).unwrap_or(i64::MAX);
        self.popular(count).await
    }

    async fn ensure_user(&self, user_id: EntityId) -> Result<(), FilmError> {
        match self.user_client.get_user(user_id).await {
            Ok(user) => {
                debug!(login = %user.login, "User validation successful");
                Ok(())
            }
            Err(UserError::NotFound(msg)) => {
                warn!("User not found");
                Err(FilmError::NotFound(msg))
            }
            Err(e) => {
                error!(error = %e, "User validation failed");
                Err(FilmError::ActorCommunicationError(format!("User validation failed: {e}")))
            }
        }
    }
}

crate::impl_client_methods!(FilmClient, Film, FilmError, film);

fn unexpected(result: FilmActionResult) -> FilmError {
    FilmError::ActorCommunicationError(format!("Unexpected result: {result:?}"))
}
