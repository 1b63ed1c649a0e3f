use tracing::{debug, info, instrument, warn};

use crate::actor_framework::{EntityId, ResourceClient};
use crate::domain::{User, UserCreate, UserPatch};
use crate::user_actor::{UserAction, UserActionResult, UserError};
use crate::validation::{validate_new_user, validate_user_patch};

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

crate::impl_basic_client!(UserClient, User, UserError, user);

impl UserClient {
    #[instrument(skip(self, params), fields(login = %params.login))]
    pub async fn add_user(&self, params: UserCreate) -> Result<User, UserError> {
        if let Err(e) = validate_new_user(&params) {
            warn!(error = %e, "Rejected new user");
            return Err(e.into());
        }
        debug!("Sending request");
        let user = self.inner.create(params).await?;
        info!(user_id = user.id, "User added");
        Ok(user)
    }

    /// Applies the supplied fields of `patch`. The id is checked first, then
    /// every supplied field, so a rejected patch changes nothing.
    #[instrument(skip(self, patch), fields(user_id = ?patch.id))]
    pub async fn update_user(&self, patch: UserPatch) -> Result<User, UserError> {
        if patch.id.is_none() {
            warn!("Rejected user update without id");
            return Err(UserError::InvalidArgument("User id is required for update".into()));
        }
        if let Err(e) = validate_user_patch(&patch) {
            warn!(error = %e, "Rejected user update");
            return Err(e.into());
        }
        debug!("Sending request");
        let user = self.inner.update(patch).await?;
        info!("User updated");
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn add_friend(&self, user_id: EntityId, friend_id: EntityId) -> Result<(), UserError> {
        debug!("Sending request");
        match self.inner.perform_action(UserAction::AddFriend { user_id, friend_id }).await? {
            UserActionResult::FriendAdded => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn remove_friend(&self, user_id: EntityId, friend_id: EntityId) -> Result<(), UserError> {
        debug!("Sending request");
        match self.inner.perform_action(UserAction::RemoveFriend { user_id, friend_id }).await? {
            UserActionResult::FriendRemoved => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn friends_of(&self, user_id: EntityId) -> Result<Vec<User>, UserError> {
        debug!("Sending request");
        match self.inner.perform_action(UserAction::FriendsOf(user_id)).await? {
            UserActionResult::Friends(friends) => {
                debug!(count = friends.len(), "Friends resolved");
                Ok(friends)
            }
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn common_friends(&self, user_id: EntityId, other_id: EntityId) -> Result<Vec<User>, UserError> {
        debug!("Sending request");
        match self.inner.perform_action(UserAction::CommonFriends { user_id, other_id }).await? {
            UserActionResult::Friends(friends) => {
                debug!(count = friends.len(), "Common friends resolved");
                Ok(friends)
            }
            other => Err(unexpected(other)),
        }
    }
}

fn unexpected(result: UserActionResult) -> UserError {
    UserError::ActorCommunicationError(format!("Unexpected result: {result:?}"))
}
