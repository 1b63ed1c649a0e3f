use std::collections::HashSet;

use tracing::info;

use super::actions::{UserAction, UserActionResult};
use crate::actor_framework::{Entity, EntityId, FrameworkError, Storage};
use crate::domain::{User, UserCreate, UserPatch};

impl Entity for User {
    const KIND: &'static str = "User";
    type CreateParams = UserCreate;
    type Patch = UserPatch;
    type Action = UserAction;
    type ActionResult = UserActionResult;

    fn id(&self) -> EntityId {
        self.id
    }

    fn patch_id(patch: &UserPatch) -> Option<EntityId> {
        patch.id
    }

    /// Creates a new User from creation parameters.
    ///
    /// # Notes
    /// A missing or blank display name falls back to the login. The friend set
    /// always starts empty.
    fn from_create_params(id: EntityId, params: UserCreate) -> Result<Self, FrameworkError> {
        let name = match params.name {
            Some(name) if !name.trim().is_empty() => name,
            _ => params.login.clone(),
        };
        Ok(Self {
            id,
            email: params.email,
            login: params.login,
            name,
            birthday: params.birthday,
            friends: HashSet::new(),
        })
    }

    /// Updates the user's profile information.
    ///
    /// # Fields Updated
    /// - `email`, `login`, `name`, `birthday` when supplied
    ///
    /// The friend set is never touched by an update.
    fn on_update(&mut self, patch: UserPatch) -> Result<(), FrameworkError> {
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(login) = patch.login {
            self.login = login;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(birthday) = patch.birthday {
            self.birthday = birthday;
        }
        Ok(())
    }

    /// Handles friendship actions.
    ///
    /// # Errors
    /// - `InvalidArgument` when both ids are the same user
    /// - `NotFound` when either user is unknown; nothing is written in that case
    fn handle_action<S: Storage<Self>>(
        storage: &mut S,
        action: UserAction,
    ) -> Result<UserActionResult, FrameworkError> {
        match action {
            UserAction::AddFriend { user_id, friend_id } => {
                ensure_distinct(user_id, friend_id)?;
                storage.require(user_id)?;
                storage.require(friend_id)?;
                storage.require_mut(user_id)?.friends.insert(friend_id);
                storage.require_mut(friend_id)?.friends.insert(user_id);
                info!(user_id, friend_id, "Friend added");
                Ok(UserActionResult::FriendAdded)
            }
            UserAction::RemoveFriend { user_id, friend_id } => {
                ensure_distinct(user_id, friend_id)?;
                storage.require(user_id)?;
                storage.require(friend_id)?;
                storage.require_mut(user_id)?.friends.remove(&friend_id);
                storage.require_mut(friend_id)?.friends.remove(&user_id);
                info!(user_id, friend_id, "Friend removed");
                Ok(UserActionResult::FriendRemoved)
            }
            UserAction::FriendsOf(user_id) => {
                let ids = storage.require(user_id)?.friend_ids();
                Ok(UserActionResult::Friends(resolve(&*storage, &ids)?))
            }
            UserAction::CommonFriends { user_id, other_id } => {
                ensure_distinct(user_id, other_id)?;
                let user = storage.require(user_id)?;
                let other = storage.require(other_id)?;
                let mut ids: Vec<EntityId> = user.friends.intersection(&other.friends).copied().collect();
                ids.sort_unstable();
                Ok(UserActionResult::Friends(resolve(&*storage, &ids)?))
            }
        }
    }
}

fn ensure_distinct(user_id: EntityId, other_id: EntityId) -> Result<(), FrameworkError> {
    if user_id == other_id {
        return Err(FrameworkError::InvalidArgument(format!(
            "user {user_id} cannot be paired with itself"
        )));
    }
    Ok(())
}

fn resolve<S: Storage<User>>(storage: &S, ids: &[EntityId]) -> Result<Vec<User>, FrameworkError> {
    ids.iter().map(|&id| storage.require(id).cloned()).collect()
}
