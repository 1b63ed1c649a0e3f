use std::collections::HashSet;

use chrono::NaiveDate;

use crate::actor_framework::EntityId;

/// Represents a registered user in the system.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: EntityId,
    pub email: String,
    pub login: String,
    pub name: String,
    pub birthday: NaiveDate,
    pub(crate) friends: HashSet<EntityId>,
}

impl User {
    /// Ids of this user's friends, ascending.
    pub fn friend_ids(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self.friends.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn friend_count(&self) -> usize {
        self.friends.len()
    }

    pub fn is_friend_of(&self, user_id: EntityId) -> bool {
        self.friends.contains(&user_id)
    }
}

/// Payload for registering a new user.
#[derive(Debug, Clone, PartialEq)]
pub struct UserCreate {
    pub email: String,
    pub login: String,
    /// Display name; the login is used when absent or blank
    pub name: Option<String>,
    pub birthday: NaiveDate,
}

impl UserCreate {
    /// Creates a new registration payload.
    ///
    /// # Arguments
    /// * `email` - User's email address
    /// * `login` - Unique handle, must not contain whitespace
    /// * `birthday` - Date of birth
    pub fn new(email: impl Into<String>, login: impl Into<String>, birthday: NaiveDate) -> Self {
        Self {
            email: email.into(),
            login: login.into(),
            name: None,
            birthday,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Payload for updating an existing user. `None` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    pub id: Option<EntityId>,
    pub email: Option<String>,
    pub login: Option<String>,
    pub name: Option<String>,
    pub birthday: Option<NaiveDate>,
}

impl UserPatch {
    pub fn for_user(id: EntityId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }
}
