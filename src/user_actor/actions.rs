use crate::actor_framework::EntityId;
use crate::domain::User;

/// Friendship actions for User entities.
///
/// Each action touches both sides of a friendship inside a single store
/// request, which keeps the relation symmetric for every observer.
#[derive(Debug, Clone)]
pub enum UserAction {
    /// Makes two users friends of each other. Repeating it is a no-op.
    AddFriend { user_id: EntityId, friend_id: EntityId },
    /// Ends a friendship on both sides. Removing a missing friendship is a no-op.
    RemoveFriend { user_id: EntityId, friend_id: EntityId },
    /// Resolves every friend of a user.
    FriendsOf(EntityId),
    /// Resolves the friends two users have in common.
    CommonFriends { user_id: EntityId, other_id: EntityId },
}

/// Results from UserActions
#[derive(Debug, Clone)]
pub enum UserActionResult {
    FriendAdded,
    FriendRemoved,
    /// Resolved friend records, ordered by id
    Friends(Vec<User>),
}
