use crate::actor_framework::EntityId;
use crate::domain::Film;

/// Custom actions for Film entities.
///
/// The user id in `Like`/`Unlike` is checked against the user store by the
/// film client before the action is sent.
#[derive(Debug, Clone)]
pub enum FilmAction {
    /// Adds a user to the film's like set. Repeating it is a no-op.
    Like { film_id: EntityId, user_id: EntityId },
    /// Removes a user from the like set, if present.
    Unlike { film_id: EntityId, user_id: EntityId },
    /// Ranks all films by like count and keeps at most this many.
    Popular(usize),
}

/// Results from FilmActions - variants match 1:1 with FilmAction
#[derive(Debug, Clone)]
pub enum FilmActionResult {
    Liked,
    Unliked,
    /// Most liked first; equal counts keep ascending id order
    Popular(Vec<Film>),
}
