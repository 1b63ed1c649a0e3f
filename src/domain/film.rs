use std::collections::HashSet;

use chrono::NaiveDate;

use crate::actor_framework::EntityId;

/// A film in the catalogue.
///
/// The like set is only changed by the film store's actions; popularity is
/// always read from it rather than kept as a separate counter.
#[derive(Debug, Clone, PartialEq)]
pub struct Film {
    pub id: EntityId,
    pub name: String,
    pub description: Option<String>,
    pub release_date: NaiveDate,
    /// Running time in minutes
    pub duration: u32,
    pub(crate) likes: HashSet<EntityId>,
}

impl Film {
    pub fn like_count(&self) -> usize {
        self.likes.len()
    }

    pub fn is_liked_by(&self, user_id: EntityId) -> bool {
        self.likes.contains(&user_id)
    }

    /// Ids of the users who liked this film, ascending.
    pub fn liked_by(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self.likes.iter().copied().collect();
        ids.sort_unstable();
        ids
    }
}

/// Payload for adding a new film.
#[derive(Debug, Clone, PartialEq)]
pub struct FilmCreate {
    pub name: String,
    pub description: Option<String>,
    pub release_date: NaiveDate,
    pub duration: u32,
}

impl FilmCreate {
    pub fn new(name: impl Into<String>, release_date: NaiveDate, duration: u32) -> Self {
        Self {
            name: name.into(),
            description: None,
            release_date,
            duration,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Partial update of a film. `None` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilmPatch {
    pub id: Option<EntityId>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub duration: Option<u32>,
}

impl FilmPatch {
    pub fn for_film(id: EntityId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }
}
