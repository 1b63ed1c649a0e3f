use std::collections::HashSet;

use tracing::{debug, info};

use super::actions::{FilmAction, FilmActionResult};
use crate::actor_framework::{Entity, EntityId, FrameworkError, Storage};
use crate::domain::{Film, FilmCreate, FilmPatch};

impl Entity for Film {
    const KIND: &'static str = "Film";
    type CreateParams = FilmCreate;
    type Patch = FilmPatch;
    type Action = FilmAction;
    type ActionResult = FilmActionResult;

    fn id(&self) -> EntityId {
        self.id
    }

    fn patch_id(patch: &FilmPatch) -> Option<EntityId> {
        patch.id
    }

    fn from_create_params(id: EntityId, params: FilmCreate) -> Result<Self, FrameworkError> {
        Ok(Self {
            id,
            name: params.name,
            description: params.description,
            release_date: params.release_date,
            duration: params.duration,
            likes: HashSet::new(),
        })
    }

    fn on_update(&mut self, patch: FilmPatch) -> Result<(), FrameworkError> {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(release_date) = patch.release_date {
            self.release_date = release_date;
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        Ok(())
    }

    /// Handles like and ranking actions.
    ///
    /// # Actions
    /// - `Like` / `Unlike`: set insert / remove, both idempotent
    /// - `Popular(count)`: like count descending, id ascending among equals
    ///
    /// # Errors
    /// Returns `NotFound` if the film is unknown.
    fn handle_action<S: Storage<Self>>(
        storage: &mut S,
        action: FilmAction,
    ) -> Result<FilmActionResult, FrameworkError> {
        match action {
            FilmAction::Like { film_id, user_id } => {
                let film = storage.require_mut(film_id)?;
                film.likes.insert(user_id);
                info!(film_id, user_id, likes = film.like_count(), "Film liked");
                Ok(FilmActionResult::Liked)
            }
            FilmAction::Unlike { film_id, user_id } => {
                let film = storage.require_mut(film_id)?;
                film.likes.remove(&user_id);
                info!(film_id, user_id, likes = film.like_count(), "Film unliked");
                Ok(FilmActionResult::Unliked)
            }
            FilmAction::Popular(count) => {
                let mut films: Vec<Film> = storage.iter().cloned().collect();
                films.sort_by(|a, b| {
                    b.like_count()
                        .cmp(&a.like_count())
                        .then_with(|| a.id.cmp(&b.id))
                });
                films.truncate(count);
                debug!(count, returned = films.len(), "Popular films ranked");
                Ok(FilmActionResult::Popular(films))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor_framework::InMemoryStorage;
    use chrono::NaiveDate;

    fn storage_with_films(count: u64) -> InMemoryStorage<Film> {
        let release = NaiveDate::from_ymd_opt(2001, 3, 9).unwrap();
        let mut storage = InMemoryStorage::default();
        for id in 1..=count {
            let params = FilmCreate::new(format!("Film {id}"), release, 90);
            storage.insert(Film::from_create_params(id, params).unwrap()).unwrap();
        }
        storage
    }

    fn like(storage: &mut InMemoryStorage<Film>, film_id: EntityId, user_id: EntityId) {
        Film::handle_action(storage, FilmAction::Like { film_id, user_id }).unwrap();
    }

    fn popular(storage: &mut InMemoryStorage<Film>, count: usize) -> Vec<EntityId> {
        match Film::handle_action(storage, FilmAction::Popular(count)).unwrap() {
            FilmActionResult::Popular(films) => films.into_iter().map(|f| f.id).collect(),
            other => panic!("Unexpected result: {:?}", other),
        }
    }

    #[test]
    fn update_keeps_absent_fields_and_likes() {
        let mut storage = storage_with_films(1);
        like(&mut storage, 1, 7);

        let mut film = storage.get(1).unwrap().clone();
        let before = film.clone();
        film.on_update(FilmPatch { duration: Some(120), ..FilmPatch::for_film(1) }).unwrap();

        assert_eq!(film.duration, 120);
        assert_eq!(film.name, before.name);
        assert_eq!(film.release_date, before.release_date);
        assert!(film.is_liked_by(7));
    }

    #[test]
    fn like_is_idempotent() {
        let mut storage = storage_with_films(1);
        like(&mut storage, 1, 3);
        like(&mut storage, 1, 3);
        assert_eq!(storage.get(1).unwrap().like_count(), 1);
        assert_eq!(storage.get(1).unwrap().liked_by(), vec![3]);
    }

    #[test]
    fn unlike_without_prior_like_is_a_no_op() {
        let mut storage = storage_with_films(1);
        like(&mut storage, 1, 3);

        let result = Film::handle_action(&mut storage, FilmAction::Unlike { film_id: 1, user_id: 4 });
        assert!(matches!(result, Ok(FilmActionResult::Unliked)));
        assert_eq!(storage.get(1).unwrap().like_count(), 1);

        Film::handle_action(&mut storage, FilmAction::Unlike { film_id: 1, user_id: 3 }).unwrap();
        assert_eq!(storage.get(1).unwrap().like_count(), 0);
    }

    #[test]
    fn like_unknown_film_is_not_found() {
        let mut storage = storage_with_films(1);
        assert_eq!(
            Film::handle_action(&mut storage, FilmAction::Like { film_id: 2, user_id: 1 }).unwrap_err(),
            FrameworkError::NotFound { kind: "Film", id: 2 }
        );
    }

    #[test]
    fn popular_scenario() {
        let mut storage = storage_with_films(3);
        like(&mut storage, 1, 1);
        for user_id in 1..=3 {
            like(&mut storage, 2, user_id);
        }
        like(&mut storage, 3, 2);
        like(&mut storage, 3, 3);

        assert_eq!(popular(&mut storage, 3), vec![2, 3, 1]);
        assert_eq!(popular(&mut storage, 2), vec![2, 3]);
        assert_eq!(popular(&mut storage, 10), vec![2, 3, 1]);
        assert!(popular(&mut storage, 0).is_empty());
    }

    #[test]
    fn popular_breaks_ties_by_id() {
        let mut storage = storage_with_films(4);
        like(&mut storage, 4, 1);
        like(&mut storage, 3, 1);

        assert_eq!(popular(&mut storage, 4), vec![3, 4, 1, 2]);
    }

    #[test]
    fn popular_is_ordered_by_like_count() {
        let mut storage = storage_with_films(6);
        for (film_id, likes) in [(1, 2), (2, 5), (3, 0), (4, 5), (5, 1), (6, 3)] {
            for user_id in 1..=likes {
                like(&mut storage, film_id, user_id);
            }
        }

        let ranked = match Film::handle_action(&mut storage, FilmAction::Popular(5)).unwrap() {
            FilmActionResult::Popular(films) => films,
            other => panic!("Unexpected result: {:?}", other),
        };
        assert_eq!(ranked.len(), 5);
        assert!(ranked.windows(2).all(|w| w[0].like_count() >= w[1].like_count()));
    }
}
