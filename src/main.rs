use chrono::NaiveDate;
use tracing::{error, info, Instrument};

use filmorate::{setup_tracing, FilmCreate, FilmorateSystem, SystemConfig, UserCreate};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting filmorate");

    let system = FilmorateSystem::with_config(SystemConfig::from_env());

    let birthday = NaiveDate::from_ymd_opt(1988, 4, 12).ok_or("invalid birthday")?;
    let span = tracing::info_span!("user_registration");
    let (alice, bob, carol) = async {
        let alice = system.user_client.add_user(UserCreate::new("alice@example.com", "alice", birthday).with_name("Alice")).await?;
        let bob = system.user_client.add_user(UserCreate::new("bob@example.com", "bob", birthday)).await?;
        let carol = system.user_client.add_user(UserCreate::new("carol@example.com", "carol", birthday)).await?;
        Ok::<_, filmorate::UserError>((alice, bob, carol))
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    let span = tracing::info_span!("film_registration");
    let films = async {
        let mut films = Vec::new();
        for (name, year, duration) in [("Stalker", 1979, 161), ("Solaris", 1972, 167), ("Mirror", 1975, 107)] {
            let release = NaiveDate::from_ymd_opt(year, 1, 1).ok_or("invalid release date")?;
            let film = system
                .film_client
                .add_film(FilmCreate::new(name, release, duration))
                .await
                .map_err(|e| e.to_string())?;
            films.push(film);
        }
        Ok::<_, String>(films)
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("social");
    async {
        system.user_client.add_friend(alice.id, bob.id).await?;
        system.user_client.add_friend(carol.id, alice.id).await?;
        let common = system.user_client.common_friends(bob.id, carol.id).await?;
        info!(count = common.len(), "Common friends of bob and carol");
        Ok::<_, filmorate::UserError>(())
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    let span = tracing::info_span!("popularity");
    let ranking = async {
        for user in [&alice, &bob, &carol] {
            system.film_client.like(films[1].id, user.id).await?;
        }
        system.film_client.like(films[0].id, bob.id).await?;
        system.film_client.popular_default().await
    }
    .instrument(span)
    .await;

    match ranking {
        Ok(films) => {
            for film in films {
                info!(film_id = film.id, name = %film.name, likes = film.like_count(), "Popular film");
            }
        }
        Err(e) => error!(error = %e, "Popularity ranking failed"),
    }

    // Shutdown system gracefully
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
