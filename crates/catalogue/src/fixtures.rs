//! Development fixtures: demo games and two known users.
//!
//! Loading is idempotent. Games are only seeded into an empty store and a
//! user is only created when its email is free, so restarting with `--seed`
//! against a persistent database changes nothing.

use catalogue_core::auth::{generate_api_token, Role, User};
use catalogue_core::catalogue::generate_seed_games;

use crate::{auth::hash_password, state::AppState};

/// Number of demo games seeded into an empty store.
pub const FIXTURE_GAME_COUNT: u32 = 10;

/// Password shared by every fixture user.
pub const FIXTURE_PASSWORD: &str = "123";

/// `(pseudo, email, extra role)` of each fixture user.
const FIXTURE_USERS: [(&str, &str, Role); 2] = [
    ("splint", "splint@test.fr", Role::Admin),
    ("user1", "user1@test.fr", Role::User),
];

/// Loads game and user fixtures and logs the users' API tokens.
pub async fn load(state: &AppState) -> anyhow::Result<Vec<User>> {
    load_games(state).await?;
    load_users(state).await
}

async fn load_games(state: &AppState) -> anyhow::Result<()> {
    let existing = state.store.count().await?;
    if existing > 0 {
        tracing::info!(existing, "Catalogue already populated, skipping game fixtures");
        return Ok(());
    }

    for input in generate_seed_games(FIXTURE_GAME_COUNT) {
        state.catalogue.create(&input).await?;
    }

    tracing::info!(count = FIXTURE_GAME_COUNT, "Loaded game fixtures");
    Ok(())
}

async fn load_users(state: &AppState) -> anyhow::Result<Vec<User>> {
    let mut users = Vec::with_capacity(FIXTURE_USERS.len());

    for (pseudo, email, role) in FIXTURE_USERS {
        let user = match state.users.get_user_by_email(email).await? {
            Some(existing) => existing,
            None => {
                let password_hash = hash_password(FIXTURE_PASSWORD.to_string()).await?;
                let user =
                    User::new(pseudo, email, password_hash, generate_api_token()).with_role(role);
                state.users.create_user(&user).await?;
                user
            }
        };

        tracing::info!(
            pseudo = %user.pseudo,
            email = %user.email,
            token = %user.api_token,
            "Fixture user ready"
        );
        users.push(user);
    }

    Ok(users)
}
