use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{InteractionRequest, RegistrationRequest, Session},
    services::providers::CatalogProvider,
};

const MAX_RATING: u8 = 5;

/// Logs a user in by name
pub async fn login(provider: Arc<dyn CatalogProvider>, name: &str) -> AppResult<Session> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::InvalidInput("Name is required".to_string()));
    }

    let session = provider.login(name).await?;
    tracing::info!(user_id = %session.user_id, "User logged in");
    Ok(session)
}

/// Creates a user profile and returns the session for it
pub async fn register(
    provider: Arc<dyn CatalogProvider>,
    request: RegistrationRequest,
) -> AppResult<Session> {
    if request.name.trim().is_empty() {
        return Err(AppError::InvalidInput("Name is required".to_string()));
    }
    if request.favorite_genres.iter().all(|g| g.trim().is_empty()) {
        return Err(AppError::InvalidInput(
            "Pick at least one favorite genre".to_string(),
        ));
    }

    let session = provider.register(&request).await?;
    tracing::info!(user_id = %session.user_id, "User registered");
    Ok(session)
}

/// Records a rating and/or like for a game
pub async fn record_interaction(
    provider: Arc<dyn CatalogProvider>,
    interaction: InteractionRequest,
) -> AppResult<()> {
    if interaction.rating.is_some_and(|r| r > MAX_RATING) {
        return Err(AppError::InvalidInput(format!(
            "Rating must be between 0 and {}",
            MAX_RATING
        )));
    }
    if interaction.rating.unwrap_or(0) == 0 && interaction.liked.is_none() {
        return Err(AppError::InvalidInput(
            "Provide a rating or a like".to_string(),
        ));
    }

    provider.record_interaction(&interaction).await?;

    tracing::info!(
        user_id = %interaction.user_id,
        game_id = interaction.game_id,
        "Interaction recorded"
    );
    Ok(())
}
