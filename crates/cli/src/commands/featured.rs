//! `pp-cli featured`

use plate_palette_client::{AppError, AppState, ClientConfig};

use super::CommandError;

pub async fn run(config: &ClientConfig) -> Result<(), CommandError> {
    let state = AppState::from_config(config).map_err(AppError::from)?;
    let featured = state.feed().load_featured_recipes().await;

    if featured.load_failed {
        tracing::warn!("Could not load recipes");
        return Ok(());
    }
    if featured.recipes.is_empty() {
        tracing::info!("No recipes published yet");
        return Ok(());
    }

    tracing::info!("Latest creations:");
    for recipe in &featured.recipes {
        tracing::info!(
            "  {} by {} - ${} ({})",
            recipe.title,
            recipe.chef_name(),
            recipe.price,
            recipe.rating_label()
        );
    }
    Ok(())
}
