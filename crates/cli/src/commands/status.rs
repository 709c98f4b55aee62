//! `pp-cli status`

use plate_palette_client::{ApiStatus, AppState, ClientConfig};

use super::CommandError;

pub async fn run(config: &ClientConfig) -> Result<(), CommandError> {
    let state = AppState::from_config(config).map_err(plate_palette_client::AppError::from)?;
    let status = state.initialize().await;

    match status.api {
        ApiStatus::Connected => tracing::info!(
            backend = %config.backend.base_url,
            "API Status: Connected to the recipe service"
        ),
        ApiStatus::Unreachable => tracing::warn!(
            backend = %config.backend.base_url,
            "API Status: the recipe service is unreachable"
        ),
    }

    tracing::info!("Admin Panel: {}", config.admin_panel_url());

    match &status.identity {
        Some(identity) => tracing::info!(
            user_id = %identity.id,
            role = %identity.role,
            "Signed in as {}",
            identity.name
        ),
        None => tracing::info!("Not signed in"),
    }

    status.require_connected()?;
    Ok(())
}
