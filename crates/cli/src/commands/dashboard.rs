//! `pp-cli dashboard`
//!
//! Signs in, loads the role's dashboard and prints one tab. The session is
//! not persisted; every invocation signs in afresh.

use plate_palette_client::services::capabilities::TabId;
use plate_palette_client::services::dashboard::DashboardPanel;
use plate_palette_client::services::session::LoginCredentials;
use plate_palette_client::{AppError, AppState, ClientConfig};
use plate_palette_core::{Order, Recipe};
use secrecy::SecretString;

use super::CommandError;

pub async fn run(
    config: &ClientConfig,
    email: String,
    password_env: &str,
    tab: Option<TabId>,
) -> Result<(), CommandError> {
    let password = std::env::var(password_env)
        .map_err(|_| CommandError::MissingPassword(password_env.to_owned()))?;
    let credentials = LoginCredentials {
        email,
        password: SecretString::from(password),
    };

    let state = AppState::from_config(config).map_err(AppError::from)?;
    state.initialize().await.require_connected()?;

    let identity = state
        .session()
        .login(&credentials.email, &credentials.password)
        .await
        .map_err(AppError::from)?;
    tracing::info!("Welcome back, {} ({})", identity.name, identity.role);

    let capabilities = state.capabilities();
    let Some(selected) = capabilities.select_tab(tab) else {
        tracing::warn!(role = %identity.role, "No dashboard tabs for this role");
        return Ok(());
    };
    if let Some(requested) = tab.filter(|t| *t != selected.id) {
        tracing::warn!(%requested, "Tab not available for this role, showing {}", selected.id);
    }

    let data = state
        .dashboard()
        .orchestrator()
        .load_dashboard(&identity)
        .await
        .map_err(AppError::from)?;

    match data.panel(selected.id) {
        DashboardPanel::Recipes { title, recipes } => print_recipes(title, recipes),
        DashboardPanel::Orders(orders) => print_orders(orders),
    }

    state.session().logout().await;
    Ok(())
}

fn print_recipes(title: &str, recipes: &[Recipe]) {
    tracing::info!("{title} ({})", recipes.len());
    for recipe in recipes {
        tracing::info!(
            "  [{}] {} by {} - ${} ({})",
            recipe.publication_label(),
            recipe.title,
            recipe.chef_name(),
            recipe.price,
            recipe.rating_label()
        );
    }
}

fn print_orders(orders: &[Order]) {
    tracing::info!("Order History ({})", orders.len());
    for order in orders {
        let date = order
            .order_date
            .map_or_else(|| "-".to_string(), |d| d.to_string());
        tracing::info!(
            "  #{} {} - {} - ${} [{}]",
            order.id,
            date,
            order.item_titles(),
            order.total_amount,
            order.status
        );
    }
}
