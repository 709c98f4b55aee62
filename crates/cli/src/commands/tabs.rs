//! `pp-cli tabs`

use plate_palette_client::services::capabilities::Capabilities;
use plate_palette_core::Role;

pub fn run(role: Role) {
    let capabilities = Capabilities::for_role(role);
    if capabilities.tabs.is_empty() {
        tracing::info!(%role, "No dashboard tabs for this role");
        return;
    }

    for tab in &capabilities.tabs {
        tracing::info!("  {:<12} {} [{}]", tab.id, tab.label, tab.icon);
    }
    tracing::info!(
        authored_recipes = capabilities.authored_recipes,
        own_orders = capabilities.own_orders,
        "Data scopes"
    );
}
