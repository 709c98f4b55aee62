//! PlatePalette CLI - inspect the recipe marketplace from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Check that the recipe backend answers
//! pp-cli status
//!
//! # Show the public "latest creations" feed
//! pp-cli featured
//!
//! # List the dashboard tabs a role can see
//! pp-cli tabs --role chef
//!
//! # Sign in and print a dashboard tab
//! PLATEPALETTE_PASSWORD=... pp-cli dashboard -e chef@example.com --tab my-recipes
//! ```
//!
//! Backend location, timeouts and Sentry are configured through the
//! environment; see `plate_palette_client::config`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use plate_palette_client::ClientConfig;
use plate_palette_client::services::capabilities::TabId;
use plate_palette_core::Role;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;

use commands::CommandError;

#[derive(Parser)]
#[command(name = "pp-cli")]
#[command(author, version, about = "PlatePalette recipe marketplace CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe the recipe backend and report any restored session
    Status,
    /// Show the newest published recipes
    Featured,
    /// List the dashboard tabs visible to a role
    Tabs {
        /// Role to resolve (`customer`, `chef`, `admin`)
        #[arg(short, long)]
        role: Role,
    },
    /// Sign in and show one dashboard tab
    Dashboard {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Environment variable holding the password
        #[arg(long, default_value = "PLATEPALETTE_PASSWORD")]
        password_env: String,

        /// Tab to show (`browse`, `my-recipes`, `my-orders`); defaults to the first visible
        #[arg(short, long)]
        tab: Option<TabId>,
    },
}

/// Initialize Sentry error tracking.
///
/// Returns a guard that must be kept alive for the duration of the program.
/// If `SENTRY_DSN` is not set, returns `None` and Sentry is disabled.
fn init_sentry(config: &ClientConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = ClientConfig::from_env();
    let _sentry_guard = config.as_ref().ok().and_then(init_sentry);

    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "plate_palette_client=info,pp_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let result = match config {
        Ok(config) => run(cli, &config).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        if let Some(hint) = e.report() {
            tracing::error!("{hint}");
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &ClientConfig) -> Result<(), CommandError> {
    match cli.command {
        Commands::Status => commands::status::run(config).await,
        Commands::Featured => commands::featured::run(config).await,
        Commands::Tabs { role } => {
            commands::tabs::run(role);
            Ok(())
        }
        Commands::Dashboard {
            email,
            password_env,
            tab,
        } => commands::dashboard::run(config, email, &password_env, tab).await,
    }
}
