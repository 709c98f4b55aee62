//! Subcommand implementations.

pub mod dashboard;
pub mod featured;
pub mod status;
pub mod tabs;

use plate_palette_client::AppError;
use plate_palette_client::config::ConfigError;
use thiserror::Error;

/// Errors a subcommand can end with.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    App(#[from] AppError),

    /// The password variable named on the command line is unset.
    #[error("Missing environment variable: {0}")]
    MissingPassword(String),
}

impl CommandError {
    /// Send reportable failures to Sentry and return the text to show the
    /// user, when there is any.
    pub fn report(&self) -> Option<String> {
        match self {
            Self::App(err) => {
                err.capture();
                Some(err.user_message())
            }
            Self::Config(_) | Self::MissingPassword(_) => None,
        }
    }
}
