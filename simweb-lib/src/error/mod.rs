//! Error types

mod api;
mod config;

pub use api::*;
pub use config::*;

use webdom::NodeId;

/// Top-level error for this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP request failed or returned an unusable response.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The element a form was meant to be attached to no longer exists.
    #[error("Parent element {0} was removed before the form could be attached")]
    DetachedParent(NodeId),
}

impl Error {
    /// Returns the HTTP status code if this is an HTTP error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(e) => e.status_code(),
            _ => None,
        }
    }
}
