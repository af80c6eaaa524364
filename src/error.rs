//! Error type shared by the whole crate.
//!
//! Event handlers never return these; they log and let the feature stay
//! inactive. Constructors, loaders and explicit helpers do.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::ElementId;

pub type Result<T> = std::result::Result<T, PageError>;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("element {0} does not exist")]
    MissingElement(ElementId),

    #[error("counter target {text:?} is not a number")]
    InvalidCounterTarget { text: String },

    #[error("invalid root margin {value:?}: {reason}")]
    InvalidRootMargin { value: String, reason: String },

    #[error("font {descriptor:?} failed to load: {reason}")]
    FontLoad { descriptor: String, reason: String },

    #[error("service worker registration failed: {0}")]
    ServiceWorker(String),

    #[error("layout failed: {0}")]
    Layout(#[from] taffy::TaffyError),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
