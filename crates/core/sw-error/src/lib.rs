//! Error types for the prefix walker.
//!
//! This crate provides:
//! - [`SwError`] - Top-level error enum returned by walks and store adapters
//! - [`ListingError`] - A failed listing request, with the store's cause attached
//!
//! A walk never retries or suppresses errors. The first [`ListingError`] it
//! observes becomes the terminal event of the walk and is handed to the
//! consumer unchanged.

use std::error::Error as StdError;

use thiserror::Error;

/// Boxed error produced by an object store client.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Top-level error type for the prefix walker.
#[derive(Error, Debug)]
pub enum SwError {
    /// A listing request against the object store failed
    #[error("Listing failed: {0}")]
    Listing(#[from] ListingError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic errors (wrapped anyhow)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SwError {
    /// Build a [`SwError::Listing`] for a request against `bucket`/`prefix`.
    pub fn listing(
        bucket: impl Into<String>,
        prefix: impl Into<String>,
        marker: Option<String>,
        cause: impl Into<BoxError>,
    ) -> Self {
        Self::Listing(ListingError {
            bucket: bucket.into(),
            prefix: prefix.into(),
            marker,
            source: cause.into(),
        })
    }

    /// Returns the listing failure, if this is one.
    pub fn as_listing(&self) -> Option<&ListingError> {
        match self {
            Self::Listing(e) => Some(e),
            _ => None,
        }
    }
}

/// A listing request that the object store client rejected or failed to serve.
#[derive(Error, Debug)]
#[error("{bucket}/{prefix}{}: {source}", marker_suffix(.marker))]
pub struct ListingError {
    /// Bucket the request targeted
    pub bucket: String,

    /// Prefix the request targeted
    pub prefix: String,

    /// Continuation marker of the failed request, if it was a follow-up page
    pub marker: Option<String>,

    /// The store client's own error
    #[source]
    pub source: BoxError,
}

fn marker_suffix(marker: &Option<String>) -> String {
    match marker {
        Some(marker) => format!(" (marker {marker})"),
        None => String::new(),
    }
}

/// Result type alias using SwError.
pub type Result<T> = std::result::Result<T, SwError>;
