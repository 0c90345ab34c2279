//! Object store listing abstraction.
//!
//! This module provides the listing seam the walker is built on:
//! - [`ObjectStore`] trait: one delimiter-scoped listing page per call
//! - [`S3Store`]: adapter over the AWS SDK S3 client
//! - [`MemoryStore`]: in-process store for tests and local use

mod memory;
mod s3;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sw_error::Result;

pub use memory::MemoryStore;
pub use s3::S3Store;

/// Trait for object store clients that support delimiter listing.
///
/// Implementations return exactly one page per call. The walker drives
/// pagination itself by passing back [`ListPage::next_marker`].
///
/// Errors should be reported as [`sw_error::SwError::Listing`] (see
/// [`sw_error::SwError::listing`]); the walker surfaces whatever the store
/// returns without wrapping it again.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Lists one page of common prefixes and objects under `request.prefix`.
    async fn list_objects(&self, request: &ListRequest) -> Result<ListPage>;
}

#[async_trait]
impl<T: ObjectStore + ?Sized> ObjectStore for std::sync::Arc<T> {
    async fn list_objects(&self, request: &ListRequest) -> Result<ListPage> {
        (**self).list_objects(request).await
    }
}

/// A single listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    /// Bucket to list
    pub bucket: String,

    /// Prefix to list under
    pub prefix: String,

    /// Hierarchy separator
    pub delimiter: String,

    /// Continuation marker from the previous page (None for the first page)
    pub marker: Option<String>,
}

impl ListRequest {
    /// Create a request for the first page of `prefix`.
    pub fn new(
        bucket: impl Into<String>,
        prefix: impl Into<String>,
        delimiter: impl Into<String>,
    ) -> Self {
        Self {
            bucket: bucket.into(),
            prefix: prefix.into(),
            delimiter: delimiter.into(),
            marker: None,
        }
    }

    /// Continue after `marker`.
    pub fn with_marker(mut self, marker: Option<String>) -> Self {
        self.marker = marker;
        self
    }
}

/// One page of listing results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPage {
    /// Immediate child prefixes, in store order
    pub common_prefixes: Vec<String>,

    /// Objects directly under the listed prefix
    pub contents: Vec<ObjectEntry>,

    /// More results exist beyond this page
    pub is_truncated: bool,

    /// Marker for the next page, present iff `is_truncated`
    pub next_marker: Option<String>,
}

impl ListPage {
    /// Create a final (untruncated) page.
    pub fn new(common_prefixes: Vec<String>, contents: Vec<ObjectEntry>) -> Self {
        Self {
            common_prefixes,
            contents,
            is_truncated: false,
            next_marker: None,
        }
    }

    /// Mark this page as truncated, continuing at `next_marker`.
    pub fn truncated(mut self, next_marker: impl Into<String>) -> Self {
        self.is_truncated = true;
        self.next_marker = Some(next_marker.into());
        self
    }

    /// Total bytes of the objects on this page.
    pub fn total_size(&self) -> u64 {
        self.contents.iter().map(|entry| entry.size).sum()
    }
}

/// An object found directly under a prefix.
///
/// Only `key` and `size` are read by the walker; the remaining fields are
/// passed through from the store as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectEntry {
    /// The object key (full path within the bucket)
    pub key: String,

    /// Size of the object in bytes
    pub size: u64,

    /// Last modified timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,

    /// Entity tag as reported by the store
    #[serde(skip_serializing_if = "Option::is_none")]
    pub e_tag: Option<String>,

    /// Storage class as reported by the store
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_class: Option<String>,
}

impl ObjectEntry {
    /// Create an entry with only a key and size.
    pub fn new(key: impl Into<String>, size: u64) -> Self {
        Self {
            key: key.into(),
            size,
            last_modified: None,
            e_tag: None,
            storage_class: None,
        }
    }
}
