//! In-memory object store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use sw_error::{Result, SwError};

use super::{ListPage, ListRequest, ObjectEntry, ObjectStore};

/// Default page size, matching the S3 `max-keys` default.
pub const DEFAULT_PAGE_SIZE: usize = 1000;

/// An object store held entirely in memory.
///
/// Keys are kept sorted per bucket and listed the way S3 `ListObjects` does:
/// keys continuing past the delimiter roll up into one common prefix, each
/// common prefix and each object counts once toward the page size, and a
/// marker resumes strictly after the last item of the previous page.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    buckets: BTreeMap<String, BTreeMap<String, ObjectEntry>>,
    page_size: usize,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            buckets: BTreeMap::new(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

enum Item {
    Prefix(String),
    Object(ObjectEntry),
}

impl Item {
    fn name(&self) -> &str {
        match self {
            Item::Prefix(prefix) => prefix.as_str(),
            Item::Object(entry) => entry.key.as_str(),
        }
    }
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of items (prefixes plus objects) per page.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Add an object of `size` bytes.
    pub fn with_object(mut self, bucket: &str, key: &str, size: u64) -> Self {
        self.insert(bucket, ObjectEntry::new(key, size));
        self
    }

    /// Insert or replace an object.
    pub fn insert(&mut self, bucket: &str, entry: ObjectEntry) {
        self.buckets
            .entry(bucket.to_string())
            .or_default()
            .insert(entry.key.clone(), entry);
    }

    /// Number of objects stored in `bucket`.
    pub fn object_count(&self, bucket: &str) -> usize {
        self.buckets.get(bucket).map_or(0, BTreeMap::len)
    }

    fn list_page(&self, request: &ListRequest) -> Result<ListPage> {
        let keys = self.buckets.get(&request.bucket).ok_or_else(|| {
            SwError::listing(
                &request.bucket,
                &request.prefix,
                request.marker.clone(),
                "NoSuchBucket: the specified bucket does not exist",
            )
        })?;

        let mut items: Vec<Item> = Vec::new();
        let mut truncated = false;

        for (key, entry) in keys.range(request.prefix.clone()..) {
            let Some(rest) = key.strip_prefix(&request.prefix) else {
                break;
            };

            let item = match (request.delimiter.is_empty(), rest.find(&request.delimiter)) {
                (false, Some(idx)) => {
                    let end = request.prefix.len() + idx + request.delimiter.len();
                    Item::Prefix(key[..end].to_string())
                }
                _ => Item::Object(entry.clone()),
            };

            if let Some(marker) = &request.marker {
                if item.name() <= marker.as_str() {
                    continue;
                }
            }

            // Keys under one common prefix are contiguous in sorted order.
            if let (Item::Prefix(current), Some(Item::Prefix(last))) = (&item, items.last()) {
                if current == last {
                    continue;
                }
            }

            if items.len() == self.page_size {
                truncated = true;
                break;
            }
            items.push(item);
        }

        let next_marker = if truncated {
            items.last().map(|item| item.name().to_string())
        } else {
            None
        };

        let mut page = ListPage::default();
        for item in items {
            match item {
                Item::Prefix(prefix) => page.common_prefixes.push(prefix),
                Item::Object(entry) => page.contents.push(entry),
            }
        }
        page.is_truncated = truncated;
        page.next_marker = next_marker;

        Ok(page)
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn list_objects(&self, request: &ListRequest) -> Result<ListPage> {
        self.list_page(request)
    }
}
