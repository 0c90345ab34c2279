//! S3 listing adapter.

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::operation::list_objects::ListObjectsOutput;
use chrono::DateTime;
use sw_error::{Result, SwError};
use tracing::debug;

use super::{ListPage, ListRequest, ObjectEntry, ObjectStore};

/// [`ObjectStore`] backed by an AWS SDK S3 client.
///
/// Uses the marker-based `ListObjects` call so that continuation markers are
/// plain keys. Building the client (region, credentials, endpoint) is left to
/// the caller.
#[derive(Debug, Clone)]
pub struct S3Store {
    client: Client,
}

impl S3Store {
    /// Wrap an existing S3 client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Get the underlying client.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

impl From<Client> for S3Store {
    fn from(client: Client) -> Self {
        Self::new(client)
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn list_objects(&self, request: &ListRequest) -> Result<ListPage> {
        let mut req = self
            .client
            .list_objects()
            .bucket(&request.bucket)
            .prefix(&request.prefix)
            .delimiter(&request.delimiter);

        if let Some(ref marker) = request.marker {
            req = req.marker(marker);
        }

        let resp = req.send().await.map_err(|e| {
            SwError::listing(
                &request.bucket,
                &request.prefix,
                request.marker.clone(),
                e,
            )
        })?;

        let page = page_from_output(resp);

        debug!(
            bucket = %request.bucket,
            prefix = %request.prefix,
            prefixes = page.common_prefixes.len(),
            objects = page.contents.len(),
            truncated = page.is_truncated,
            "S3 list page"
        );

        Ok(page)
    }
}

/// Convert a `ListObjects` response into a [`ListPage`].
///
/// S3 only returns `NextMarker` when a delimiter is set. If a truncated
/// response lacks it, the page continues after its greatest key or common
/// prefix, which is what S3 documents for that case.
fn page_from_output(resp: ListObjectsOutput) -> ListPage {
    let common_prefixes: Vec<String> = resp
        .common_prefixes
        .unwrap_or_default()
        .into_iter()
        .filter_map(|cp| cp.prefix)
        .collect();

    let contents: Vec<ObjectEntry> = resp
        .contents
        .unwrap_or_default()
        .into_iter()
        .filter_map(|obj| {
            let key = obj.key?;
            let last_modified = obj
                .last_modified
                .and_then(|t| DateTime::from_timestamp(t.secs(), t.subsec_nanos()));

            Some(ObjectEntry {
                key,
                size: obj.size.unwrap_or(0).max(0) as u64,
                last_modified,
                e_tag: obj.e_tag,
                storage_class: obj.storage_class.map(|class| class.as_str().to_string()),
            })
        })
        .collect();

    let is_truncated = resp.is_truncated == Some(true);
    let next_marker = if is_truncated {
        resp.next_marker.or_else(|| {
            let last_key = contents.last().map(|entry| entry.key.as_str());
            let last_prefix = common_prefixes.last().map(String::as_str);
            last_key.max(last_prefix).map(str::to_string)
        })
    } else {
        None
    };

    ListPage {
        common_prefixes,
        contents,
        is_truncated,
        next_marker,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::types::{CommonPrefix, Object, ObjectStorageClass};

    #[test]
    fn test_page_from_output() {
        let resp = ListObjectsOutput::builder()
            .common_prefixes(CommonPrefix::builder().prefix("logs/2024/").build())
            .contents(
                Object::builder()
                    .key("logs/readme.md")
                    .size(42)
                    .e_tag("\"abc\"")
                    .storage_class(ObjectStorageClass::Standard)
                    .build(),
            )
            .is_truncated(false)
            .build();

        let page = page_from_output(resp);

        assert_eq!(page.common_prefixes, vec!["logs/2024/"]);
        assert_eq!(page.contents.len(), 1);
        assert_eq!(page.contents[0].key, "logs/readme.md");
        assert_eq!(page.contents[0].size, 42);
        assert_eq!(page.contents[0].e_tag.as_deref(), Some("\"abc\""));
        assert_eq!(page.contents[0].storage_class.as_deref(), Some("STANDARD"));
        assert!(!page.is_truncated);
        assert!(page.next_marker.is_none());
    }

    #[test]
    fn test_page_from_output_uses_next_marker() {
        let resp = ListObjectsOutput::builder()
            .contents(Object::builder().key("a/1").size(1).build())
            .is_truncated(true)
            .next_marker("a/1")
            .build();

        let page = page_from_output(resp);
        assert!(page.is_truncated);
        assert_eq!(page.next_marker.as_deref(), Some("a/1"));
    }

    #[test]
    fn test_page_from_output_falls_back_to_last_item() {
        let resp = ListObjectsOutput::builder()
            .common_prefixes(CommonPrefix::builder().prefix("a/z/").build())
            .contents(Object::builder().key("a/b").size(1).build())
            .is_truncated(true)
            .build();

        let page = page_from_output(resp);
        assert_eq!(page.next_marker.as_deref(), Some("a/z/"));
    }

    #[test]
    fn test_page_from_output_skips_keyless_objects() {
        let resp = ListObjectsOutput::builder()
            .contents(Object::builder().size(9).build())
            .build();

        let page = page_from_output(resp);
        assert!(page.contents.is_empty());
        assert!(!page.is_truncated);
    }
}
