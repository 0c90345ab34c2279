//! Serial depth-first prefix discovery.

use std::sync::Arc;

use async_stream::try_stream;
use futures::Stream;
use sw_error::Result;
use tracing::{debug, warn};

use crate::ignore::IgnoreSet;
use crate::store::{ListRequest, ObjectStore};

/// Discover every non-ignored prefix below `root`, in pre-order.
///
/// One request is outstanding at a time. The root itself is listed but not
/// yielded. An ignored child is dropped before it is ever listed, which prunes
/// its whole subtree. The stream ends after the first error.
pub(crate) fn discover_prefixes<S>(
    store: Arc<S>,
    bucket: String,
    root: String,
    delimiter: String,
    ignored: Arc<IgnoreSet>,
) -> impl Stream<Item = Result<String>> + Send + 'static
where
    S: ObjectStore + ?Sized + 'static,
{
    try_stream! {
        // Children are pushed in reverse so that popping follows store order.
        let mut pending = children(&*store, &bucket, &root, &delimiter, &ignored).await?;

        while let Some(prefix) = pending.pop() {
            yield prefix.clone();

            let below = children(&*store, &bucket, &prefix, &delimiter, &ignored).await?;
            pending.extend(below);
        }
    }
}

/// List the immediate child prefixes of `prefix`, minus ignored ones,
/// in reverse store order.
async fn children<S>(
    store: &S,
    bucket: &str,
    prefix: &str,
    delimiter: &str,
    ignored: &IgnoreSet,
) -> Result<Vec<String>>
where
    S: ObjectStore + ?Sized,
{
    let request = ListRequest::new(bucket, prefix, delimiter);
    let page = store.list_objects(&request).await?;

    if page.is_truncated {
        warn!(
            bucket = bucket,
            prefix = prefix,
            returned = page.common_prefixes.len(),
            "Prefix listing truncated, only the first page of child prefixes is walked"
        );
    }

    let mut found: Vec<String> = Vec::with_capacity(page.common_prefixes.len());
    for child in page.common_prefixes {
        if ignored.contains(&child) {
            debug!(prefix = %child, "Skipping ignored prefix");
            continue;
        }
        found.push(child);
    }

    debug!(prefix = prefix, children = found.len(), "Listed child prefixes");

    found.reverse();
    Ok(found)
}
