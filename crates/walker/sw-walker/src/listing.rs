//! Paginated object listing for one prefix.

use std::sync::Arc;

use async_stream::try_stream;
use futures::Stream;
use sw_error::{Result, SwError};
use tracing::debug;

use crate::event::ObjectEvent;
use crate::stats::PrefixEntry;
use crate::store::{ListPage, ListRequest, ObjectStore};

/// List every page of objects under one prefix.
///
/// Yields `StartPrefix`, one `ObjectsBatch` per page as soon as it arrives,
/// then `EndPrefix` with the totals. Pages are requested strictly one after
/// another, each continuing at the previous page's marker. The prefix's
/// totals are owned by this stream alone.
pub(crate) fn list_prefix<S>(
    store: Arc<S>,
    bucket: String,
    delimiter: String,
    entry: PrefixEntry,
) -> impl Stream<Item = Result<ObjectEvent>> + Send + 'static
where
    S: ObjectStore + ?Sized + 'static,
{
    try_stream! {
        let PrefixEntry { prefix, mut stats } = entry;
        yield ObjectEvent::StartPrefix(prefix.clone());

        let mut marker: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let request = ListRequest::new(bucket.as_str(), prefix.as_str(), delimiter.as_str())
                .with_marker(marker.take());
            let ListPage {
                contents,
                is_truncated,
                next_marker,
                ..
            } = store.list_objects(&request).await?;

            pages += 1;
            stats.record_page(&contents);

            debug!(
                prefix = %prefix,
                page = pages,
                objects = contents.len(),
                truncated = is_truncated,
                "Listed object page"
            );

            yield ObjectEvent::ObjectsBatch {
                prefix: prefix.clone(),
                entries: contents,
            };

            if !is_truncated {
                break;
            }

            let next = next_marker.ok_or_else(|| {
                SwError::listing(
                    &bucket,
                    &prefix,
                    request.marker.clone(),
                    "truncated page carried no continuation marker",
                )
            })?;
            marker = Some(next);
        }

        debug!(
            prefix = %prefix,
            pages,
            count = stats.count,
            size = stats.size,
            "Finished prefix"
        );

        yield ObjectEvent::EndPrefix { prefix, stats };
    }
}
