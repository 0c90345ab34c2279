//! Main Walker implementation.

use std::sync::Arc;

use async_stream::stream;
use futures::{StreamExt, pin_mut};
use sw_error::Result;
use tracing::{debug, info, warn};

use crate::config::WalkerConfig;
use crate::discovery::discover_prefixes;
use crate::event::{ObjectEvent, ObjectStream, PrefixEvent, PrefixStream};
use crate::ignore::IgnoreSet;
use crate::listing::list_prefix;
use crate::stats::{WalkState, WalkSummary};
use crate::store::ObjectStore;

/// Walks the prefix hierarchy of an object store.
///
/// A walker is configured once with a store and a [`WalkerConfig`], then
/// drives any number of walks. Each walk takes a snapshot of the ignore set
/// when it is started; prefixes ignored afterwards only affect later walks.
///
/// Walks are lazy streams. Nothing is listed until the stream is polled and
/// the walk stops as soon as the stream is dropped, so consumers must drain
/// the stream to observe the terminal `End` or `Error`.
pub struct Walker<S: ?Sized> {
    store: Arc<S>,
    config: WalkerConfig,
    ignored: Arc<IgnoreSet>,
}

impl<S: ObjectStore + 'static> Walker<S> {
    /// Create a new Walker.
    ///
    /// # Arguments
    ///
    /// * `store` - The object store to list
    /// * `config` - The walker configuration
    ///
    /// # Errors
    ///
    /// Returns [`SwError::Config`](sw_error::SwError::Config) if the
    /// configuration is invalid.
    pub fn new(store: S, config: WalkerConfig) -> Result<Self> {
        Self::from_arc(Arc::new(store), config)
    }

    /// Create a Walker with the default configuration (10 connections, `/`).
    pub fn with_defaults(store: S) -> Self {
        Self {
            store: Arc::new(store),
            config: WalkerConfig::default(),
            ignored: Arc::new(IgnoreSet::new()),
        }
    }
}

impl<S: ObjectStore + ?Sized + 'static> Walker<S> {
    /// Create a Walker over a shared store.
    pub fn from_arc(store: Arc<S>, config: WalkerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            store,
            config,
            ignored: Arc::new(IgnoreSet::new()),
        })
    }

    /// Ignore `prefix` and its subtree in walks started from now on.
    pub fn ignore_prefix(&mut self, prefix: impl Into<String>) {
        Arc::make_mut(&mut self.ignored).insert(prefix);
    }

    /// Ignore several prefixes at once.
    pub fn ignore_prefixes<I, P>(&mut self, prefixes: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Arc::make_mut(&mut self.ignored).extend(prefixes);
    }

    /// Get the current ignore set.
    pub fn ignored(&self) -> &IgnoreSet {
        &self.ignored
    }

    /// Get the configuration.
    pub fn config(&self) -> &WalkerConfig {
        &self.config
    }

    /// Get the store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Discover every non-ignored prefix below `root`.
    ///
    /// Yields [`PrefixEvent::PrefixFound`] in depth-first pre-order, then one
    /// [`PrefixEvent::End`], or stops at the first [`PrefixEvent::Error`].
    /// The root is listed but not reported. Use `""` to walk a whole bucket.
    pub fn walk_prefixes(&self, bucket: impl Into<String>, root: impl Into<String>) -> PrefixStream {
        let bucket = bucket.into();
        let root = root.into();

        debug!(
            bucket = %bucket,
            root = %root,
            ignored = self.ignored.len(),
            "Starting prefix walk"
        );

        let discovery = discover_prefixes(
            self.store.clone(),
            bucket.clone(),
            root.clone(),
            self.config.delimiter.clone(),
            self.ignored.clone(),
        );

        let events = stream! {
            pin_mut!(discovery);
            let mut found = 0usize;

            while let Some(result) = discovery.next().await {
                match result {
                    Ok(prefix) => {
                        found += 1;
                        yield PrefixEvent::PrefixFound(prefix);
                    }
                    Err(e) => {
                        warn!(bucket = %bucket, root = %root, error = %e, "Prefix walk failed");
                        yield PrefixEvent::Error(e);
                        return;
                    }
                }
            }

            info!(bucket = %bucket, root = %root, prefixes = found, "Prefix walk completed");
            yield PrefixEvent::End;
        };

        events.boxed()
    }

    /// Discover every prefix below `root`, then list the objects in each.
    ///
    /// Discovery runs to completion first and is reported as
    /// [`ObjectEvent::PrefixFound`]. Then up to `max_connections` prefixes are
    /// listed at once; each yields `StartPrefix`, one `ObjectsBatch` per page
    /// and `EndPrefix` with its totals. Events of different prefixes
    /// interleave in no particular order. The walk ends with `End`, or with
    /// the first `Error` after which no further prefix is started.
    pub fn walk_objects(&self, bucket: impl Into<String>, root: impl Into<String>) -> ObjectStream {
        let bucket = bucket.into();
        let root = root.into();
        let store = self.store.clone();
        let delimiter = self.config.delimiter.clone();
        let max_connections = self.config.max_connections;

        debug!(
            bucket = %bucket,
            root = %root,
            max_connections,
            ignored = self.ignored.len(),
            "Starting object walk"
        );

        let discovery = discover_prefixes(
            store.clone(),
            bucket.clone(),
            root.clone(),
            delimiter.clone(),
            self.ignored.clone(),
        );

        let events = stream! {
            let mut state = WalkState::new();
            pin_mut!(discovery);

            while let Some(result) = discovery.next().await {
                match result {
                    Ok(prefix) => {
                        state.discover(prefix.clone());
                        yield ObjectEvent::PrefixFound(prefix);
                    }
                    Err(e) => {
                        warn!(bucket = %bucket, root = %root, error = %e, "Prefix discovery failed");
                        yield ObjectEvent::Error(e);
                        return;
                    }
                }
            }

            let prefix_count = state.len();
            debug!(bucket = %bucket, prefix_count, "Prefix discovery completed, listing objects");

            let listings = futures::stream::iter(state.into_entries())
                .map(|entry| {
                    list_prefix(store.clone(), bucket.clone(), delimiter.clone(), entry).boxed()
                })
                .flatten_unordered(max_connections);
            pin_mut!(listings);

            let mut objects = 0u64;
            let mut bytes = 0u64;

            while let Some(result) = listings.next().await {
                match result {
                    Ok(event) => {
                        if let ObjectEvent::EndPrefix { stats, .. } = &event {
                            objects += stats.count;
                            bytes += stats.size;
                        }
                        yield event;
                    }
                    Err(e) => {
                        warn!(bucket = %bucket, root = %root, error = %e, "Object listing failed");
                        yield ObjectEvent::Error(e);
                        return;
                    }
                }
            }

            info!(
                bucket = %bucket,
                root = %root,
                prefixes = prefix_count,
                objects,
                bytes,
                "Object walk completed"
            );
            yield ObjectEvent::End;
        };

        events.boxed()
    }

    /// Run a prefix walk and collect the discovered prefixes in order.
    pub async fn collect_prefixes(
        &self,
        bucket: impl Into<String>,
        root: impl Into<String>,
    ) -> Result<Vec<String>> {
        let mut events = self.walk_prefixes(bucket, root);
        let mut prefixes = Vec::new();

        while let Some(event) = events.next().await {
            match event {
                PrefixEvent::PrefixFound(prefix) => prefixes.push(prefix),
                PrefixEvent::Error(e) => return Err(e),
                PrefixEvent::End => break,
            }
        }

        Ok(prefixes)
    }

    /// Run an object walk and fold it into a [`WalkSummary`].
    pub async fn summarize(
        &self,
        bucket: impl Into<String>,
        root: impl Into<String>,
    ) -> Result<WalkSummary> {
        let mut events = self.walk_objects(bucket, root);
        let mut summary = WalkSummary::new();

        while let Some(event) = events.next().await {
            summary.record(&event);
            match event {
                ObjectEvent::Error(e) => return Err(e),
                ObjectEvent::End => break,
                _ => {}
            }
        }

        Ok(summary)
    }
}
