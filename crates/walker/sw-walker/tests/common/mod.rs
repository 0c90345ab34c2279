//! Common utilities for walker integration tests.
//!
//! Provides stores with fully known contents and wrappers that observe how a
//! walk uses its store.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use sw_walker::{ListPage, ListRequest, ObjectEntry, ObjectEvent, ObjectStore, Result, SwError};

/// Store answering from a fixed table of `(prefix, marker) -> page`.
///
/// Any request missing from the table fails, so an unexpected request shows
/// up as a walk error.
#[derive(Default)]
pub struct ScriptedStore {
    pages: HashMap<(String, Option<String>), ListPage>,
}

impl ScriptedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer the first page of `prefix`.
    pub fn page(mut self, prefix: &str, page: ListPage) -> Self {
        self.pages.insert((prefix.to_string(), None), page);
        self
    }

    /// Answer the page of `prefix` that follows `marker`.
    pub fn page_after(mut self, prefix: &str, marker: &str, page: ListPage) -> Self {
        self.pages
            .insert((prefix.to_string(), Some(marker.to_string())), page);
        self
    }
}

#[async_trait]
impl ObjectStore for ScriptedStore {
    async fn list_objects(&self, request: &ListRequest) -> Result<ListPage> {
        self.pages
            .get(&(request.prefix.clone(), request.marker.clone()))
            .cloned()
            .ok_or_else(|| {
                SwError::listing(
                    &request.bucket,
                    &request.prefix,
                    request.marker.clone(),
                    "unscripted request",
                )
            })
    }
}

/// Wrapper recording every request and the peak number in flight.
pub struct RecordingStore<S> {
    inner: S,
    delay: Option<Duration>,
    requests: Mutex<Vec<ListRequest>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl<S: ObjectStore> RecordingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            delay: None,
            requests: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Hold every request open for `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn requests(&self) -> Vec<ListRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Requests for `prefix`, as their markers, in issue order.
    pub fn markers_for(&self, prefix: &str) -> Vec<Option<String>> {
        self.requests()
            .into_iter()
            .filter(|r| r.prefix == prefix)
            .map(|r| r.marker)
            .collect()
    }

    pub fn requested_prefixes(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.prefix).collect()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.requests.lock().unwrap().clear();
        self.max_in_flight.store(0, Ordering::SeqCst);
    }
}

#[async_trait]
impl<S: ObjectStore> ObjectStore for RecordingStore<S> {
    async fn list_objects(&self, request: &ListRequest) -> Result<ListPage> {
        self.requests.lock().unwrap().push(request.clone());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let result = self.inner.list_objects(request).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

/// Wrapper that fails requests for one prefix after some succeeded.
///
/// Discovery lists each prefix once, so `fail_after = 0` fails discovery and
/// `fail_after = 1` fails the first object page.
pub struct FailingStore<S> {
    inner: S,
    prefix: String,
    fail_after: usize,
    seen: AtomicUsize,
}

impl<S: ObjectStore> FailingStore<S> {
    /// Fail the request for `prefix` once `fail_after` requests for it
    /// already succeeded.
    pub fn new(inner: S, prefix: &str, fail_after: usize) -> Self {
        Self {
            inner,
            prefix: prefix.to_string(),
            fail_after,
            seen: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl<S: ObjectStore> ObjectStore for FailingStore<S> {
    async fn list_objects(&self, request: &ListRequest) -> Result<ListPage> {
        if request.prefix == self.prefix {
            let seen = self.seen.fetch_add(1, Ordering::SeqCst);
            if seen >= self.fail_after {
                return Err(SwError::listing(
                    &request.bucket,
                    &request.prefix,
                    request.marker.clone(),
                    anyhow::anyhow!("SlowDown: please reduce your request rate"),
                ));
            }
        }
        self.inner.list_objects(request).await
    }
}

pub fn objects(entries: &[(&str, u64)]) -> Vec<ObjectEntry> {
    entries
        .iter()
        .map(|(key, size)| ObjectEntry::new(*key, *size))
        .collect()
}

pub fn prefixes(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

/// Short label for an event, for order assertions.
pub fn label(event: &ObjectEvent) -> String {
    match event {
        ObjectEvent::PrefixFound(p) => format!("found {p}"),
        ObjectEvent::StartPrefix(p) => format!("start {p}"),
        ObjectEvent::ObjectsBatch { prefix, entries } => format!("batch {prefix} {}", entries.len()),
        ObjectEvent::EndPrefix { prefix, stats } => {
            format!("end {prefix} {}/{}", stats.count, stats.size)
        }
        ObjectEvent::Error(_) => "error".to_string(),
        ObjectEvent::End => "end".to_string(),
    }
}
