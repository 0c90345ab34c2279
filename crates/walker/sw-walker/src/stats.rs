//! Statistics for walks.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::event::ObjectEvent;
use crate::store::ObjectEntry;

/// Running totals for the objects directly under one prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixStats {
    /// Number of objects
    pub count: u64,

    /// Sum of object sizes in bytes
    pub size: u64,
}

impl PrefixStats {
    /// Add one page of entries.
    pub fn record_page(&mut self, entries: &[ObjectEntry]) {
        self.count += entries.len() as u64;
        self.size += entries.iter().map(|entry| entry.size).sum::<u64>();
    }
}

/// A discovered prefix and the totals accumulated for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PrefixEntry {
    pub prefix: String,
    pub stats: PrefixStats,
}

/// Per-walk mapping from discovered prefix to its totals, in discovery order.
///
/// Filled during discovery, then split up so that each entry is owned by the
/// one listing stream for its prefix.
#[derive(Debug, Default)]
pub(crate) struct WalkState {
    entries: Vec<PrefixEntry>,
}

impl WalkState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate zeroed totals for a newly discovered prefix.
    pub fn discover(&mut self, prefix: String) {
        self.entries.push(PrefixEntry {
            prefix,
            stats: PrefixStats::default(),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn into_entries(self) -> Vec<PrefixEntry> {
        self.entries
    }
}

/// Summary of a finished object walk.
///
/// Built by folding [`ObjectEvent`]s with [`WalkSummary::record`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalkSummary {
    /// When the first event was recorded
    pub started_at: Option<DateTime<Utc>>,

    /// When the terminal event was recorded
    pub completed_at: Option<DateTime<Utc>>,

    /// Prefixes found during discovery
    pub prefixes_discovered: usize,

    /// Prefixes whose listing finished
    pub prefixes_completed: usize,

    /// Objects seen across all batches
    pub objects: u64,

    /// Bytes seen across all batches
    pub bytes: u64,

    /// Final totals per completed prefix, in completion order
    pub prefixes: Vec<(String, PrefixStats)>,

    /// Whether the walk ended with `End` rather than `Error`
    pub complete: bool,
}

impl WalkSummary {
    /// Create an empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one event into the summary.
    pub fn record(&mut self, event: &ObjectEvent) {
        if self.started_at.is_none() {
            self.started_at = Some(Utc::now());
        }

        match event {
            ObjectEvent::PrefixFound(_) => self.prefixes_discovered += 1,
            ObjectEvent::StartPrefix(_) => {}
            ObjectEvent::ObjectsBatch { entries, .. } => {
                self.objects += entries.len() as u64;
                self.bytes += entries.iter().map(|entry| entry.size).sum::<u64>();
            }
            ObjectEvent::EndPrefix { prefix, stats } => {
                self.prefixes_completed += 1;
                self.prefixes.push((prefix.clone(), *stats));
            }
            ObjectEvent::Error(_) => self.completed_at = Some(Utc::now()),
            ObjectEvent::End => {
                self.completed_at = Some(Utc::now());
                self.complete = true;
            }
        }
    }

    /// Final totals recorded for `prefix`.
    pub fn stats_for(&self, prefix: &str) -> Option<PrefixStats> {
        self.prefixes
            .iter()
            .find(|(p, _)| p == prefix)
            .map(|(_, stats)| *stats)
    }

    /// Get the duration of the walk.
    pub fn duration(&self) -> Option<Duration> {
        match (self.started_at, self.completed_at) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }
}
