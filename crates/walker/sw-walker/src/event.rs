//! Events produced by walks.
//!
//! Both walks deliver a closed set of outcomes through a stream. Every stream
//! ends with exactly one terminal event (`End` or `Error`) and yields nothing
//! after it. The walk only makes progress while its stream is polled, so a
//! consumer must drain the stream to learn how the walk ended.

use futures::stream::BoxStream;
use sw_error::SwError;

use crate::stats::PrefixStats;
use crate::store::ObjectEntry;

/// Stream returned by [`Walker::walk_prefixes`](crate::Walker::walk_prefixes).
pub type PrefixStream = BoxStream<'static, PrefixEvent>;

/// Stream returned by [`Walker::walk_objects`](crate::Walker::walk_objects).
pub type ObjectStream = BoxStream<'static, ObjectEvent>;

/// Event of a prefix discovery walk.
#[derive(Debug)]
pub enum PrefixEvent {
    /// A non-ignored prefix below the root was discovered
    PrefixFound(String),

    /// A listing request failed; the walk is over
    Error(SwError),

    /// Every reachable prefix was discovered
    End,
}

impl PrefixEvent {
    /// Check if this event ends the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Error(_) | Self::End)
    }
}

/// Event of an object walk.
#[derive(Debug)]
pub enum ObjectEvent {
    /// A prefix was discovered (emitted before any object listing starts)
    PrefixFound(String),

    /// Object listing for a prefix started
    StartPrefix(String),

    /// One page of objects directly under `prefix`
    ObjectsBatch {
        prefix: String,
        entries: Vec<ObjectEntry>,
    },

    /// The last page of `prefix` arrived; `stats` covers all its pages
    EndPrefix { prefix: String, stats: PrefixStats },

    /// A listing request failed; the walk is over and results are partial
    Error(SwError),

    /// Every discovered prefix was fully listed
    End,
}

impl ObjectEvent {
    /// Check if this event ends the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Error(_) | Self::End)
    }

    /// Prefix the event refers to, if any.
    pub fn prefix(&self) -> Option<&str> {
        match self {
            Self::PrefixFound(prefix) | Self::StartPrefix(prefix) => Some(prefix.as_str()),
            Self::ObjectsBatch { prefix, .. } | Self::EndPrefix { prefix, .. } => {
                Some(prefix.as_str())
            }
            Self::Error(_) | Self::End => None,
        }
    }
}
