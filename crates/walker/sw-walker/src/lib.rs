//! sw-walker - prefix hierarchy walking for object stores.
//!
//! Object stores are flat key spaces; delimiter listing makes them look like a
//! directory tree of "prefixes". This crate walks that tree:
//!
//! - Serial depth-first discovery of every prefix below a root, pruning
//!   ignored subtrees without listing them
//! - Paginated object listing of every discovered prefix, with a bounded
//!   number of prefixes listed concurrently and per-prefix totals
//! - Results delivered as a stream of typed events
//! - An S3 adapter over `aws-sdk-s3` and an in-memory store
//!
//! # Example
//!
//! ```ignore
//! use futures::StreamExt;
//! use sw_walker::{ObjectEvent, S3Store, Walker, WalkerConfig};
//!
//! let store = S3Store::new(aws_sdk_s3::Client::new(&sdk_config));
//! let mut walker = Walker::new(store, WalkerConfig::new().with_max_connections(16))?;
//! walker.ignore_prefixes(["tmp/", "logs/archive/"]);
//!
//! let mut events = walker.walk_objects("my-bucket", "");
//! while let Some(event) = events.next().await {
//!     match event {
//!         ObjectEvent::EndPrefix { prefix, stats } => {
//!             println!("{prefix}: {} objects, {} bytes", stats.count, stats.size);
//!         }
//!         ObjectEvent::Error(e) => return Err(e.into()),
//!         _ => {}
//!     }
//! }
//! ```

pub mod config;
mod discovery;
pub mod event;
pub mod ignore;
mod listing;
pub mod stats;
pub mod store;
pub mod walker;

pub use config::WalkerConfig;
pub use event::{ObjectEvent, ObjectStream, PrefixEvent, PrefixStream};
pub use ignore::IgnoreSet;
pub use stats::{PrefixStats, WalkSummary};
pub use store::{ListPage, ListRequest, MemoryStore, ObjectEntry, ObjectStore, S3Store};
pub use sw_error::{ListingError, Result, SwError};
pub use walker::Walker;
