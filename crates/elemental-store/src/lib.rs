//! Elemental Store - Snapshot Persistence and Profile Book
//!
//! Participants, element mappings, archetypes and settings are persisted as
//! one [`Snapshot`]. The [`ProfileBook`] owns the current snapshot, applies
//! administrator edits through a [`SnapshotStore`], and re-runs the matcher
//! after every change.
//!
//! ```text
//!   edit ──► ProfileBook ──save──► SnapshotStore (SQLite / memory)
//!                 │
//!          match_profiles
//!                 │
//!          MatchedProfile[] ──► DistributionStats
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod book;
pub mod error;
pub mod memory;
pub mod snapshot;
pub mod store;
pub mod traits;

pub use book::ProfileBook;
pub use error::{Error, Result};
pub use memory::MemorySnapshotStore;
pub use snapshot::Snapshot;
pub use store::{default_data_dir, default_db_path, SqliteSnapshotStore};
pub use traits::SnapshotStore;
