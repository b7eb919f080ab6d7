//! Transactional storage for the toggle catalog.
//!
//! The whole catalog lives in memory as a [`Snapshot`]. Reads share a lock; writes run as
//! transactions over a draft copy, so a failed write never leaves a half-applied change.
//! A durable store additionally persists every committed draft as one JSON document.
//!
//! # Core Features
//!
//! - **Atomic Writes**: unique temp write + `fsync` + `rename`, so the catalog file is never
//!   left partially written.
//! - **Insert-if-absent groups**: [`Snapshot::ensure_group`] runs under the write lock, so
//!   concurrent writers never create a group twice.
//! - **Self-Healing**: stale temp files from crashed writers are removed on open.
//!
//! # Examples
//!
//! ```rust
//! use toggle_domain::Feature;
//! use toggle_store::{Store, StoreError};
//!
//! # fn main() -> Result<(), StoreError> {
//! # let tmp = tempfile::tempdir().unwrap();
//! let store = Store::builder().path(tmp.path().join("data")).create(true).open()?;
//!
//! store.transact(|draft| {
//!     draft.upsert_feature(Feature { group: "checkout".into(), name: "express".into(), ..Feature::default() });
//!     Ok::<_, StoreError>(())
//! })?;
//!
//! assert_eq!(store.read(|snapshot| snapshot.feature_count()), 1);
//! # Ok(())
//! # }
//! ```

mod builder;
mod engine;
mod error;
mod persist;
mod snapshot;

pub use builder::StoreBuilder;
pub use engine::{Store, StoreInner};
pub use error::{StoreError, StoreErrorExt};
pub use snapshot::{FORMAT_VERSION, GroupEntry, Snapshot};
