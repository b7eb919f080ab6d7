//! The [`Store`] handle: a snapshot behind a reader-writer lock plus an optional durable backend.

use crate::builder::StoreBuilder;
use crate::error::StoreError;
use crate::persist::FileBackend;
use crate::snapshot::Snapshot;
use parking_lot::RwLock;
use std::ops::Deref;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, trace};

#[derive(Debug)]
pub(crate) enum Backend {
    Memory,
    File(FileBackend),
}

/// The internal shared state of a [`Store`] instance.
#[derive(Debug)]
pub struct StoreInner {
    state: RwLock<Snapshot>,
    backend: Backend,
}

/// A thread-safe handle to the catalog store.
///
/// Reads run in parallel under a shared lock. Writes are serialized: each
/// [`transact`](Store::transact) works on a private draft and commits it, persisted first
/// when the store is durable, only if the closure and the save both succeed.
///
/// This handle is internally reference-counted (`Arc`) and can be cheaply cloned across threads.
#[derive(Debug, Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

impl Deref for Store {
    type Target = StoreInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Store {
    #[must_use = "The store is not opened until you call .open()"]
    pub fn builder() -> StoreBuilder {
        StoreBuilder::new()
    }

    /// A volatile store; nothing outlives the process.
    #[must_use]
    pub fn memory() -> Self {
        Self::from_parts(Snapshot::default(), Backend::Memory)
    }

    pub(crate) fn from_parts(snapshot: Snapshot, backend: Backend) -> Self {
        Self { inner: Arc::new(StoreInner { state: RwLock::new(snapshot), backend }) }
    }

    /// Path of the catalog file, `None` for a memory store.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match &self.backend {
            Backend::Memory => None,
            Backend::File(file) => Some(&file.path),
        }
    }

    #[must_use]
    pub fn is_durable(&self) -> bool {
        matches!(self.backend, Backend::File(_))
    }

    /// Runs `f` against the current snapshot under the shared lock.
    pub fn read<T>(&self, f: impl FnOnce(&Snapshot) -> T) -> T {
        f(&self.state.read())
    }

    /// Runs `f` against a draft copy of the snapshot as one atomic unit.
    ///
    /// The write lock is held for the whole call, so concurrent transactions never observe each
    /// other's drafts. When `f` returns `Ok` and the draft differs from the current snapshot, the
    /// draft is persisted and swapped in. Otherwise nothing changes.
    ///
    /// # Errors
    /// Returns whatever `f` returns, or the [`StoreError`] of a failed save converted into `E`.
    pub fn transact<T, E>(&self, f: impl FnOnce(&mut Snapshot) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let mut state = self.state.write();
        let mut draft = state.clone();
        let output = f(&mut draft)?;

        if draft == *state {
            trace!("Transaction left the catalog unchanged");
            return Ok(output);
        }

        if let Backend::File(file) = &self.backend {
            file.save(&draft)?;
        }
        *state = draft;
        debug!("Transaction committed");

        Ok(output)
    }
}
