use crate::engine::{Backend, Store};
use crate::error::{StoreError, StoreErrorExt};
use crate::persist::{self, FileBackend};
use private::Sealed;
use std::fs;
use std::path::PathBuf;
use tracing::{info, instrument};

const DEFAULT_FILE_NAME: &str = "catalog.json";

#[derive(Debug, Clone)]
struct StoreOptions {
    create: bool,
    file_name: String,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self { create: true, file_name: DEFAULT_FILE_NAME.to_owned() }
    }
}

#[derive(Debug, Default)]
pub struct NoPath;
#[derive(Debug)]
pub struct WithPath(PathBuf);

mod private {
    pub(super) trait Sealed {}
}
impl Sealed for NoPath {}
impl Sealed for WithPath {}

#[allow(private_bounds)]
#[derive(Debug, Default)]
pub struct StoreBuilder<S: Sealed = NoPath> {
    state: S,
    options: StoreOptions,
}

#[allow(private_bounds)]
impl<S: Sealed> StoreBuilder<S> {
    #[must_use = "Sets whether the data directory should be created if it does not exist"]
    pub const fn create(mut self, enable: bool) -> Self {
        self.options.create = enable;
        self
    }

    #[must_use = "Sets the catalog file name inside the data directory"]
    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.options.file_name = name.into();
        self
    }

    fn transition<N: Sealed>(self, state: N) -> StoreBuilder<N> {
        StoreBuilder { state, options: self.options }
    }
}

impl StoreBuilder<NoPath> {
    #[must_use = "Creates a new store builder with default configuration"]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "Sets the data directory holding the catalog file"]
    pub fn path(self, dir: impl Into<PathBuf>) -> StoreBuilder<WithPath> {
        self.transition(WithPath(dir.into()))
    }
}

impl StoreBuilder<WithPath> {
    /// Consumes the configuration and opens a durable store.
    ///
    /// Boot sequence:
    /// 1. **Bootstrapping**: creates the data directory if `create(true)` was set.
    /// 2. **Canonicalization**: resolves the directory to an absolute physical path.
    /// 3. **Self-Healing**: removes stale temp files left by crashed writers.
    /// 4. **Loading**: reads the catalog file; a missing file is an empty catalog.
    ///
    /// # Errors
    /// * [`StoreError::InvalidConfiguration`] if the file name is empty or contains a path separator.
    /// * [`StoreError::Io`] if the directory is missing (with `create(false)`) or unreadable.
    /// * [`StoreError::Serialization`] / [`StoreError::Corrupted`] if the catalog file is invalid.
    #[instrument(skip(self), fields(dir = %self.state.0.display()))]
    pub fn open(self) -> Result<Store, StoreError> {
        let Self { state: WithPath(dir), options } = self;
        validate_file_name(&options.file_name)?;

        if options.create {
            fs::create_dir_all(&dir)
                .context(format!("Failed to bootstrap data directory: {}", dir.display()))?;
        }

        let canonical = fs::canonicalize(&dir)
            .context(format!("Failed to resolve data directory: {}", dir.display()))?;

        persist::purge_tmp(&canonical);

        let backend = FileBackend::new(canonical.join(&options.file_name));
        let snapshot = backend.load()?;
        info!(
            path = %backend.path.display(),
            groups = snapshot.group_count(),
            features = snapshot.feature_count(),
            "Catalog store opened"
        );

        Ok(Store::from_parts(snapshot, Backend::File(backend)))
    }
}

fn validate_file_name(name: &str) -> Result<(), StoreError> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\']);
    if invalid {
        return Err(StoreError::InvalidConfiguration {
            message: format!("'{name}' is not a plain file name").into(),
            context: None,
        });
    }
    Ok(())
}
