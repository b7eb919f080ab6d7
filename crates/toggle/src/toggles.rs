use serde::Serialize;
use toggle_catalog::{Catalog, CatalogError, CatalogErrorExt};
use toggle_domain::Feature;
use toggle_domain::config::{StoreBackend, StoreConfig};
use toggle_resolver::Activation;
use toggle_store::Store;
use tracing::{debug, info};

/// Activation of one feature for one requester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureState {
    pub group: String,
    pub name: String,
    pub active: bool,
}

/// Catalog plus resolver: the entry point API layers call into.
#[derive(Debug, Clone)]
pub struct Toggles {
    catalog: Catalog,
}

impl Toggles {
    /// Opens the store described by `config` and wraps it in a catalog.
    ///
    /// # Errors
    /// Returns [`CatalogError::Store`] if a file-backed store cannot be opened.
    pub fn open(config: &StoreConfig) -> Result<Self, CatalogError> {
        let store = match config.backend {
            StoreBackend::Memory => Store::memory(),
            StoreBackend::File => Store::builder()
                .path(&config.data_dir)
                .file_name(config.file_name.as_str())
                .open()
                .map_err(CatalogError::from)
                .context(format!("Opening catalog in {}", config.data_dir.display()))?,
        };
        info!(backend = ?config.backend, durable = store.is_durable(), "Toggles ready");
        Ok(Self::from_catalog(Catalog::new(store)))
    }

    #[must_use]
    pub const fn from_catalog(catalog: Catalog) -> Self {
        Self { catalog }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_catalog(Catalog::in_memory())
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// `true` when `group/feature` is on for a requester belonging to `requester_groups`.
    ///
    /// # Errors
    /// [`CatalogError::GroupNotFound`] or [`CatalogError::FeatureNotFound`], in that order.
    pub fn is_active<S: AsRef<str>>(
        &self,
        group: &str,
        feature: &str,
        requester_groups: &[S],
    ) -> Result<bool, CatalogError> {
        self.explain(group, feature, requester_groups).map(|activation| activation.is_active())
    }

    /// The reason behind [`is_active`](Self::is_active).
    ///
    /// # Errors
    /// [`CatalogError::GroupNotFound`] or [`CatalogError::FeatureNotFound`], in that order.
    pub fn explain<S: AsRef<str>>(
        &self,
        group: &str,
        feature: &str,
        requester_groups: &[S],
    ) -> Result<Activation, CatalogError> {
        let feature = self.catalog.get_feature(group, feature)?;
        Ok(toggle_resolver::evaluate(&feature, requester_groups))
    }

    /// Activation of every feature in `group`, in insertion order.
    ///
    /// # Errors
    /// Returns [`CatalogError::GroupNotFound`] if the group does not exist.
    pub fn group_states<S: AsRef<str>>(
        &self,
        group: &str,
        requester_groups: &[S],
    ) -> Result<Vec<FeatureState>, CatalogError> {
        let states: Vec<_> = self
            .catalog
            .get_group_features(group)?
            .into_iter()
            .map(|feature| state(feature, requester_groups))
            .collect();
        debug!(group, count = states.len(), "Group states resolved");
        Ok(states)
    }

    /// Activation of every feature in the catalog, grouped in creation order.
    #[must_use]
    pub fn all_states<S: AsRef<str>>(&self, requester_groups: &[S]) -> Vec<FeatureState> {
        self.catalog.store().read(|snapshot| {
            snapshot
                .groups()
                .iter()
                .flat_map(|entry| entry.features().iter().cloned())
                .map(|feature| state(feature, requester_groups))
                .collect()
        })
    }
}

impl From<Store> for Toggles {
    fn from(store: Store) -> Self {
        Self::from_catalog(Catalog::new(store))
    }
}

fn state<S: AsRef<str>>(feature: Feature, requester_groups: &[S]) -> FeatureState {
    let active = toggle_resolver::is_active(&feature, requester_groups);
    FeatureState { group: feature.group, name: feature.name, active }
}
