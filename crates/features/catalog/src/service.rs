use crate::error::{CatalogError, CatalogErrorExt};
use toggle_domain::{Feature, FeaturePatch, FeatureSpec};
use toggle_store::{GroupEntry, Snapshot, Store};
use tracing::{debug, info, instrument};

/// The authoritative set of groups and features.
///
/// Every write runs as one store transaction: the group is ensured and the feature written
/// together, or nothing happens. Reads see the last committed state.
#[derive(Debug, Clone)]
pub struct Catalog {
    store: Store,
}

impl Catalog {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// A catalog over a fresh in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Store::memory())
    }

    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }

    /// Creates `name` if absent. Returns `true` when the group was created.
    ///
    /// # Errors
    /// * [`CatalogError::Validation`] for an empty name.
    /// * [`CatalogError::Store`] if the change cannot be persisted.
    #[instrument(skip(self))]
    pub fn add_group(&self, name: &str) -> Result<bool, CatalogError> {
        require_name("group", name)?;

        let created = self.store.transact(|draft| {
            Ok::<_, CatalogError>(draft.ensure_group(name).1)
        })?;

        if created {
            info!(group = name, "Group created");
        }
        Ok(created)
    }

    /// Inserts the feature described by `spec`, or overwrites the existing one in place.
    ///
    /// The group is created on first reference.
    ///
    /// # Errors
    /// * [`CatalogError::Validation`] for an empty group or feature name.
    /// * [`CatalogError::Store`] if the change cannot be persisted.
    #[instrument(skip(self, spec), fields(group = %spec.group, feature = %spec.name))]
    pub fn upsert_feature(&self, spec: FeatureSpec) -> Result<Feature, CatalogError> {
        validate_spec(&spec)?;
        let feature = spec.into_feature();

        let created = self.store.transact(|draft| {
            Ok::<_, CatalogError>(draft.upsert_feature(feature.clone()))
        })?;

        info!(created, "Feature upserted");
        Ok(feature)
    }

    /// Batch upsert. Every spec is validated before anything is written, then the whole
    /// batch is applied in one transaction. Results follow the input order.
    ///
    /// # Errors
    /// * [`CatalogError::Validation`] naming the first invalid spec; nothing is written.
    /// * [`CatalogError::Store`] if the batch cannot be persisted; nothing is written.
    #[instrument(skip(self, specs), fields(count = specs.len()))]
    pub fn upsert_features(&self, specs: Vec<FeatureSpec>) -> Result<Vec<Feature>, CatalogError> {
        for (position, spec) in specs.iter().enumerate() {
            validate_spec(spec).context(format!("Feature spec #{position}"))?;
        }

        let (features, created) = self.store.transact(|draft| {
            let mut features = Vec::with_capacity(specs.len());
            let mut created = 0usize;
            for spec in specs {
                let feature = spec.into_feature();
                if draft.upsert_feature(feature.clone()) {
                    created += 1;
                }
                features.push(feature);
            }
            Ok::<_, CatalogError>((features, created))
        })?;

        info!(created, updated = features.len() - created, "Features upserted");
        Ok(features)
    }

    /// Same as [`upsert_feature`](Self::upsert_feature).
    ///
    /// # Errors
    /// See [`upsert_feature`](Self::upsert_feature).
    pub fn add_feature(&self, spec: FeatureSpec) -> Result<Feature, CatalogError> {
        self.upsert_feature(spec)
    }

    /// Same as [`upsert_features`](Self::upsert_features).
    ///
    /// # Errors
    /// See [`upsert_features`](Self::upsert_features).
    pub fn add_features(&self, specs: Vec<FeatureSpec>) -> Result<Vec<Feature>, CatalogError> {
        self.upsert_features(specs)
    }

    /// Deletes a feature and returns it. The group stays, even when it becomes empty.
    ///
    /// # Errors
    /// * [`CatalogError::GroupNotFound`], checked first.
    /// * [`CatalogError::FeatureNotFound`].
    /// * [`CatalogError::Store`] if the change cannot be persisted.
    #[instrument(skip(self))]
    pub fn remove_feature(&self, group: &str, name: &str) -> Result<Feature, CatalogError> {
        let removed = self.store.transact(|draft| {
            let entry = group_mut(draft, group)?;
            entry.remove(name).ok_or_else(|| CatalogError::feature_not_found(group, name))
        })?;

        info!(group, feature = name, "Feature removed");
        Ok(removed)
    }

    /// Applies the present attributes of `patch`, renaming the feature when `patch.name` is set.
    ///
    /// # Errors
    /// * [`CatalogError::GroupNotFound`], checked first.
    /// * [`CatalogError::FeatureNotFound`].
    /// * [`CatalogError::Validation`] for an empty new name.
    /// * [`CatalogError::FeatureConflict`] when the new name belongs to another feature of the group.
    /// * [`CatalogError::Store`] if the change cannot be persisted.
    #[instrument(skip(self, patch))]
    pub fn update_feature(
        &self,
        group: &str,
        name: &str,
        patch: FeaturePatch,
    ) -> Result<Feature, CatalogError> {
        let updated = self.store.transact(|draft| {
            let entry = group_mut(draft, group)?;
            let feature = entry
                .feature_mut(name)
                .ok_or_else(|| CatalogError::feature_not_found(group, name))?;
            patch.apply_attributes(feature);

            let Some(new_name) = patch.name.as_deref() else {
                return Ok(feature.clone());
            };
            require_name("feature", new_name)?;
            if !entry.rename(name, new_name) {
                return Err(CatalogError::FeatureConflict {
                    group: group.to_owned(),
                    feature: new_name.to_owned(),
                    context: Some(format!("Renaming '{name}'").into()),
                });
            }
            entry
                .feature(new_name)
                .cloned()
                .ok_or_else(|| CatalogError::feature_not_found(group, new_name))
        })?;

        info!(group, feature = %updated.name, previous = name, "Feature updated");
        Ok(updated)
    }

    /// All group names in creation order.
    #[must_use]
    pub fn get_groups(&self) -> Vec<String> {
        self.store.read(|snapshot| snapshot.group_names().map(str::to_owned).collect())
    }

    /// Features of `group` in insertion order.
    ///
    /// # Errors
    /// Returns [`CatalogError::GroupNotFound`] if the group does not exist.
    pub fn get_group_features(&self, group: &str) -> Result<Vec<Feature>, CatalogError> {
        let features = self.store.read(|snapshot| {
            snapshot
                .group(group)
                .map(|entry| entry.features().to_vec())
                .ok_or_else(|| CatalogError::group_not_found(group))
        })?;
        debug!(group, count = features.len(), "Group features listed");
        Ok(features)
    }

    /// # Errors
    /// * [`CatalogError::GroupNotFound`], checked first.
    /// * [`CatalogError::FeatureNotFound`].
    pub fn get_feature(&self, group: &str, name: &str) -> Result<Feature, CatalogError> {
        self.store.read(|snapshot| {
            snapshot
                .group(group)
                .ok_or_else(|| CatalogError::group_not_found(group))?
                .feature(name)
                .cloned()
                .ok_or_else(|| CatalogError::feature_not_found(group, name))
        })
    }
}

fn group_mut<'a>(draft: &'a mut Snapshot, group: &str) -> Result<&'a mut GroupEntry, CatalogError> {
    draft.group_mut(group).ok_or_else(|| CatalogError::group_not_found(group))
}

fn require_name(what: &'static str, value: &str) -> Result<(), CatalogError> {
    if value.is_empty() {
        return Err(CatalogError::Validation {
            message: format!("{what} name cannot be empty").into(),
            context: None,
        });
    }
    Ok(())
}

fn validate_spec(spec: &FeatureSpec) -> Result<(), CatalogError> {
    require_name("group", &spec.group)?;
    require_name("feature", &spec.name)
}
