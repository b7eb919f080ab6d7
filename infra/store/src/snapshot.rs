//! In-memory shape of the catalog: groups and their features, both in insertion order.

use crate::error::StoreError;
use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};
use toggle_domain::Feature;

/// Version written into every persisted snapshot.
pub const FORMAT_VERSION: u32 = 1;

/// A group together with its features.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupEntry {
    name: String,
    #[serde(default)]
    features: Vec<Feature>,
}

impl GroupEntry {
    fn new(name: String) -> Self {
        Self { name, features: Vec::new() }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Features in insertion order.
    #[must_use]
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    #[must_use]
    pub fn feature(&self, name: &str) -> Option<&Feature> {
        self.features.iter().find(|f| f.name == name)
    }

    pub fn feature_mut(&mut self, name: &str) -> Option<&mut Feature> {
        self.features.iter_mut().find(|f| f.name == name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.feature(name).is_some()
    }

    /// Replaces the feature with the same name in place, or appends it.
    ///
    /// The feature's `group` is forced to this group's name. Returns `true` when appended.
    pub fn upsert(&mut self, mut feature: Feature) -> bool {
        feature.group.clone_from(&self.name);
        if let Some(existing) = self.feature_mut(&feature.name) {
            *existing = feature;
            false
        } else {
            self.features.push(feature);
            true
        }
    }

    /// Removes a feature, keeping the order of the remaining ones.
    pub fn remove(&mut self, name: &str) -> Option<Feature> {
        let position = self.features.iter().position(|f| f.name == name)?;
        Some(self.features.remove(position))
    }

    /// Renames `from` to `to` without moving it.
    ///
    /// Returns `false` and changes nothing when `from` is absent or another feature
    /// already uses `to`.
    pub fn rename(&mut self, from: &str, to: &str) -> bool {
        if from != to && self.contains(to) {
            return false;
        }
        match self.feature_mut(from) {
            Some(feature) => {
                to.clone_into(&mut feature.name);
                true
            },
            None => false,
        }
    }
}

/// Every group of the catalog. Cloned as a draft by each write transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    groups: Vec<GroupEntry>,
    index: FxHashMap<String, usize>,
}

impl Snapshot {
    /// Builds a snapshot from persisted groups, rejecting empty names, duplicates and
    /// misplaced features.
    ///
    /// # Errors
    /// Returns [`StoreError::Corrupted`] when a group or feature name is empty, a group name
    /// repeats, a feature name repeats inside a group, or a feature claims a different group
    /// than the one holding it.
    pub fn from_groups(groups: Vec<GroupEntry>) -> Result<Self, StoreError> {
        let mut index = FxHashMap::default();
        for (position, group) in groups.iter().enumerate() {
            if group.name.is_empty() {
                return Err(corrupted(format!("group #{position} has an empty name")));
            }
            if index.insert(group.name.clone(), position).is_some() {
                return Err(corrupted(format!("group '{}' appears twice", group.name)));
            }
            for (i, feature) in group.features.iter().enumerate() {
                if feature.name.is_empty() {
                    return Err(corrupted(format!(
                        "feature #{i} of group '{}' has an empty name",
                        group.name
                    )));
                }
                if feature.group != group.name {
                    return Err(corrupted(format!(
                        "feature '{}' claims group '{}' but is stored under '{}'",
                        feature.name, feature.group, group.name
                    )));
                }
                if group.features[..i].iter().any(|f| f.name == feature.name) {
                    return Err(corrupted(format!(
                        "feature '{}' appears twice in group '{}'",
                        feature.name, group.name
                    )));
                }
            }
        }
        Ok(Self { groups, index })
    }

    /// Group names in insertion order.
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(GroupEntry::name)
    }

    #[must_use]
    pub fn groups(&self) -> &[GroupEntry] {
        &self.groups
    }

    #[must_use]
    pub fn group(&self, name: &str) -> Option<&GroupEntry> {
        self.index.get(name).map(|&i| &self.groups[i])
    }

    pub fn group_mut(&mut self, name: &str) -> Option<&mut GroupEntry> {
        self.index.get(name).map(|&i| &mut self.groups[i])
    }

    /// Insert-if-absent. Returns the group and whether it was created.
    pub fn ensure_group(&mut self, name: &str) -> (&mut GroupEntry, bool) {
        if let Some(&i) = self.index.get(name) {
            return (&mut self.groups[i], false);
        }
        let position = self.groups.len();
        self.groups.push(GroupEntry::new(name.to_owned()));
        self.index.insert(name.to_owned(), position);
        (&mut self.groups[position], true)
    }

    /// Ensures the feature's group, then upserts into it. Returns `true` when appended.
    pub fn upsert_feature(&mut self, feature: Feature) -> bool {
        let (group, _) = self.ensure_group(&feature.group);
        group.upsert(feature)
    }

    #[must_use]
    pub fn feature(&self, group: &str, name: &str) -> Option<&Feature> {
        self.group(group)?.feature(name)
    }

    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn feature_count(&self) -> usize {
        self.groups.iter().map(|g| g.features.len()).sum()
    }
}

/// On-disk envelope.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct SnapshotFile<G> {
    pub(crate) format: u32,
    pub(crate) groups: G,
}

impl Snapshot {
    pub(crate) fn to_json(&self) -> Result<Vec<u8>, StoreError> {
        let file = SnapshotFile { format: FORMAT_VERSION, groups: &self.groups };
        let mut bytes = serde_json::to_vec_pretty(&file)?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    pub(crate) fn from_json(bytes: &[u8]) -> Result<Self, StoreError> {
        let file: SnapshotFile<Vec<GroupEntry>> = serde_json::from_slice(bytes)?;
        if file.format != FORMAT_VERSION {
            return Err(corrupted(format!(
                "unsupported format {} (expected {FORMAT_VERSION})",
                file.format
            )));
        }
        Self::from_groups(file.groups)
    }
}

fn corrupted(message: String) -> StoreError {
    StoreError::Corrupted { message: message.into(), context: None }
}
