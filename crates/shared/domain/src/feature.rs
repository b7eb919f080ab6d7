use crate::user_groups::UserGroups;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// A named boolean switch inside a group.
///
/// `(group, name)` identifies a feature. Both are compared by exact string match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub group: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "UserGroups::is_empty")]
    pub user_groups: UserGroups,
}

impl Feature {
    /// Returns `true` when a user-group rule restricts who sees the feature.
    #[must_use]
    pub const fn is_gated(&self) -> bool {
        !self.user_groups.is_empty()
    }
}

/// Full description of a feature passed to an upsert.
///
/// Omitted fields take their defaults, so re-adding an existing feature overwrites
/// its description, state and gating.
///
/// ```rust
/// use toggle_domain::{FeatureSpec, UserGroups};
///
/// let spec = FeatureSpec::builder()
///     .group("checkout")
///     .name("express")
///     .enabled(true)
///     .user_groups(UserGroups::from_list(["beta"]))
///     .build();
///
/// assert_eq!(spec.description, "");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
pub struct FeatureSpec {
    #[builder(setter(into))]
    pub group: String,
    #[builder(setter(into))]
    pub name: String,
    #[serde(default)]
    #[builder(default, setter(into))]
    pub description: String,
    /// Older clients send `active`.
    #[serde(default, alias = "active")]
    #[builder(default)]
    pub enabled: bool,
    #[serde(default)]
    #[builder(default)]
    pub user_groups: UserGroups,
}

impl FeatureSpec {
    #[must_use]
    pub fn into_feature(self) -> Feature {
        let Self { group, name, description, enabled, user_groups } = self;
        Feature { group, name, description, enabled, user_groups }
    }
}

impl From<FeatureSpec> for Feature {
    fn from(spec: FeatureSpec) -> Self {
        spec.into_feature()
    }
}

/// Partial update of a feature. `None` leaves the attribute untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(default)]
#[builder(field_defaults(default, setter(strip_option)))]
pub struct FeaturePatch {
    #[builder(setter(into))]
    pub name: Option<String>,
    #[builder(setter(into))]
    pub description: Option<String>,
    #[serde(alias = "active")]
    pub enabled: Option<bool>,
    pub user_groups: Option<UserGroups>,
}

impl FeaturePatch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.enabled.is_none()
            && self.user_groups.is_none()
    }

    /// Applies every present attribute except `name`, which the caller handles since
    /// renaming needs the sibling features.
    pub fn apply_attributes(&self, feature: &mut Feature) {
        if let Some(description) = &self.description {
            feature.description.clone_from(description);
        }
        if let Some(enabled) = self.enabled {
            feature.enabled = enabled;
        }
        if let Some(user_groups) = &self.user_groups {
            feature.user_groups = user_groups.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn spec_defaults_describe_a_disabled_ungated_feature() {
        let feature = FeatureSpec::builder().group("g").name("f").build().into_feature();
        assert_eq!(feature.description, "");
        assert!(!feature.enabled);
        assert!(!feature.is_gated());
    }

    #[test]
    fn spec_accepts_legacy_active_key() {
        let spec: FeatureSpec =
            serde_json::from_value(json!({ "group": "g", "name": "f", "active": true })).unwrap();
        assert!(spec.enabled);
    }

    #[test]
    fn spec_with_bad_pattern_fails_to_deserialize() {
        let raw = json!({ "group": "g", "name": "f", "user_groups": { "regex": "(" } });
        assert!(serde_json::from_value::<FeatureSpec>(raw).is_err());
    }

    #[test]
    fn ungated_feature_serializes_without_user_groups() {
        let feature = Feature { group: "g".into(), name: "f".into(), ..Feature::default() };
        let value = serde_json::to_value(&feature).unwrap();
        assert!(value.get("user_groups").is_none());
    }

    #[test]
    fn patch_leaves_missing_attributes_alone() {
        let mut feature = Feature {
            group: "g".into(),
            name: "f".into(),
            description: "before".into(),
            enabled: true,
            user_groups: UserGroups::from_list(["admin"]),
        };

        FeaturePatch::builder().enabled(false).build().apply_attributes(&mut feature);

        assert!(!feature.enabled);
        assert_eq!(feature.description, "before");
        assert_eq!(feature.user_groups.list(), ["admin"]);
    }

    #[test]
    fn empty_patch() {
        assert!(FeaturePatch::default().is_empty());
        assert!(!FeaturePatch::builder().name("renamed").build().is_empty());
    }
}
