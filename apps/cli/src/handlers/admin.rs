//! Catalog administration commands.

use crate::handlers::emit;
use crate::models::args::Gating;
use anyhow::{Context, Result};
use serde_json::json;
use std::fs;
use std::path::Path;
use toggle::{Catalog, FeaturePatch, FeatureSpec, UserGroups};

pub fn list_groups(catalog: &Catalog) -> Result<()> {
    emit(&catalog.get_groups())
}

pub fn add_group(catalog: &Catalog, name: &str) -> Result<()> {
    let created = catalog.add_group(name)?;
    emit(&json!({ "group": name, "created": created }))
}

pub fn list_features(catalog: &Catalog, group: &str) -> Result<()> {
    emit(&catalog.get_group_features(group)?)
}

pub fn get_feature(catalog: &Catalog, group: &str, name: &str) -> Result<()> {
    emit(&catalog.get_feature(group, name)?)
}

pub fn add_feature(
    catalog: &Catalog,
    group: String,
    name: String,
    description: String,
    enabled: bool,
    gating: Gating,
) -> Result<()> {
    let spec = FeatureSpec::builder()
        .group(group)
        .name(name)
        .description(description)
        .enabled(enabled)
        .user_groups(user_groups(gating)?)
        .build();
    emit(&catalog.add_feature(spec)?)
}

pub fn import(catalog: &Catalog, file: &Path) -> Result<()> {
    let raw = fs::read_to_string(file).with_context(|| format!("Reading {}", file.display()))?;
    let specs: Vec<FeatureSpec> =
        serde_json::from_str(&raw).with_context(|| format!("Parsing {}", file.display()))?;
    emit(&catalog.add_features(specs)?)
}

pub fn update_feature(
    catalog: &Catalog,
    group: &str,
    name: &str,
    patch: FeaturePatch,
) -> Result<()> {
    emit(&catalog.update_feature(group, name, patch)?)
}

pub fn remove_feature(catalog: &Catalog, group: &str, name: &str) -> Result<()> {
    emit(&catalog.remove_feature(group, name)?)
}

/// Builds the patch for `update`; gating flags replace the whole rule.
pub fn patch(
    rename: Option<String>,
    description: Option<String>,
    enabled: Option<bool>,
    gating: Gating,
    clear_user_groups: bool,
) -> Result<FeaturePatch> {
    let user_groups = if clear_user_groups {
        Some(UserGroups::default())
    } else if gating.is_set() {
        Some(user_groups(gating)?)
    } else {
        None
    };

    let patch = FeaturePatch { name: rename, description, enabled, user_groups };
    anyhow::ensure!(!patch.is_empty(), "Nothing to update: pass at least one attribute flag");
    Ok(patch)
}

fn user_groups(gating: Gating) -> Result<UserGroups> {
    UserGroups::new(gating.user_groups, gating.pattern.as_deref())
        .context("Invalid user-group pattern")
}
