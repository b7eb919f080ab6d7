//! Activation queries.

use crate::handlers::emit;
use anyhow::Result;
use serde_json::json;
use toggle::Toggles;

pub fn active(
    toggles: &Toggles,
    group: &str,
    name: &str,
    requester: &[String],
    explain: bool,
) -> Result<()> {
    let activation = toggles.explain(group, name, requester)?;
    if explain {
        emit(&json!({ "active": activation.is_active(), "explanation": activation }))
    } else {
        emit(&activation.is_active())
    }
}

pub fn states(toggles: &Toggles, group: Option<&str>, requester: &[String]) -> Result<()> {
    match group {
        Some(group) => emit(&toggles.group_states(group, requester)?),
        None => emit(&toggles.all_states(requester)),
    }
}
