use serde::Serialize;
use strum_macros::{AsRefStr, Display};

/// Why a feature is on or off for a requester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, AsRefStr, Display)]
#[serde(tag = "reason", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Activation {
    /// The feature is switched off.
    Disabled,
    /// Enabled with no user-group gating.
    Ungated,
    /// A requester group is listed explicitly.
    ListMatch { group: String },
    /// A requester group matches the gating pattern.
    PatternMatch { group: String, pattern: String },
    /// Gated, and the requester sent no groups.
    NoRequesterGroups,
    /// Gated, and none of the requester groups qualify.
    NoMatch,
}

impl Activation {
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Ungated | Self::ListMatch { .. } | Self::PatternMatch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reasons_are_snake_case() {
        assert_eq!(Activation::NoRequesterGroups.as_ref(), "no_requester_groups");
        assert_eq!(Activation::ListMatch { group: "a".into() }.to_string(), "list_match");
    }

    #[test]
    fn only_matches_and_ungated_are_active() {
        assert!(Activation::Ungated.is_active());
        assert!(Activation::ListMatch { group: "a".into() }.is_active());
        assert!(
            Activation::PatternMatch { group: "a".into(), pattern: "a".into() }.is_active()
        );
        assert!(!Activation::Disabled.is_active());
        assert!(!Activation::NoRequesterGroups.is_active());
        assert!(!Activation::NoMatch.is_active());
    }
}
