//! # Resolver
//!
//! Pure activation logic: given a [`Feature`] and the groups a requester belongs to, decide
//! whether the feature is on for that requester.
//!
//! ## Rules
//! 1. A disabled feature is off for everyone.
//! 2. An enabled feature without user-group gating is on for everyone, including requesters
//!    that send no groups.
//! 3. A gated feature is on when at least one requester group is listed verbatim or matches
//!    the gating pattern. Requesters without groups see it off.
//!
//! Evaluation is total: patterns were compiled when the feature was written, so nothing here
//! can fail. Blank requester groups are ignored.
//!
//! ```rust
//! use toggle_domain::{Feature, UserGroups};
//!
//! let feature = Feature {
//!     group: "wibble".into(),
//!     name: "feat".into(),
//!     enabled: true,
//!     user_groups: UserGroups::new(["admin", "editor"], Some(".*admin.*")).unwrap(),
//!     ..Feature::default()
//! };
//!
//! assert!(toggle_resolver::is_active(&feature, &["superadmin"]));
//! assert!(!toggle_resolver::is_active(&feature, &["guest"]));
//! assert!(!toggle_resolver::is_active::<&str>(&feature, &[]));
//! ```

mod activation;

pub use crate::activation::Activation;
use toggle_domain::Feature;
use tracing::trace;

/// Explains the decision for `feature` and `requester_groups`.
pub fn evaluate<S: AsRef<str>>(feature: &Feature, requester_groups: &[S]) -> Activation {
    let activation = decide(feature, requester_groups);
    trace!(
        group = %feature.group,
        feature = %feature.name,
        requester_groups = requester_groups.len(),
        reason = %activation,
        active = activation.is_active(),
        "Feature evaluated"
    );
    activation
}

/// `true` when `feature` is on for a requester in `requester_groups`.
pub fn is_active<S: AsRef<str>>(feature: &Feature, requester_groups: &[S]) -> bool {
    evaluate(feature, requester_groups).is_active()
}

fn decide<S: AsRef<str>>(feature: &Feature, requester_groups: &[S]) -> Activation {
    if !feature.enabled {
        return Activation::Disabled;
    }

    let gating = &feature.user_groups;
    if gating.is_empty() {
        return Activation::Ungated;
    }

    let mut requester =
        requester_groups.iter().map(AsRef::<str>::as_ref).filter(|id| !id.is_empty()).peekable();
    if requester.peek().is_none() {
        return Activation::NoRequesterGroups;
    }

    for id in requester {
        if gating.contains(id) {
            return Activation::ListMatch { group: id.to_owned() };
        }
        if let Some(pattern) = gating.pattern()
            && pattern.is_match(id)
        {
            return Activation::PatternMatch {
                group: id.to_owned(),
                pattern: pattern.as_str().to_owned(),
            };
        }
    }

    Activation::NoMatch
}
