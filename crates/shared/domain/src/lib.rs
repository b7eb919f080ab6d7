//! # Domain Models
//!
//! Pure data types shared by the catalog, the resolver and the outer layers.
//! Keep it lean: no I/O, no logging, no storage concerns. Validation that can be expressed
//! in a constructor (such as compiling a gating pattern) belongs here; everything that
//! needs the catalog's state does not.

pub mod config;
pub mod feature;
pub mod user_groups;

pub use feature::{Feature, FeaturePatch, FeatureSpec};
pub use user_groups::{Pattern, UserGroups, UserGroupsRecord};
