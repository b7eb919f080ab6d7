use serde::Serialize;
use std::borrow::Cow;
use strum_macros::{AsRefStr, Display};
use toggle_store::StoreError;

/// Error types specific to the catalog.
#[toggle_derive::toggle_error]
pub enum CatalogError {
    #[error("Group not found{}: {group}", format_context(.context))]
    GroupNotFound { group: String, context: Option<Cow<'static, str>> },

    #[error("Feature not found{}: {group}/{feature}", format_context(.context))]
    FeatureNotFound { group: String, feature: String, context: Option<Cow<'static, str>> },

    #[error("Feature already exists{}: {group}/{feature}", format_context(.context))]
    FeatureConflict { group: String, feature: String, context: Option<Cow<'static, str>> },

    #[error("Validation failed{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Catalog storage failure{}: {source}", format_context(.context))]
    Store { source: StoreError, context: Option<Cow<'static, str>> },
}

/// Stable discriminator of a [`CatalogError`], for API layers and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, AsRefStr, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    GroupNotFound,
    FeatureNotFound,
    FeatureConflict,
    Validation,
    Store,
}

impl ErrorKind {
    /// HTTP status an API front end should answer with.
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::GroupNotFound | Self::FeatureNotFound => 404,
            Self::FeatureConflict => 409,
            Self::Validation => 422,
            Self::Store => 500,
        }
    }
}

impl CatalogError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::GroupNotFound { .. } => ErrorKind::GroupNotFound,
            Self::FeatureNotFound { .. } => ErrorKind::FeatureNotFound,
            Self::FeatureConflict { .. } => ErrorKind::FeatureConflict,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Store { .. } => ErrorKind::Store,
        }
    }

    pub(crate) fn group_not_found(group: &str) -> Self {
        Self::GroupNotFound { group: group.to_owned(), context: None }
    }

    pub(crate) fn feature_not_found(group: &str, feature: &str) -> Self {
        Self::FeatureNotFound { group: group.to_owned(), feature: feature.to_owned(), context: None }
    }
}
