//! # Catalog
//!
//! Owns groups and features: creation, upsert, partial update, removal and lookups.
//!
//! ## Invariants
//! * `(group, name)` identifies a feature; adding it again overwrites it in place.
//! * A feature's group always exists. It is created in the same transaction as the first
//!   feature that references it, and never deleted.
//! * Group existence is checked before feature existence, so a missing group always reports
//!   [`CatalogError::GroupNotFound`].
//!
//! ## Example
//!
//! ```rust
//! use toggle_catalog::{Catalog, CatalogError, ErrorKind};
//! use toggle_domain::FeatureSpec;
//!
//! let catalog = Catalog::in_memory();
//! catalog.add_feature(FeatureSpec::builder().group("checkout").name("express").enabled(true).build())?;
//!
//! assert_eq!(catalog.get_groups(), ["checkout"]);
//! assert!(catalog.get_feature("checkout", "express")?.enabled);
//!
//! let err = catalog.get_feature("checkout", "missing").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::FeatureNotFound);
//! # Ok::<(), CatalogError>(())
//! ```

mod error;
mod service;

pub use crate::error::{CatalogError, CatalogErrorExt, ErrorKind};
pub use crate::service::Catalog;
