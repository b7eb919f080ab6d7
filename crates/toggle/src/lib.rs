//! Facade crate for the toggle catalog and resolver.
//! Re-exports domain/kernel primitives and composes the catalog with activation checks.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! ```rust
//! use toggle::domain::config::{StoreBackend, StoreConfig};
//! use toggle::{FeatureSpec, Toggles, UserGroups};
//!
//! let config = StoreConfig { backend: StoreBackend::Memory, ..StoreConfig::default() };
//! let toggles = Toggles::open(&config)?;
//!
//! toggles.catalog().add_feature(
//!     FeatureSpec::builder()
//!         .group("reports")
//!         .name("export")
//!         .enabled(true)
//!         .user_groups(UserGroups::from_list(["finance"]))
//!         .build(),
//! )?;
//!
//! assert!(toggles.is_active("reports", "export", &["finance"])?);
//! assert!(!toggles.is_active("reports", "export", &["sales"])?);
//! # Ok::<(), toggle::CatalogError>(())
//! ```

mod toggles;

pub use crate::toggles::{FeatureState, Toggles};
pub use toggle_catalog::{Catalog, CatalogError, CatalogErrorExt, ErrorKind};
pub use toggle_domain as domain;
pub use toggle_domain::{Feature, FeaturePatch, FeatureSpec, UserGroups};
pub use toggle_kernel as kernel;
pub use toggle_resolver::Activation;
pub use toggle_store::{Store, StoreError};
