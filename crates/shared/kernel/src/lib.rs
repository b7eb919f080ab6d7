//! Kernel utilities shared by the facade and the binaries.
//! Keep this crate lightweight: configuration loading, logging bootstrap and the domain re-export.
//!
//! ## Config loading
//! ```rust,no_run
//! use toggle_kernel::config::load_config;
//! use toggle_kernel::domain::config::Config;
//!
//! let cfg: Config = load_config(Some("toggle.toml")).unwrap();
//! assert_eq!(cfg.store.file_name, "catalog.json");
//! ```
pub mod config;
pub mod logging;

pub use toggle_domain as domain;
