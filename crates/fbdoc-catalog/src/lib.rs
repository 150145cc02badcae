//! Catalog readers for Firebird schema metadata
//!
//! This crate fetches flat metadata rows from a database's system catalog:
//! procedures, their parameters and dependencies, tables and fields.
//!
//! ## Features
//!
//! - `firebird` - real Firebird connectivity via rsfbclient; without it the
//!   `FirebirdCatalog` constructors return a configuration error.
//!
//! ## Example
//!
//! ```rust,ignore
//! use fbdoc_catalog::{CatalogReader, FirebirdCatalog};
//!
//! let mut catalog = FirebirdCatalog::connect(&config.connection)?;
//! let procedures = catalog.procedures()?;
//! ```

pub mod firebird;
pub mod mock;
pub mod reader;
pub mod rows;

pub use firebird::FirebirdCatalog;
pub use mock::MockCatalog;
pub use reader::{CatalogError, CatalogReader};
pub use rows::{FieldRow, ProcedureDependencyRow, ProcedureParameterRow, ProcedureRow, TableRow};
