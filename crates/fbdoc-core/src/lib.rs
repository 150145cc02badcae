//! fbdoc Core
//!
//! Domain model for the Firebird catalog documentation generator: procedure
//! and table entities, dependency-tree nodes, source-text statistics, and
//! configuration. All cross-references between procedures are name-keyed
//! lookups into a single per-run collection.

pub mod config;
pub mod entity;
pub mod source;

pub use config::{Config, ConfigError, ConnectionConfig, OutputConfig};
pub use entity::{
    Dependencies, Dependency, DependentProcedure, Field, Procedure, ProcedureParameter,
    ProcedureParameters, ProceduresSummary, Table, TablesSummary,
};
pub use source::SourceStats;
