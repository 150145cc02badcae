//! Catalog reader trait for fetching schema metadata

use crate::rows::{FieldRow, ProcedureDependencyRow, ProcedureParameterRow, ProcedureRow, TableRow};

/// Errors that can occur when reading the catalog
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    #[error("Connection failed: {0}")]
    ConnectionError(String),

    #[error("Query failed: {0}")]
    QueryError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Trait for catalog readers that fetch schema metadata as flat rows
///
/// Each row query is issued exactly once per run and its rows are stored
/// directly in the assembled model; readers do not need to cache anything.
/// Readers take `&mut self` because database clients execute statements on a
/// mutable connection.
pub trait CatalogReader {
    /// Reader name (e.g. "Firebird")
    fn name(&self) -> &'static str;

    /// Validate connectivity and credentials
    fn test_connection(&mut self) -> Result<(), CatalogError>;

    /// Total number of procedures
    fn procedure_count(&mut self) -> Result<usize, CatalogError>;

    /// Number of procedures with a description
    fn described_procedure_count(&mut self) -> Result<usize, CatalogError>;

    /// Total number of user tables
    fn table_count(&mut self) -> Result<usize, CatalogError>;

    /// Number of user tables with a description
    fn described_table_count(&mut self) -> Result<usize, CatalogError>;

    /// All procedures with description and source text
    fn procedures(&mut self) -> Result<Vec<ProcedureRow>, CatalogError>;

    /// All procedure parameters that carry a direction code
    fn procedure_parameters(&mut self) -> Result<Vec<ProcedureParameterRow>, CatalogError>;

    /// All procedure dependencies with a recognized target-kind code and a
    /// null field name
    fn procedure_dependencies(&mut self) -> Result<Vec<ProcedureDependencyRow>, CatalogError>;

    /// All user tables
    fn tables(&mut self) -> Result<Vec<TableRow>, CatalogError>;

    /// All table fields, ordered by position within their table
    fn fields(&mut self) -> Result<Vec<FieldRow>, CatalogError>;
}
