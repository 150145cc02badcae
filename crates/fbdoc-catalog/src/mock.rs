//! Mock catalog reader for testing
//!
//! Returns predefined rows without connecting to any database. Useful for
//! unit testing the assembly and tree-building logic, and for simulating
//! connection failures.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fbdoc_catalog::{CatalogReader, MockCatalog};
//!
//! let mut catalog = MockCatalog::new()
//!     .with_procedure("PROCEDURE1", None, "select 1 from RDB$DATABASE");
//! let rows = catalog.procedures()?;
//! ```

use crate::reader::{CatalogError, CatalogReader};
use crate::rows::{FieldRow, ProcedureDependencyRow, ProcedureParameterRow, ProcedureRow, TableRow};

/// Mock catalog reader backed by in-memory rows
///
/// Counts are derived from the seeded rows, matching what the real count
/// queries would report for the same catalog content.
#[derive(Debug, Clone, Default)]
pub struct MockCatalog {
    procedures: Vec<ProcedureRow>,
    parameters: Vec<ProcedureParameterRow>,
    dependencies: Vec<ProcedureDependencyRow>,
    tables: Vec<TableRow>,
    fields: Vec<FieldRow>,

    /// Simulate connection failure
    fail_connection: bool,
}

impl MockCatalog {
    /// Create a mock catalog with no rows
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a procedure row
    pub fn with_procedure(
        mut self,
        name: &str,
        description: Option<&str>,
        source: &str,
    ) -> Self {
        self.procedures.push(ProcedureRow {
            name: name.to_string(),
            description: description.map(str::to_string),
            source: Some(source.to_string()),
        });
        self
    }

    /// Seed a parameter row
    pub fn with_parameter(
        mut self,
        procedure_name: &str,
        name: &str,
        direction: i32,
        dependency_field: Option<&str>,
    ) -> Self {
        self.parameters.push(ProcedureParameterRow {
            procedure_name: procedure_name.to_string(),
            name: name.to_string(),
            direction,
            dependency_field: dependency_field.map(str::to_string),
        });
        self
    }

    /// Seed a dependency row
    pub fn with_dependency(mut self, procedure_name: &str, name: &str, kind: i32) -> Self {
        self.dependencies.push(ProcedureDependencyRow {
            procedure_name: procedure_name.to_string(),
            name: name.to_string(),
            kind,
            field: None,
        });
        self
    }

    /// Seed a table row
    pub fn with_table(mut self, name: &str, description: Option<&str>) -> Self {
        self.tables.push(TableRow {
            name: name.to_string(),
            description: description.map(str::to_string),
        });
        self
    }

    /// Seed a field row
    pub fn with_field(
        mut self,
        table_name: &str,
        name: &str,
        type_code: Option<i32>,
        length: Option<i32>,
    ) -> Self {
        self.fields.push(FieldRow {
            table_name: table_name.to_string(),
            name: name.to_string(),
            type_code,
            length,
            description: None,
        });
        self
    }

    /// Configure to fail all connection tests
    pub fn with_connection_failure(mut self) -> Self {
        self.fail_connection = true;
        self
    }
}

impl CatalogReader for MockCatalog {
    fn name(&self) -> &'static str {
        "Mock"
    }

    fn test_connection(&mut self) -> Result<(), CatalogError> {
        if self.fail_connection {
            Err(CatalogError::ConnectionError(
                "Simulated connection failure".to_string(),
            ))
        } else {
            Ok(())
        }
    }

    fn procedure_count(&mut self) -> Result<usize, CatalogError> {
        Ok(self.procedures.len())
    }

    fn described_procedure_count(&mut self) -> Result<usize, CatalogError> {
        Ok(self
            .procedures
            .iter()
            .filter(|row| row.description.is_some())
            .count())
    }

    fn table_count(&mut self) -> Result<usize, CatalogError> {
        Ok(self.tables.len())
    }

    fn described_table_count(&mut self) -> Result<usize, CatalogError> {
        Ok(self
            .tables
            .iter()
            .filter(|row| row.description.is_some())
            .count())
    }

    fn procedures(&mut self) -> Result<Vec<ProcedureRow>, CatalogError> {
        Ok(self.procedures.clone())
    }

    fn procedure_parameters(&mut self) -> Result<Vec<ProcedureParameterRow>, CatalogError> {
        Ok(self.parameters.clone())
    }

    fn procedure_dependencies(&mut self) -> Result<Vec<ProcedureDependencyRow>, CatalogError> {
        Ok(self.dependencies.clone())
    }

    fn tables(&mut self) -> Result<Vec<TableRow>, CatalogError> {
        Ok(self.tables.clone())
    }

    fn fields(&mut self) -> Result<Vec<FieldRow>, CatalogError> {
        Ok(self.fields.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_rows_are_returned() {
        let mut catalog = MockCatalog::new()
            .with_procedure("PROCEDURE1", Some("does things"), "begin end")
            .with_procedure("PROCEDURE2", None, "begin end")
            .with_dependency("PROCEDURE1", "PROCEDURE2", 5);

        assert_eq!(catalog.name(), "Mock");
        assert_eq!(catalog.procedure_count().unwrap(), 2);
        assert_eq!(catalog.described_procedure_count().unwrap(), 1);
        assert_eq!(catalog.procedures().unwrap().len(), 2);
        assert_eq!(catalog.procedure_dependencies().unwrap().len(), 1);
    }

    #[test]
    fn connection_failure_is_simulated() {
        let mut catalog = MockCatalog::new().with_connection_failure();
        assert!(catalog.test_connection().is_err());

        let mut ok = MockCatalog::new();
        assert!(ok.test_connection().is_ok());
    }
}
