//! Flat row records returned by catalog queries

/// Result row of the procedure query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcedureRow {
    /// Procedure name, catalog-normalized
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Source text; external procedures may have none
    pub source: Option<String>,
}

/// Result row of the procedure-parameter query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcedureParameterRow {
    /// Owning procedure name
    pub procedure_name: String,

    /// Parameter name
    pub name: String,

    /// Direction code: 0 = input, 1 = output
    pub direction: i32,

    /// Field name linked to this parameter by a dependency row, if any
    pub dependency_field: Option<String>,
}

/// Result row of the procedure-dependency query
///
/// The query only returns rows whose field name is null; a non-null field
/// name would mean a column-level dependency, which is not documented here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcedureDependencyRow {
    /// Owning procedure name
    pub procedure_name: String,

    /// Dependency target name
    pub name: String,

    /// Target-kind code: 0 = table, 2 = trigger, 5 = procedure, 15 = UDF
    pub kind: i32,

    /// Field name, always null for the rows this query returns
    pub field: Option<String>,
}

/// Result row of the table query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub name: String,
    pub description: Option<String>,
}

/// Result row of the table-field query, ordered by field position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRow {
    /// Owning table name
    pub table_name: String,

    /// Field name
    pub name: String,

    /// Numeric type code from the catalog
    pub type_code: Option<i32>,

    /// Declared length, for character types
    pub length: Option<i32>,

    /// Optional description
    pub description: Option<String>,
}
