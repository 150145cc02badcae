//! Entity assembly from flat catalog rows
//!
//! Three passes over the procedure rows: build the base map, attach
//! parameters, attach dependencies. The catalog is assumed internally
//! consistent; a row naming a procedure absent from the base map is a hard
//! failure, not something to recover from.

use std::collections::BTreeMap;

use fbdoc_catalog::{
    CatalogError, CatalogReader, FieldRow, ProcedureDependencyRow, ProcedureParameterRow,
    ProcedureRow,
};
use fbdoc_core::{
    Dependency, Field, Procedure, ProcedureParameter, ProceduresSummary, SourceStats, Table,
    TablesSummary,
};

/// Errors that can occur during assembly
#[derive(Debug, thiserror::Error)]
pub enum AssembleError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("row references unknown procedure '{name}'")]
    UnknownProcedure { name: String },

    #[error("field rows reference unknown table '{name}'")]
    UnknownTable { name: String },
}

/// Parameter direction codes from the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterDirection {
    Input,
    Output,
}

impl ParameterDirection {
    /// Map a catalog direction code; unrecognized codes yield None
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Input),
            1 => Some(Self::Output),
            _ => None,
        }
    }
}

/// Dependency target-kind codes from the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyKind {
    Table,
    Trigger,
    Procedure,
    Udf,
}

impl DependencyKind {
    /// Map a catalog kind code; unrecognized codes yield None
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Table),
            2 => Some(Self::Trigger),
            5 => Some(Self::Procedure),
            15 => Some(Self::Udf),
            _ => None,
        }
    }
}

/// Assemble the procedure map and its summary from the catalog
///
/// Dependency trees are not built here; call
/// [`crate::tree::attach_trees`] once assembly has fully completed.
pub fn assemble_procedures<R: CatalogReader>(
    reader: &mut R,
) -> Result<(ProceduresSummary, BTreeMap<String, Procedure>), AssembleError> {
    let summary = ProceduresSummary {
        total_count: reader.procedure_count()?,
        description_count: reader.described_procedure_count()?,
    };

    let mut procedures = base_procedures(reader.procedures()?);
    attach_parameters(&mut procedures, reader.procedure_parameters()?)?;
    attach_dependencies(&mut procedures, reader.procedure_dependencies()?)?;

    Ok((summary, procedures))
}

/// Build the base map: one procedure per row, statistics computed eagerly
fn base_procedures(rows: Vec<ProcedureRow>) -> BTreeMap<String, Procedure> {
    rows.into_iter()
        .map(|row| {
            let source = SourceStats::analyze(row.source.unwrap_or_default());
            (
                row.name.clone(),
                Procedure::new(row.name, row.description, source),
            )
        })
        .collect()
}

/// Attach parameters to their owning procedures
///
/// Direction 0 routes to inputs, 1 to outputs; other codes are dropped
/// without touching the owner. `used` is set iff the row carries a
/// non-empty linked field name.
fn attach_parameters(
    procedures: &mut BTreeMap<String, Procedure>,
    rows: Vec<ProcedureParameterRow>,
) -> Result<(), AssembleError> {
    for row in rows {
        let Some(direction) = ParameterDirection::from_code(row.direction) else {
            continue;
        };

        let procedure =
            procedures
                .get_mut(&row.procedure_name)
                .ok_or_else(|| AssembleError::UnknownProcedure {
                    name: row.procedure_name.clone(),
                })?;

        let used = row
            .dependency_field
            .as_deref()
            .is_some_and(|field| !field.is_empty());
        let parameter = ProcedureParameter::new(row.name, used);

        match direction {
            ParameterDirection::Input => procedure.parameters.input.push(parameter),
            ParameterDirection::Output => procedure.parameters.output.push(parameter),
        }
    }

    Ok(())
}

/// Attach direct dependencies to their owning procedures
///
/// A procedure-kind target must already exist in the map (a self-reference
/// is valid) and is stored by name; other kinds are name-only references.
/// Unrecognized kind codes are silently dropped.
fn attach_dependencies(
    procedures: &mut BTreeMap<String, Procedure>,
    rows: Vec<ProcedureDependencyRow>,
) -> Result<(), AssembleError> {
    for row in rows {
        let Some(kind) = DependencyKind::from_code(row.kind) else {
            continue;
        };

        if kind == DependencyKind::Procedure && !procedures.contains_key(&row.name) {
            return Err(AssembleError::UnknownProcedure { name: row.name });
        }

        let procedure =
            procedures
                .get_mut(&row.procedure_name)
                .ok_or_else(|| AssembleError::UnknownProcedure {
                    name: row.procedure_name.clone(),
                })?;

        match kind {
            DependencyKind::Table => procedure.dependencies.table.push(Dependency::new(row.name)),
            DependencyKind::Trigger => procedure
                .dependencies
                .trigger
                .push(Dependency::new(row.name)),
            DependencyKind::Procedure => procedure.dependencies.procedure.push(row.name),
            DependencyKind::Udf => procedure.dependencies.udf.push(Dependency::new(row.name)),
        }
    }

    Ok(())
}

/// Assemble the table list and its summary from the catalog
pub fn assemble_tables<R: CatalogReader>(
    reader: &mut R,
) -> Result<(TablesSummary, Vec<Table>), AssembleError> {
    let summary = TablesSummary {
        total_count: reader.table_count()?,
        description_count: reader.described_table_count()?,
    };

    let field_rows = reader.fields()?;
    let table_rows = reader.tables()?;

    let mut fields: BTreeMap<String, Vec<Field>> = BTreeMap::new();
    for row in field_rows {
        let field = field_from_row(row);
        fields.entry(field.0).or_default().push(field.1);
    }

    let mut tables = Vec::new();
    for row in table_rows {
        tables.push(Table {
            fields: fields.remove(&row.name).unwrap_or_default(),
            name: row.name,
            description: row.description,
        });
    }

    // Field rows whose table never appeared in the table query violate the
    // catalog-consistency assumption.
    if let Some(name) = fields.into_keys().next() {
        return Err(AssembleError::UnknownTable { name });
    }

    Ok((summary, tables))
}

fn field_from_row(row: FieldRow) -> (String, Field) {
    (
        row.table_name,
        Field {
            name: row.name,
            field_type: field_type(row.type_code, row.length),
            description: row.description,
        },
    )
}

/// Human-readable type string for a catalog numeric type code
pub fn field_type(type_code: Option<i32>, length: Option<i32>) -> String {
    match type_code {
        Some(8) => "integer".to_string(),
        Some(10) => "float".to_string(),
        Some(14) => "char".to_string(),
        Some(27) => "double precision".to_string(),
        Some(37) => match length {
            Some(length) => format!("varchar({})", length),
            None => "varchar".to_string(),
        },
        _ => "unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fbdoc_catalog::MockCatalog;

    fn two_procedure_catalog() -> MockCatalog {
        MockCatalog::new()
            .with_procedure("PROCEDURE1", None, "AaBb..")
            .with_procedure("PROCEDURE2", Some("description"), "")
    }

    #[test]
    fn base_map_from_procedure_rows() {
        let (summary, procedures) = assemble_procedures(&mut two_procedure_catalog()).unwrap();

        assert_eq!(summary.total_count, 2);
        assert_eq!(summary.description_count, 1);
        assert_eq!(procedures.len(), 2);

        let first = &procedures["PROCEDURE1"];
        assert_eq!(first.name, "PROCEDURE1");
        assert_eq!(first.description, None);
        assert_eq!(first.source.text, "AaBb..");
        assert_eq!(first.source.lower_percent, 50.0);

        let second = &procedures["PROCEDURE2"];
        assert_eq!(second.description.as_deref(), Some("description"));
        assert_eq!(second.source.text, "");
    }

    #[test]
    fn parameters_route_by_direction() {
        let mut catalog = two_procedure_catalog()
            .with_parameter("PROCEDURE1", "PARAMETER1", 0, None)
            .with_parameter("PROCEDURE1", "PARAMETER2", 1, Some("FIELD1"))
            .with_parameter("PROCEDURE2", "PARAMETER3", 0, None)
            .with_parameter("PROCEDURE2", "PARAMETER4", 7, None);

        let (_, procedures) = assemble_procedures(&mut catalog).unwrap();

        let first = &procedures["PROCEDURE1"];
        assert_eq!(first.parameters.input.len(), 1);
        assert_eq!(first.parameters.output.len(), 1);
        assert_eq!(first.parameters.input[0].name, "PARAMETER1");
        assert!(!first.parameters.input[0].used);
        assert_eq!(first.parameters.output[0].name, "PARAMETER2");
        assert!(first.parameters.output[0].used);

        // Direction code 7 is dropped
        let second = &procedures["PROCEDURE2"];
        assert_eq!(second.parameters.input.len(), 1);
        assert!(second.parameters.output.is_empty());
    }

    #[test]
    fn dependencies_partition_by_kind() {
        let mut catalog = two_procedure_catalog()
            .with_dependency("PROCEDURE1", "PROCEDURE2", 5)
            .with_dependency("PROCEDURE1", "TABLE1", 0)
            .with_dependency("PROCEDURE1", "TRIGGER1", 2)
            .with_dependency("PROCEDURE1", "UDF1", 15)
            .with_dependency("PROCEDURE1", "SOMETHING", 9);

        let (_, procedures) = assemble_procedures(&mut catalog).unwrap();
        let first = &procedures["PROCEDURE1"];

        assert_eq!(first.dependencies.procedure, vec!["PROCEDURE2"]);
        assert_eq!(first.dependencies.table, vec![Dependency::new("TABLE1")]);
        assert_eq!(first.dependencies.trigger, vec![Dependency::new("TRIGGER1")]);
        assert_eq!(first.dependencies.udf, vec![Dependency::new("UDF1")]);
        // Kind code 9 is dropped
        assert!(first.dependencies.index.is_empty());
    }

    #[test]
    fn self_dependency_is_valid() {
        let mut catalog = two_procedure_catalog().with_dependency("PROCEDURE2", "PROCEDURE2", 5);

        let (_, procedures) = assemble_procedures(&mut catalog).unwrap();
        assert_eq!(procedures["PROCEDURE2"].dependencies.procedure, vec!["PROCEDURE2"]);
    }

    #[test]
    fn unknown_owner_is_fatal() {
        let mut catalog = two_procedure_catalog().with_parameter("MISSING", "PARAMETER1", 0, None);

        let err = assemble_procedures(&mut catalog).unwrap_err();
        assert!(matches!(err, AssembleError::UnknownProcedure { name } if name == "MISSING"));
    }

    #[test]
    fn unknown_dependency_target_is_fatal() {
        let mut catalog = two_procedure_catalog().with_dependency("PROCEDURE1", "MISSING", 5);

        let err = assemble_procedures(&mut catalog).unwrap_err();
        assert!(matches!(err, AssembleError::UnknownProcedure { name } if name == "MISSING"));
    }

    #[test]
    fn tables_with_typed_fields() {
        let mut catalog = MockCatalog::new()
            .with_table("DATA_TABLE", Some("the data"))
            .with_table("EMPTY_TABLE", None)
            .with_field("DATA_TABLE", "ID", Some(8), None)
            .with_field("DATA_TABLE", "NAME", Some(37), Some(120))
            .with_field("DATA_TABLE", "WEIGHT", Some(27), None)
            .with_field("DATA_TABLE", "BLOB_FIELD", Some(261), None);

        let (summary, tables) = assemble_tables(&mut catalog).unwrap();

        assert_eq!(summary.total_count, 2);
        assert_eq!(summary.description_count, 1);
        assert_eq!(tables.len(), 2);

        let table = &tables[0];
        assert_eq!(table.name, "DATA_TABLE");
        let types: Vec<&str> = table.fields.iter().map(|f| f.field_type.as_str()).collect();
        assert_eq!(types, vec!["integer", "varchar(120)", "double precision", "unknown"]);

        assert!(tables[1].fields.is_empty());
    }

    #[test]
    fn field_for_unknown_table_is_fatal() {
        let mut catalog = MockCatalog::new()
            .with_table("DATA_TABLE", None)
            .with_field("GHOST_TABLE", "ID", Some(8), None);

        let err = assemble_tables(&mut catalog).unwrap_err();
        assert!(matches!(err, AssembleError::UnknownTable { name } if name == "GHOST_TABLE"));
    }

    #[test]
    fn field_type_map() {
        assert_eq!(field_type(Some(8), None), "integer");
        assert_eq!(field_type(Some(10), None), "float");
        assert_eq!(field_type(Some(14), Some(4)), "char");
        assert_eq!(field_type(Some(37), Some(80)), "varchar(80)");
        assert_eq!(field_type(Some(37), None), "varchar");
        assert_eq!(field_type(Some(261), None), "unknown");
        assert_eq!(field_type(None, None), "unknown");
    }
}
