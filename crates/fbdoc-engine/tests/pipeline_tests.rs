//! End-to-end assembly over a mock catalog: rows in, populated entity model
//! and dependency trees out.

use pretty_assertions::assert_eq;

use fbdoc_catalog::MockCatalog;
use fbdoc_core::DependentProcedure;
use fbdoc_engine::{assemble_procedures, assemble_tables, attach_trees, DEFAULT_MAX_DEPTH};

/// Fixture matching a small catalog: two documented procedures, two helper
/// procedures, one table dependency, one UDF dependency, a self-reference
/// and a mutual back-reference.
fn fixture_catalog() -> MockCatalog {
    MockCatalog::new()
        .with_procedure("PROCEDURE1", None, "AaBb..")
        .with_procedure("PROCEDURE2", Some("description"), "")
        .with_procedure("PROCEDURE5", None, "")
        .with_procedure("PROCEDURE6", None, "")
        .with_parameter("PROCEDURE1", "PARAMETER1", 0, None)
        .with_parameter("PROCEDURE1", "PARAMETER2", 1, Some("FIELD1"))
        .with_dependency("PROCEDURE1", "PROCEDURE5", 5)
        .with_dependency("PROCEDURE1", "TABLE1", 0)
        .with_dependency("PROCEDURE1", "UDF1", 15)
        .with_dependency("PROCEDURE1", "PROCEDURE6", 5)
        .with_dependency("PROCEDURE2", "PROCEDURE2", 5)
        .with_dependency("PROCEDURE2", "PROCEDURE1", 5)
}

#[test]
fn full_pipeline_assembles_and_builds_trees() {
    let mut catalog = fixture_catalog();

    let (summary, mut procedures) = assemble_procedures(&mut catalog).unwrap();
    attach_trees(&mut procedures, DEFAULT_MAX_DEPTH);

    assert_eq!(summary.total_count, 4);
    assert_eq!(summary.description_count, 1);

    let first = &procedures["PROCEDURE1"];
    assert_eq!(
        first.dependencies.procedure,
        vec!["PROCEDURE5", "PROCEDURE6"]
    );
    assert_eq!(first.dependencies.table.len(), 1);
    assert_eq!(first.dependencies.udf.len(), 1);
    assert_eq!(first.parameters.input[0].name, "PARAMETER1");
    assert!(first.parameters.output[0].used);

    // Root child count and order equal the direct procedure dependencies.
    assert_eq!(
        first.dependency_tree,
        vec![
            DependentProcedure::new("PROCEDURE5"),
            DependentProcedure::new("PROCEDURE6"),
        ]
    );

    // Self-reference becomes a cycle leaf; the branch through PROCEDURE1
    // expands normally because that path has not seen it before.
    let second = &procedures["PROCEDURE2"];
    assert_eq!(
        second.dependency_tree,
        vec![
            DependentProcedure::cycled("PROCEDURE2"),
            DependentProcedure::new("PROCEDURE1").with_children(vec![
                DependentProcedure::new("PROCEDURE5"),
                DependentProcedure::new("PROCEDURE6"),
            ]),
        ]
    );

    // Procedures without dependencies have empty trees of their own but
    // appear as plain leaves above.
    assert_eq!(procedures["PROCEDURE5"].dependency_tree, vec![]);
    assert_eq!(procedures["PROCEDURE6"].dependency_tree, vec![]);
}

#[test]
fn mutual_recursion_produces_mirrored_trees() {
    let mut catalog = MockCatalog::new()
        .with_procedure("P1", None, "")
        .with_procedure("P2", None, "")
        .with_dependency("P1", "P2", 5)
        .with_dependency("P2", "P1", 5);

    let (_, mut procedures) = assemble_procedures(&mut catalog).unwrap();
    attach_trees(&mut procedures, DEFAULT_MAX_DEPTH);

    assert_eq!(
        procedures["P1"].dependency_tree,
        vec![DependentProcedure::new("P2").with_children(vec![DependentProcedure::cycled("P1")])]
    );
    assert_eq!(
        procedures["P2"].dependency_tree,
        vec![DependentProcedure::new("P1").with_children(vec![DependentProcedure::cycled("P2")])]
    );
}

#[test]
fn tables_assemble_with_field_types() {
    let mut catalog = MockCatalog::new()
        .with_table("TABLE1", Some("first table"))
        .with_field("TABLE1", "ID", Some(8), None)
        .with_field("TABLE1", "TITLE", Some(37), Some(60));

    let (summary, tables) = assemble_tables(&mut catalog).unwrap();

    assert_eq!(summary.total_count, 1);
    assert_eq!(summary.description_count, 1);
    assert_eq!(tables[0].fields[0].field_type, "integer");
    assert_eq!(tables[0].fields[1].field_type, "varchar(60)");
}
