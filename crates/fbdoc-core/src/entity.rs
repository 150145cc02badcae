//! Catalog entities: procedures, tables, and their dependencies
//!
//! Procedure names are the identity of everything here. A run builds one
//! collection of procedures keyed by name; inter-procedure edges are stored
//! as names and resolved against that collection, never as embedded
//! references to other entities.

use serde::{Deserialize, Serialize};

use crate::source::SourceStats;

/// Summary statistics for the procedure catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProceduresSummary {
    /// Total number of procedures
    pub total_count: usize,

    /// Number of procedures carrying a description
    pub description_count: usize,
}

/// Summary statistics for the table catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TablesSummary {
    /// Total number of user tables
    pub total_count: usize,

    /// Number of tables carrying a description
    pub description_count: usize,
}

/// An input or output parameter of a procedure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcedureParameter {
    /// Parameter name
    pub name: String,

    /// True iff at least one dependency row links this parameter to a field
    pub used: bool,
}

impl ProcedureParameter {
    pub fn new(name: impl Into<String>, used: bool) -> Self {
        Self {
            name: name.into(),
            used,
        }
    }
}

/// Parameter lists of a procedure, partitioned by direction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcedureParameters {
    pub input: Vec<ProcedureParameter>,
    pub output: Vec<ProcedureParameter>,
}

/// A name-only reference to a non-procedure dependency target
///
/// Tables, triggers, indices and external functions are never resolved to
/// entities; the documentation only needs their names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub name: String,
}

impl Dependency {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Direct dependencies of a procedure, partitioned by target kind
///
/// `procedure` holds names resolved against the run's procedure collection.
/// Trigger and index dependencies are recorded but not rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependencies {
    pub table: Vec<Dependency>,
    pub trigger: Vec<Dependency>,
    pub procedure: Vec<String>,
    pub index: Vec<Dependency>,
    pub udf: Vec<Dependency>,
}

/// A node in a procedure's transitive dependency tree
///
/// Exactly one terminal shape applies to any node: a cycle leaf
/// (`is_cycled`), a depth-limited leaf (`in_depth_limit`), or an expandable
/// node whose children may themselves be empty. A flagged node always has an
/// empty child list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependentProcedure {
    /// Name of the dependency target
    pub name: String,

    /// This name already appears on the path from the tree's root to here
    pub is_cycled: bool,

    /// The subtree was truncated at the configured maximum depth
    pub in_depth_limit: bool,

    /// Child nodes, in dependency-row order
    pub children: Vec<DependentProcedure>,
}

impl DependentProcedure {
    /// A plain node with no flags and no children yet
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_cycled: false,
            in_depth_limit: false,
            children: Vec::new(),
        }
    }

    /// A cycle leaf
    pub fn cycled(name: impl Into<String>) -> Self {
        Self {
            is_cycled: true,
            ..Self::new(name)
        }
    }

    /// A depth-limited leaf
    pub fn depth_limited(name: impl Into<String>) -> Self {
        Self {
            in_depth_limit: true,
            ..Self::new(name)
        }
    }

    /// Attach children (test and fixture convenience)
    pub fn with_children(mut self, children: Vec<DependentProcedure>) -> Self {
        self.children = children;
        self
    }
}

/// A stored procedure assembled from catalog rows
///
/// Created from a procedure row, then mutated by the parameter and
/// dependency attachment passes; `dependency_tree` is computed last, after
/// assembly fully completes, and never mutated again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Procedure {
    /// Catalog-normalized procedure name, unique within a run
    pub name: String,

    /// Optional description from the catalog
    pub description: Option<String>,

    /// Source text with derived statistics
    pub source: SourceStats,

    /// Direct dependencies, partitioned by target kind
    pub dependencies: Dependencies,

    /// Input and output parameters
    pub parameters: ProcedureParameters,

    /// Bounded-depth tree of transitive procedure dependencies
    pub dependency_tree: Vec<DependentProcedure>,
}

impl Procedure {
    pub fn new(name: impl Into<String>, description: Option<String>, source: SourceStats) -> Self {
        Self {
            name: name.into(),
            description,
            source,
            dependencies: Dependencies::default(),
            parameters: ProcedureParameters::default(),
            dependency_tree: Vec::new(),
        }
    }
}

/// A field of a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field name
    pub name: String,

    /// Human-readable type, derived from the catalog's numeric type code
    pub field_type: String,

    /// Optional description from the catalog
    pub description: Option<String>,
}

/// A user table with its ordered fields
///
/// Immutable after creation; tables are documented but never participate in
/// dependency trees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub description: Option<String>,
    pub fields: Vec<Field>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flagged_nodes_have_no_children() {
        let cycled = DependentProcedure::cycled("P1");
        assert!(cycled.is_cycled);
        assert!(!cycled.in_depth_limit);
        assert!(cycled.children.is_empty());

        let limited = DependentProcedure::depth_limited("P2");
        assert!(limited.in_depth_limit);
        assert!(!limited.is_cycled);
        assert!(limited.children.is_empty());
    }

    #[test]
    fn new_procedure_starts_empty() {
        let procedure = Procedure::new("P1", None, SourceStats::empty());
        assert!(procedure.dependencies.procedure.is_empty());
        assert!(procedure.parameters.input.is_empty());
        assert!(procedure.dependency_tree.is_empty());
    }
}
