//! Assembly and dependency-tree construction
//!
//! This crate turns flat catalog rows into the in-memory entity model:
//! - Entity assembly: base procedure map, parameter attachment, dependency
//!   attachment, table/field assembly.
//! - Dependency trees: a bounded-depth, cycle-aware tree of transitive
//!   procedure dependencies per procedure.
//!
//! Assembly fully completes before any tree is built; tree building reads
//! the shared procedure map and writes only each root's own tree.

pub mod assemble;
pub mod tree;

pub use assemble::{
    assemble_procedures, assemble_tables, field_type, AssembleError, DependencyKind,
    ParameterDirection,
};
pub use tree::{attach_trees, build_tree, DEFAULT_MAX_DEPTH};
