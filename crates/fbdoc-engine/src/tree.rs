//! Bounded-depth, cycle-aware dependency tree construction
//!
//! Breadth-first traversal over the procedure-dependency graph. Each queued
//! work item carries the set of names already seen on its own path from the
//! root, so cycle detection is per path: the same procedure may legitimately
//! appear in sibling branches, but never twice on one path. There is no
//! global cache of known-cyclic procedures; every root re-discovers cycles
//! for itself, so cost is proportional to tree size but never unbounded.

use std::collections::{BTreeMap, HashSet, VecDeque};
use std::rc::Rc;

use fbdoc_core::{DependentProcedure, Procedure};

/// Default maximum number of dependency levels rendered
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// A queued unit of traversal work
struct TraverseItem {
    /// Name of the procedure this item will emit a node for
    name: String,

    /// Arena index of the parent node, or None for a root child
    parent: Option<usize>,

    /// Names already visited on this path from the root; immutable snapshot
    /// shared by all children of one expansion
    passed: Rc<HashSet<String>>,

    /// 0 for the root's immediate children
    depth: usize,
}

/// Compute dependency trees for every procedure in the map
///
/// Must run only after assembly has fully completed: it reads every
/// procedure's dependency lists and writes every procedure's tree.
pub fn attach_trees(procedures: &mut BTreeMap<String, Procedure>, max_depth: usize) {
    let trees: Vec<(String, Vec<DependentProcedure>)> = procedures
        .values()
        .map(|procedure| {
            (
                procedure.name.clone(),
                build_tree(procedures, procedure, max_depth),
            )
        })
        .collect();

    for (name, tree) in trees {
        if let Some(procedure) = procedures.get_mut(&name) {
            procedure.dependency_tree = tree;
        }
    }
}

/// Build the bounded-depth dependency tree for one root procedure
///
/// The root itself never appears as a node in its own tree, but its name is
/// seeded into the visited set, so a direct or indirect dependency back onto
/// the root becomes a cycle leaf. Child-list order follows the order of each
/// procedure's dependency list.
///
/// Per dequeued item, in priority order: cycle leaf, depth-limited leaf
/// (only when the target still has procedure dependencies of its own), true
/// leaf, expandable node.
pub fn build_tree(
    procedures: &BTreeMap<String, Procedure>,
    root: &Procedure,
    max_depth: usize,
) -> Vec<DependentProcedure> {
    let mut queue: VecDeque<TraverseItem> = VecDeque::new();

    let passed: Rc<HashSet<String>> = Rc::new(HashSet::from([root.name.clone()]));
    for name in &root.dependencies.procedure {
        queue.push_back(TraverseItem {
            name: name.clone(),
            parent: None,
            passed: Rc::clone(&passed),
            depth: 0,
        });
    }

    // Nodes go into a flat arena first. A child's index is always greater
    // than its parent's, so the nested tree can be assembled in one reverse
    // pass once the queue drains.
    let mut nodes: Vec<DependentProcedure> = Vec::new();
    let mut child_ids: Vec<Vec<usize>> = Vec::new();
    let mut root_ids: Vec<usize> = Vec::new();

    while let Some(item) = queue.pop_front() {
        let id = nodes.len();

        if item.passed.contains(&item.name) {
            // The name already occurred on this path
            nodes.push(DependentProcedure::cycled(&item.name));
        } else {
            let target = procedures
                .get(&item.name)
                .expect("dependency targets are validated during assembly");
            let next_dependencies = &target.dependencies.procedure;

            if item.depth + 1 >= max_depth && !next_dependencies.is_empty() {
                nodes.push(DependentProcedure::depth_limited(&item.name));
            } else if next_dependencies.is_empty() {
                nodes.push(DependentProcedure::new(&item.name));
            } else {
                nodes.push(DependentProcedure::new(&item.name));

                let mut next_passed = (*item.passed).clone();
                next_passed.insert(item.name.clone());
                let next_passed = Rc::new(next_passed);

                for next_name in next_dependencies {
                    queue.push_back(TraverseItem {
                        name: next_name.clone(),
                        parent: Some(id),
                        passed: Rc::clone(&next_passed),
                        depth: item.depth + 1,
                    });
                }
            }
        }

        child_ids.push(Vec::new());
        match item.parent {
            Some(parent) => child_ids[parent].push(id),
            None => root_ids.push(id),
        }
    }

    into_forest(nodes, child_ids, root_ids)
}

/// Move arena nodes into their parents, yielding the root-level forest
fn into_forest(
    nodes: Vec<DependentProcedure>,
    child_ids: Vec<Vec<usize>>,
    root_ids: Vec<usize>,
) -> Vec<DependentProcedure> {
    let mut slots: Vec<Option<DependentProcedure>> = nodes.into_iter().map(Some).collect();

    for id in (0..slots.len()).rev() {
        if child_ids[id].is_empty() {
            continue;
        }

        let children: Vec<DependentProcedure> = child_ids[id]
            .iter()
            .map(|&child| slots[child].take().expect("each node has exactly one parent"))
            .collect();

        if let Some(node) = slots[id].as_mut() {
            node.children = children;
        }
    }

    root_ids
        .into_iter()
        .map(|id| slots[id].take().expect("root nodes are taken exactly once"))
        .collect()
}
