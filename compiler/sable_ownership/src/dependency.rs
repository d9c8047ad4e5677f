//! Dependency grouping — SCC condensation in topological order.
//!
//! The data-flow dependency graph of a function body may contain cycles
//! (loop back-edges, `If` merges that reference back). This module collapses
//! every strongly connected component into one [`DependencyGroup`] and emits
//! the groups dependencies-first: if group A depends on group B (A ≠ B),
//! B precedes A in the output.
//!
//! # Determinism
//!
//! Node visit order is ascending instruction id and each group's items are
//! sorted ascending, so the output is a pure function of the input map's
//! contents — the map's own iteration order never leaks through.
//!
//! Edges to ids absent from the map are treated as absent; a node with no
//! listed dependencies is a source. There is no failure mode.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use sable_ir::InstrId;

/// Node → data predecessors. Most instructions have at most two.
pub type DependencyMap = FxHashMap<InstrId, SmallVec<[InstrId; 2]>>;

/// One strongly connected component of the dependency graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DependencyGroup {
    /// Member instruction ids, ascending.
    pub items: Vec<InstrId>,
}

impl DependencyGroup {
    /// Is `id` a member of this group?
    pub fn contains(&self, id: InstrId) -> bool {
        self.items.contains(&id)
    }
}

const UNVISITED: u32 = u32::MAX;

/// Group a dependency map into SCCs, emitted in topological
/// (dependencies-first) order.
///
/// Iterative Tarjan with an explicit frame stack — recursion depth would
/// otherwise track the longest dependency chain in the function.
pub fn process_dependencies(deps: &DependencyMap) -> Vec<DependencyGroup> {
    let mut nodes: Vec<InstrId> = deps.keys().copied().collect();
    nodes.sort_unstable();

    let slot_of: FxHashMap<InstrId, usize> = nodes
        .iter()
        .enumerate()
        .map(|(slot, &id)| (id, slot))
        .collect();

    // Edge lists in slot space. Targets outside the map are dropped here,
    // which is what makes missing predecessors behave as absent edges.
    let edges: Vec<Vec<usize>> = nodes
        .iter()
        .map(|id| {
            let Some(targets) = deps.get(id) else {
                return Vec::new();
            };
            targets
                .iter()
                .filter_map(|dep| slot_of.get(dep).copied())
                .collect()
        })
        .collect();

    let n = nodes.len();
    let mut index = vec![UNVISITED; n];
    let mut lowlink = vec![0u32; n];
    let mut on_stack = vec![false; n];
    let mut stack: Vec<usize> = Vec::new();
    let mut next_index: u32 = 0;
    let mut groups = Vec::new();

    // Frame: (slot, position of the next edge to follow).
    let mut frames: Vec<(usize, usize)> = Vec::new();

    for root in 0..n {
        if index[root] != UNVISITED {
            continue;
        }
        index[root] = next_index;
        lowlink[root] = next_index;
        next_index += 1;
        stack.push(root);
        on_stack[root] = true;
        frames.push((root, 0));

        while let Some(&mut (v, ref mut edge_pos)) = frames.last_mut() {
            if let Some(&w) = edges[v].get(*edge_pos) {
                *edge_pos += 1;
                if index[w] == UNVISITED {
                    index[w] = next_index;
                    lowlink[w] = next_index;
                    next_index += 1;
                    stack.push(w);
                    on_stack[w] = true;
                    frames.push((w, 0));
                } else if on_stack[w] {
                    lowlink[v] = lowlink[v].min(index[w]);
                }
                continue;
            }

            // All edges of `v` followed: pop and maybe emit an SCC.
            frames.pop();
            if let Some(&(parent, _)) = frames.last() {
                lowlink[parent] = lowlink[parent].min(lowlink[v]);
            }
            if lowlink[v] == index[v] {
                let mut items = Vec::new();
                while let Some(w) = stack.pop() {
                    on_stack[w] = false;
                    items.push(nodes[w]);
                    if w == v {
                        break;
                    }
                }
                items.sort_unstable();
                groups.push(DependencyGroup { items });
            }
        }
    }

    groups
}
