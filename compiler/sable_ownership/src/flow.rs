//! Per-function data-flow path inference.
//!
//! Enumerates every dependency chain from an argument reference to the
//! function's result value, folds each chain into a symbolic
//! [`FlowValue`], normalizes it, discards impossible flows, and splits the
//! survivors into [`DataFlowPath`]s.
//!
//! # Cycle flattening
//!
//! Path extension only follows edges that *enter* an SCC; edges between two
//! members of the same SCC are ignored. Loops are thereby flattened: flows
//! that exist only across a loop back-edge are not enumerated. This is the
//! flattening policy, and it is deliberate — the surrounding inference is
//! conservative for loop-carried data.
//!
//! # Cost
//!
//! Enumeration is worst-case exponential in the number of join points (an
//! `If` whose branches both reach the result multiplies path counts).
//! Structurally identical paths are *not* deduplicated; multiplicity is
//! observable downstream.

use rustc_hash::{FxHashMap, FxHashSet};

use sable_ir::{Function, InstrId, InstrKind};

use crate::alloc::Allocator;
use crate::data_flow::data_flow_dependencies;
use crate::dependency::{process_dependencies, DependencyMap};
use crate::error::{InferError, InferResult};
use crate::path::{split_path, DataFlowPath};
use crate::symbolic::FlowValue;

/// Infer every argument-to-result data-flow path of one function.
///
/// The allocator is shared by all paths of this function; callers hand in a
/// fresh one per function.
pub fn infer_data_flow(
    func: &Function,
    allocator: &mut Allocator,
) -> InferResult<Vec<DataFlowPath>> {
    let entry = func
        .body
        .entry()
        .ok_or(InferError::EmptyBody { name: func.name })?;
    let end = entry
        .last_real()
        .ok_or(InferError::EmptyBlock { id: entry.id })?
        .id;

    let arg_instructions: FxHashSet<InstrId> = func
        .body
        .instructions()
        .filter(|i| matches!(i.kind, InstrKind::ValueRef { arg: true, .. }))
        .map(|i| i.id)
        .collect();

    let deps = data_flow_dependencies(func)?;
    let paths = enumerate_paths(&deps);

    let mut final_paths = Vec::new();
    if let Some(end_paths) = paths.get(&end) {
        for path in end_paths {
            let starts_at_arg = path
                .first()
                .is_some_and(|first| arg_instructions.contains(first));
            if !starts_at_arg {
                continue;
            }
            let value = build_value(func, path)?.normalize_fully();
            if !value.is_valid() {
                tracing::debug!(?path, "discarding impossible data-flow path");
                continue;
            }
            final_paths.push(split_path(value, allocator));
        }
    }
    Ok(final_paths)
}

/// Enumerate, per instruction, every dependency chain ending at it.
///
/// Groups are processed in topological order, so every out-of-group
/// dependency already has its chains recorded when a member is reached.
/// A member whose dependencies are all inside its own group gets no chains
/// (the flattening policy above).
fn enumerate_paths(deps: &DependencyMap) -> FxHashMap<InstrId, Vec<Vec<InstrId>>> {
    let groups = process_dependencies(deps);
    let mut paths: FxHashMap<InstrId, Vec<Vec<InstrId>>> = FxHashMap::default();

    for group in &groups {
        for &item in &group.items {
            let Some(item_deps) = deps.get(&item) else {
                continue;
            };
            let mut item_paths = Vec::new();
            if item_deps.is_empty() {
                item_paths.push(vec![item]);
            } else {
                for &dep in item_deps {
                    if group.contains(dep) {
                        continue;
                    }
                    let Some(dep_paths) = paths.get(&dep) else {
                        continue;
                    };
                    for dep_path in dep_paths {
                        let mut extended = Vec::with_capacity(dep_path.len() + 1);
                        extended.extend_from_slice(dep_path);
                        extended.push(item);
                        item_paths.push(extended);
                    }
                }
            }
            paths.insert(item, item_paths);
        }
    }

    paths
}

/// Fold one chain (argument-first, result-last) into a symbolic value.
///
/// Projections shrink the value, constructor arguments wrap it. The `prev`
/// tracking correlates which constructor argument the chain flowed through:
/// only the argument position whose id is the previous chain element wraps.
fn build_value(func: &Function, path: &[InstrId]) -> InferResult<FlowValue> {
    let source = path.first().and_then(|&first| {
        match func.body.instruction(first).map(|i| &i.kind) {
            Some(InstrKind::ValueRef { name, .. }) => Some(*name),
            _ => None,
        }
    });

    let mut value = FlowValue::value(source);
    let mut prev: Option<InstrId> = None;

    for &id in path {
        let instr = func
            .body
            .instruction(id)
            .ok_or(InferError::UnknownInstruction { id })?;
        match &instr.kind {
            InstrKind::Bind { .. }
            | InstrKind::If { .. }
            | InstrKind::BlockRef { .. }
            | InstrKind::Converter { .. } => {}

            InstrKind::MemberAccess { index, .. } => {
                value = FlowValue::field(value, *index);
            }

            InstrKind::ValueRef { indices, .. } => {
                for &index in indices {
                    value = FlowValue::field(value, index);
                }
            }

            InstrKind::NamedFunctionCall { args, ctor, .. } => {
                if *ctor {
                    for (arg_index, &arg) in args.iter().enumerate() {
                        if Some(arg) == prev {
                            #[expect(
                                clippy::cast_possible_truncation,
                                reason = "constructor argument counts fit in u32"
                            )]
                            let index = arg_index as u32;
                            value = FlowValue::record(value, index);
                        }
                    }
                }
            }

            other => {
                tracing::debug!(
                    ?id,
                    kind = other.kind_name(),
                    "instruction does not shape the symbolic value"
                );
            }
        }
        prev = Some(id);
    }

    Ok(value)
}
