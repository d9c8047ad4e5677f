//! Program-level orchestration.
//!
//! Runs the whole pipeline per function: dependency extraction → path
//! enumeration → symbolic folding, normalization, validity filtering →
//! path splitting → signature normalization against the facts the earlier
//! ownership phases delivered for that function.
//!
//! Functions are processed strictly sequentially in program order, each with
//! its own fresh allocator; there is no shared mutable state between them.

use rustc_hash::FxHashMap;

use sable_ir::{Function, Name, Program};

use crate::alloc::Allocator;
use crate::error::{InferError, InferResult};
use crate::flow::infer_data_flow;
use crate::normalize::normalize_signature;
use crate::path::DataFlowPath;
use crate::signature::{OwnershipFacts, OwnershipSignature};

/// Everything inference produced for one function.
#[derive(Debug)]
pub struct FunctionInference {
    pub name: Name,
    /// Argument-to-result flows, in enumeration order.
    pub paths: Vec<DataFlowPath>,
    /// The canonical ownership signature.
    pub signature: OwnershipSignature,
}

/// Run the pipeline for a single function.
pub fn infer_function(func: &Function, facts: OwnershipFacts) -> InferResult<FunctionInference> {
    let mut allocator = Allocator::new();
    let paths = infer_data_flow(func, &mut allocator)?;
    tracing::debug!(
        function = ?func.name,
        path_count = paths.len(),
        "data-flow paths enumerated"
    );

    let signature = normalize_signature(
        facts.signature,
        &facts.ownership_dep_map,
        &facts.members,
        &facts.ownerships,
    )?;

    Ok(FunctionInference {
        name: func.name,
        paths,
        signature,
    })
}

/// Run the pipeline for every function of a program, in program order.
///
/// `facts` is consumed: each function takes its entry out of the map. A
/// function with no facts is a fatal precondition violation — the earlier
/// phases must have covered the whole program.
pub fn infer_program(
    program: &Program,
    mut facts: FxHashMap<Name, OwnershipFacts>,
) -> InferResult<Vec<FunctionInference>> {
    program
        .functions
        .iter()
        .map(|func| {
            let function_facts = facts
                .remove(&func.name)
                .ok_or(InferError::MissingFacts { name: func.name })?;
            infer_function(func, function_facts)
        })
        .collect()
}
