//! Instruction-level data dependencies.
//!
//! For every instruction of a function body, computes the set of
//! instructions its *value* depends on. The resulting [`DependencyMap`]
//! feeds SCC grouping and path enumeration.
//!
//! An argument reference is a source (no dependencies); a `BlockRef` stands
//! for its block's last *real* instruction; an `If` merges the last
//! instructions of both branch blocks. Instruction kinds that survive
//! lowering but carry no data-flow meaning for inference
//! (`DynamicFunctionCall`) are a fatal error.

use smallvec::{smallvec, SmallVec};

use sable_ir::{Body, Function, Instr, InstrId, InstrKind};

use crate::dependency::DependencyMap;
use crate::error::{InferError, InferResult};

/// Build the full data-dependency map for one function body.
pub fn data_flow_dependencies(func: &Function) -> InferResult<DependencyMap> {
    let mut deps = DependencyMap::default();
    for instr in func.body.instructions() {
        deps.insert(instr.id, instruction_dependencies(instr, &func.body)?);
    }
    Ok(deps)
}

fn instruction_dependencies(instr: &Instr, body: &Body) -> InferResult<SmallVec<[InstrId; 2]>> {
    let deps = match &instr.kind {
        InstrKind::ValueRef { arg: true, .. } => smallvec![],
        InstrKind::ValueRef {
            arg: false,
            bind_id,
            ..
        } => {
            let bind = (*bind_id).ok_or(InferError::MissingBindId { id: instr.id })?;
            smallvec![bind]
        }
        InstrKind::Bind { rhs, .. } => smallvec![*rhs],
        InstrKind::BlockRef { block } => {
            let referenced = body
                .block(*block)
                .ok_or(InferError::UnknownBlock { id: *block })?;
            let last = referenced
                .last_real()
                .ok_or(InferError::EmptyBlock { id: *block })?;
            smallvec![last.id]
        }
        InstrKind::NamedFunctionCall { args, .. } => args.iter().copied().collect(),
        InstrKind::MemberAccess { receiver, .. } => smallvec![*receiver],
        InstrKind::If {
            true_block,
            false_block,
            ..
        } => {
            let true_last = block_last(body, *true_block)?;
            let false_last = block_last(body, *false_block)?;
            smallvec![true_last, false_last]
        }
        InstrKind::Converter { arg } => smallvec![*arg],
        InstrKind::BoolLiteral { .. }
        | InstrKind::IntLiteral { .. }
        | InstrKind::StringLiteral { .. }
        | InstrKind::Nop
        | InstrKind::DropVar { .. } => smallvec![],
        InstrKind::DynamicFunctionCall { .. } => {
            return Err(InferError::UnsupportedInstruction {
                id: instr.id,
                kind: instr.kind.kind_name(),
            });
        }
    };
    Ok(deps)
}

/// The very last instruction of a block — drops included, unlike
/// [`Block::last_real`](sable_ir::Block::last_real). Branch values merge at
/// whatever the branch block ends with.
fn block_last(body: &Body, id: sable_ir::BlockId) -> InferResult<InstrId> {
    let block = body.block(id).ok_or(InferError::UnknownBlock { id })?;
    let last = block.last().ok_or(InferError::EmptyBlock { id })?;
    Ok(last.id)
}
