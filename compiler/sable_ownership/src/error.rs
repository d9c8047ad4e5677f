//! Fatal inference errors.
//!
//! Nothing in this crate is retried, caught, or swallowed: every variant
//! aborts the compilation of the offending function and propagates to the
//! compiler driver with `?`. Discarded invalid data-flow paths are *not*
//! errors — they are expected pruning and never appear here.

use sable_ir::{BlockId, InstrId, Name};
use thiserror::Error;

use crate::alloc::{GroupVar, OwnershipVar};

/// A fatal ownership-inference failure.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InferError {
    /// An instruction kind the data-flow analysis does not support.
    #[error("instruction {id:?} of kind {kind} is not supported by ownership inference")]
    UnsupportedInstruction { id: InstrId, kind: &'static str },

    /// A non-argument `ValueRef` without the id of its producing bind.
    #[error("value reference {id:?} names a non-argument binding but carries no bind id")]
    MissingBindId { id: InstrId },

    /// An instruction id with no instruction behind it.
    #[error("unknown instruction {id:?}")]
    UnknownInstruction { id: InstrId },

    /// A block id with no block behind it.
    #[error("unknown block {id:?}")]
    UnknownBlock { id: BlockId },

    /// A block with no value-carrying instruction where one is required.
    #[error("block {id:?} has no value-carrying instruction")]
    EmptyBlock { id: BlockId },

    /// A function whose body has no blocks at all.
    #[error("function {name:?} has an empty body")]
    EmptyBody { name: Name },

    /// A member's group is absent from the ownership dependency map.
    #[error("group {group:?} is missing from the ownership dependency map")]
    MissingGroupDeps { group: GroupVar },

    /// An ownership variable with no resolved kind.
    #[error("ownership variable {var:?} has no resolved ownership kind")]
    MissingOwnership { var: OwnershipVar },

    /// The orchestrator was handed no facts for a function it must process.
    #[error("no ownership facts for function {name:?}")]
    MissingFacts { name: Name },
}

pub type InferResult<T> = Result<T, InferError>;
