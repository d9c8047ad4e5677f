//! Function-level ownership signatures and prior-phase inputs.
//!
//! An [`OwnershipSignature`] is the externally visible summary of how a
//! function's result relates to its arguments: one fresh
//! [`TypeVariableInfo`] per argument and for the result, the member
//! projections that participate in borrowing, and the set of ownership
//! variables known to be borrows.
//!
//! [`OwnershipFacts`] carries what the earlier ownership phases (equality
//! inference, forbidden-borrow inference, per-member ownership inference)
//! deliver for one function. Those phases are external collaborators; this
//! crate only consumes their output.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::alloc::{Allocator, GroupVar, OwnershipVar, TypeVariableInfo};
use crate::member::MemberInfo;

/// The fully inferred kind of an ownership variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OwnershipKind {
    /// The variable owns its value outright.
    Owner,
    /// The variable borrows out of `source`'s region.
    Borrow { source: GroupVar },
}

impl OwnershipKind {
    /// `true` for [`Borrow`](OwnershipKind::Borrow).
    pub fn is_borrow(self) -> bool {
        matches!(self, OwnershipKind::Borrow { .. })
    }
}

/// A function's ownership signature.
///
/// `members` and `borrows` are filled in by signature normalization; a
/// freshly drafted signature has both empty. The allocator that minted every
/// variable in the signature rides along for downstream phases.
#[derive(Debug)]
pub struct OwnershipSignature {
    /// One fresh pair per formal parameter, declaration order.
    pub args: Vec<TypeVariableInfo>,
    /// Fresh pair for the result root.
    pub result: TypeVariableInfo,
    /// Canonically ordered projections relevant to borrowing.
    pub members: Vec<MemberInfo>,
    /// Ownership variables known to denote borrows.
    pub borrows: Vec<OwnershipVar>,
    /// The minting context every variable above came from.
    pub allocator: Allocator,
}

impl OwnershipSignature {
    /// Draft a signature with no members or borrows yet.
    pub fn draft(args: Vec<TypeVariableInfo>, result: TypeVariableInfo, allocator: Allocator) -> Self {
        OwnershipSignature {
            args,
            result,
            members: Vec::new(),
            borrows: Vec::new(),
            allocator,
        }
    }
}

/// Which ownership variables each group (transitively) depends on.
pub type OwnershipDepMap = FxHashMap<GroupVar, FxHashSet<OwnershipVar>>;

/// Resolved kind of each ownership variable.
pub type OwnershipKindMap = FxHashMap<OwnershipVar, OwnershipKind>;

/// Everything the earlier ownership phases deliver for one function.
#[derive(Debug)]
pub struct OwnershipFacts {
    /// The draft (pre-canonical) signature.
    pub signature: OwnershipSignature,
    /// Group → ownership-variable dependencies.
    pub ownership_dep_map: OwnershipDepMap,
    /// The pre-inferred member list for the function.
    pub members: Vec<MemberInfo>,
    /// Resolved ownership kinds.
    pub ownerships: OwnershipKindMap,
}
