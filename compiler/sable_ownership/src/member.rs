//! Member projections — one field step rooted at a group.

use crate::alloc::{GroupVar, TypeVariableInfo};

/// The kind of projection a member performs.
///
/// Presently only field projection by index; enum-variant projection will
/// become a second variant, and every consumer matches exhaustively so the
/// addition is compiler-enforced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Field { index: u32 },
}

impl MemberKind {
    /// The projection index, across kinds.
    pub fn index(self) -> u32 {
        match self {
            MemberKind::Field { index } => index,
        }
    }
}

/// One projection step: out of the group `root`, project `kind`, producing
/// the fresh pair `info`.
///
/// A chain of members is well-formed iff every non-first element's `root`
/// equals its predecessor's `info.group_var`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MemberInfo {
    pub root: GroupVar,
    pub kind: MemberKind,
    pub info: TypeVariableInfo,
}
