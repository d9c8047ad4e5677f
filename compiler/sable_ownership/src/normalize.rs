//! Ownership signature normalization.
//!
//! Takes a drafted signature plus the per-member ownership facts delivered
//! by the earlier inference phases, and produces the function's canonical,
//! externally visible signature:
//!
//! 1. **Borrow filtering** — keep only members that transitively carry a
//!    borrow reachable from some argument.
//! 2. **Canonical renaming** — renumber ownership and group variables from
//!    a fresh allocator, args first, then the result, then members.
//! 3. **Ordered collection** — per argument, emit each group's children
//!    sorted by projection index, the whole sibling block before any
//!    descendant.
//!
//! Two signatures compare equal after this pass iff they are structurally
//! equivalent, and re-running the pass on the same input reproduces the
//! identical output.

use crate::alloc::{Allocator, GroupVar, OwnershipVar, TypeVariableInfo};
use crate::error::{InferError, InferResult};
use crate::member::MemberInfo;
use crate::signature::{OwnershipDepMap, OwnershipKindMap, OwnershipSignature};

/// Memoized renamer: every distinct incoming variable maps to one fresh
/// canonical variable, in first-encounter order.
#[derive(Debug, Default)]
pub struct Normalizer {
    allocator: Allocator,
    ownership_vars: rustc_hash::FxHashMap<OwnershipVar, OwnershipVar>,
    group_vars: rustc_hash::FxHashMap<GroupVar, GroupVar>,
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonical name for `var`, minting on first encounter.
    pub fn normalize_ownership_var(&mut self, var: OwnershipVar) -> OwnershipVar {
        if let Some(&known) = self.ownership_vars.get(&var) {
            return known;
        }
        let fresh = self.allocator.next_ownership_var();
        self.ownership_vars.insert(var, fresh);
        fresh
    }

    /// Canonical name for `var`, minting on first encounter.
    pub fn normalize_group_var(&mut self, var: GroupVar) -> GroupVar {
        if let Some(&known) = self.group_vars.get(&var) {
            return known;
        }
        let fresh = self.allocator.next_group_var();
        self.group_vars.insert(var, fresh);
        fresh
    }

    /// Rename both halves of an info pair.
    pub fn normalize_info(&mut self, info: TypeVariableInfo) -> TypeVariableInfo {
        TypeVariableInfo {
            ownership_var: self.normalize_ownership_var(info.ownership_var),
            group_var: self.normalize_group_var(info.group_var),
        }
    }

    /// Hand over the allocator for the finished signature to carry.
    pub fn into_allocator(self) -> Allocator {
        self.allocator
    }
}

/// Keep only members that transitively carry a borrow.
///
/// Relevance: a member is relevant to an argument when its ownership
/// variable is among the argument group's ownership dependencies; the
/// per-argument sweeps are concatenated, so a member relevant through two
/// arguments appears twice (multiplicity is preserved all the way through
/// collection). Of the relevant members, those whose own ownership is a
/// borrow form the borrow set `B`; a member survives if its ownership var
/// is in `B` or its group's dependencies intersect `B`.
fn filter_borrowing_members(
    signature: &OwnershipSignature,
    ownership_dep_map: &OwnershipDepMap,
    members: &[MemberInfo],
    ownerships: &OwnershipKindMap,
) -> InferResult<(Vec<MemberInfo>, Vec<OwnershipVar>)> {
    let mut relevant = Vec::new();
    for arg in &signature.args {
        if let Some(ownership_vars) = ownership_dep_map.get(&arg.group_var) {
            for member in members {
                if ownership_vars.contains(&member.info.ownership_var) {
                    relevant.push(*member);
                }
            }
        }
    }

    let mut borrows = Vec::new();
    for member in &relevant {
        let var = member.info.ownership_var;
        let kind = ownerships
            .get(&var)
            .ok_or(InferError::MissingOwnership { var })?;
        if kind.is_borrow() {
            borrows.push(var);
        }
    }

    let mut only_borrowing = Vec::new();
    for member in &relevant {
        let ownership_vars = ownership_dep_map
            .get(&member.info.group_var)
            .ok_or(InferError::MissingGroupDeps {
                group: member.info.group_var,
            })?;
        let carries_borrow = borrows.contains(&member.info.ownership_var)
            || ownership_vars.iter().any(|o| borrows.contains(o));
        if carries_borrow {
            only_borrowing.push(*member);
        }
    }

    Ok((only_borrowing, borrows))
}

/// Emit `parent`'s children sorted by projection index, then recurse.
///
/// The order — the whole sibling block first, each child's descendants
/// after — is load-bearing: downstream phases treat it as the canonical
/// signature ordering. The sort is stable, so members sharing an index keep
/// their relative order.
fn collect_child_members(
    normalizer: &mut Normalizer,
    parent: GroupVar,
    members: &[MemberInfo],
) -> Vec<MemberInfo> {
    let mut children: Vec<MemberInfo> = members
        .iter()
        .filter(|m| m.root == parent)
        .copied()
        .collect();
    children.sort_by_key(|m| m.kind.index());

    let mut collected = Vec::with_capacity(children.len());
    for child in &children {
        collected.push(MemberInfo {
            root: normalizer.normalize_group_var(child.root),
            kind: child.kind,
            info: normalizer.normalize_info(child.info),
        });
    }
    for child in &children {
        collected.extend(collect_child_members(
            normalizer,
            child.info.group_var,
            members,
        ));
    }
    collected
}

/// Normalize a drafted signature into its canonical form.
///
/// Canonical numbering is established by renaming the arguments in
/// declaration order, then the result, then the collected members; the memo
/// tables make shared groups collapse to the same canonical variable.
pub fn normalize_signature(
    signature: OwnershipSignature,
    ownership_dep_map: &OwnershipDepMap,
    members: &[MemberInfo],
    ownerships: &OwnershipKindMap,
) -> InferResult<OwnershipSignature> {
    let mut normalizer = Normalizer::new();

    let (only_borrowing, borrows) =
        filter_borrowing_members(&signature, ownership_dep_map, members, ownerships)?;

    let args: Vec<TypeVariableInfo> = signature
        .args
        .iter()
        .map(|arg| normalizer.normalize_info(*arg))
        .collect();
    let result = normalizer.normalize_info(signature.result);

    let mut ordered = Vec::new();
    for arg in &signature.args {
        ordered.extend(collect_child_members(
            &mut normalizer,
            arg.group_var,
            &only_borrowing,
        ));
    }

    Ok(OwnershipSignature {
        args,
        result,
        members: ordered,
        borrows,
        allocator: normalizer.into_allocator(),
    })
}
