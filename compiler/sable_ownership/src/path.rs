//! Data-flow paths — the source/destination decomposition of a value.
//!
//! A normalized, valid [`FlowValue`] has the shape
//! `Record*( FieldAccess*( Value ) )`: zero or more record injections
//! around a projection core. [`split_path`] peels the two layers apart into
//! member chains rooted at fresh argument and result variables:
//!
//! - the outer `Record`s become the **destination** chain (where inside the
//!   result the argument part is placed),
//! - the `FieldAccess` core becomes the **source** chain (which part of the
//!   argument flows).

use crate::alloc::{Allocator, TypeVariableInfo};
use crate::member::{MemberInfo, MemberKind};
use crate::symbolic::FlowValue;

/// How one function argument reaches the function result.
///
/// `src` is rooted at `arg.group_var` and may be empty (the argument is used
/// whole); `dest` is rooted at `result.group_var` and may be empty (the
/// result *is* that argument part).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataFlowPath {
    pub arg: TypeVariableInfo,
    pub result: TypeVariableInfo,
    pub src: Vec<MemberInfo>,
    pub dest: Vec<MemberInfo>,
}

/// Split a normalized symbolic value into a [`DataFlowPath`].
///
/// The allocator is shared across all paths of one function (and fresh per
/// function), so members of different paths never collide.
pub fn split_path(value: FlowValue, allocator: &mut Allocator) -> DataFlowPath {
    let arg = allocator.next_type_variable_info();
    let result = allocator.next_type_variable_info();

    let mut dest = Vec::new();
    let mut core = value;
    loop {
        match core {
            FlowValue::Record { value, index } => {
                let root = dest
                    .last()
                    .map_or(result.group_var, |m: &MemberInfo| m.info.group_var);
                dest.push(MemberInfo {
                    root,
                    kind: MemberKind::Field { index },
                    info: allocator.next_type_variable_info(),
                });
                core = *value;
            }
            other => {
                core = other;
                break;
            }
        }
    }

    let src = source_members(&core, arg, allocator);
    DataFlowPath {
        arg,
        result,
        src,
        dest,
    }
}

/// Walk the projection core innermost-first, rooting the first member at the
/// argument's group and every later one at its predecessor's group.
fn source_members(
    value: &FlowValue,
    arg: TypeVariableInfo,
    allocator: &mut Allocator,
) -> Vec<MemberInfo> {
    match value {
        FlowValue::Value { .. } => Vec::new(),
        FlowValue::FieldAccess { receiver, index } => {
            let mut members = source_members(receiver, arg, allocator);
            let root = members
                .last()
                .map_or(arg.group_var, |m: &MemberInfo| m.info.group_var);
            members.push(MemberInfo {
                root,
                kind: MemberKind::Field { index: *index },
                info: allocator.next_type_variable_info(),
            });
            members
        }
        FlowValue::Record { value, .. } => {
            // Unreachable on normalized valid input: record layers were
            // peeled by the caller and inner records either cancelled or
            // invalidated the path.
            debug_assert!(false, "record in source position after normalization");
            source_members(value, arg, allocator)
        }
    }
}

#[cfg(test)]
mod tests;
