//! Shared test utilities for ownership inference.
//!
//! Factory functions used across the flow, path, normalize, infer, and
//! pipeline tests. Only compiled in test builds.

use sable_ir::{Body, BodyBuilder, Function, InstrId, InstrKind, Name, Param};

use crate::alloc::{GroupVar, OwnershipVar, TypeVariableInfo};
use crate::member::{MemberInfo, MemberKind};

/// Shorthand for `OwnershipVar::new(n)`.
pub(crate) fn o(n: u32) -> OwnershipVar {
    OwnershipVar::new(n)
}

/// Shorthand for `GroupVar::new(n)`.
pub(crate) fn g(n: u32) -> GroupVar {
    GroupVar::new(n)
}

/// An info pair with explicit raw variable numbers.
pub(crate) fn tv(ownership: u32, group: u32) -> TypeVariableInfo {
    TypeVariableInfo {
        ownership_var: o(ownership),
        group_var: g(group),
    }
}

/// A field projection member.
pub(crate) fn field_member(root: GroupVar, index: u32, info: TypeVariableInfo) -> MemberInfo {
    MemberInfo {
        root,
        kind: MemberKind::Field { index },
        info,
    }
}

/// Emit an argument reference.
pub(crate) fn arg_ref(builder: &mut BodyBuilder, name: Name) -> InstrId {
    builder.add(InstrKind::ValueRef {
        name,
        arg: true,
        bind_id: None,
        indices: vec![],
    })
}

/// Emit a field projection.
pub(crate) fn member_access(builder: &mut BodyBuilder, receiver: InstrId, index: u32) -> InstrId {
    builder.add(InstrKind::MemberAccess { receiver, index })
}

/// Emit a constructor call.
pub(crate) fn ctor_call(builder: &mut BodyBuilder, name: Name, args: Vec<InstrId>) -> InstrId {
    builder.add(InstrKind::NamedFunctionCall {
        name,
        args,
        ctor: true,
    })
}

/// Wrap a finished body into a function.
pub(crate) fn make_function(name: Name, params: Vec<Name>, body: Body) -> Function {
    Function {
        name,
        params: params.into_iter().map(|name| Param { name }).collect(),
        body,
    }
}
