//! Ownership and borrow inference for the Sable compiler.
//!
//! This crate provides:
//!
//! - **Fresh identity minting** ([`Allocator`], [`OwnershipVar`],
//!   [`GroupVar`], [`TypeVariableInfo`]) — monotone, never-reused variable
//!   identities for ownership and lifetime regions.
//!
//! - **Data-flow path inference** ([`infer_data_flow`], [`DataFlowPath`]) —
//!   enumerates every argument-to-result dependency chain of a function,
//!   folds each into a symbolic [`FlowValue`], cancels
//!   constructor/projection pairs, discards impossible flows, and splits
//!   the survivors into source/destination member chains.
//!
//! - **Signature normalization** ([`normalize_signature`],
//!   [`OwnershipSignature`]) — filters the members that transitively carry a
//!   borrow and renumbers all variables into a canonical form, so
//!   structurally equivalent signatures compare equal.
//!
//! - **Program orchestration** ([`infer_program`], [`FunctionInference`]) —
//!   runs the pipeline per function against the facts the earlier ownership
//!   phases delivered.
//!
//! # Design
//!
//! The pipeline is a pure function over an immutable, already-typechecked
//! [`sable_ir`] body; it touches no file system, network, or process state.
//! Per function the stages run strictly linearly: dependency extraction →
//! SCC grouping → path enumeration → per-path folding/normalization/split →
//! signature normalization. Cycles in the dependency graph are condensed
//! and flattened (see [`flow`]); all iteration orders are pinned down so
//! identical inputs produce bitwise-identical signatures.
//!
//! # Crate Dependencies
//!
//! `sable_ownership` depends on `sable_ir` for the IR it reads. It knows
//! nothing about the syntax tree, the typechecker, or the backend; earlier
//! ownership phases talk to it only through [`OwnershipFacts`].

pub mod alloc;
pub mod data_flow;
pub mod dependency;
pub mod error;
pub mod flow;
pub mod infer;
pub mod member;
pub mod normalize;
pub mod path;
pub mod signature;
pub mod symbolic;

#[cfg(test)]
mod test_helpers;

pub use alloc::{Allocator, GroupVar, OwnershipVar, TypeVariableInfo};
pub use data_flow::data_flow_dependencies;
pub use dependency::{process_dependencies, DependencyGroup, DependencyMap};
pub use error::{InferError, InferResult};
pub use flow::infer_data_flow;
pub use infer::{infer_function, infer_program, FunctionInference};
pub use member::{MemberInfo, MemberKind};
pub use normalize::{normalize_signature, Normalizer};
pub use path::{split_path, DataFlowPath};
pub use signature::{
    OwnershipDepMap, OwnershipFacts, OwnershipKind, OwnershipKindMap, OwnershipSignature,
};
pub use symbolic::FlowValue;

// ── Pipeline scenario tests ─────────────────────────────────────────

#[cfg(test)]
mod pipeline_tests {
    use pretty_assertions::assert_eq;
    use rustc_hash::FxHashSet;

    use sable_ir::{BodyBuilder, InstrKind, Interner, Program};

    use crate::signature::{OwnershipDepMap, OwnershipKindMap};
    use crate::test_helpers::{arg_ref, ctor_call, field_member, make_function, member_access, tv};
    use crate::{
        infer_function, infer_program, Allocator, OwnershipFacts, OwnershipKind,
        OwnershipSignature,
    };

    /// Facts as the earlier phases would deliver them for a function with
    /// `arg_count` parameters and nothing interesting inferred: fresh
    /// argument/result pairs, empty dependency sets, no members.
    fn plain_facts(arg_count: u32) -> OwnershipFacts {
        let mut prior = Allocator::new();
        let args: Vec<_> = (0..arg_count)
            .map(|_| prior.next_type_variable_info())
            .collect();
        let result = prior.next_type_variable_info();
        let mut ownership_dep_map = OwnershipDepMap::default();
        for arg in &args {
            ownership_dep_map.insert(arg.group_var, FxHashSet::default());
        }
        ownership_dep_map.insert(result.group_var, FxHashSet::default());
        OwnershipFacts {
            signature: OwnershipSignature::draft(args, result, prior),
            ownership_dep_map,
            members: vec![],
            ownerships: OwnershipKindMap::default(),
        }
    }

    /// `fn id(x) = x` — one path, no projections, no record wraps.
    #[test]
    fn identity_function() {
        let mut interner = Interner::new();
        let x = interner.intern("x");
        let mut builder = BodyBuilder::new();
        arg_ref(&mut builder, x);
        let func = make_function(interner.intern("id"), vec![x], builder.finish());

        let inference = match infer_function(&func, plain_facts(1)) {
            Ok(inference) => inference,
            Err(e) => panic!("inference failed: {e}"),
        };

        assert_eq!(inference.paths.len(), 1);
        let path = &inference.paths[0];
        assert!(path.src.is_empty());
        assert!(path.dest.is_empty());
        assert_ne!(path.arg, path.result);

        // Canonical signature: arg renamed first, result second, nothing else.
        assert_eq!(inference.signature.args, vec![tv(0, 0)]);
        assert_eq!(inference.signature.result, tv(1, 1));
        assert!(inference.signature.members.is_empty());
        assert!(inference.signature.borrows.is_empty());
    }

    /// `fn first(p) = p.0` — one path projecting field 0 out of the
    /// argument; the prior phases marked that member as borrowing.
    #[test]
    fn projection_function() {
        let mut interner = Interner::new();
        let p = interner.intern("p");
        let mut builder = BodyBuilder::new();
        let p_ref = arg_ref(&mut builder, p);
        member_access(&mut builder, p_ref, 0);
        let func = make_function(interner.intern("first"), vec![p], builder.finish());

        // Facts: arg tv(0,0), result tv(1,1); one member projecting field 0
        // out of the argument's group, inferred as a borrow.
        let mut prior = Allocator::new();
        let arg = prior.next_type_variable_info();
        let result = prior.next_type_variable_info();
        let member = field_member(arg.group_var, 0, prior.next_type_variable_info());
        let mut ownership_dep_map = OwnershipDepMap::default();
        ownership_dep_map.insert(
            arg.group_var,
            FxHashSet::from_iter([member.info.ownership_var]),
        );
        ownership_dep_map.insert(result.group_var, FxHashSet::default());
        ownership_dep_map.insert(member.info.group_var, FxHashSet::default());
        let mut ownerships = OwnershipKindMap::default();
        ownerships.insert(
            member.info.ownership_var,
            OwnershipKind::Borrow {
                source: arg.group_var,
            },
        );
        let facts = OwnershipFacts {
            signature: OwnershipSignature::draft(vec![arg], result, prior),
            ownership_dep_map,
            members: vec![member],
            ownerships,
        };

        let inference = match infer_function(&func, facts) {
            Ok(inference) => inference,
            Err(e) => panic!("inference failed: {e}"),
        };

        assert_eq!(inference.paths.len(), 1);
        let path = &inference.paths[0];
        assert_eq!(path.src.len(), 1);
        assert!(path.dest.is_empty());
        assert_eq!(path.src[0].root, path.arg.group_var);
        assert_eq!(path.src[0].kind.index(), 0);

        // One canonical member rooted at the arg's canonical group.
        assert_eq!(inference.signature.members.len(), 1);
        assert_eq!(
            inference.signature.members[0].root,
            inference.signature.args[0].group_var
        );
        assert_eq!(inference.signature.members[0].kind.index(), 0);
        assert_eq!(
            inference.signature.borrows,
            vec![member.info.ownership_var]
        );
    }

    /// `fn wrap(x) = Box(x)` — one path, record wrap on the result side.
    #[test]
    fn constructor_function() {
        let mut interner = Interner::new();
        let x = interner.intern("x");
        let box_name = interner.intern("Box");
        let mut builder = BodyBuilder::new();
        let x_ref = arg_ref(&mut builder, x);
        ctor_call(&mut builder, box_name, vec![x_ref]);
        let func = make_function(interner.intern("wrap"), vec![x], builder.finish());

        let inference = match infer_function(&func, plain_facts(1)) {
            Ok(inference) => inference,
            Err(e) => panic!("inference failed: {e}"),
        };

        assert_eq!(inference.paths.len(), 1);
        let path = &inference.paths[0];
        assert!(path.src.is_empty());
        assert_eq!(path.dest.len(), 1);
        assert_eq!(path.dest[0].root, path.result.group_var);
        assert_eq!(path.dest[0].kind.index(), 0);
    }

    /// `fn roundtrip(x) = Box(x).0` — construction and projection cancel,
    /// leaving the identity flow.
    #[test]
    fn cancellation_function() {
        let mut interner = Interner::new();
        let x = interner.intern("x");
        let box_name = interner.intern("Box");
        let mut builder = BodyBuilder::new();
        let x_ref = arg_ref(&mut builder, x);
        let boxed = ctor_call(&mut builder, box_name, vec![x_ref]);
        member_access(&mut builder, boxed, 0);
        let func = make_function(interner.intern("roundtrip"), vec![x], builder.finish());

        let inference = match infer_function(&func, plain_facts(1)) {
            Ok(inference) => inference,
            Err(e) => panic!("inference failed: {e}"),
        };

        assert_eq!(inference.paths.len(), 1);
        assert!(inference.paths[0].src.is_empty());
        assert!(inference.paths[0].dest.is_empty());
    }

    /// `fn mismatch(x) = Box(x).1` — the constructor's field and the later
    /// projection disagree; the flow is impossible and the path is pruned.
    #[test]
    fn mismatched_projection_is_discarded() {
        let mut interner = Interner::new();
        let x = interner.intern("x");
        let box_name = interner.intern("Box");
        let mut builder = BodyBuilder::new();
        let x_ref = arg_ref(&mut builder, x);
        let boxed = ctor_call(&mut builder, box_name, vec![x_ref]);
        member_access(&mut builder, boxed, 1);
        let func = make_function(interner.intern("mismatch"), vec![x], builder.finish());

        let inference = match infer_function(&func, plain_facts(1)) {
            Ok(inference) => inference,
            Err(e) => panic!("inference failed: {e}"),
        };

        assert!(inference.paths.is_empty());
    }

    /// `fn choose(b, x, y) = if b then x else y` — both branches reach the
    /// result, yielding one whole-argument flow per value argument.
    #[test]
    fn branch_merge_function() {
        let mut interner = Interner::new();
        let b = interner.intern("b");
        let x = interner.intern("x");
        let y = interner.intern("y");

        let mut builder = BodyBuilder::new();
        let true_block = builder.new_block();
        let false_block = builder.new_block();
        let cond = arg_ref(&mut builder, b);
        builder.add(InstrKind::If {
            cond,
            true_block,
            false_block,
        });
        builder.switch_to(true_block);
        arg_ref(&mut builder, x);
        builder.switch_to(false_block);
        arg_ref(&mut builder, y);

        let func = make_function(
            interner.intern("choose"),
            vec![b, x, y],
            builder.finish(),
        );

        let inference = match infer_function(&func, plain_facts(3)) {
            Ok(inference) => inference,
            Err(e) => panic!("inference failed: {e}"),
        };

        // One path per branch, both whole-argument flows; the condition
        // contributes no argument-to-result path.
        assert_eq!(inference.paths.len(), 2);
        for path in &inference.paths {
            assert!(path.src.is_empty());
            assert!(path.dest.is_empty());
        }
        // Distinct fresh roots per path, minted from one shared allocator.
        assert_ne!(inference.paths[0].arg, inference.paths[1].arg);
    }

    /// A whole program runs function by function, results in program order.
    #[test]
    fn program_runs_in_declaration_order() {
        let mut interner = Interner::new();
        let x = interner.intern("x");

        let mut first = BodyBuilder::new();
        arg_ref(&mut first, x);
        let first_fn = make_function(interner.intern("one"), vec![x], first.finish());

        let mut second = BodyBuilder::new();
        arg_ref(&mut second, x);
        let second_fn = make_function(interner.intern("two"), vec![x], second.finish());

        let program = Program {
            functions: vec![first_fn, second_fn],
        };
        let mut facts = rustc_hash::FxHashMap::default();
        facts.insert(interner.intern("one"), plain_facts(1));
        facts.insert(interner.intern("two"), plain_facts(1));

        let results = match infer_program(&program, facts) {
            Ok(results) => results,
            Err(e) => panic!("inference failed: {e}"),
        };
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, interner.intern("one"));
        assert_eq!(results[1].name, interner.intern("two"));
    }
}
