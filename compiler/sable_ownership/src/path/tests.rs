use pretty_assertions::assert_eq;

use crate::alloc::Allocator;
use crate::member::MemberInfo;
use crate::symbolic::FlowValue;
use crate::test_helpers::tv;

use super::*;

fn leaf() -> FlowValue {
    FlowValue::value(None)
}

/// Each non-first member must be rooted at its predecessor's group.
fn assert_well_formed(chain: &[MemberInfo]) {
    for pair in chain.windows(2) {
        assert_eq!(pair[1].root, pair[0].info.group_var);
    }
}

#[test]
fn whole_argument_flow_splits_empty() {
    let mut allocator = Allocator::new();
    let path = split_path(leaf(), &mut allocator);
    assert!(path.src.is_empty());
    assert!(path.dest.is_empty());
    assert_eq!(path.arg, tv(0, 0));
    assert_eq!(path.result, tv(1, 1));
}

#[test]
fn projection_chain_becomes_source_members() {
    let mut allocator = Allocator::new();
    let value = FlowValue::field(FlowValue::field(leaf(), 2), 5);
    let path = split_path(value, &mut allocator);

    assert!(path.dest.is_empty());
    assert_eq!(path.src.len(), 2);
    // Innermost projection first, rooted at the argument's group.
    assert_eq!(path.src[0].root, path.arg.group_var);
    assert_eq!(path.src[0].kind.index(), 2);
    assert_eq!(path.src[1].kind.index(), 5);
    assert_well_formed(&path.src);
}

#[test]
fn record_wraps_become_destination_members() {
    let mut allocator = Allocator::new();
    let value = FlowValue::record(FlowValue::record(leaf(), 1), 4);
    let path = split_path(value, &mut allocator);

    assert!(path.src.is_empty());
    assert_eq!(path.dest.len(), 2);
    // Outermost injection first, rooted at the result's group.
    assert_eq!(path.dest[0].root, path.result.group_var);
    assert_eq!(path.dest[0].kind.index(), 4);
    assert_eq!(path.dest[1].kind.index(), 1);
    assert_well_formed(&path.dest);
}

#[test]
fn mixed_value_splits_both_sides() {
    let mut allocator = Allocator::new();
    let value = FlowValue::record(FlowValue::field(leaf(), 0), 1);
    let path = split_path(value, &mut allocator);

    assert_eq!(path.dest.len(), 1);
    assert_eq!(path.dest[0].root, path.result.group_var);
    assert_eq!(path.dest[0].kind.index(), 1);
    assert_eq!(path.src.len(), 1);
    assert_eq!(path.src[0].root, path.arg.group_var);
    assert_eq!(path.src[0].kind.index(), 0);
}

#[test]
fn shared_allocator_keeps_paths_apart() {
    let mut allocator = Allocator::new();
    let first = split_path(leaf(), &mut allocator);
    let second = split_path(FlowValue::field(leaf(), 0), &mut allocator);

    assert_ne!(first.arg, second.arg);
    assert_ne!(first.result, second.result);
    // The later path's members are fresh relative to everything earlier.
    assert_ne!(second.src[0].info.ownership_var, first.arg.ownership_var);
    assert_ne!(second.src[0].info.ownership_var, first.result.ownership_var);
}

#[test]
fn long_chains_stay_well_formed() {
    let mut allocator = Allocator::new();
    let mut value = leaf();
    for index in 0..4 {
        value = FlowValue::field(value, index);
    }
    for index in 0..3 {
        value = FlowValue::record(value, index);
    }
    let path = split_path(value, &mut allocator);
    assert_eq!(path.src.len(), 4);
    assert_eq!(path.dest.len(), 3);
    assert_well_formed(&path.src);
    assert_well_formed(&path.dest);
}
