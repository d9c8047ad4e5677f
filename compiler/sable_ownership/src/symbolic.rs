//! Symbolic data-flow values.
//!
//! A path through the dependency graph is folded into a tree-shaped
//! [`FlowValue`]: field projections shrink the value, constructor arguments
//! wrap it. The interesting algebra is the cancellation rule
//!
//! ```text
//! FieldAccess(Record(v, i), i)  ⇒  v
//! ```
//!
//! applied to a fixed point by [`normalize`](FlowValue::normalize). A
//! projection out of a record built with a *different* index can never carry
//! data; [`is_valid`](FlowValue::is_valid) rejects such shapes so the whole
//! path can be discarded.
//!
//! The trees are exclusively owned (`Box`ed children, no sharing) — each
//! path folds into its own value and nothing else ever aliases it.

use sable_ir::Name;

/// A symbolic value describing how data flows along one path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlowValue {
    /// Leaf: the entire source of the path. `source` names the argument
    /// binding the path starts at; it is kept for trace output only and is
    /// never read by the analysis.
    Value { source: Option<Name> },

    /// Projection of `receiver` at `index`.
    FieldAccess {
        receiver: Box<FlowValue>,
        index: u32,
    },

    /// Injection of `value` into field `index` of a record under
    /// construction.
    Record { value: Box<FlowValue>, index: u32 },
}

impl FlowValue {
    /// Leaf value originating at `source`.
    pub fn value(source: Option<Name>) -> Self {
        FlowValue::Value { source }
    }

    /// Wrap `receiver` in a projection at `index`.
    pub fn field(receiver: FlowValue, index: u32) -> Self {
        FlowValue::FieldAccess {
            receiver: Box::new(receiver),
            index,
        }
    }

    /// Wrap `value` in a record injection at `index`.
    pub fn record(value: FlowValue, index: u32) -> Self {
        FlowValue::Record {
            value: Box::new(value),
            index,
        }
    }

    /// One normalization pass. Returns the (possibly reduced) value and
    /// whether anything changed; callers loop until `false` — or use
    /// [`normalize_fully`](FlowValue::normalize_fully).
    ///
    /// Receivers are normalized recursively before the cancellation rule is
    /// considered at the current level on the *next* pass, mirroring the
    /// bottom-up fixed-point structure.
    pub fn normalize(self) -> (Self, bool) {
        match self {
            value @ FlowValue::Value { .. } => (value, false),

            FlowValue::FieldAccess { receiver, index } => match *receiver {
                FlowValue::Record {
                    value,
                    index: ctor_index,
                } if ctor_index == index => (*value, true),
                receiver => {
                    let (receiver, changed) = receiver.normalize();
                    (FlowValue::field(receiver, index), changed)
                }
            },

            FlowValue::Record { value, index } => {
                let (value, changed) = value.normalize();
                (FlowValue::record(value, index), changed)
            }
        }
    }

    /// Normalize to a fixed point.
    pub fn normalize_fully(self) -> Self {
        let mut value = self;
        loop {
            let (normalized, changed) = value.normalize();
            value = normalized;
            if !changed {
                return value;
            }
        }
    }

    /// Whether the value describes a data flow that can actually occur.
    ///
    /// A projection out of a record injected at a different index is
    /// impossible; the check recurses into children so a mismatch anywhere
    /// in the tree poisons the whole value.
    pub fn is_valid(&self) -> bool {
        match self {
            FlowValue::Value { .. } => true,
            FlowValue::FieldAccess { receiver, index } => match receiver.as_ref() {
                FlowValue::Record {
                    index: ctor_index, ..
                } if ctor_index != index => false,
                _ => receiver.is_valid(),
            },
            FlowValue::Record { value, .. } => value.is_valid(),
        }
    }
}
