//! Sable mid-level IR — the representation consumed by ownership inference.
//!
//! After parsing, name resolution, and typechecking, every function body is
//! lowered into a list of **blocks**, each holding an ordered run of
//! **instructions** with dense ids. Control flow is explicit: an
//! [`If`](InstrKind::If) names its branch blocks, a
//! [`BlockRef`](InstrKind::BlockRef) stands for the value a nested block
//! evaluates to.
//!
//! # Architecture
//!
//! - **[`Function`]** — name, parameters, and a [`Body`]
//! - **[`Body`]** — the block list, with by-id block and instruction lookup
//! - **[`Block`]** — an ordered run of [`Instr`]s
//! - **[`Instr`]** — one [`InstrKind`] tagged with its [`InstrId`]
//!
//! Instruction ids are dense small integers assigned in allocation order by
//! [`BodyBuilder`](crate::BodyBuilder); downstream analyses rely on that
//! density for deterministic iteration.

use crate::name::Name;

// ── ID newtypes ─────────────────────────────────────────────────────

/// Instruction id within one function body.
///
/// Ids are allocated sequentially starting from 0 and are unique across
/// all blocks of the body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct InstrId(u32);

impl InstrId {
    /// Create a new instruction id from a raw index.
    #[inline]
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw `u32` value.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    /// Get the index as `usize` (for indexing into `Vec`s).
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Block id within one function body.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct BlockId(u32);

impl BlockId {
    /// Create a new block id from a raw index.
    #[inline]
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw `u32` value.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    /// Get the index as `usize` (for indexing into `Vec`s).
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

// ── Instructions ────────────────────────────────────────────────────

/// A single mid-level IR instruction.
///
/// The set is closed: downstream analyses match exhaustively, so adding a
/// variant is a type-system-level forcing function for every consumer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InstrKind {
    /// Read of a named binding or formal parameter, with zero or more
    /// trailing field indices (`p.0.1` folds into one `ValueRef`).
    ///
    /// `arg` is `true` iff `name` denotes a formal parameter of the
    /// enclosing function; otherwise `bind_id` names the producing
    /// [`Bind`](InstrKind::Bind).
    ValueRef {
        name: Name,
        arg: bool,
        bind_id: Option<InstrId>,
        indices: Vec<u32>,
    },

    /// Bind the value of `rhs` to `name`.
    Bind { name: Name, rhs: InstrId },

    /// Project field `index` out of the value of `receiver`.
    MemberAccess { receiver: InstrId, index: u32 },

    /// Call a named function. `ctor` is `true` when the callee is a record
    /// or enum-variant constructor.
    NamedFunctionCall {
        name: Name,
        args: Vec<InstrId>,
        ctor: bool,
    },

    /// Call through a first-class function value.
    DynamicFunctionCall {
        callable: InstrId,
        args: Vec<InstrId>,
    },

    /// Two-armed conditional; the instruction's value is the value of the
    /// taken branch block.
    If {
        cond: InstrId,
        true_block: BlockId,
        false_block: BlockId,
    },

    /// The value of a nested block (its last real instruction).
    BlockRef { block: BlockId },

    /// Implicit type conversion; forwards the value of `arg` unchanged.
    Converter { arg: InstrId },

    BoolLiteral { value: bool },
    IntLiteral { value: i64 },
    StringLiteral { value: Name },

    /// Placeholder left behind by earlier rewrites.
    Nop,

    /// End-of-scope marker for `name`; carries no value.
    DropVar { name: Name },
}

impl InstrKind {
    /// Short name of the variant, for diagnostics and trace output.
    pub fn kind_name(&self) -> &'static str {
        match self {
            InstrKind::ValueRef { .. } => "ValueRef",
            InstrKind::Bind { .. } => "Bind",
            InstrKind::MemberAccess { .. } => "MemberAccess",
            InstrKind::NamedFunctionCall { .. } => "NamedFunctionCall",
            InstrKind::DynamicFunctionCall { .. } => "DynamicFunctionCall",
            InstrKind::If { .. } => "If",
            InstrKind::BlockRef { .. } => "BlockRef",
            InstrKind::Converter { .. } => "Converter",
            InstrKind::BoolLiteral { .. } => "BoolLiteral",
            InstrKind::IntLiteral { .. } => "IntLiteral",
            InstrKind::StringLiteral { .. } => "StringLiteral",
            InstrKind::Nop => "Nop",
            InstrKind::DropVar { .. } => "DropVar",
        }
    }

    /// `true` for instructions that carry a value. [`Nop`](InstrKind::Nop)
    /// and [`DropVar`](InstrKind::DropVar) are bookkeeping only: a block's
    /// value is its last *real* instruction.
    pub fn is_real(&self) -> bool {
        !matches!(self, InstrKind::Nop | InstrKind::DropVar { .. })
    }
}

/// An instruction tagged with its id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instr {
    pub id: InstrId,
    pub kind: InstrKind,
}

// ── Blocks and bodies ───────────────────────────────────────────────

/// An ordered run of instructions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    pub id: BlockId,
    pub instructions: Vec<Instr>,
}

impl Block {
    /// The last instruction of the block, including bookkeeping ones.
    pub fn last(&self) -> Option<&Instr> {
        self.instructions.last()
    }

    /// The last value-carrying instruction of the block — the block's value.
    /// Skips trailing [`Nop`](InstrKind::Nop)s and drops.
    pub fn last_real(&self) -> Option<&Instr> {
        self.instructions.iter().rev().find(|i| i.kind.is_real())
    }
}

/// A function body: the block list, entry block first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Body {
    pub blocks: Vec<Block>,
}

impl Body {
    /// The entry block (the first block), if the body has one.
    pub fn entry(&self) -> Option<&Block> {
        self.blocks.first()
    }

    /// Look up a block by id.
    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    /// Look up an instruction by id, searching all blocks.
    pub fn instruction(&self, id: InstrId) -> Option<&Instr> {
        self.blocks
            .iter()
            .flat_map(|b| b.instructions.iter())
            .find(|i| i.id == id)
    }

    /// Iterate all instructions in block order.
    pub fn instructions(&self) -> impl Iterator<Item = &Instr> {
        self.blocks.iter().flat_map(|b| b.instructions.iter())
    }
}

// ── Functions and programs ──────────────────────────────────────────

/// A formal parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Param {
    pub name: Name,
}

/// A typechecked function with a lowered body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Function {
    pub name: Name,
    pub params: Vec<Param>,
    pub body: Body,
}

/// A whole program, functions in declaration order.
///
/// The order is load-bearing: analyses iterate it to produce deterministic
/// per-function results.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    pub functions: Vec<Function>,
}
