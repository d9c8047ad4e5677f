//! Intermediate representation types for the Sable compiler.
//!
//! This crate provides:
//!
//! - **Interned names** ([`Name`], [`Interner`]) — compact 32-bit ids for
//!   binding and function names.
//! - **The mid-level IR** ([`Function`], [`Body`], [`Block`], [`Instr`],
//!   [`InstrKind`]) — the block-structured representation that ownership
//!   inference and the transpiler backend consume.
//! - **A body builder** ([`BodyBuilder`]) — emits instructions with dense,
//!   function-wide ids.
//!
//! The IR is produced from the typed syntax tree by the lowering pass and is
//! immutable from the analyses' point of view: every pass reads it and
//! publishes results on the side.

pub mod builder;
pub mod ir;
pub mod name;

pub use builder::BodyBuilder;
pub use ir::{Block, BlockId, Body, Function, Instr, InstrId, InstrKind, Param, Program};
pub use name::{Interner, Name};
