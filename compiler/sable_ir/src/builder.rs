//! Body builder — assigns dense instruction ids.
//!
//! Follows the "position at a block, emit instructions" pattern: the builder
//! owns the in-progress block list, [`add`](BodyBuilder::add) appends to the
//! current block, and [`finish`](BodyBuilder::finish) produces the final
//! [`Body`]. Instruction ids are allocated sequentially across the whole
//! body, never per block, so they are dense and unique function-wide.

use crate::ir::{Block, BlockId, Body, Instr, InstrId, InstrKind};

/// Builder for an in-progress function body.
#[derive(Debug)]
pub struct BodyBuilder {
    blocks: Vec<Block>,
    current: BlockId,
    next_instr: u32,
}

impl BodyBuilder {
    /// Create a builder with an entry block already allocated and current.
    pub fn new() -> Self {
        let entry = Block {
            id: BlockId::new(0),
            instructions: Vec::new(),
        };
        BodyBuilder {
            blocks: vec![entry],
            current: BlockId::new(0),
            next_instr: 0,
        }
    }

    /// Allocate a new empty block. Does not change the current block.
    pub fn new_block(&mut self) -> BlockId {
        #[expect(clippy::cast_possible_truncation, reason = "block counts fit in u32")]
        let id = BlockId::new(self.blocks.len() as u32);
        self.blocks.push(Block {
            id,
            instructions: Vec::new(),
        });
        id
    }

    /// Make `block` the target of subsequent [`add`](BodyBuilder::add) calls.
    pub fn switch_to(&mut self, block: BlockId) {
        debug_assert!(block.index() < self.blocks.len(), "unknown block {block:?}");
        self.current = block;
    }

    /// The block instructions are currently appended to.
    pub fn current_block(&self) -> BlockId {
        self.current
    }

    /// Append an instruction to the current block, assigning the next id.
    pub fn add(&mut self, kind: InstrKind) -> InstrId {
        let id = InstrId::new(self.next_instr);
        self.next_instr += 1;
        self.blocks[self.current.index()]
            .instructions
            .push(Instr { id, kind });
        id
    }

    /// Finish building and hand over the body.
    pub fn finish(self) -> Body {
        Body {
            blocks: self.blocks,
        }
    }
}

impl Default for BodyBuilder {
    fn default() -> Self {
        Self::new()
    }
}
