//! Block graph data model.
//!
//! Blocks form a cyclic digraph (loops produce back-edges), so they are
//! stored in a dense arena indexed by [`BlockId`] rather than linked with
//! owning references — the same shape the teacher's JIT uses for its
//! `HashMap<u32, BasicBlock>` successor graph, just with a stable handle
//! instead of a raw address key.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::control::ControlStructure;

/// Index of a [`Block`] within a [`BlockGraph`]'s arena.
pub type BlockId = usize;

/// Index of a [`Subroutine`] within a [`BlockGraph`]'s arena.
pub type SubroutineId = usize;

/// The only two opcodes this pass distinguishes; everything else is opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Opcode {
    /// Unconditional jump.
    Jmp,
    /// Subroutine return.
    Retn,
    /// Any opcode this pass does not need to distinguish.
    Other,
}

/// A single bytecode instruction, opaque except for its opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Instruction {
    pub opcode: Opcode,
}

impl Instruction {
    pub fn new(opcode: Opcode) -> Self {
        Self { opcode }
    }
}

/// How a block's outgoing edges were produced.
///
/// `has_conditional_children`/`has_unconditional_children` (spec §3) are
/// derived from this rather than re-decoded from instructions, since the
/// graph builder is the component that actually classifies JZ/JNZ vs.
/// fall-through/JMP terminators — this pass only consumes the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EdgeKind {
    /// Single successor via fall-through or JMP.
    Unconditional,
    /// Exactly two successors via a conditional jump (JZ/JNZ).
    Conditional,
}

/// A basic block: a maximal straight-line instruction run with a single
/// entry and a single exit.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Block {
    pub address: u32,
    pub instructions: Vec<Instruction>,
    pub parents: Vec<BlockId>,
    pub children: Vec<BlockId>,
    pub edge_kind: Option<EdgeKind>,
    pub subroutine: Option<SubroutineId>,
    pub controls: Vec<ControlStructure>,
}

/// A subroutine, identified by the address of its entry block.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Subroutine {
    pub address: u32,
    pub entry: BlockId,
}

/// Owns every block and subroutine for one script, addressable by handle.
///
/// Blocks are kept sorted by address for the lifetime of the graph —
/// `block_ids_in_order` and `get_next_block` both depend on that
/// invariant, and it is enforced once at construction rather than
/// re-checked on every query.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BlockGraph {
    blocks: Vec<Block>,
    subroutines: Vec<Subroutine>,
}

impl BlockGraph {
    /// Build a graph from blocks already in address-sorted order.
    ///
    /// Panics if the blocks are not strictly increasing by address — this
    /// is a contract violation by the caller (the graph builder), not a
    /// structural property of the bytecode, so it is an assertion rather
    /// than a [`crate::error::StructuralError`].
    pub fn from_sorted_blocks(blocks: Vec<Block>, subroutines: Vec<Subroutine>) -> Self {
        for window in blocks.windows(2) {
            debug_assert!(
                window[0].address < window[1].address,
                "blocks must be strictly increasing by address"
            );
        }
        Self { blocks, subroutines }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Block ids in address-sorted order — the iteration order the spec
    /// mandates for every detector.
    pub fn block_ids_in_order(&self) -> impl Iterator<Item = BlockId> + '_ {
        0..self.blocks.len()
    }

    pub fn block(&self, id: BlockId) -> &Block {
        &self.blocks[id]
    }

    fn block_mut(&mut self, id: BlockId) -> &mut Block {
        &mut self.blocks[id]
    }

    pub fn address(&self, id: BlockId) -> u32 {
        self.blocks[id].address
    }

    pub fn instructions(&self, id: BlockId) -> &[Instruction] {
        &self.blocks[id].instructions
    }

    pub fn parents(&self, id: BlockId) -> &[BlockId] {
        &self.blocks[id].parents
    }

    pub fn children(&self, id: BlockId) -> &[BlockId] {
        &self.blocks[id].children
    }

    pub fn has_conditional_children(&self, id: BlockId) -> bool {
        let block = &self.blocks[id];
        block.children.len() == 2 && block.edge_kind == Some(EdgeKind::Conditional)
    }

    pub fn has_unconditional_children(&self, id: BlockId) -> bool {
        let block = &self.blocks[id];
        block.children.len() == 1 && block.edge_kind == Some(EdgeKind::Unconditional)
    }

    pub fn subroutine_of(&self, id: BlockId) -> Option<SubroutineId> {
        self.blocks[id].subroutine
    }

    pub fn subroutine(&self, id: SubroutineId) -> &Subroutine {
        &self.subroutines[id]
    }

    /// The address-adjacent block after `id` in the block collection —
    /// not a graph edge. Mirrors `getNextBlock(collection, b)` from the
    /// inbound interface (spec §6).
    pub fn get_next_block(&self, id: BlockId) -> Option<BlockId> {
        let next = id + 1;
        (next < self.blocks.len()).then_some(next)
    }

    /// Parents whose address is greater than `id`'s — back-edge sources.
    pub fn later_parents(&self, id: BlockId) -> Vec<BlockId> {
        let address = self.address(id);
        self.blocks[id]
            .parents
            .iter()
            .copied()
            .filter(|&p| self.address(p) > address)
            .collect()
    }

    pub fn controls(&self, id: BlockId) -> &[ControlStructure] {
        &self.blocks[id].controls
    }

    pub fn push_control(&mut self, id: BlockId, control: ControlStructure) {
        self.block_mut(id).controls.push(control);
    }

    pub fn contains_retn(&self, id: BlockId) -> bool {
        self.instructions(id)
            .iter()
            .any(|i| i.opcode == Opcode::Retn)
    }

    pub fn is_singular_block(&self, id: BlockId) -> bool {
        self.instructions(id).len() == 1
    }
}

/// Builder for hand-constructed graphs — mirrors the ergonomics of the
/// teacher's `discover_basic_blocks`, but yields stable [`BlockId`]s that
/// match push order instead of reconstructing blocks from a `HashMap`.
///
/// Blocks must be pushed in increasing address order, matching the
/// invariant `BlockGraph` itself enforces.
#[derive(Debug, Default)]
pub struct BlockGraphBuilder {
    blocks: Vec<Block>,
    subroutines: Vec<Subroutine>,
}

impl BlockGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block(&mut self, address: u32, instructions: Vec<Instruction>) -> BlockId {
        if let Some(last) = self.blocks.last() {
            assert!(
                address > last.address,
                "blocks must be pushed in increasing address order"
            );
        }
        self.blocks.push(Block {
            address,
            instructions,
            parents: Vec::new(),
            children: Vec::new(),
            edge_kind: None,
            subroutine: None,
            controls: Vec::new(),
        });
        self.blocks.len() - 1
    }

    pub fn subroutine(&mut self, entry: BlockId) -> SubroutineId {
        let address = self.blocks[entry].address;
        self.subroutines.push(Subroutine { address, entry });
        let id = self.subroutines.len() - 1;
        self.blocks[entry].subroutine = Some(id);
        id
    }

    pub fn assign_subroutine(&mut self, block: BlockId, subroutine: SubroutineId) {
        self.blocks[block].subroutine = Some(subroutine);
    }

    pub fn unconditional_edge(&mut self, from: BlockId, to: BlockId) {
        assert!(
            self.blocks[from].children.is_empty(),
            "block already has outgoing edges"
        );
        self.blocks[from].children.push(to);
        self.blocks[from].edge_kind = Some(EdgeKind::Unconditional);
        self.blocks[to].parents.push(from);
    }

    pub fn conditional_edges(&mut self, from: BlockId, if_true: BlockId, if_false: BlockId) {
        assert!(
            self.blocks[from].children.is_empty(),
            "block already has outgoing edges"
        );
        self.blocks[from].children.push(if_true);
        self.blocks[from].children.push(if_false);
        self.blocks[from].edge_kind = Some(EdgeKind::Conditional);
        self.blocks[if_true].parents.push(from);
        self.blocks[if_false].parents.push(from);
    }

    pub fn build(self) -> BlockGraph {
        BlockGraph::from_sorted_blocks(self.blocks, self.subroutines)
    }
}
