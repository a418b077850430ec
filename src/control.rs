//! Control-structure membership records and the queries over them.
//!
//! A tagged record over a small closed set of variants is preferable here
//! to a subclass hierarchy (§9 Design Notes): exhaustive matching on the
//! tag, rather than dynamic dispatch, is how the rest of this crate reads
//! a block's memberships.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::block::{BlockGraph, BlockId};

/// Discriminant for every kind of control-structure membership a block
/// can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ControlTag {
    DoWhileHead,
    DoWhileTail,
    DoWhileNext,
    WhileHead,
    WhileTail,
    WhileNext,
    IfCond,
    IfTrue,
    IfElse,
    IfNext,
    Break,
    Continue,
    Return,
}

impl ControlTag {
    /// Primary tags put a block under "main control" and block further
    /// detection on it (invariant 2, spec §3); `Break`/`Continue`/`Return`
    /// are secondary and leave the block undetermined.
    pub fn is_primary(self) -> bool {
        !matches!(self, ControlTag::Break | ControlTag::Continue | ControlTag::Return)
    }
}

/// A control-structure membership record, append-only once attached to a
/// block's `controls` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ControlStructure {
    /// A do-while or while loop anchor. `tag` is restricted to the
    /// `DoWhile*`/`While*` family.
    Loop {
        tag: ControlTag,
        head: BlockId,
        tail: BlockId,
        next: BlockId,
    },
    /// An if or if-else anchor. `tag` is restricted to the `If*` family.
    /// `else_` is absent for if-only; `next` is absent only when no merge
    /// point could be found for an if-else.
    If {
        tag: ControlTag,
        cond: BlockId,
        true_: BlockId,
        else_: Option<BlockId>,
        next: Option<BlockId>,
    },
    Break {
        head: BlockId,
        tail: BlockId,
        next: BlockId,
    },
    Continue {
        head: BlockId,
        tail: BlockId,
        next: BlockId,
    },
    Return { block: BlockId },
}

impl ControlStructure {
    pub fn tag(&self) -> ControlTag {
        match self {
            ControlStructure::Loop { tag, .. } => *tag,
            ControlStructure::If { tag, .. } => *tag,
            ControlStructure::Break { .. } => ControlTag::Break,
            ControlStructure::Continue { .. } => ControlTag::Continue,
            ControlStructure::Return { .. } => ControlTag::Return,
        }
    }

    /// The loop anchor triple, if this record carries one.
    pub fn loop_anchors(&self) -> Option<(BlockId, BlockId, BlockId)> {
        match *self {
            ControlStructure::Loop { head, tail, next, .. } => Some((head, tail, next)),
            ControlStructure::Break { head, tail, next } => Some((head, tail, next)),
            ControlStructure::Continue { head, tail, next } => Some((head, tail, next)),
            _ => None,
        }
    }
}

impl BlockGraph {
    /// A block has main control iff any of its records is a primary tag
    /// (loop Head/Tail/Next or If Cond/True/Else/Next).
    pub fn has_main_control(&self, id: BlockId) -> bool {
        self.controls(id).iter().any(|c| c.tag().is_primary())
    }

    pub fn is_control(&self, id: BlockId, tag: ControlTag) -> bool {
        self.controls(id).iter().any(|c| c.tag() == tag)
    }

    /// True iff `id` bears a loop's `Next` tag (either family).
    pub fn is_loop_next(&self, id: BlockId) -> bool {
        self.is_control(id, ControlTag::DoWhileNext) || self.is_control(id, ControlTag::WhileNext)
    }

    /// True iff `id` bears a loop's `Tail` tag (either family).
    pub fn is_loop_tail(&self, id: BlockId) -> bool {
        self.is_control(id, ControlTag::DoWhileTail) || self.is_control(id, ControlTag::WhileTail)
    }

    /// Resolve the (head, tail, next) triple of the loop `id` is a member
    /// of, if any. Invariant 1 (spec §3) guarantees at most one loop
    /// claims a given block as head or tail, so the first match suffices.
    pub fn get_loop(&self, id: BlockId) -> Option<(BlockId, BlockId, BlockId)> {
        self.controls(id).iter().find_map(|c| match c {
            ControlStructure::Loop { head, tail, next, .. } => Some((*head, *tail, *next)),
            _ => None,
        })
    }
}
