//! Block-graph query helpers shared by every detector.
//!
//! Grounded directly on `NWScript::isSingularBlock`/`isLoneJump`/
//! `findPathMerge` from `original_source/src/nwscript/controlflow.cpp`:
//! free functions over the graph rather than methods on a block, same
//! shape as the teacher's own `jit/v2/cfg.rs` (`build_cfg`, `find_sccs`
//! are free functions over a `CfgGraph`, not methods on `BasicBlock`).

use std::collections::HashSet;

use crate::block::{BlockGraph, BlockId, Opcode};

/// A single-instruction JMP block whose existence is forced by an
/// incoming conditional edge (spec §4.1). A JMP that is merely a
/// straight-line thunk with only unconditional parents does not qualify.
pub fn is_lone_jump(graph: &BlockGraph, id: BlockId) -> bool {
    let is_single_jmp = graph.instructions(id).len() == 1
        && graph.instructions(id)[0].opcode == Opcode::Jmp;
    if !is_single_jmp {
        return false;
    }
    graph
        .parents(id)
        .iter()
        .any(|&p| graph.has_conditional_children(p))
}

/// Reachability from `from` to `to` following only unconditional
/// successor edges. A block is always linearly reachable from itself.
pub fn has_linear_path(graph: &BlockGraph, from: BlockId, to: BlockId) -> bool {
    let mut current = from;
    let mut visited = HashSet::new();
    loop {
        if current == to {
            return true;
        }
        if !visited.insert(current) {
            return false;
        }
        if !graph.has_unconditional_children(current) {
            return false;
        }
        current = graph.children(current)[0];
    }
}

/// The block with the numerically smallest address, or `None` if `blocks`
/// is empty. Addresses are unique, so ties cannot occur.
pub fn earliest(graph: &BlockGraph, blocks: &[BlockId]) -> Option<BlockId> {
    blocks.iter().copied().min_by_key(|&b| graph.address(b))
}

/// The block with the numerically largest address, or `None` if `blocks`
/// is empty.
pub fn latest(graph: &BlockGraph, blocks: &[BlockId]) -> Option<BlockId> {
    blocks.iter().copied().max_by_key(|&b| graph.address(b))
}

/// Find where the control flow from `b1` and `b2` reconverges (spec
/// §4.1's "path merge"). Normalizes so the search always walks the
/// subtree of the later block while testing linear reachability from the
/// earlier one, matching `findPathMerge`'s tie-break: when addresses are
/// equal, `b2`'s subtree is walked.
///
/// Unlike the original recursive walk, this memoizes by block id (spec
/// §9's open question) — a graph with shared successors would otherwise
/// revisit the same node once per incoming path, which is exponential in
/// the depth of the shared region.
pub fn path_merge(graph: &BlockGraph, b1: BlockId, b2: BlockId) -> Option<BlockId> {
    let (anchor, start) = if graph.address(b1) < graph.address(b2) {
        (b1, b2)
    } else {
        (b2, b1)
    };

    let mut merges = Vec::new();
    let mut visited = HashSet::new();
    collect_merges(graph, anchor, start, &mut visited, &mut merges);
    earliest(graph, &merges)
}

fn collect_merges(
    graph: &BlockGraph,
    anchor: BlockId,
    node: BlockId,
    visited: &mut HashSet<BlockId>,
    merges: &mut Vec<BlockId>,
) {
    if graph.address(anchor) > graph.address(node) {
        return;
    }
    if !visited.insert(node) {
        return;
    }
    if has_linear_path(graph, anchor, node) {
        merges.push(node);
        return;
    }
    for &child in graph.children(node) {
        collect_merges(graph, anchor, child, visited, merges);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{BlockGraphBuilder, Instruction, Opcode};

    fn jmp() -> Vec<Instruction> {
        vec![Instruction::new(Opcode::Jmp)]
    }

    fn retn() -> Vec<Instruction> {
        vec![Instruction::new(Opcode::Retn)]
    }

    fn other() -> Vec<Instruction> {
        vec![Instruction::new(Opcode::Other)]
    }

    #[test]
    fn lone_jump_requires_conditional_parent() {
        let mut b = BlockGraphBuilder::new();
        let head = b.block(0, other());
        let tail = b.block(10, jmp());
        let exit = b.block(20, retn());
        b.conditional_edges(head, tail, exit);
        b.unconditional_edge(tail, head);
        let g = b.build();

        assert!(is_lone_jump(&g, tail));
        assert!(!is_lone_jump(&g, head));
    }

    #[test]
    fn lone_jump_false_for_unconditional_only_parent() {
        let mut b = BlockGraphBuilder::new();
        let a = b.block(0, other());
        let thunk = b.block(10, jmp());
        let c = b.block(20, other());
        b.unconditional_edge(a, thunk);
        b.unconditional_edge(thunk, c);
        let g = b.build();

        assert!(!is_lone_jump(&g, thunk));
    }

    #[test]
    fn linear_path_is_reflexive() {
        let mut b = BlockGraphBuilder::new();
        let a = b.block(0, other());
        let g = b.build();
        assert!(has_linear_path(&g, a, a));
    }

    #[test]
    fn linear_path_stops_at_conditional() {
        let mut b = BlockGraphBuilder::new();
        let a = b.block(0, other());
        let t = b.block(10, other());
        let f = b.block(20, other());
        b.conditional_edges(a, t, f);
        let g = b.build();

        assert!(!has_linear_path(&g, a, t));
        assert!(!has_linear_path(&g, a, f));
    }

    #[test]
    fn path_merge_finds_convergence() {
        let mut b = BlockGraphBuilder::new();
        let cond = b.block(0, other());
        let left = b.block(10, other());
        let right = b.block(20, other());
        let merge = b.block(30, retn());
        b.conditional_edges(cond, left, right);
        b.unconditional_edge(left, merge);
        b.unconditional_edge(right, merge);
        let g = b.build();

        assert_eq!(path_merge(&g, left, right), Some(merge));
    }

    #[test]
    fn path_merge_absent_when_no_convergence() {
        let mut b = BlockGraphBuilder::new();
        let cond = b.block(0, other());
        let left = b.block(10, retn());
        let right = b.block(20, retn());
        b.conditional_edges(cond, left, right);
        let g = b.build();

        assert_eq!(path_merge(&g, left, right), None);
    }

    #[test]
    fn earliest_and_latest_pick_by_address() {
        let mut b = BlockGraphBuilder::new();
        let a = b.block(0, other());
        let c = b.block(20, other());
        let k = b.block(10, other());
        let g = b.build();

        assert_eq!(earliest(&g, &[c, a, k]), Some(a));
        assert_eq!(latest(&g, &[c, a, k]), Some(c));
        assert_eq!(earliest(&g, &[]), None);
    }
}
