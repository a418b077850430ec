//! Property checks for the quantified invariants in spec §8: determinism
//! (running the pass twice on identical input yields identical results)
//! and idempotence (running the pass again on its own output adds
//! nothing new).
//!
//! Random graphs are built by chaining a handful of known-well-formed
//! shapes (do-while, while, if-else, if-only) end to end rather than
//! generating arbitrary edges — an arbitrary block graph is overwhelmingly
//! likely to violate a compiler-upheld precondition (e.g. a loop tail with
//! no following block) before it says anything interesting about the
//! pass's determinism.

use nwscript_controlflow::analyze_control_flow;
use nwscript_controlflow::block::{BlockGraphBuilder, BlockId, Instruction, Opcode};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum ScenarioKind {
    DoWhile,
    While,
    IfElse,
    IfOnly,
}

fn scenario_kind() -> impl Strategy<Value = ScenarioKind> {
    prop_oneof![
        Just(ScenarioKind::DoWhile),
        Just(ScenarioKind::While),
        Just(ScenarioKind::IfElse),
        Just(ScenarioKind::IfOnly),
    ]
}

fn other() -> Vec<Instruction> {
    vec![Instruction::new(Opcode::Other)]
}

fn jmp() -> Vec<Instruction> {
    vec![Instruction::new(Opcode::Jmp)]
}

fn append_scenario(
    b: &mut BlockGraphBuilder,
    start: u32,
    incoming: Option<BlockId>,
    kind: ScenarioKind,
) -> (BlockId, u32) {
    match kind {
        ScenarioKind::DoWhile => {
            let head = b.block(start, other());
            let tail = b.block(start + 10, jmp());
            let next = b.block(start + 20, other());
            if let Some(i) = incoming {
                b.unconditional_edge(i, head);
            }
            b.conditional_edges(head, tail, next);
            b.unconditional_edge(tail, head);
            (next, start + 30)
        }
        ScenarioKind::While => {
            let head = b.block(start, other());
            let body = b.block(start + 10, other());
            let next = b.block(start + 20, other());
            if let Some(i) = incoming {
                b.unconditional_edge(i, head);
            }
            b.conditional_edges(head, body, next);
            b.unconditional_edge(body, head);
            (next, start + 30)
        }
        ScenarioKind::IfElse => {
            let cond = b.block(start, other());
            let t = b.block(start + 10, other());
            let e = b.block(start + 20, other());
            let merge = b.block(start + 30, other());
            if let Some(i) = incoming {
                b.unconditional_edge(i, cond);
            }
            b.conditional_edges(cond, t, e);
            b.unconditional_edge(t, merge);
            b.unconditional_edge(e, merge);
            (merge, start + 40)
        }
        ScenarioKind::IfOnly => {
            let cond = b.block(start, other());
            let body = b.block(start + 10, other());
            let after = b.block(start + 20, other());
            if let Some(i) = incoming {
                b.unconditional_edge(i, cond);
            }
            b.conditional_edges(cond, body, after);
            b.unconditional_edge(body, after);
            (after, start + 30)
        }
    }
}

fn build_chain(kinds: &[ScenarioKind]) -> nwscript_controlflow::block::BlockGraph {
    let mut b = BlockGraphBuilder::new();
    let mut address = 0u32;
    let mut incoming = None;
    for &kind in kinds {
        let (end, next_address) = append_scenario(&mut b, address, incoming, kind);
        incoming = Some(end);
        address = next_address;
    }
    let exit = b.block(address, vec![Instruction::new(Opcode::Retn)]);
    if let Some(i) = incoming {
        b.unconditional_edge(i, exit);
    }
    b.build()
}

fn all_controls(graph: &nwscript_controlflow::block::BlockGraph) -> Vec<Vec<nwscript_controlflow::control::ControlStructure>> {
    graph
        .block_ids_in_order()
        .map(|id| graph.controls(id).to_vec())
        .collect()
}

proptest! {
    #[test]
    fn determinism(kinds in prop::collection::vec(scenario_kind(), 1..=4)) {
        let graph_a = build_chain(&kinds);
        let mut graph_b = graph_a.clone();
        let mut graph_a = graph_a;

        analyze_control_flow(&mut graph_a).unwrap();
        analyze_control_flow(&mut graph_b).unwrap();

        prop_assert_eq!(all_controls(&graph_a), all_controls(&graph_b));
    }

    #[test]
    fn idempotence(kinds in prop::collection::vec(scenario_kind(), 1..=4)) {
        let mut graph = build_chain(&kinds);
        analyze_control_flow(&mut graph).unwrap();
        let first_pass = all_controls(&graph);

        // Running detection again over already-annotated blocks must add
        // nothing: every detector's "undetermined" check already skips
        // claimed blocks.
        analyze_control_flow(&mut graph).unwrap();
        let second_pass = all_controls(&graph);

        prop_assert_eq!(first_pass, second_pass);
    }

    #[test]
    fn loop_anchor_triple_is_well_formed(kinds in prop::collection::vec(scenario_kind(), 1..=4)) {
        let mut graph = build_chain(&kinds);
        analyze_control_flow(&mut graph).unwrap();

        for id in graph.block_ids_in_order() {
            for control in graph.controls(id) {
                if let Some((head, tail, next)) = control.loop_anchors() {
                    prop_assert!(graph.address(head) < graph.address(tail));
                    prop_assert_eq!(graph.get_next_block(tail), Some(next));
                }
            }
        }
    }
}
