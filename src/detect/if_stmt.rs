//! `if`/`if-else` detection (spec §4.7).
//!
//! Grounded on `NWScript::detectIf`. Runs last because its "undetermined"
//! test is relaxed: a block is still eligible here if the only primary
//! tag it bears is `WhileHead` — the common emission of a while loop
//! whose head block also contains the conditional test (spec scenario
//! S2, and the Open Question in spec §9 on reconciling the two records).

use tracing::{debug, trace};

use crate::block::BlockGraph;
use crate::control::{ControlStructure, ControlTag};
use crate::error::StructuralError;
use crate::graph::{has_linear_path, path_merge};

pub fn detect(graph: &mut BlockGraph) -> Result<(), StructuralError> {
    let mut recorded = 0usize;

    for cond in graph.block_ids_in_order().collect::<Vec<_>>() {
        let only_while_head = graph
            .controls(cond)
            .iter()
            .filter(|c| c.tag().is_primary())
            .all(|c| c.tag() == ControlTag::WhileHead);
        if graph.has_main_control(cond) && !only_while_head {
            continue;
        }
        let children = graph.children(cond);
        if children.len() != 2 || !graph.has_conditional_children(cond) {
            continue;
        }
        let (x, y) = (children[0], children[1]);

        let is_if_else = !has_linear_path(graph, x, y);

        let (if_true, if_else, if_next) = if is_if_else {
            let if_true = x;
            let if_else = y;
            let if_next = path_merge(graph, if_true, if_else);
            (if_true, Some(if_else), if_next)
        } else {
            let (low, high) = if graph.address(x) < graph.address(y) { (x, y) } else { (y, x) };
            (low, None, Some(high))
        };

        graph.push_control(
            cond,
            ControlStructure::If { tag: ControlTag::IfCond, cond, true_: if_true, else_: if_else, next: if_next },
        );
        graph.push_control(
            if_true,
            ControlStructure::If { tag: ControlTag::IfTrue, cond, true_: if_true, else_: if_else, next: if_next },
        );
        if let Some(e) = if_else {
            graph.push_control(
                e,
                ControlStructure::If { tag: ControlTag::IfElse, cond, true_: if_true, else_: if_else, next: if_next },
            );
        }
        if let Some(n) = if_next {
            graph.push_control(
                n,
                ControlStructure::If { tag: ControlTag::IfNext, cond, true_: if_true, else_: if_else, next: if_next },
            );
        }
        recorded += 1;
        trace!(cond = graph.address(cond), is_if_else, "if recorded");
    }

    debug!(blocks = graph.len(), ifs = recorded, "if detection complete");
    Ok(())
}
