//! `continue` detection (spec §4.5).
//!
//! Identical to break detection except the lone jump targets a loop's
//! tail instead of its next — grounded on `NWScript::detectContinue`.

use tracing::{debug, trace};

use crate::block::BlockGraph;
use crate::control::ControlStructure;
use crate::graph::is_lone_jump;

pub fn detect(graph: &mut BlockGraph) {
    let mut recorded = 0usize;

    for b in graph.block_ids_in_order().collect::<Vec<_>>() {
        if graph.has_main_control(b) || !is_lone_jump(graph, b) {
            continue;
        }
        let children = graph.children(b);
        if children.len() != 1 {
            continue;
        }
        let child = children[0];
        if !graph.is_loop_tail(child) {
            continue;
        }
        let (head, tail, next) = match graph.get_loop(child) {
            Some(triple) => triple,
            None => continue,
        };

        graph.push_control(b, ControlStructure::Continue { head, tail, next });
        recorded += 1;
        trace!(block = graph.address(b), "continue recorded");
    }

    debug!(blocks = graph.len(), continues = recorded, "continue detection complete");
}
