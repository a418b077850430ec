//! `break` detection (spec §4.4).
//!
//! A break is a lone jump straight to the block following a loop —
//! grounded on `NWScript::detectBreak`.

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
        if !graph.is_loop_next(child) {
            continue;
        }
        let (head, tail, next) = match graph.get_loop(child) {
            Some(triple) => triple,
            None => continue,
        };

        graph.push_control(b, ControlStructure::Break { head, tail, next });
        recorded += 1;
        trace!(block = graph.address(b), "break recorded");
    }

    debug!(blocks = graph.len(), breaks = recorded, "break detection complete");
}
