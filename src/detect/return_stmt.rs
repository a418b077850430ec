//! `return` detection (spec §4.6).
//!
//! Grounded on `NWScript::detectReturn`. A single-instruction RETN block
//! reached by several unconditional paths is a shared return the
//! compiler emits for multiple source-level `return` statements; the
//! record is attached to each unclaimed unconditional parent instead of
//! the shared block itself (invariant 4, spec §3).

use tracing::{debug, trace};

use crate::block::BlockGraph;
use crate::control::ControlStructure;

pub fn detect(graph: &mut BlockGraph) {
    let mut recorded = 0usize;

    for b in graph.block_ids_in_order().collect::<Vec<_>>() {
        if graph.has_main_control(b) || !graph.contains_retn(b) {
            continue;
        }
        let subroutine = match graph.subroutine_of(b) {
            Some(s) => s,
            None => continue,
        };
        if graph.subroutine(subroutine).address == graph.address(b) {
            continue;
        }

        let mut has_return_parent = false;

        if graph.is_singular_block(b) {
            for parent in graph.parents(b).to_vec() {
                if graph.has_unconditional_children(parent) && !graph.has_main_control(parent) {
                    has_return_parent = true;
                    graph.push_control(parent, ControlStructure::Return { block: b });
                    recorded += 1;
                    trace!(
                        shared_return = graph.address(b),
                        parent = graph.address(parent),
                        "return propagated to unconditional parent"
                    );
                }
            }
        }

        if !has_return_parent {
            graph.push_control(b, ControlStructure::Return { block: b });
            recorded += 1;
            trace!(block = graph.address(b), "return recorded directly");
        }
    }

    debug!(blocks = graph.len(), returns = recorded, "return detection complete");
}
