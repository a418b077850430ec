//! Do-while loop detection (spec §4.2).
//!
//! Grounded on `NWScript::detectDoWhile` in
//! `original_source/src/nwscript/controlflow.cpp`: a do-while loop's tail
//! is the latest later-parent of the head that is both a lone jump and
//! still undetermined.

use tracing::{debug, trace};

use crate::block::BlockGraph;
use crate::control::{ControlStructure, ControlTag};
use crate::error::StructuralError;
use crate::graph::{is_lone_jump, latest};
use crate::options::PassOptions;

pub fn detect(graph: &mut BlockGraph, options: &PassOptions) -> Result<(), StructuralError> {
    let mut recorded = 0usize;

    for head in graph.block_ids_in_order().collect::<Vec<_>>() {
        let mut candidates = graph.later_parents(head);
        candidates.retain(|&p| is_lone_jump(graph, p));

        let tail = match latest(graph, &candidates) {
            Some(t) => t,
            None => continue,
        };
        if graph.has_main_control(tail) {
            continue;
        }

        let next = match graph.get_next_block(tail) {
            Some(n) => n,
            None if options.strict => {
                return Err(StructuralError::MissingLoopTailSuccessor {
                    tail_address: graph.address(tail),
                })
            }
            None => continue,
        };

        graph.push_control(
            head,
            ControlStructure::Loop { tag: ControlTag::DoWhileHead, head, tail, next },
        );
        graph.push_control(
            tail,
            ControlStructure::Loop { tag: ControlTag::DoWhileTail, head, tail, next },
        );
        graph.push_control(
            next,
            ControlStructure::Loop { tag: ControlTag::DoWhileNext, head, tail, next },
        );
        recorded += 1;
        trace!(head = graph.address(head), tail = graph.address(tail), next = graph.address(next), "do-while loop recorded");
    }

    debug!(blocks = graph.len(), loops = recorded, "do-while detection complete");
    Ok(())
}
