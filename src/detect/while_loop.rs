//! While loop detection (spec §4.3).
//!
//! Identical to do-while detection except the tail is not restricted to a
//! lone jump — a while tail contains the loop's condition and back-jump,
//! so any later parent can be the tail. Because a do-while tail is
//! already under main control by the time this runs, detector ordering
//! alone keeps the two families disjoint (invariant 1, spec §3).

use tracing::{debug, trace};

use crate::block::BlockGraph;
use crate::control::{ControlStructure, ControlTag};
use crate::error::StructuralError;
use crate::graph::latest;
use crate::options::PassOptions;

pub fn detect(graph: &mut BlockGraph, options: &PassOptions) -> Result<(), StructuralError> {
    let mut recorded = 0usize;

    for head in graph.block_ids_in_order().collect::<Vec<_>>() {
        let candidates = graph.later_parents(head);

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
            ControlStructure::Loop { tag: ControlTag::WhileHead, head, tail, next },
        );
        graph.push_control(
            tail,
            ControlStructure::Loop { tag: ControlTag::WhileTail, head, tail, next },
        );
        graph.push_control(
            next,
            ControlStructure::Loop { tag: ControlTag::WhileNext, head, tail, next },
        );
        recorded += 1;
        trace!(head = graph.address(head), tail = graph.address(tail), next = graph.address(next), "while loop recorded");
    }

    debug!(blocks = graph.len(), loops = recorded, "while detection complete");
    Ok(())
}
