//! Detector driver.
//!
//! Ordering is total and fixed (spec §2, §5): do-while, while, break,
//! continue, return, if. Each detector is a plain function over the
//! mutable graph rather than a method on a pass object — the six
//! detectors share only the graph, and this module is the one place the
//! order is encoded.

mod break_stmt;
mod continue_stmt;
mod do_while;
mod if_stmt;
mod return_stmt;
mod while_loop;

use tracing::instrument;

use crate::block::BlockGraph;
use crate::error::StructuralError;
use crate::options::PassOptions;

/// Run every detector over `graph` in spec-mandated order, using the
/// default (strict) [`PassOptions`].
pub fn analyze_control_flow(graph: &mut BlockGraph) -> Result<(), StructuralError> {
    analyze_control_flow_with_options(graph, &PassOptions::default())
}

/// Run every detector over `graph` in spec-mandated order.
#[instrument(skip(graph, options), fields(blocks = graph.len()))]
pub fn analyze_control_flow_with_options(
    graph: &mut BlockGraph,
    options: &PassOptions,
) -> Result<(), StructuralError> {
    do_while::detect(graph, options)?;
    while_loop::detect(graph, options)?;
    break_stmt::detect(graph);
    continue_stmt::detect(graph);
    return_stmt::detect(graph);
    if_stmt::detect(graph)?;
    Ok(())
}
