//! Control-flow recovery pass for NWScript (Aurora-engine) bytecode.
//!
//! Consumes a fully constructed control-flow graph of basic blocks and
//! annotates every block with the high-level constructs it participates
//! in: do-while loops, while loops, if/if-else conditionals, and the
//! `break`, `continue`, and `return` statements that transfer control
//! between them. Downstream emission of a textual decompilation from
//! those annotations, bytecode parsing, basic-block construction, and
//! subroutine discovery are all out of scope — this crate assumes it is
//! handed a valid block graph and opcode classification.
//!
//! This is not a general decompiler: it recovers only the patterns the
//! NWScript compiler is known to emit, and does not recognize `switch`,
//! `for`, short-circuit boolean operators, or irreducible flow.
//!
//! ```
//! use nwscript_controlflow::block::{BlockGraphBuilder, Instruction, Opcode};
//! use nwscript_controlflow::control::ControlTag;
//! use nwscript_controlflow::analyze_control_flow;
//!
//! let mut builder = BlockGraphBuilder::new();
//! let entry = builder.block(0, vec![Instruction::new(Opcode::Other)]);
//! let head = builder.block(10, vec![Instruction::new(Opcode::Other)]);
//! let tail = builder.block(20, vec![Instruction::new(Opcode::Jmp)]);
//! let next = builder.block(30, vec![Instruction::new(Opcode::Retn)]);
//! builder.unconditional_edge(entry, head);
//! builder.conditional_edges(head, tail, next);
//! builder.unconditional_edge(tail, head);
//! let mut graph = builder.build();
//!
//! analyze_control_flow(&mut graph).unwrap();
//! assert!(graph.is_control(head, ControlTag::DoWhileHead));
//! ```

pub mod block;
pub mod control;
mod detect;
pub mod error;
pub mod graph;
pub mod options;

pub use detect::{analyze_control_flow, analyze_control_flow_with_options};
pub use error::StructuralError;
pub use options::PassOptions;
