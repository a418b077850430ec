//! Fatal errors the pass can raise.
//!
//! These cover violations of an invariant the NWScript compiler is
//! expected to uphold (spec §7) — a structural defect in the bytecode's
//! shape, not a bug in this crate. Contract violations by the graph
//! builder itself (a block with conditional children but not exactly two
//! successors) are `assert!`/`debug_assert!` failures elsewhere in the
//! crate, not variants here.

/// A structural defect in the block graph that prevents the pass from
/// completing the analysis of the containing script.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructuralError {
    /// A loop tail block has no address-adjacent following block.
    #[error(
        "block at address {tail_address:#x} ends a loop but is the last block in the script"
    )]
    MissingLoopTailSuccessor { tail_address: u32 },

    /// An if-conditional resolved fewer than two branches.
    #[error("conditional block at address {cond_address:#x} has fewer than two resolvable branches")]
    UnresolvedIfBranch { cond_address: u32 },
}
