//! Pass-wide configuration.
//!
//! The analysis itself takes no runtime configuration per spec §6 — no
//! CLI, environment variables, or persisted state — but an embedding
//! decompiler working from a partially reconstructed graph may want to
//! treat a missing loop-tail successor as "leave the block unannotated"
//! rather than aborting the whole script's analysis. `strict` is the only
//! knob, matching the teacher's habit of a couple of explicit constants
//! (`HEAT_PER_BLOCK`, `JIT_THRESHOLD`) rather than a config-file layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassOptions {
    /// When `true` (the spec-mandated default), a loop tail with no
    /// following block is a [`crate::error::StructuralError`]. When
    /// `false`, the do-while/while detector silently skips that loop
    /// candidate instead of claiming it.
    pub strict: bool,
}

impl Default for PassOptions {
    fn default() -> Self {
        Self { strict: true }
    }
}
