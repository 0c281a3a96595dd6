//! Deterministic two-snapshot line merge.
//!
//! Raw texts become line sequences, the matcher aligns them, and the engine
//! synthesizes one reconciled text. All of it is pure and reentrant; callers
//! may merge independent notes concurrently with no coordination.

pub mod engine;
pub mod matcher;

pub use engine::Merger;
