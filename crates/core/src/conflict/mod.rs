//! Conflict-artifact detection and grouping.

pub mod detector;
pub mod scanner;

pub use detector::{classify, ConflictDescriptor};
pub use scanner::{scan, ConflictFile, NoteGroup};
