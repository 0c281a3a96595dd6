//! Notefold core library.
//!
//! Reconciles plain-text notes edited independently on multiple devices
//! whose sync layer leaves side-by-side conflict copies instead of merging:
//! a deterministic two-snapshot line merge, a conflict-artifact filename
//! detector, and a coordinator that folds the duplicates back into the
//! canonical note and removes them.

pub mod config;
pub mod conflict;
pub mod errors;
pub mod merge;
pub mod models;
pub mod reconciler;
pub mod store;

// Re-exports for convenience.
pub use config::AppConfig;
pub use conflict::{classify, ConflictDescriptor, NoteGroup};
pub use merge::Merger;
pub use reconciler::Reconciler;
pub use store::{FileStore, LocalStore};
