//! Developer Tooling: read-only inspection of parsed worlds.

pub mod inspector;

pub use inspector::{WorldInspector, WorldSummary};
