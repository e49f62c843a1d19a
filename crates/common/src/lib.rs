//! Shared types for worldconv: cell states, display glyphs, packing layout.
//!
//! # Invariants
//! - A cell occupies a 2-bit slot; 16 slots fill one 32-bit word.
//! - Writers store `0b10` for a live cell. Readers treat any non-zero slot as live.

pub mod types;

pub use types::{BITS_PER_CELL, CELLS_PER_WORD, Cell, Defaults, Glyphs, ON_SLOT, SLOT_MASK};
