//! World Kernel: the in-memory world handed from one codec to the other.
//!
//! # Invariants
//! - A world is never mutated after construction.
//! - Cell reads stop at `width * height` cells or at the end of the stored
//!   words, whichever comes first.

pub mod world;

pub use world::{World, set_slot, slot_of};
