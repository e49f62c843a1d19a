//! Persistence: the text and binary world codecs plus file-level load/save.
//!
//! # Invariants
//! - Parsers are single-shot: a structural error aborts the whole parse.
//! - Binary round-trips are exact. Text round-trips keep the visible grid only.

pub mod binary;
pub mod store;
pub mod text;

pub use binary::InvalidFormatError;
pub use store::{StoreError, WorldFormat, convert, load, load_defaults, load_detected, save};
pub use text::FormatError;
