//! Packed binary format (`.wor`).
//!
//! ```text
//! offset  size  field
//! 0       2     magic, 0xF0DE
//! 2       4     width
//! 6       4     height
//! 10      4     generation
//! 14      2     state
//! 16      4*N   packed cell words
//! ```
//!
//! All integers are big-endian. The body has no length prefix; it runs to the
//! end of the buffer.

use tracing::{debug, warn};
use worldconv_common::Defaults;
use worldconv_kernel::World;

/// Identifies a binary world.
pub const MAGIC: u16 = 0xF0DE;

/// Size of the fixed header in bytes.
pub const HEADER_LEN: usize = 16;

const WORD_LEN: usize = 4;

/// Errors from parsing the binary format.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InvalidFormatError {
    #[error("bad magic number {found:#06x}, expected {:#06x}", MAGIC)]
    BadMagic { found: u16 },
    #[error("input is {len} byte(s), shorter than the {}-byte header", HEADER_LEN)]
    Truncated { len: usize },
}

/// Check whether `bytes` start with the binary world magic.
pub fn has_magic(bytes: &[u8]) -> bool {
    bytes.starts_with(&MAGIC.to_be_bytes())
}

/// Parse a binary world.
///
/// The magic is checked before any other byte is looked at. A trailing partial
/// word in the body is dropped. Glyphs are not stored in this format and
/// come from `defaults`.
pub fn parse(bytes: &[u8], defaults: &Defaults) -> Result<World, InvalidFormatError> {
    let Some(magic) = bytes.first_chunk::<2>() else {
        return Err(InvalidFormatError::Truncated { len: bytes.len() });
    };
    let magic = u16::from_be_bytes(*magic);
    if magic != MAGIC {
        return Err(InvalidFormatError::BadMagic { found: magic });
    }

    let Some((header, body)) = bytes.split_first_chunk::<HEADER_LEN>() else {
        return Err(InvalidFormatError::Truncated { len: bytes.len() });
    };
    let width = read_u32(header, 2);
    let height = read_u32(header, 6);
    let generation = read_u32(header, 10);
    let state = u16::from_be_bytes([header[14], header[15]]);

    let chunks = body.chunks_exact(WORD_LEN);
    let dropped = chunks.remainder().len();
    let words: Vec<u32> = chunks
        .map(|c| u32::from_be_bytes([c[0], c[1], c[2], c[3]]))
        .collect();

    if dropped > 0 {
        debug!(dropped, "ignoring trailing partial word");
    }

    let world = World::new(width, height, defaults.glyphs, words)
        .with_generation(generation)
        .with_state(state);

    if world.words().len() as u64 != world.expected_word_count() {
        warn!(
            expected = world.expected_word_count(),
            found = world.words().len(),
            "binary world word count does not match its dimensions"
        );
    }
    debug!(
        width,
        height,
        generation,
        state,
        words = world.words().len(),
        "parsed binary world"
    );

    Ok(world)
}

fn read_u32(header: &[u8; HEADER_LEN], offset: usize) -> u32 {
    u32::from_be_bytes([
        header[offset],
        header[offset + 1],
        header[offset + 2],
        header[offset + 3],
    ])
}

/// Encode a world as bytes: header followed by every stored word.
pub fn serialize(world: &World) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_LEN + world.words().len() * WORD_LEN);
    out.extend_from_slice(&MAGIC.to_be_bytes());
    out.extend_from_slice(&world.width().to_be_bytes());
    out.extend_from_slice(&world.height().to_be_bytes());
    out.extend_from_slice(&world.generation().to_be_bytes());
    out.extend_from_slice(&world.state().to_be_bytes());
    for word in world.words() {
        out.extend_from_slice(&word.to_be_bytes());
    }
    debug!(bytes = out.len(), "serialized binary world");
    out
}
