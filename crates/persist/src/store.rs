//! File-backed world loading and saving.
//!
//! Thin layer over the two codecs: read the whole file, hand the bytes to the
//! matching parser, write the serializer's output back in one go.

use std::fmt;
use std::path::Path;

use tracing::info;
use worldconv_common::Defaults;
use worldconv_kernel::World;

use crate::binary::{self, InvalidFormatError};
use crate::text::{self, FormatError};

/// Errors from file-backed load/save operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("text world: {0}")]
    Text(#[from] FormatError),
    #[error("binary world: {0}")]
    Binary(#[from] InvalidFormatError),
    #[error("config error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} glyph {glyph:?} cannot appear in a text world")]
    InvalidGlyph { field: &'static str, glyph: char },
}

/// On-disk representation of a world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldFormat {
    Text,
    Binary,
}

impl WorldFormat {
    /// Guess the format of raw file contents from the magic number.
    pub fn detect(bytes: &[u8]) -> Self {
        if binary::has_magic(bytes) {
            WorldFormat::Binary
        } else {
            WorldFormat::Text
        }
    }

    /// The format a conversion from `self` produces.
    pub fn opposite(self) -> Self {
        match self {
            WorldFormat::Text => WorldFormat::Binary,
            WorldFormat::Binary => WorldFormat::Text,
        }
    }
}

impl fmt::Display for WorldFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldFormat::Text => f.write_str("text"),
            WorldFormat::Binary => f.write_str("binary"),
        }
    }
}

/// Load conversion defaults from a JSON file. Missing keys keep their defaults.
///
/// Glyphs that a text world could not carry (whitespace, `,`) are rejected.
pub fn load_defaults(path: impl AsRef<Path>) -> Result<Defaults, StoreError> {
    let file = std::fs::File::open(path)?;
    let defaults: Defaults = serde_json::from_reader(file)?;
    if let Some((field, glyph)) = defaults.glyphs.invalid() {
        return Err(StoreError::InvalidGlyph { field, glyph });
    }
    Ok(defaults)
}

/// Read a world stored in `format`.
pub fn load(
    path: impl AsRef<Path>,
    format: WorldFormat,
    defaults: &Defaults,
) -> Result<World, StoreError> {
    let path = path.as_ref();
    let world = match format {
        WorldFormat::Text => text::parse(&std::fs::read_to_string(path)?, defaults)?,
        WorldFormat::Binary => binary::parse(&std::fs::read(path)?, defaults)?,
    };
    info!(path = %path.display(), %format, "loaded world");
    Ok(world)
}

/// Read a world, detecting its format from the file contents.
pub fn load_detected(
    path: impl AsRef<Path>,
    defaults: &Defaults,
) -> Result<(WorldFormat, World), StoreError> {
    let bytes = std::fs::read(path.as_ref())?;
    let format = WorldFormat::detect(&bytes);
    let world = match format {
        WorldFormat::Binary => binary::parse(&bytes, defaults)?,
        WorldFormat::Text => {
            let input = String::from_utf8(bytes)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
            text::parse(&input, defaults)?
        }
    };
    Ok((format, world))
}

/// Write a world in `format`, replacing any existing file.
pub fn save(path: impl AsRef<Path>, world: &World, format: WorldFormat) -> Result<(), StoreError> {
    let path = path.as_ref();
    match format {
        WorldFormat::Text => std::fs::write(path, text::serialize(world))?,
        WorldFormat::Binary => std::fs::write(path, binary::serialize(world))?,
    }
    info!(path = %path.display(), %format, "saved world");
    Ok(())
}

/// Convert `input` (stored in `from`) into the other format at `output`.
///
/// Returns the intermediate world so callers can report on it.
pub fn convert(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    from: WorldFormat,
    defaults: &Defaults,
) -> Result<World, StoreError> {
    let world = load(input, from, defaults)?;
    save(output, &world, from.opposite())?;
    Ok(world)
}
