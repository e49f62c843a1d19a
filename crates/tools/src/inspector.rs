use serde::Serialize;
use worldconv_common::Glyphs;
use worldconv_kernel::World;

/// World inspector for developer tooling.
///
/// Answers questions about a parsed world without converting it: its
/// metadata, how many cells are live, and whether the packed words cover
/// the grid.
pub struct WorldInspector;

impl WorldInspector {
    /// Produce a summary of the world.
    pub fn summary(world: &World) -> WorldSummary {
        WorldSummary {
            width: world.width(),
            height: world.height(),
            generation: world.generation(),
            state: world.state(),
            glyphs: world.glyphs(),
            words: world.words().len(),
            expected_words: world.expected_word_count(),
            readable_cells: world.readable_cells(),
            live_cells: world.live_cells(),
        }
    }
}

/// Summary of a world for the inspector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorldSummary {
    pub width: u32,
    pub height: u32,
    pub generation: u32,
    pub state: u16,
    pub glyphs: Glyphs,
    pub words: usize,
    pub expected_words: u64,
    pub readable_cells: u64,
    pub live_cells: u64,
}

impl WorldSummary {
    /// True when the stored words do not cover the whole grid.
    pub fn is_truncated(&self) -> bool {
        self.readable_cells < u64::from(self.width) * u64::from(self.height)
    }
}

impl std::fmt::Display for WorldSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "World: {}x{} generation={} state={} live={} words={}/{}",
            self.width,
            self.height,
            self.generation,
            self.state,
            self.live_cells,
            self.words,
            self.expected_words
        )?;
        if self.is_truncated() {
            write!(f, " (truncated at {} cells)", self.readable_cells)?;
        }
        Ok(())
    }
}
