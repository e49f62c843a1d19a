use worldconv_common::{BITS_PER_CELL, CELLS_PER_WORD, Cell, Glyphs, SLOT_MASK};

/// The authoritative in-memory world.
///
/// Built once by a parser, read once by a serializer. The packed words are
/// kept exactly as the source supplied them, so their count may disagree
/// with `width * height`; every reader here tolerates that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct World {
    width: u32,
    height: u32,
    /// Opaque generation counter. Carried by the binary format only.
    generation: u32,
    /// Opaque state flag. Carried by the binary format only.
    state: u16,
    /// Carried by the text format only.
    glyphs: Glyphs,
    /// Row-major cells, 16 per word, lowest bit pair first.
    words: Vec<u32>,
}

impl World {
    /// Create a world at generation 0, state 0.
    pub fn new(width: u32, height: u32, glyphs: Glyphs, words: Vec<u32>) -> Self {
        Self {
            width,
            height,
            generation: 0,
            state: 0,
            glyphs,
            words,
        }
    }

    pub fn with_generation(self, generation: u32) -> Self {
        Self { generation, ..self }
    }

    pub fn with_state(self, state: u16) -> Self {
        Self { state, ..self }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn state(&self) -> u16 {
        self.state
    }

    pub fn glyphs(&self) -> Glyphs {
        self.glyphs
    }

    /// Read-only access to the packed cell words.
    pub fn words(&self) -> &[u32] {
        &self.words
    }

    /// Number of grid positions, `width * height`.
    pub fn cell_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Words needed to hold every grid position without slack.
    pub fn expected_word_count(&self) -> u64 {
        self.cell_count().div_ceil(CELLS_PER_WORD as u64)
    }

    /// Number of cells that can actually be read: bounded by the grid size
    /// and by the words present.
    pub fn readable_cells(&self) -> u64 {
        let stored = self.words.len() as u64 * CELLS_PER_WORD as u64;
        self.cell_count().min(stored)
    }

    /// The cell at flat row-major index `idx`, if it is readable.
    pub fn cell(&self, idx: u64) -> Option<Cell> {
        if idx >= self.readable_cells() {
            return None;
        }
        let idx = idx as usize;
        let word = self.words[idx / CELLS_PER_WORD];
        Some(Cell::from_slot(slot_of(word, idx % CELLS_PER_WORD)))
    }

    /// Iterate readable cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.readable_cells()).filter_map(|idx| self.cell(idx))
    }

    /// Count of live cells among the readable ones.
    pub fn live_cells(&self) -> u64 {
        self.cells().filter(|c| c.is_on()).count() as u64
    }
}

/// Extract the raw 2-bit value of `slot` (0..16) from a packed word.
pub fn slot_of(word: u32, slot: usize) -> u32 {
    (word >> (slot as u32 * BITS_PER_CELL)) & SLOT_MASK
}

/// Write `cell` into flat index `idx` of `words`.
///
/// Only sets bits, so `words` is expected to start zeroed. Indices past the
/// end of `words` are ignored.
pub fn set_slot(words: &mut [u32], idx: usize, cell: Cell) {
    if let Some(word) = words.get_mut(idx / CELLS_PER_WORD) {
        *word |= cell.slot() << ((idx % CELLS_PER_WORD) as u32 * BITS_PER_CELL);
    }
}
