use serde::{Deserialize, Serialize};

/// Number of cell slots packed into one 32-bit word.
pub const CELLS_PER_WORD: usize = 16;

/// Width of a single cell slot in bits.
pub const BITS_PER_CELL: u32 = 2;

/// Mask selecting one slot after shifting it to the low bits.
pub const SLOT_MASK: u32 = 0b11;

/// Slot value written for a live cell. The low bit is reserved and stays 0.
pub const ON_SLOT: u32 = 0b10;

/// Logical state of a single grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Off,
    On,
}

impl Cell {
    /// Classify a raw 2-bit slot value. Any non-zero value is on.
    pub fn from_slot(slot: u32) -> Self {
        if slot & SLOT_MASK != 0 {
            Cell::On
        } else {
            Cell::Off
        }
    }

    /// The slot value a conforming writer stores for this cell.
    pub fn slot(self) -> u32 {
        match self {
            Cell::On => ON_SLOT,
            Cell::Off => 0,
        }
    }

    pub fn is_on(self) -> bool {
        self == Cell::On
    }
}

/// The pair of characters used to draw live and dead cells in text form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Glyphs {
    pub on: char,
    pub off: char,
}

impl Glyphs {
    pub fn new(on: char, off: char) -> Self {
        Self { on, off }
    }

    /// Map a text character to a cell. Only the on glyph is live; every other
    /// character, including ones that match neither glyph, is off.
    pub fn cell_of(&self, ch: char) -> Cell {
        if ch == self.on { Cell::On } else { Cell::Off }
    }

    /// Whether `ch` can serve as a glyph and survive a text round-trip.
    /// Whitespace is trimmed away on read and `,` splits the meta line.
    pub fn is_valid(ch: char) -> bool {
        !ch.is_whitespace() && ch != ','
    }

    /// The first glyph that cannot be written to text, as `(field, glyph)`.
    pub fn invalid(&self) -> Option<(&'static str, char)> {
        [("on", self.on), ("off", self.off)]
            .into_iter()
            .find(|(_, ch)| !Self::is_valid(*ch))
    }

    /// The character drawn for a cell.
    pub fn glyph(&self, cell: Cell) -> char {
        match cell {
            Cell::On => self.on,
            Cell::Off => self.off,
        }
    }
}

impl Default for Glyphs {
    fn default() -> Self {
        Self { on: 'O', off: 'X' }
    }
}

/// Values a format does not carry and the driver fills in.
///
/// Text input has no generation or state; binary input has no glyphs.
/// Whichever side is missing is taken from here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub glyphs: Glyphs,
    pub generation: u32,
    pub state: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_nonzero_slot_is_on() {
        assert_eq!(Cell::from_slot(0b00), Cell::Off);
        assert_eq!(Cell::from_slot(0b01), Cell::On);
        assert_eq!(Cell::from_slot(0b10), Cell::On);
        assert_eq!(Cell::from_slot(0b11), Cell::On);
    }

    #[test]
    fn writer_keeps_low_bit_clear() {
        assert_eq!(Cell::On.slot(), 0b10);
        assert_eq!(Cell::Off.slot(), 0);
    }

    #[test]
    fn unknown_characters_are_off() {
        let glyphs = Glyphs::default();
        assert_eq!(glyphs.cell_of('O'), Cell::On);
        assert_eq!(glyphs.cell_of('X'), Cell::Off);
        assert_eq!(glyphs.cell_of('#'), Cell::Off);
    }

    #[test]
    fn whitespace_and_comma_glyphs_are_invalid() {
        assert!(Glyphs::is_valid('#'));
        assert!(!Glyphs::is_valid(' '));
        assert!(!Glyphs::is_valid('\t'));
        assert!(!Glyphs::is_valid(','));
        assert_eq!(Glyphs::default().invalid(), None);
        assert_eq!(Glyphs::new('O', ' ').invalid(), Some(("off", ' ')));
        assert_eq!(Glyphs::new(',', ' ').invalid(), Some(("on", ',')));
    }

    #[test]
    fn defaults_are_zero_with_o_and_x() {
        let d = Defaults::default();
        assert_eq!(d.glyphs, Glyphs::new('O', 'X'));
        assert_eq!(d.generation, 0);
        assert_eq!(d.state, 0);
    }

    #[test]
    fn defaults_fill_missing_json_fields() {
        let d: Defaults = serde_json::from_str(r#"{"generation": 12}"#).unwrap();
        assert_eq!(d.generation, 12);
        assert_eq!(d.state, 0);
        assert_eq!(d.glyphs, Glyphs::default());
    }
}
