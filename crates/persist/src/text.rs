//! Line-oriented text format.
//!
//! ```text
//! width,height,on,off
//! <row 0>
//! <row 1>
//! ...
//! ```
//!
//! Row breaks and surrounding whitespace carry no data on read: every line
//! after the meta line is trimmed and concatenated into one flat run of cells.

use tracing::{debug, warn};
use worldconv_common::{CELLS_PER_WORD, Defaults, Glyphs};
use worldconv_kernel::{World, set_slot};

/// Errors from parsing the text format. All of them concern the meta line.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("meta line has {found} field(s), expected width,height,on,off")]
    MissingFields { found: usize },
    #[error("invalid {field} in meta line: {value:?}")]
    InvalidDimension { field: &'static str, value: String },
    #[error("{field} glyph must be a single character, got {value:?}")]
    InvalidGlyph { field: &'static str, value: String },
}

/// Parse a text world.
///
/// Generation and state are not part of the text format and are taken from
/// `defaults`.
pub fn parse(input: &str, defaults: &Defaults) -> Result<World, FormatError> {
    let mut lines = input.split('\n');
    let meta = lines.next().unwrap_or_default().trim();
    let (width, height, glyphs) = parse_meta(meta)?;

    let raw_cells: String = lines.map(str::trim).collect();
    let cell_total = raw_cells.chars().count();

    // One word more than the floor, even on an exact multiple of 16. Existing
    // binary worlds were produced this way.
    let mut words = vec![0u32; cell_total / CELLS_PER_WORD + 1];
    for (idx, ch) in raw_cells.chars().enumerate() {
        set_slot(&mut words, idx, glyphs.cell_of(ch));
    }

    let world = World::new(width, height, glyphs, words)
        .with_generation(defaults.generation)
        .with_state(defaults.state);

    debug!(
        width,
        height,
        cells = cell_total,
        words = world.words().len(),
        "parsed text world"
    );
    if (cell_total as u64) < world.cell_count() {
        warn!(
            expected = world.cell_count(),
            found = cell_total,
            "text world has fewer cells than its dimensions"
        );
    }

    Ok(world)
}

fn parse_meta(meta: &str) -> Result<(u32, u32, Glyphs), FormatError> {
    let fields: Vec<&str> = meta.split(',').collect();
    if fields.len() < 4 {
        return Err(FormatError::MissingFields {
            found: fields.len(),
        });
    }
    let width = parse_dimension("width", fields[0])?;
    let height = parse_dimension("height", fields[1])?;
    let on = parse_glyph("on", fields[2])?;
    let off = parse_glyph("off", fields[3])?;
    Ok((width, height, Glyphs::new(on, off)))
}

fn parse_dimension(field: &'static str, value: &str) -> Result<u32, FormatError> {
    value
        .trim()
        .parse()
        .map_err(|_| FormatError::InvalidDimension {
            field,
            value: value.to_string(),
        })
}

fn parse_glyph(field: &'static str, value: &str) -> Result<char, FormatError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch),
        _ => Err(FormatError::InvalidGlyph {
            field,
            value: value.to_string(),
        }),
    }
}

/// Render a world as text.
///
/// Rows are broken every `width` cells. Output stops once `width * height`
/// cells are written or the packed words run out, whichever is first; a
/// short word array yields a short grid with no padding.
pub fn serialize(world: &World) -> String {
    let glyphs = world.glyphs();
    let width = u64::from(world.width());

    let mut out = format!(
        "{},{},{},{}\n",
        world.width(),
        world.height(),
        glyphs.on,
        glyphs.off
    );

    let mut emitted = 0u64;
    for cell in world.cells() {
        out.push(glyphs.glyph(cell));
        emitted += 1;
        if emitted % width == 0 {
            out.push('\n');
        }
    }

    if emitted < world.cell_count() {
        warn!(
            expected = world.cell_count(),
            emitted, "packed words ran out before the grid was complete"
        );
    }
    debug!(cells = emitted, bytes = out.len(), "serialized text world");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use worldconv_common::Cell;

    fn parse_default(input: &str) -> Result<World, FormatError> {
        parse(input, &Defaults::default())
    }

    #[test]
    fn parses_two_by_two_grid() {
        let world = parse_default("2,2,O,X\nOX\nXO\n").unwrap();
        assert_eq!(world.width(), 2);
        assert_eq!(world.height(), 2);
        assert_eq!(world.glyphs(), Glyphs::new('O', 'X'));
        let cells: Vec<Cell> = world.cells().collect();
        assert_eq!(cells, vec![Cell::On, Cell::Off, Cell::Off, Cell::On]);
        assert_eq!(world.words(), &[0b10 | (0b10 << 6)]);
        assert_eq!(world.generation(), 0);
        assert_eq!(world.state(), 0);
    }

    #[test]
    fn round_trips_visible_grid() {
        let input = "5,3,#,.\n#.#.#\n.....\n##..#\n";
        let world = parse_default(input).unwrap();
        assert_eq!(serialize(&world), input);
    }

    #[test]
    fn round_trips_grid_spanning_several_words() {
        let input = "7,5,#,.\n#..#.##\n.#.#...\n##...#.\n...##.#\n#.#.#.#\n";
        let world = parse_default(input).unwrap();
        assert_eq!(world.words().len(), 3);
        // Cells 16..32 live in the second word, 32.. in the third.
        assert_eq!(world.cell(16), Some(Cell::Off));
        assert_eq!(world.cell(19), Some(Cell::On));
        assert_eq!(world.cell(33), Some(Cell::Off));
        assert_eq!(world.cell(34), Some(Cell::On));
        assert_eq!(serialize(&world), input);

        let bytes = crate::binary::serialize(&world);
        let defaults = Defaults {
            glyphs: Glyphs::new('#', '.'),
            ..Defaults::default()
        };
        let back = crate::binary::parse(&bytes, &defaults).unwrap();
        assert_eq!(back.words(), world.words());
        assert_eq!(serialize(&back), input);
    }

    #[test]
    fn over_allocates_one_word_on_exact_multiple() {
        let row = "O".repeat(16);
        let world = parse_default(&format!("16,1,O,X\n{row}\n")).unwrap();
        assert_eq!(world.words().len(), 2);
        assert_eq!(world.words()[0], 0xAAAA_AAAA);
        assert_eq!(world.words()[1], 0);
    }

    #[test]
    fn empty_grid_still_gets_one_word() {
        let world = parse_default("3,3,O,X").unwrap();
        assert_eq!(world.words(), &[0]);
    }

    #[test]
    fn whitespace_and_line_breaks_are_structural() {
        let world = parse_default("4,1,O,X\r\n  OX \r\n\tXO\n\n").unwrap();
        let cells: Vec<Cell> = world.cells().collect();
        assert_eq!(cells, vec![Cell::On, Cell::Off, Cell::Off, Cell::On]);
    }

    #[test]
    fn unknown_characters_are_off() {
        let world = parse_default("3,1,O,X\nO?X\n").unwrap();
        assert_eq!(serialize(&world), "3,1,O,X\nOXX\n");
    }

    #[test]
    fn defaults_supply_generation_and_state() {
        let defaults = Defaults {
            generation: 9,
            state: 3,
            ..Defaults::default()
        };
        let world = parse("1,1,O,X\nO\n", &defaults).unwrap();
        assert_eq!(world.generation(), 9);
        assert_eq!(world.state(), 3);
        // Glyphs come from the meta line, not the defaults.
        assert_eq!(world.glyphs(), Glyphs::new('O', 'X'));
    }

    #[test]
    fn extra_meta_fields_are_ignored() {
        let world = parse_default("1,1,O,X,extra\nO\n").unwrap();
        assert_eq!(world.live_cells(), 1);
    }

    #[test]
    fn dimensions_tolerate_surrounding_spaces() {
        let world = parse_default(" 2 , 1 ,O,X\nOO\n").unwrap();
        assert_eq!((world.width(), world.height()), (2, 1));
    }

    #[test]
    fn rejects_short_meta_line() {
        assert_eq!(
            parse_default("2,2,O\nOX\nXO\n").unwrap_err(),
            FormatError::MissingFields { found: 3 }
        );
        assert_eq!(
            parse_default("").unwrap_err(),
            FormatError::MissingFields { found: 1 }
        );
    }

    #[test]
    fn rejects_non_numeric_dimensions() {
        assert!(matches!(
            parse_default("two,2,O,X\n").unwrap_err(),
            FormatError::InvalidDimension { field: "width", .. }
        ));
        assert!(matches!(
            parse_default("2,-1,O,X\n").unwrap_err(),
            FormatError::InvalidDimension {
                field: "height",
                ..
            }
        ));
    }

    #[test]
    fn rejects_multi_character_glyphs() {
        assert!(matches!(
            parse_default("1,1,ON,X\n").unwrap_err(),
            FormatError::InvalidGlyph { field: "on", .. }
        ));
        assert!(matches!(
            parse_default("1,1,O,\n").unwrap_err(),
            FormatError::InvalidGlyph { field: "off", .. }
        ));
    }

    #[test]
    fn serialize_stops_mid_word_at_grid_size() {
        let world = World::new(3, 1, Glyphs::default(), vec![u32::MAX, u32::MAX]);
        assert_eq!(serialize(&world), "3,1,O,X\nOOO\n");
    }

    #[test]
    fn serialize_truncates_when_words_run_out() {
        let world = World::new(5, 5, Glyphs::default(), vec![0b10]);
        // 16 cells available: three full rows and one partial row.
        assert_eq!(
            serialize(&world),
            "5,5,O,X\nOXXXX\nXXXXX\nXXXXX\nX"
        );
    }

    #[test]
    fn serialize_zero_area_emits_meta_only() {
        let world = World::new(0, 4, Glyphs::default(), vec![u32::MAX]);
        assert_eq!(serialize(&world), "0,4,O,X\n");
    }
}
