//! Plain text maps for quick experiments without the game data.
//!
//! ```text
//! 6 4
//! ######
//! #e...#
//! #..2.#
//! ######
//! ```
//!
//! The first line holds `width height`, followed by `height` rows of exactly
//! `width` characters. `#` is wall code 1 and digits `1`-`9` pick that wall
//! code. `.` or a space is open floor. `n`, `e`, `s`, `w` are open floor with
//! the player start facing that way.

use std::fs;
use std::path::Path;

use crate::error::{FormatError, MapError, MapResult};
use crate::raw_map::{BlockType, RawMap};
use crate::tiles::Facing;

fn ascii_err(line: usize, reason: impl Into<String>) -> MapError {
    FormatError::Ascii {
        line,
        reason: reason.into(),
    }
    .into()
}

fn parse_cell(c: char, line: usize) -> MapResult<BlockType> {
    let block = match c {
        '#' => BlockType::new(1, 0, 0),
        '1'..='9' => BlockType::new(c as u16 - '0' as u16, 0, 0),
        '.' | ' ' => BlockType::default(),
        'n' => BlockType::new(0, Facing::North.object_code(), 0),
        'e' => BlockType::new(0, Facing::East.object_code(), 0),
        's' => BlockType::new(0, Facing::South.object_code(), 0),
        'w' => BlockType::new(0, Facing::West.object_code(), 0),
        other => return Err(ascii_err(line, format!("unknown tile {other:?}"))),
    };
    Ok(block)
}

impl RawMap {
    /// Parse a text map. The map name is `"ascii"`.
    pub fn from_ascii(text: &str) -> MapResult<Self> {
        let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l));

        let (_, header) = lines
            .next()
            .ok_or_else(|| ascii_err(1, "missing size line"))?;
        let mut dims = header.split_whitespace().map(str::parse::<usize>);
        let (width, height) = match (dims.next(), dims.next(), dims.next()) {
            (Some(Ok(w)), Some(Ok(h)), None) if w > 0 && h > 0 => (w, h),
            _ => return Err(ascii_err(1, format!("expected `width height`, got {header:?}"))),
        };

        if width.checked_mul(height).is_none() {
            return Err(ascii_err(1, format!("map size {width}x{height} overflows")));
        }

        // Grown row by row, so a bogus header can't reserve more than the text holds
        let mut cells = Vec::new();
        for row in 0..height {
            let (n, line) = lines
                .next()
                .ok_or_else(|| ascii_err(row + 2, format!("expected {height} rows, got {row}")))?;
            let line = line.trim_end_matches('\r');
            if line.chars().count() != width {
                return Err(ascii_err(
                    n,
                    format!("row is {} wide, expected {width}", line.chars().count()),
                ));
            }
            cells.reserve(width);
            for c in line.chars() {
                cells.push(parse_cell(c, n)?);
            }
        }

        RawMap::new("ascii", width, height, cells)
    }

    pub fn load_ascii(path: impl AsRef<Path>) -> MapResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| MapError::File {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ascii(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvariantError;
    use glam::IVec2;

    const ROOM: &str = "6 4\n######\n#e...#\n#..2.#\n######\n";

    #[test]
    fn parse_room() {
        let map = RawMap::from_ascii(ROOM).unwrap();
        assert_eq!(map.width(), 6);
        assert_eq!(map.height(), 4);
        assert_eq!(map.spawn().cell, IVec2::new(1, 1));
        assert_eq!(map.spawn().facing, Facing::East);
        assert_eq!(map.block(3, 2).unwrap().wall, 2);
        assert!(map.is_wall(0, 0));
        assert!(!map.is_wall(2, 2));
    }

    #[test]
    fn crlf_rows() {
        let text = ROOM.replace('\n', "\r\n");
        assert!(RawMap::from_ascii(&text).is_ok());
    }

    #[test]
    fn rejects_bad_input() {
        let short_row = "3 2\n#n#\n##\n";
        assert!(matches!(
            RawMap::from_ascii(short_row),
            Err(MapError::Format(FormatError::Ascii { line: 3, .. }))
        ));

        let missing_rows = "3 3\n#n#\n";
        assert!(matches!(
            RawMap::from_ascii(missing_rows),
            Err(MapError::Format(FormatError::Ascii { line: 3, .. }))
        ));

        let bad_tile = "2 1\nn?\n";
        assert!(matches!(
            RawMap::from_ascii(bad_tile),
            Err(MapError::Format(FormatError::Ascii { line: 2, .. }))
        ));

        assert!(RawMap::from_ascii("").is_err());
        assert!(RawMap::from_ascii("3\n").is_err());
    }

    #[test]
    fn huge_header_is_an_error() {
        assert!(matches!(
            RawMap::from_ascii("4294967296 4294967296\n#\n"),
            Err(MapError::Format(FormatError::Ascii { line: 1, .. }))
        ));
        // Fits in usize but the text is nowhere near that big
        assert!(matches!(
            RawMap::from_ascii("100000 100000\n#\n"),
            Err(MapError::Format(FormatError::Ascii { line: 2, .. }))
        ));
    }

    #[test]
    fn needs_a_start() {
        assert!(matches!(
            RawMap::from_ascii("2 1\n#.\n"),
            Err(MapError::Invariant(InvariantError::NoSpawn))
        ));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            RawMap::load_ascii("/nonexistent/map.txt"),
            Err(MapError::File { .. })
        ));
    }
}
