use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while turning archive bytes in to a `RawMap`,
/// or while reading a `RawMap` afterwards.
#[derive(Error, Debug)]
pub enum MapError {
    /// An archive file is missing or unreadable
    #[error("could not read {path:?}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The compressed data or headers are corrupt
    #[error("corrupt map data: {0}")]
    Format(#[from] FormatError),

    /// The decoded map breaks a structural rule
    #[error("invalid map: {0}")]
    Invariant(#[from] InvariantError),

    /// `RawMap::block` was asked for a cell outside the grid
    #[error("block ({x}, {y}) is outside the {width}x{height} map")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Ran off the end of a buffer
    #[error("{what}: needed {needed} bytes at offset {offset}, buffer has {len}")]
    Truncated {
        what: &'static str,
        offset: usize,
        needed: usize,
        len: usize,
    },

    /// A Carmack run pointed at words that were not emitted yet
    #[error("copy at word {position} references word {source_word}, only {emitted} emitted")]
    CopyOutOfRange {
        position: usize,
        source_word: i64,
        emitted: usize,
    },

    /// A pass produced a different amount of data than was declared
    #[error("{what}: expected {expected} words, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Too many words for the 16 bit length prefix
    #[error("{words} words do not fit a 16 bit length prefix")]
    TooLarge { words: usize },

    /// A header field holds an impossible value
    #[error("bad header: {0}")]
    BadHeader(String),

    /// Text map could not be parsed
    #[error("ascii map line {line}: {reason}")]
    Ascii { line: usize, reason: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantError {
    #[error("no player start position found")]
    NoSpawn,

    #[error("more than one player start position: ({first_x}, {first_y}) and ({x}, {y})")]
    MultipleSpawns {
        first_x: usize,
        first_y: usize,
        x: usize,
        y: usize,
    },

    #[error("map index {index} requested, archive holds {count} maps")]
    MapIndex { index: usize, count: usize },
}

pub type MapResult<T> = Result<T, MapError>;
