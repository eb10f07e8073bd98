//! The two word-oriented schemes that every GAMEMAPS plane is packed with.
//!
//! Planes are stored as `carmack(rlew(words))`, so loading runs
//! `carmack_expand` first and hands the result to `rlew_expand`.
//!
//! A Carmack stream is a little endian `u16` holding the expanded size in
//! bytes, followed by words and runs. A word whose high byte is one of the two
//! tags is a run: the low byte is the word count, followed by a one byte
//! distance back (near) or a two byte absolute word index (far). A zero count
//! escapes a literal whose high byte happens to equal a tag; the literal low
//! byte follows.
//!
//! An RLEW stream is a word holding the expanded size in bytes, then words
//! that pass through as-is, except the tag word which is followed by
//! `count, value`.

use crate::error::FormatError;

pub const NEAR_TAG: u8 = 0xA7;
pub const FAR_TAG: u8 = 0xA8;

/// Longest run either scheme can express in one tag
const MAX_CARMACK_RUN: usize = 0xFF;
const MAX_NEAR_DISTANCE: usize = 0xFF;
const MAX_RLEW_RUN: usize = 0xFFFF;

/// Little endian cursor over a byte slice that reports where it ran dry.
struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
    what: &'static str,
}

impl<'a> ByteReader<'a> {
    fn new(data: &'a [u8], what: &'static str) -> Self {
        Self { data, pos: 0, what }
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn truncated(&self, needed: usize) -> FormatError {
        FormatError::Truncated {
            what: self.what,
            offset: self.pos,
            needed,
            len: self.data.len(),
        }
    }

    fn read_u8(&mut self) -> Result<u8, FormatError> {
        let b = *self.data.get(self.pos).ok_or_else(|| self.truncated(1))?;
        self.pos += 1;
        Ok(b)
    }

    fn read_u16(&mut self) -> Result<u16, FormatError> {
        if self.remaining() < 2 {
            return Err(self.truncated(2));
        }
        let w = (self.data[self.pos + 1] as u16) << 8 | (self.data[self.pos] as u16);
        self.pos += 2;
        Ok(w)
    }
}

/// Expand a Carmack compressed plane. Returns exactly as many words as the
/// leading size prefix declares.
pub fn carmack_expand(data: &[u8]) -> Result<Vec<u16>, FormatError> {
    let mut reader = ByteReader::new(data, "carmack stream");
    let declared = reader.read_u16()? as usize / 2;
    let mut out: Vec<u16> = Vec::with_capacity(declared);

    while out.len() < declared {
        if reader.remaining() == 0 {
            return Err(FormatError::LengthMismatch {
                what: "carmack stream",
                expected: declared,
                actual: out.len(),
            });
        }

        let word = reader.read_u16()?;
        let [count, tag] = word.to_le_bytes();
        let count = count as usize;

        let start = match tag {
            NEAR_TAG | FAR_TAG if count == 0 => {
                let low = reader.read_u8()?;
                out.push(u16::from_le_bytes([low, tag]));
                continue;
            }
            NEAR_TAG => {
                let distance = reader.read_u8()? as i64;
                out.len() as i64 - distance
            }
            FAR_TAG => reader.read_u16()? as i64,
            _ => {
                out.push(word);
                continue;
            }
        };

        // distance 0 would copy the word being written
        if start < 0 || start >= out.len() as i64 {
            return Err(FormatError::CopyOutOfRange {
                position: out.len(),
                source_word: start,
                emitted: out.len(),
            });
        }
        if out.len() + count > declared {
            return Err(FormatError::LengthMismatch {
                what: "carmack stream",
                expected: declared,
                actual: out.len() + count,
            });
        }

        // Word by word so a run may overlap what it is producing
        let start = start as usize;
        for i in 0..count {
            let w = out[start + i];
            out.push(w);
        }
    }

    Ok(out)
}

/// Pack `words` with Carmack compression. Runs are found greedily, preferring
/// the nearest source of the longest match.
pub fn carmack_compress(words: &[u16]) -> Result<Vec<u8>, FormatError> {
    if words.len() * 2 > u16::MAX as usize {
        return Err(FormatError::TooLarge { words: words.len() });
    }

    let mut out = Vec::with_capacity(words.len() * 2 + 2);
    out.extend_from_slice(&((words.len() * 2) as u16).to_le_bytes());

    let mut i = 0;
    while i < words.len() {
        let max_len = MAX_CARMACK_RUN.min(words.len() - i);
        let mut best_len = 0;
        let mut best_src = 0;
        for src in (0..i).rev() {
            let mut len = 0;
            while len < max_len && words[src + len] == words[i + len] {
                len += 1;
            }
            if len > best_len {
                best_len = len;
                best_src = src;
                if len == max_len {
                    break;
                }
            }
        }

        let distance = i - best_src;
        let near = distance <= MAX_NEAR_DISTANCE;
        // A near run costs 3 bytes and a far one 4, against 2 per literal
        if best_len >= 3 || (best_len == 2 && near) {
            if near {
                out.extend_from_slice(&[best_len as u8, NEAR_TAG, distance as u8]);
            } else {
                out.extend_from_slice(&[best_len as u8, FAR_TAG]);
                out.extend_from_slice(&(best_src as u16).to_le_bytes());
            }
            i += best_len;
            continue;
        }

        let [low, high] = words[i].to_le_bytes();
        if high == NEAR_TAG || high == FAR_TAG {
            out.extend_from_slice(&[0, high, low]);
        } else {
            out.extend_from_slice(&[low, high]);
        }
        i += 1;
    }

    Ok(out)
}

/// Expand an RLEW stream in to exactly `expected` words. The stream's leading
/// size word must agree with `expected`. Anything after the last run needed
/// is ignored.
pub fn rlew_expand(words: &[u16], tag: u16, expected: usize) -> Result<Vec<u16>, FormatError> {
    let Some((&declared, body)) = words.split_first() else {
        return Err(FormatError::Truncated {
            what: "rlew stream",
            offset: 0,
            needed: 2,
            len: 0,
        });
    };
    if declared as usize != expected * 2 {
        return Err(FormatError::LengthMismatch {
            what: "rlew header",
            expected,
            actual: declared as usize / 2,
        });
    }

    let mut out = Vec::with_capacity(expected);
    let mut i = 0;
    while out.len() < expected {
        let Some(&word) = body.get(i) else {
            return Err(FormatError::LengthMismatch {
                what: "rlew stream",
                expected,
                actual: out.len(),
            });
        };

        if word != tag {
            out.push(word);
            i += 1;
            continue;
        }

        let (Some(&count), Some(&value)) = (body.get(i + 1), body.get(i + 2)) else {
            return Err(FormatError::Truncated {
                what: "rlew stream",
                offset: (i + 1) * 2,
                needed: 6,
                len: words.len() * 2,
            });
        };
        if out.len() + count as usize > expected {
            return Err(FormatError::LengthMismatch {
                what: "rlew stream",
                expected,
                actual: out.len() + count as usize,
            });
        }
        out.resize(out.len() + count as usize, value);
        i += 3;
    }

    Ok(out)
}

/// Pack `words` with RLEW using `tag` as the run marker. Runs of three or more
/// are tagged, as is any lone word equal to the tag.
pub fn rlew_compress(words: &[u16], tag: u16) -> Result<Vec<u16>, FormatError> {
    if words.len() * 2 > u16::MAX as usize {
        return Err(FormatError::TooLarge { words: words.len() });
    }

    let mut out = Vec::with_capacity(words.len() / 2 + 1);
    out.push((words.len() * 2) as u16);

    let mut i = 0;
    while i < words.len() {
        let value = words[i];
        let mut run = 1;
        while i + run < words.len() && words[i + run] == value && run < MAX_RLEW_RUN {
            run += 1;
        }

        if run >= 3 || value == tag {
            out.extend_from_slice(&[tag, run as u16, value]);
        } else {
            out.extend(std::iter::repeat_n(value, run));
        }
        i += run;
    }

    Ok(out)
}
