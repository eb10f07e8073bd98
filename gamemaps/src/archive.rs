use std::fs;
use std::path::Path;
use std::{fmt, str};

use log::{debug, info, warn};

use crate::compression::{carmack_expand, rlew_expand};
use crate::error::{FormatError, InvariantError, MapError, MapResult};
use crate::raw_map::{BlockType, RawMap};

/// Map slots in the header file
pub const MAPHEAD_SLOTS: usize = 100;
/// `rlew_tag` plus one `i32` offset per slot
pub const MAPHEAD_LEN: usize = 2 + 4 * MAPHEAD_SLOTS;
pub const MAP_HEADER_LEN: usize = 38;
pub const PLANES: usize = 3;

pub(crate) fn read_2_bytes(data: &[u8], offset: usize, what: &'static str) -> Result<u16, FormatError> {
    match data.get(offset..offset + 2) {
        Some(b) => Ok((b[1] as u16) << 8 | (b[0] as u16)),
        None => Err(FormatError::Truncated {
            what,
            offset,
            needed: 2,
            len: data.len(),
        }),
    }
}

pub(crate) fn read_4_bytes(data: &[u8], offset: usize, what: &'static str) -> Result<i32, FormatError> {
    match data.get(offset..offset + 4) {
        Some(b) => Ok(i32::from_le_bytes([b[0], b[1], b[2], b[3]])),
        None => Err(FormatError::Truncated {
            what,
            offset,
            needed: 4,
            len: data.len(),
        }),
    }
}

/// Per map header found at each MAPHEAD offset in GAMEMAPS
///
/// | Offset    | Data Type | Content                                    |
/// |-----------|-----------|--------------------------------------------|
/// | 0x00-0x0b | 3 x i32   | Start of each compressed plane in GAMEMAPS |
/// | 0x0c-0x11 | 3 x u16   | Compressed length of each plane in bytes   |
/// | 0x12-0x13 | u16       | Width in cells                             |
/// | 0x14-0x15 | u16       | Height in cells                            |
/// | 0x16-0x25 | 16 char   | NUL padded name                            |
///
#[derive(Clone, PartialEq, Eq)]
pub struct MapHeader {
    pub plane_start: [i32; PLANES],
    pub plane_length: [u16; PLANES],
    pub width: u16,
    pub height: u16,
    pub name: String,
}

impl fmt::Debug for MapHeader {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "\nMapHeader {{\n  name: {},\n  size: {}x{},\n  plane_start: {:?},\n  plane_length: {:?},\n}}",
            self.name, self.width, self.height, self.plane_start, self.plane_length
        )
    }
}

impl MapHeader {
    fn read(data: &[u8], offset: usize) -> Result<Self, FormatError> {
        const WHAT: &str = "map header";
        if data.len() < offset + MAP_HEADER_LEN {
            return Err(FormatError::Truncated {
                what: WHAT,
                offset,
                needed: MAP_HEADER_LEN,
                len: data.len(),
            });
        }

        let mut plane_start = [0; PLANES];
        let mut plane_length = [0; PLANES];
        for p in 0..PLANES {
            plane_start[p] = read_4_bytes(data, offset + p * 4, WHAT)?;
            plane_length[p] = read_2_bytes(data, offset + 12 + p * 2, WHAT)?;
        }

        let raw_name = &data[offset + 22..offset + MAP_HEADER_LEN];
        let end = raw_name.iter().position(|&b| b == 0).unwrap_or(raw_name.len());
        let name = String::from_utf8_lossy(&raw_name[..end]).trim_end().to_owned();

        Ok(MapHeader {
            plane_start,
            plane_length,
            width: read_2_bytes(data, offset + 18, WHAT)?,
            height: read_2_bytes(data, offset + 20, WHAT)?,
            name,
        })
    }

    /// The compressed bytes of one plane
    fn plane<'a>(&self, gamemaps: &'a [u8], plane: usize) -> Result<&'a [u8], FormatError> {
        let start = self.plane_start[plane];
        let len = self.plane_length[plane] as usize;
        if start < 0 {
            return Err(FormatError::BadHeader(format!(
                "{}: plane {plane} starts at negative offset {start}",
                self.name
            )));
        }
        let start = start as usize;
        gamemaps
            .get(start..start + len)
            .ok_or(FormatError::Truncated {
                what: "plane data",
                offset: start,
                needed: len,
                len: gamemaps.len(),
            })
    }
}

/// The MAPHEAD + GAMEMAPS pair held in memory.
///
/// MAPHEAD is a little endian `u16` RLEW tag followed by 100 `i32` offsets in
/// to GAMEMAPS. Only positive offsets name a map. Each names a `MapHeader`,
/// which in turn points at the three compressed planes.
pub struct MapArchive {
    rlew_tag: u16,
    headers: Vec<MapHeader>,
    gamemaps: Vec<u8>,
}

impl fmt::Debug for MapArchive {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "\nMapArchive {{\n  rlew_tag: {:#06x},\n  maps: {},\n  gamemaps_len: {},\n}}",
            self.rlew_tag,
            self.headers.len(),
            self.gamemaps.len()
        )
    }
}

fn read_file(path: &Path) -> MapResult<Vec<u8>> {
    fs::read(path).map_err(|source| MapError::File {
        path: path.to_path_buf(),
        source,
    })
}

impl MapArchive {
    /// Read both files in full. Fails if either is missing or unreadable, or
    /// if MAPHEAD or any map header is corrupt.
    pub fn open(maphead: impl AsRef<Path>, gamemaps: impl AsRef<Path>) -> MapResult<Self> {
        let maphead = read_file(maphead.as_ref())?;
        let gamemaps = read_file(gamemaps.as_ref())?;
        Self::from_bytes(&maphead, gamemaps)
    }

    pub fn from_bytes(maphead: &[u8], gamemaps: Vec<u8>) -> MapResult<Self> {
        const WHAT: &str = "maphead";
        if maphead.len() < MAPHEAD_LEN {
            return Err(FormatError::Truncated {
                what: WHAT,
                offset: 0,
                needed: MAPHEAD_LEN,
                len: maphead.len(),
            }
            .into());
        }

        let rlew_tag = read_2_bytes(maphead, 0, WHAT)?;
        let mut headers = Vec::new();
        for slot in 0..MAPHEAD_SLOTS {
            let offset = read_4_bytes(maphead, 2 + slot * 4, WHAT)?;
            if offset <= 0 {
                continue;
            }
            headers.push(MapHeader::read(&gamemaps, offset as usize)?);
        }

        if headers.is_empty() {
            warn!("MAPHEAD lists no maps");
        }
        debug!(
            "Map archive: {} maps, rlew tag {:#06x}, {} bytes of map data",
            headers.len(),
            rlew_tag,
            gamemaps.len()
        );

        Ok(Self {
            rlew_tag,
            headers,
            gamemaps,
        })
    }

    pub fn rlew_tag(&self) -> u16 {
        self.rlew_tag
    }

    pub fn number_of_maps(&self) -> usize {
        self.headers.len()
    }

    pub fn map_header(&self, index: usize) -> MapResult<&MapHeader> {
        self.headers.get(index).ok_or_else(|| {
            InvariantError::MapIndex {
                index,
                count: self.headers.len(),
            }
            .into()
        })
    }

    pub fn map_names(&self) -> Vec<&str> {
        self.headers.iter().map(|h| h.name.as_str()).collect()
    }

    pub fn headers(&self) -> &[MapHeader] {
        &self.headers
    }

    /// Decompress the map at `index`. Nothing is returned unless every plane
    /// decodes to exactly `width * height` words.
    pub fn load_map(&self, index: usize) -> MapResult<RawMap> {
        let header = self.map_header(index)?;
        let (width, height) = (header.width as usize, header.height as usize);
        let cell_count = width * height;

        let mut planes: Vec<Vec<u16>> = Vec::with_capacity(PLANES);
        for p in 0..PLANES {
            let packed = header.plane(&self.gamemaps, p)?;
            let rlew = carmack_expand(packed)?;
            planes.push(rlew_expand(&rlew, self.rlew_tag, cell_count)?);
        }

        let cells = (0..cell_count)
            .map(|i| BlockType::new(planes[0][i], planes[1][i], planes[2][i]))
            .collect();

        info!("Loaded map {index}: {}", header.name);
        RawMap::new(header.name.clone(), width, height, cells)
    }
}
