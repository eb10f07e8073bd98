use log::debug;

use crate::archive::{MAP_HEADER_LEN, MAPHEAD_SLOTS, PLANES};
use crate::compression::{carmack_compress, rlew_compress};
use crate::error::FormatError;
use crate::raw_map::BlockType;

/// Signature the original editor wrote at the start of GAMEMAPS
const GAMEMAPS_SIGNATURE: &[u8; 8] = b"TED5v1.0";
const NAME_LEN: usize = MAP_HEADER_LEN - 22;

struct PendingMap {
    name: String,
    width: u16,
    height: u16,
    planes: [Vec<u16>; PLANES],
}

/// Assembles MAPHEAD and GAMEMAPS byte images from plain planes. Each plane is
/// RLEW then Carmack packed, exactly the inverse of `MapArchive::load_map`.
pub struct ArchiveBuilder {
    rlew_tag: u16,
    maps: Vec<PendingMap>,
}

impl ArchiveBuilder {
    pub fn new(rlew_tag: u16) -> Self {
        Self {
            rlew_tag,
            maps: Vec::new(),
        }
    }

    /// Add a map from its three planes. Plane lengths are checked by `build`.
    pub fn add_planes(
        &mut self,
        name: &str,
        width: u16,
        height: u16,
        planes: [Vec<u16>; PLANES],
    ) -> &mut Self {
        self.maps.push(PendingMap {
            name: name.to_owned(),
            width,
            height,
            planes,
        });
        self
    }

    pub fn add_blocks(&mut self, name: &str, width: u16, height: u16, cells: &[BlockType]) -> &mut Self {
        let planes = [
            cells.iter().map(|c| c.wall).collect(),
            cells.iter().map(|c| c.object).collect(),
            cells.iter().map(|c| c.extra).collect(),
        ];
        self.add_planes(name, width, height, planes)
    }

    /// Returns `(maphead, gamemaps)`
    pub fn build(&self) -> Result<(Vec<u8>, Vec<u8>), FormatError> {
        if self.maps.len() > MAPHEAD_SLOTS {
            return Err(FormatError::BadHeader(format!(
                "{} maps do not fit {MAPHEAD_SLOTS} slots",
                self.maps.len()
            )));
        }

        let mut maphead = Vec::with_capacity(2 + 4 * MAPHEAD_SLOTS);
        maphead.extend_from_slice(&self.rlew_tag.to_le_bytes());
        let mut gamemaps = GAMEMAPS_SIGNATURE.to_vec();
        let mut offsets = [0i32; MAPHEAD_SLOTS];

        for (slot, map) in self.maps.iter().enumerate() {
            let cells = map.width as usize * map.height as usize;
            let mut plane_start = [0i32; PLANES];
            let mut plane_length = [0u16; PLANES];

            for (p, words) in map.planes.iter().enumerate() {
                if words.len() != cells {
                    return Err(FormatError::LengthMismatch {
                        what: "builder plane",
                        expected: cells,
                        actual: words.len(),
                    });
                }
                let packed = carmack_compress(&rlew_compress(words, self.rlew_tag)?)?;
                if packed.len() > u16::MAX as usize {
                    return Err(FormatError::TooLarge { words: words.len() });
                }
                plane_start[p] = gamemaps.len() as i32;
                plane_length[p] = packed.len() as u16;
                gamemaps.extend_from_slice(&packed);
            }

            offsets[slot] = gamemaps.len() as i32;
            for start in plane_start {
                gamemaps.extend_from_slice(&start.to_le_bytes());
            }
            for len in plane_length {
                gamemaps.extend_from_slice(&len.to_le_bytes());
            }
            gamemaps.extend_from_slice(&map.width.to_le_bytes());
            gamemaps.extend_from_slice(&map.height.to_le_bytes());
            let mut name = [0u8; NAME_LEN];
            for (dst, src) in name.iter_mut().zip(map.name.bytes()) {
                *dst = src;
            }
            gamemaps.extend_from_slice(&name);
            debug!("Packed {} with planes {plane_length:?}", map.name);
        }

        for offset in offsets {
            maphead.extend_from_slice(&offset.to_le_bytes());
        }
        Ok((maphead, gamemaps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::{MAPHEAD_LEN, MapArchive};

    #[test]
    fn image_layout() {
        let (maphead, gamemaps) = ArchiveBuilder::new(0xABCD)
            .add_planes("tiny", 2, 1, [vec![1, 0], vec![0, 20], vec![0, 0]])
            .build()
            .unwrap();
        assert_eq!(maphead.len(), MAPHEAD_LEN);
        assert_eq!(&maphead[..2], &[0xCD, 0xAB]);
        assert!(gamemaps.starts_with(GAMEMAPS_SIGNATURE));

        let header_at = i32::from_le_bytes([maphead[2], maphead[3], maphead[4], maphead[5]]);
        assert_eq!(header_at as usize + MAP_HEADER_LEN, gamemaps.len());
        assert_eq!(&maphead[6..10], &[0, 0, 0, 0]);

        let archive = MapArchive::from_bytes(&maphead, gamemaps).unwrap();
        let map = archive.load_map(0).unwrap();
        assert!(map.is_wall(0, 0));
        assert_eq!(map.spawn().cell, glam::IVec2::new(1, 0));
    }

    #[test]
    fn plane_size_checked() {
        let res = ArchiveBuilder::new(0xABCD)
            .add_planes("bad", 2, 2, [vec![1; 4], vec![0; 3], vec![0; 4]])
            .build();
        assert!(matches!(
            res,
            Err(FormatError::LengthMismatch { expected: 4, actual: 3, .. })
        ));
    }
}
