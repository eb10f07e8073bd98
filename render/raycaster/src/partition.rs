use std::ops::Range;

use crate::RaycastError;

/// Contiguous ray ranges, one per worker. Construction checks that the ranges
/// are disjoint and cover `0..rays` exactly, which is what allows workers to
/// write their columns without locking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RayPartition {
    rays: usize,
    ranges: Vec<Range<usize>>,
}

impl RayPartition {
    /// `threads` ranges of `rays / threads` each, the last one taking the
    /// remainder. With more threads than rays the leading ranges are empty.
    pub fn new(rays: usize, threads: usize) -> Result<Self, RaycastError> {
        if threads == 0 {
            return Err(RaycastError::NoWorkers);
        }
        let chunk = rays / threads;
        let ranges = (0..threads)
            .map(|t| {
                let start = t * chunk;
                let end = if t + 1 == threads { rays } else { start + chunk };
                start..end
            })
            .collect();

        let partition = Self { rays, ranges };
        partition.verify()?;
        Ok(partition)
    }

    /// Check the ranges tile `0..rays` in order with no gap or overlap
    pub fn verify(&self) -> Result<(), RaycastError> {
        if self.ranges.is_empty() {
            return Err(RaycastError::NoWorkers);
        }
        let mut expected = 0;
        for (i, r) in self.ranges.iter().enumerate() {
            if r.start != expected {
                return Err(RaycastError::Partition(format!(
                    "range {i} starts at {}, expected {expected}",
                    r.start
                )));
            }
            if r.end < r.start {
                return Err(RaycastError::Partition(format!(
                    "range {i} runs backwards: {r:?}"
                )));
            }
            expected = r.end;
        }
        if expected != self.rays {
            return Err(RaycastError::Partition(format!(
                "ranges end at {expected}, expected {}",
                self.rays
            )));
        }
        Ok(())
    }

    pub fn rays(&self) -> usize {
        self.rays
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn range(&self, worker: usize) -> Range<usize> {
        self.ranges[worker].clone()
    }

    pub fn ranges(&self) -> &[Range<usize>] {
        &self.ranges
    }
}
