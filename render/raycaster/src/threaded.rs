//! A fixed pool of raycasting threads driven by a two phase barrier.
//!
//! Each frame the main thread publishes a `FrameView`, raises every worker's
//! do-work flag and waits on `finished` until all workers have reported in.
//! Workers sleep on `start` between frames. Each worker owns one range of a
//! verified `RayPartition` and is the only writer to that part of the column
//! buffer.

use std::any::Any;
use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};
use std::ptr::NonNull;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use gameplay::VectorMap;
use log::{debug, error, trace};
use parking_lot::{Condvar, Mutex};

use crate::RaycastError;
use crate::cast::{FrameView, WallColumn, cast_columns};
use crate::partition::RayPartition;
use crate::rays::{RayRot, ray_rots};

/// The per-range work a worker runs each frame
pub(crate) type ColumnKernel = fn(&FrameView, &[RayRot], usize, &VectorMap, &mut [WallColumn]);

/// Fixed size column storage written by several threads at once, each through
/// its own disjoint range.
struct ColumnBuffer {
    ptr: NonNull<WallColumn>,
    len: usize,
}

// Access is only through `range_mut` on disjoint ranges while workers run, or
// through `all` while they are parked.
unsafe impl Send for ColumnBuffer {}
unsafe impl Sync for ColumnBuffer {}

impl ColumnBuffer {
    fn new(len: usize) -> Self {
        let boxed: Box<[WallColumn]> = vec![WallColumn::default(); len].into_boxed_slice();
        let raw = Box::into_raw(boxed) as *mut WallColumn;
        Self {
            // A boxed slice pointer is never null, even when empty
            ptr: NonNull::new(raw).unwrap_or(NonNull::dangling()),
            len,
        }
    }

    /// # Safety
    /// No other live reference may overlap `range`
    #[allow(clippy::mut_from_ref)]
    unsafe fn range_mut(&self, range: Range<usize>) -> &mut [WallColumn] {
        assert!(range.start <= range.end && range.end <= self.len);
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr().add(range.start), range.len()) }
    }

    /// # Safety
    /// No mutable reference from `range_mut` may be live
    unsafe fn all(&self) -> &[WallColumn] {
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl Drop for ColumnBuffer {
    fn drop(&mut self) {
        unsafe {
            let slice = std::ptr::slice_from_raw_parts_mut(self.ptr.as_ptr(), self.len);
            drop(Box::from_raw(slice));
        }
    }
}

/// Everything guarded by the frame mutex
struct FrameState {
    frame: Option<FrameView>,
    do_work: Vec<bool>,
    /// Workers finished with the current frame
    done: usize,
    join: bool,
    fault: Option<(usize, String)>,
}

struct Shared {
    state: Mutex<FrameState>,
    start: Condvar,
    finished: Condvar,
    columns: ColumnBuffer,
    map: Arc<VectorMap>,
    rots: Vec<RayRot>,
    kernel: ColumnKernel,
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_owned()
    }
}

fn worker_loop(id: usize, range: Range<usize>, shared: Arc<Shared>) {
    debug!("raycast worker {id} started on rays {range:?}");
    loop {
        let frame = {
            let mut state = shared.state.lock();
            while !state.do_work[id] {
                shared.start.wait(&mut state);
            }
            state.do_work[id] = false;
            if state.join {
                break;
            }
            state.frame
        };

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let Some(frame) = frame else {
                return;
            };
            // The partition was verified, so no other worker touches this range
            let out = unsafe { shared.columns.range_mut(range.clone()) };
            (shared.kernel)(&frame, &shared.rots, range.start, &shared.map, out);
        }));

        let mut state = shared.state.lock();
        if let Err(payload) = result {
            let message = panic_message(payload.as_ref());
            error!("raycast worker {id} panicked: {message}");
            state.fault.get_or_insert((id, message));
        }
        state.done += 1;
        shared.finished.notify_one();
    }
    debug!("raycast worker {id} stopped");
}

/// Casts each frame across a pool of long lived worker threads
pub struct ThreadedCaster {
    shared: Arc<Shared>,
    partition: RayPartition,
    workers: Vec<JoinHandle<()>>,
    poisoned: bool,
}

impl ThreadedCaster {
    pub fn new(
        map: Arc<VectorMap>,
        fov_rad: f32,
        rays: usize,
        threads: usize,
    ) -> Result<Self, RaycastError> {
        Self::with_kernel(map, fov_rad, rays, threads, cast_columns)
    }

    pub(crate) fn with_kernel(
        map: Arc<VectorMap>,
        fov_rad: f32,
        rays: usize,
        threads: usize,
        kernel: ColumnKernel,
    ) -> Result<Self, RaycastError> {
        let rots = ray_rots(fov_rad, rays)?;
        let partition = RayPartition::new(rays, threads)?;

        let shared = Arc::new(Shared {
            state: Mutex::new(FrameState {
                frame: None,
                do_work: vec![false; partition.len()],
                done: 0,
                join: false,
                fault: None,
            }),
            start: Condvar::new(),
            finished: Condvar::new(),
            columns: ColumnBuffer::new(rays),
            map,
            rots,
            kernel,
        });

        // Built up in place so `Drop` joins whatever started if a spawn fails
        let mut caster = Self {
            shared,
            partition,
            workers: Vec::with_capacity(threads),
            poisoned: false,
        };
        for id in 0..caster.partition.len() {
            let range = caster.partition.range(id);
            let shared = Arc::clone(&caster.shared);
            let handle = thread::Builder::new()
                .name(format!("raycast-worker-{id}"))
                .spawn(move || worker_loop(id, range, shared))?;
            caster.workers.push(handle);
        }
        debug!(
            "Started {} raycast workers for {rays} rays",
            caster.workers.len()
        );
        Ok(caster)
    }

    pub fn rays(&self) -> usize {
        self.partition.rays()
    }

    pub fn threads(&self) -> usize {
        self.workers.len()
    }

    pub fn partition(&self) -> &RayPartition {
        &self.partition
    }

    pub fn map(&self) -> &Arc<VectorMap> {
        &self.shared.map
    }

    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// Run one frame across all workers and return every column. Blocks until
    /// the whole frame is done. A worker panic poisons the caster for good.
    pub fn cast(&mut self, frame: &FrameView) -> Result<&[WallColumn], RaycastError> {
        if self.poisoned {
            return Err(RaycastError::Poisoned);
        }

        {
            let mut state = self.shared.state.lock();
            state.frame = Some(*frame);
            state.done = 0;
            state.do_work.iter_mut().for_each(|w| *w = true);
            self.shared.start.notify_all();

            while state.done < self.workers.len() {
                self.shared.finished.wait(&mut state);
            }

            if let Some((worker, message)) = state.fault.take() {
                self.poisoned = true;
                return Err(RaycastError::WorkerFault { worker, message });
            }
        }
        trace!("frame cast by {} workers", self.workers.len());

        // Every worker has reported in and is waiting for the next frame,
        // which can't start until this borrow of self ends
        Ok(unsafe { self.shared.columns.all() })
    }
}

impl Drop for ThreadedCaster {
    fn drop(&mut self) {
        {
            let mut state = self.shared.state.lock();
            state.join = true;
            state.do_work.iter_mut().for_each(|w| *w = true);
            self.shared.start.notify_all();
        }
        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                error!("raycast worker exited with a panic");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::single::SingleThreadCaster;
    use gamemaps::RawMap;
    use gameplay::ViewPoint;
    use glam::Vec2;

    fn room() -> (Arc<VectorMap>, FrameView) {
        let map = RawMap::from_ascii(
            "8 6\n########\n#......#\n#.e..#.#\n#...##.#\n#......#\n########\n",
        )
        .unwrap();
        let frame = FrameView::new(
            &ViewPoint {
                pos: map.spawn_pos(),
                dir: Vec2::new(1.0, 0.2).normalize(),
            },
            240.0,
        );
        (Arc::new(VectorMap::new(&map)), frame)
    }

    #[test]
    fn matches_single_thread() {
        let (map, frame) = room();
        let mut single = SingleThreadCaster::new(map.clone(), 1.2, 97).unwrap();
        let expected = single.cast(&frame).to_vec();

        for threads in [1, 2, 4, 8] {
            let mut caster = ThreadedCaster::new(map.clone(), 1.2, 97, threads).unwrap();
            assert_eq!(caster.threads(), threads);
            for _ in 0..3 {
                let cols = caster.cast(&frame).unwrap();
                assert_eq!(cols.len(), expected.len());
                for (a, b) in cols.iter().zip(&expected) {
                    assert_eq!(a.segment, b.segment);
                    assert!((a.depth - b.depth).abs() < 1e-5);
                    assert!((a.height - b.height).abs() < 1e-3);
                    assert!((a.shade - b.shade).abs() < 1e-6);
                }
            }
        }
    }

    #[test]
    fn more_threads_than_rays() {
        let (map, frame) = room();
        let mut caster = ThreadedCaster::new(map, 1.0, 3, 8).unwrap();
        let cols = caster.cast(&frame).unwrap();
        assert_eq!(cols.len(), 3);
        assert!(cols.iter().all(|c| c.is_hit()));
    }

    #[test]
    fn frames_follow_the_view() {
        let (map, frame) = room();
        let mut caster = ThreadedCaster::new(map, 1.0, 16, 4).unwrap();
        let first = caster.cast(&frame).unwrap().to_vec();
        let turned = FrameView::new(
            &ViewPoint {
                pos: frame.pos,
                dir: Vec2::new(0.0, 1.0),
            },
            240.0,
        );
        let second = caster.cast(&turned).unwrap().to_vec();
        assert_ne!(first, second);
    }

    fn panicking_kernel(
        frame: &FrameView,
        rots: &[RayRot],
        first_ray: usize,
        map: &VectorMap,
        out: &mut [WallColumn],
    ) {
        if first_ray == 0 && !out.is_empty() {
            panic!("injected fault");
        }
        cast_columns(frame, rots, first_ray, map, out);
    }

    #[test]
    fn worker_fault_poisons() {
        let (map, frame) = room();
        let mut caster = ThreadedCaster::with_kernel(map, 1.0, 16, 4, panicking_kernel).unwrap();
        match caster.cast(&frame) {
            Err(RaycastError::WorkerFault { worker, message }) => {
                assert_eq!(worker, 0);
                assert_eq!(message, "injected fault");
            }
            other => panic!("expected a worker fault, got {:?}", other.map(|c| c.len())),
        }
        assert!(caster.is_poisoned());
        assert!(matches!(caster.cast(&frame), Err(RaycastError::Poisoned)));
        // Drop still joins every worker
        drop(caster);
    }

    #[test]
    fn invalid_setup() {
        let (map, _) = room();
        assert!(matches!(
            ThreadedCaster::new(map.clone(), 1.0, 16, 0),
            Err(RaycastError::NoWorkers)
        ));
        assert!(matches!(
            ThreadedCaster::new(map, 1.0, 1, 2),
            Err(RaycastError::TooFewRays(1))
        ));
    }
}
