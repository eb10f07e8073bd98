//! Frame pacing. Movement always advances by a fixed step so a replayed
//! script lands in the same place whatever the machine speed, while wall
//! clock time is only used to report the frame rate.

use std::{fmt, time::Instant};

pub const MS_PER_UPDATE: f32 = 28.0;

#[derive(Debug)]
pub struct TimeStep {
    last_time: Instant,
    delta_time: f32,
    frame_count: u32,
    frame_time: f32,
    total_frames: u64,
}

#[derive(Debug)]
pub struct FrameData {
    pub frames: u32,
    /// Average wall time per frame over the last second
    pub ms_per_frame: f32,
}

impl fmt::Display for FrameData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!(
            "FrameData (per-second):\n  -    fps: {}\n  - ms/frm: {:.2}",
            self.frames, self.ms_per_frame
        ))
    }
}

impl TimeStep {
    pub fn new() -> TimeStep {
        TimeStep {
            last_time: Instant::now(),
            delta_time: 0.0,
            frame_count: 0,
            frame_time: 0.0,
            total_frames: 0,
        }
    }

    pub fn delta(&mut self) -> f32 {
        let current_time = Instant::now();
        let delta = current_time.duration_since(self.last_time).as_micros() as f32 * 0.001;
        self.last_time = current_time;
        self.delta_time = delta;
        delta
    }

    /// Run one simulation step of `MS_PER_UPDATE`
    pub fn run_this(&mut self, mut run_this: impl FnMut(f32)) {
        self.delta();
        run_this(MS_PER_UPDATE);
        self.total_frames += 1;
    }

    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Some once a second of wall time has gone by
    pub fn frame_rate(&mut self) -> Option<FrameData> {
        self.frame_count += 1;
        self.frame_time += self.delta_time;
        // per second
        if self.frame_time >= 1000.0 {
            let data = FrameData {
                frames: self.frame_count,
                ms_per_frame: self.frame_time / self.frame_count as f32,
            };
            self.frame_count = 0;
            self.frame_time = 0.0;
            return Some(data);
        }

        None
    }
}

impl Default for TimeStep {
    // shutup clippy!
    fn default() -> Self {
        Self::new()
    }
}
