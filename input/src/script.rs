//! Replays held keys frame by frame, for headless runs and benchmarks.
//!
//! One step per line: a frame count followed by the keys held for those
//! frames, separated by spaces. `#` starts a comment. A step with no keys
//! idles.
//!
//! ```text
//! # walk up the corridor, then turn around
//! 40 w
//! 20 right
//! 10
//! 40 w left
//! ```

use log::debug;

use crate::{InputError, Key};

#[derive(Debug, Clone)]
struct Step {
    frames: u32,
    keys: Vec<Key>,
}

#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    steps: Vec<Step>,
    current: usize,
    /// Frames already spent on `steps[current]`
    elapsed: u32,
}

impl ScriptedInput {
    pub fn parse(text: &str) -> Result<Self, InputError> {
        let mut steps = Vec::new();
        for (i, raw) in text.lines().enumerate() {
            let line = raw.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            let mut words = line.split_whitespace();
            let frames = words
                .next()
                .and_then(|w| w.parse::<u32>().ok())
                .ok_or_else(|| InputError::Script {
                    line: i + 1,
                    reason: format!("expected a frame count, got {line:?}"),
                })?;
            let keys = words
                .map(str::parse::<Key>)
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| InputError::Script {
                    line: i + 1,
                    reason: e.to_string(),
                })?;
            if frames > 0 {
                steps.push(Step { frames, keys });
            }
        }
        debug!(
            "Input script: {} steps, {} frames",
            steps.len(),
            steps.iter().map(|s| s.frames as u64).sum::<u64>()
        );
        Ok(Self {
            steps,
            current: 0,
            elapsed: 0,
        })
    }

    /// Keys held for the next frame. Empty once the script has run out.
    pub fn next_frame(&mut self) -> &[Key] {
        let Some(step) = self.steps.get(self.current) else {
            return &[];
        };
        let index = self.current;
        self.elapsed += 1;
        if self.elapsed >= step.frames {
            self.current += 1;
            self.elapsed = 0;
        }
        &self.steps[index].keys
    }

    pub fn is_finished(&self) -> bool {
        self.current >= self.steps.len()
    }

    /// Frames left to replay
    pub fn remaining(&self) -> u64 {
        self.steps
            .iter()
            .skip(self.current)
            .map(|s| s.frames as u64)
            .sum::<u64>()
            - self.elapsed as u64
    }
}
