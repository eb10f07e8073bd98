use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RaycastError {
    #[error("at least 2 rays are needed, got {0}")]
    TooFewRays(usize),

    #[error("at least one worker thread is needed")]
    NoWorkers,

    #[error("ray partition does not tile the ray range: {0}")]
    Partition(String),

    /// A worker panicked while casting its share of a frame
    #[error("raycast worker {worker} failed: {message}")]
    WorkerFault { worker: usize, message: String },

    /// An earlier frame faulted. The column buffer can not be trusted again.
    #[error("caster is unusable after an earlier worker fault")]
    Poisoned,

    #[error("could not start a raycast worker: {0}")]
    Spawn(#[from] io::Error),
}
