//! Shared progress reporting for render workers.
//!
//! One [`Progress`] is created per render and borrowed by every worker. A
//! single mutex guards the per-worker scanline counters and the ETA; workers
//! touch it once per scanline, so contention stays low.

use std::io::Write;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Lifecycle of one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    /// Spawned but no scanline started yet
    Idle,
    /// Rendering, with this many scanlines still to go
    Rendering { lines_left: u32 },
    /// Every scanline finished
    Done,
}

/// Point-in-time copy of the shared progress state.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSnapshot {
    pub workers: Vec<WorkerState>,
    /// Estimated time until worker 0 finishes
    pub estimated: Duration,
}

impl ProgressSnapshot {
    /// Scanlines still to render for each worker.
    pub fn lines_left(&self, total_lines: u32) -> Vec<u32> {
        lines_left(&self.workers, total_lines)
    }
}

fn lines_left(workers: &[WorkerState], total_lines: u32) -> Vec<u32> {
    workers
        .iter()
        .map(|state| match state {
            WorkerState::Idle => total_lines,
            WorkerState::Rendering { lines_left } => *lines_left,
            WorkerState::Done => 0,
        })
        .collect()
}

struct ProgressState {
    workers: Vec<WorkerState>,
    estimated: Duration,
    last_update: Instant,
}

/// Thread-safe progress tracker with a rough ETA.
///
/// The ETA is derived from worker 0 only: the time it took for its last
/// scanline, times the scanlines it has left. All workers render the same
/// frame with similar budgets, so worker 0 stands in for the rest.
pub struct Progress {
    state: Mutex<ProgressState>,
    total_lines: u32,
    echo: bool,
}

impl Progress {
    /// Create a tracker for `workers` workers rendering `total_lines` scanlines.
    ///
    /// With `echo` set, every update rewrites a status line on stderr.
    pub fn new(workers: usize, total_lines: u32, echo: bool) -> Self {
        Self {
            state: Mutex::new(ProgressState {
                workers: vec![WorkerState::Idle; workers],
                estimated: Duration::ZERO,
                last_update: Instant::now(),
            }),
            total_lines,
            echo,
        }
    }

    fn lock(&self) -> MutexGuard<'_, ProgressState> {
        // The state is purely observational; a panicked worker must not
        // take reporting down with it.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Mark a worker as started.
    pub fn start(&self, worker: usize) {
        let mut state = self.lock();
        if worker == 0 {
            state.last_update = Instant::now();
        }
        if let Some(slot) = state.workers.get_mut(worker) {
            *slot = WorkerState::Rendering {
                lines_left: self.total_lines,
            };
        }
    }

    /// Record that `worker` has `lines_left` scanlines remaining.
    pub fn update(&self, worker: usize, lines_left: u32) {
        let mut state = self.lock();

        if worker == 0 {
            let now = Instant::now();
            let per_line = now.duration_since(state.last_update);
            state.estimated = per_line * lines_left;
            state.last_update = now;
        }

        if let Some(slot) = state.workers.get_mut(worker) {
            *slot = if lines_left == 0 {
                WorkerState::Done
            } else {
                WorkerState::Rendering { lines_left }
            };
        }

        if self.echo {
            self.print(&state);
        }
    }

    /// Copy out the current state.
    pub fn snapshot(&self) -> ProgressSnapshot {
        let state = self.lock();
        ProgressSnapshot {
            workers: state.workers.clone(),
            estimated: state.estimated,
        }
    }

    /// Whether every worker has finished.
    pub fn is_done(&self) -> bool {
        self.lock()
            .workers
            .iter()
            .all(|state| *state == WorkerState::Done)
    }

    /// Terminate the status line.
    pub fn finish(&self) {
        if self.echo {
            eprintln!("\nDone.");
        }
    }

    fn print(&self, state: &ProgressState) {
        let line = format_status(
            &lines_left(&state.workers, self.total_lines),
            state.estimated,
        );

        let mut stderr = std::io::stderr().lock();
        // Best effort; a closed stderr must not stop the render
        let _ = write!(stderr, "\r{line}");
        let _ = stderr.flush();
    }
}

/// Status line body, e.g. `Scanlines remaining: 12 11 Estimated: 0.42 minutes`.
pub fn format_status(lines_left: &[u32], estimated: Duration) -> String {
    let mut line = String::from("Scanlines remaining: ");
    for left in lines_left {
        line.push_str(&left.to_string());
        line.push(' ');
    }
    line.push_str(&format!(
        "Estimated: {:.2} minutes",
        estimated.as_secs_f64() / 60.0
    ));
    line
}
