use std::time::Duration;

use average::{Estimate, Mean, Merge};

use crate::core::state::{Process, Ticks};

// Running aggregates over completed processes. Averages only materialize at
// summarize() time, and only when at least one process completed.
#[derive(Debug, Default)]
pub struct Metrics {
    turnaround: Mean,
    waiting: Mean,
    max_turnaround: Ticks,
    max_waiting: Ticks,
    completed: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSummary {
    pub completed: usize,
    pub avg_turnaround: f64,
    pub max_turnaround: Ticks,
    pub avg_waiting: f64,
    pub max_waiting: Ticks,
    // Completed processes per second of simulator wall time
    pub throughput: f64,
    pub run_time: Duration,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, process: &Process) {
        debug_assert!(
            process.is_completed(),
            "recording process {} before completion",
            process.id
        );
        self.turnaround.add(process.turnaround_time as f64);
        self.waiting.add(process.waiting_time as f64);
        self.max_turnaround = self.max_turnaround.max(process.turnaround_time);
        self.max_waiting = self.max_waiting.max(process.waiting_time);
        self.completed += 1;
    }

    pub fn merge(&mut self, other: &Metrics) {
        self.turnaround.merge(&other.turnaround);
        self.waiting.merge(&other.waiting);
        self.max_turnaround = self.max_turnaround.max(other.max_turnaround);
        self.max_waiting = self.max_waiting.max(other.max_waiting);
        self.completed += other.completed;
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    // None when nothing completed: averages over an empty run are undefined
    pub fn summarize(&self, run_time: Duration) -> Option<MetricsSummary> {
        if self.completed == 0 {
            return None;
        }
        let secs = run_time.as_secs_f64();
        let throughput = if secs > 0.0 {
            self.completed as f64 / secs
        } else {
            0.0
        };
        Some(MetricsSummary {
            completed: self.completed,
            avg_turnaround: self.turnaround.estimate(),
            max_turnaround: self.max_turnaround,
            avg_waiting: self.waiting.estimate(),
            max_waiting: self.max_waiting,
            throughput,
            run_time,
        })
    }
}
