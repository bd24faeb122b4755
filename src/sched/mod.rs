pub mod cfs;
pub mod fifo;
pub mod sjf;
pub mod srt;

use std::fmt;
use std::str::FromStr;

use crate::core::state::{ProcKey, ProcessTable, Ticks};

pub use cfs::CfsPolicy;
pub use fifo::FifoPolicy;
pub use sjf::SjfPolicy;
pub use srt::SrtPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Fifo,
    Sjf,
    SjfPreemptive,
    Cfs,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Fifo,
        Algorithm::Sjf,
        Algorithm::SjfPreemptive,
        Algorithm::Cfs,
    ];

    // The token accepted on the command line
    pub fn selector(&self) -> &'static str {
        match self {
            Algorithm::Fifo => "FIFO",
            Algorithm::Sjf => "SJF",
            Algorithm::SjfPreemptive => "SJF-Preemptive",
            Algorithm::Cfs => "CFS",
        }
    }

    // The name used on report lines
    pub fn label(&self) -> &'static str {
        match self {
            Algorithm::Fifo => "FIFO",
            Algorithm::Sjf => "Non-Preemptive SJF",
            Algorithm::SjfPreemptive => "Preemptive SJF",
            Algorithm::Cfs => "CFS",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAlgorithm(pub String);

impl fmt::Display for UnknownAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown scheduling algorithm {:?} (expected FIFO, SJF, SJF-Preemptive or CFS)",
            self.0
        )
    }
}

impl std::error::Error for UnknownAlgorithm {}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.selector() == s)
            .ok_or_else(|| UnknownAlgorithm(s.to_string()))
    }
}

pub trait Policy {
    fn init() -> Self
    where
        Self: Sized;

    // Run `assigned` to completion, mutating the records in place and
    // advancing `clock`. Returns handles in completion order.
    fn run(
        &mut self,
        procs: &mut ProcessTable,
        assigned: &[ProcKey],
        clock: &mut Ticks,
    ) -> Vec<ProcKey>;
}

pub fn run_policy(
    algorithm: Algorithm,
    procs: &mut ProcessTable,
    assigned: &[ProcKey],
    clock: &mut Ticks,
) -> Vec<ProcKey> {
    match algorithm {
        Algorithm::Fifo => FifoPolicy::init().run(procs, assigned, clock),
        Algorithm::Sjf => SjfPolicy::init().run(procs, assigned, clock),
        Algorithm::SjfPreemptive => SrtPolicy::init().run(procs, assigned, clock),
        Algorithm::Cfs => CfsPolicy::init().run(procs, assigned, clock),
    }
}

// Move every pooled process that has arrived by `now` out of the pool.
// Pool order is preserved for the stragglers.
pub(crate) fn drain_arrivals(
    procs: &ProcessTable,
    pool: &mut Vec<ProcKey>,
    now: Ticks,
) -> Vec<ProcKey> {
    let mut arrived = Vec::new();
    pool.retain(|&key| {
        if procs.process(key).arrival_time <= now {
            arrived.push(key);
            false
        } else {
            true
        }
    });
    arrived
}

// With nothing ready, the next observable change is the earliest pooled
// arrival; jumping the clock there is equivalent to unit ticking through
// the idle span.
pub(crate) fn next_arrival(procs: &ProcessTable, pool: &[ProcKey]) -> Option<Ticks> {
    pool.iter().map(|&key| procs.process(key).arrival_time).min()
}
