pub mod multi;

use std::time::{Duration, Instant};

use log::debug;

use crate::core::metrics::{Metrics, MetricsSummary};
use crate::core::observer;
use crate::core::state::{ProcKey, ProcessTable, Ticks};
use crate::sched::{self, Algorithm};

pub use multi::{run_partitioned, PartitionedReport, Processor};

// One workload entry as handed over by the external parser. I/O bursts are
// recorded on the process but never consumed by any policy.
#[derive(Debug, Clone)]
pub struct ProcessSpec {
    pub arrival_time: Ticks,
    pub cpu_bursts: Vec<Ticks>,
    pub io_bursts: Vec<Ticks>,
}

pub fn load(specs: impl IntoIterator<Item = ProcessSpec>) -> ProcessTable {
    let mut table = ProcessTable::new();
    for spec in specs {
        table.insert(spec.arrival_time, spec.cpu_bursts, spec.io_bursts);
    }
    table
}

#[derive(Debug, Clone)]
pub struct Report {
    pub algorithm: Algorithm,
    pub summary: Option<MetricsSummary>,
}

pub fn run(table: &mut ProcessTable, algorithm: Algorithm) -> Report {
    let assigned = table.keys().to_vec();
    let mut clock: Ticks = 0;
    let (metrics, elapsed) = run_assigned(table, algorithm, &assigned, &mut clock);
    Report {
        algorithm,
        summary: metrics.summarize(elapsed),
    }
}

// Shared by the single-processor path and each processor of the partitioned
// path. Wall time covers the policy run only, not the metrics folding.
pub(crate) fn run_assigned(
    table: &mut ProcessTable,
    algorithm: Algorithm,
    assigned: &[ProcKey],
    clock: &mut Ticks,
) -> (Metrics, Duration) {
    let started = Instant::now();
    let completed = sched::run_policy(algorithm, table, assigned, clock);
    let elapsed = started.elapsed();

    observer::audit_run(table, assigned, &completed);

    let mut metrics = Metrics::new();
    for &key in &completed {
        metrics.record(table.process(key));
    }

    debug!(
        "{} completed {} processes at t={} in {:?}",
        algorithm,
        metrics.completed(),
        clock,
        elapsed
    );

    (metrics, elapsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_carries_the_algorithm_and_summary() {
        let mut table = load(vec![
            ProcessSpec {
                arrival_time: 0,
                cpu_bursts: vec![5],
                io_bursts: vec![],
            },
            ProcessSpec {
                arrival_time: 1,
                cpu_bursts: vec![3],
                io_bursts: vec![2],
            },
        ]);
        let report = run(&mut table, Algorithm::Fifo);
        let summary = report.summary.expect("two processes completed");
        assert_eq!(summary.completed, 2);
        assert!((summary.avg_turnaround - 6.0).abs() < 1e-9);
        assert_eq!(summary.max_waiting, 4);
    }

    #[test]
    fn empty_workload_yields_no_summary() {
        let mut table = load(Vec::new());
        let report = run(&mut table, Algorithm::Cfs);
        assert!(report.summary.is_none());
    }
}
