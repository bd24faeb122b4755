use std::time::Duration;

use log::debug;
use rustc_hash::FxHashMap;

use crate::core::metrics::{Metrics, MetricsSummary};
use crate::core::state::{CpuId, ProcKey, ProcessTable, Ticks};
use crate::sched::Algorithm;

// A processor owns its clock and the handles statically assigned to it.
// Nothing is shared across processors once the partition is made.
#[derive(Debug)]
pub struct Processor {
    pub id: CpuId,
    pub clock: Ticks,
    pub assigned: Vec<ProcKey>,
}

// Workload index modulo processor count, in workload order. Arrival times
// play no part in the assignment.
pub fn partition(table: &ProcessTable, num_processors: usize) -> Vec<Processor> {
    assert!(num_processors > 0, "partitioning requires at least one processor");

    let mut assignment: FxHashMap<ProcKey, CpuId> = FxHashMap::default();
    for (index, &key) in table.keys().iter().enumerate() {
        assignment.insert(key, index % num_processors);
    }

    let mut processors: Vec<Processor> = (0..num_processors)
        .map(|id| Processor {
            id,
            clock: 0,
            assigned: Vec::new(),
        })
        .collect();
    for &key in table.keys() {
        processors[assignment[&key]].assigned.push(key);
    }

    debug_assert_eq!(
        processors.iter().map(|p| p.assigned.len()).sum::<usize>(),
        table.len(),
        "partition must cover the workload exactly"
    );

    processors
}

#[derive(Debug, Clone)]
pub struct PartitionedReport {
    pub algorithm: Algorithm,
    pub global: Option<MetricsSummary>,
    pub per_processor: Vec<Option<MetricsSummary>>,
}

pub fn run_partitioned(
    table: &mut ProcessTable,
    algorithm: Algorithm,
    num_processors: usize,
) -> PartitionedReport {
    let mut global = Metrics::new();
    let mut total_elapsed = Duration::ZERO;
    let mut per_processor = Vec::with_capacity(num_processors);

    for mut processor in partition(table, num_processors) {
        debug!(
            "processor {}: {} processes assigned",
            processor.id,
            processor.assigned.len()
        );
        let (metrics, elapsed) =
            super::run_assigned(table, algorithm, &processor.assigned, &mut processor.clock);
        global.merge(&metrics);
        total_elapsed += elapsed;
        per_processor.push(metrics.summarize(elapsed));
    }

    PartitionedReport {
        algorithm,
        global: global.summarize(total_elapsed),
        per_processor,
    }
}
