use rand::prelude::*;

use sched_model::core::state::{ProcessTable, Ticks};
use sched_model::sim::{self, ProcessSpec};
use sched_model::Algorithm;

fn synthetic_workload(seed: u64, count: usize) -> Vec<ProcessSpec> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut specs: Vec<ProcessSpec> = (0..count)
        .map(|_| {
            let burst_count = rng.random_range(1..=3);
            let cpu_bursts = (0..burst_count).map(|_| rng.random_range(1..10)).collect();
            let io_bursts = (0..burst_count - 1).map(|_| rng.random_range(1..5)).collect();
            ProcessSpec {
                arrival_time: rng.random_range(0..40),
                cpu_bursts,
                io_bursts,
            }
        })
        .collect();
    specs.sort_by_key(|spec| spec.arrival_time);
    specs
}

fn outcomes(table: &ProcessTable) -> Vec<(usize, Ticks, Ticks, Option<Ticks>)> {
    table
        .processes()
        .map(|p| (p.id, p.turnaround_time, p.waiting_time, p.completion_time))
        .collect()
}

#[test]
fn reset_and_rerun_is_deterministic() {
    for algorithm in Algorithm::ALL {
        let mut table = sim::load(synthetic_workload(7, 30));

        let first = sim::run(&mut table, algorithm);
        let snapshot = outcomes(&table);

        table.reset();
        let second = sim::run(&mut table, algorithm);
        assert_eq!(outcomes(&table), snapshot, "{algorithm} diverged on rerun");

        let a = first.summary.unwrap();
        let b = second.summary.unwrap();
        assert_eq!(a.completed, b.completed);
        assert_eq!(a.avg_turnaround, b.avg_turnaround);
        assert_eq!(a.avg_waiting, b.avg_waiting);
        assert_eq!(a.max_turnaround, b.max_turnaround);
        assert_eq!(a.max_waiting, b.max_waiting);
    }
}

#[test]
fn reset_isolates_policies_from_each_other() {
    let specs = synthetic_workload(11, 20);

    let mut reused = sim::load(specs.clone());
    sim::run(&mut reused, Algorithm::Fifo);
    reused.reset();
    sim::run(&mut reused, Algorithm::SjfPreemptive);

    let mut fresh = sim::load(specs);
    sim::run(&mut fresh, Algorithm::SjfPreemptive);

    assert_eq!(outcomes(&reused), outcomes(&fresh));
}

#[test]
fn single_process_workloads_never_wait() {
    for algorithm in Algorithm::ALL {
        let mut table = sim::load(vec![ProcessSpec {
            arrival_time: 5,
            cpu_bursts: vec![6],
            io_bursts: vec![],
        }]);
        let report = sim::run(&mut table, algorithm);
        let summary = report.summary.unwrap();
        assert_eq!(summary.completed, 1);

        let process = table.processes().next().unwrap();
        assert_eq!(process.waiting_time, 0, "{algorithm} charged waiting time");
        assert_eq!(process.turnaround_time, process.total_cpu());
        assert_eq!(process.completion_time, Some(11));
    }
}

#[test]
fn zero_burst_processes_complete_under_every_policy() {
    for algorithm in Algorithm::ALL {
        let mut table = sim::load(vec![
            ProcessSpec {
                arrival_time: 0,
                cpu_bursts: vec![],
                io_bursts: vec![],
            },
            ProcessSpec {
                arrival_time: 1,
                cpu_bursts: vec![3],
                io_bursts: vec![],
            },
        ]);
        let report = sim::run(&mut table, algorithm);
        assert_eq!(report.summary.unwrap().completed, 2, "{algorithm} lost a process");
        assert!(table.processes().all(|p| p.is_completed()));
    }
}

#[test]
fn io_bursts_do_not_influence_any_policy() {
    for algorithm in Algorithm::ALL {
        let specs = synthetic_workload(23, 15);
        let stripped: Vec<ProcessSpec> = specs
            .iter()
            .cloned()
            .map(|mut spec| {
                spec.io_bursts.clear();
                spec
            })
            .collect();

        let mut with_io = sim::load(specs);
        sim::run(&mut with_io, algorithm);
        let mut without_io = sim::load(stripped);
        sim::run(&mut without_io, algorithm);

        assert_eq!(outcomes(&with_io), outcomes(&without_io));
    }
}

#[test]
fn partitioned_runs_match_isolated_subset_runs() {
    for algorithm in [Algorithm::Fifo, Algorithm::Cfs] {
        let specs = synthetic_workload(31, 12);

        let mut table = sim::load(specs.clone());
        let report = sim::run_partitioned(&mut table, algorithm, 2);

        for cpu in 0..2 {
            // The subset table re-ids its processes, but relative order (and
            // therefore tie-breaking) is preserved
            let subset: Vec<ProcessSpec> = specs
                .iter()
                .enumerate()
                .filter(|(index, _)| index % 2 == cpu)
                .map(|(_, spec)| spec.clone())
                .collect();
            let mut isolated = sim::load(subset);
            let isolated_report = sim::run(&mut isolated, algorithm);

            let partitioned: Vec<(Ticks, Ticks, Option<Ticks>)> = table
                .processes()
                .filter(|p| p.id % 2 == cpu)
                .map(|p| (p.turnaround_time, p.waiting_time, p.completion_time))
                .collect();
            let alone: Vec<(Ticks, Ticks, Option<Ticks>)> = isolated
                .processes()
                .map(|p| (p.turnaround_time, p.waiting_time, p.completion_time))
                .collect();
            assert_eq!(partitioned, alone, "{algorithm} processor {cpu} diverged");

            let partitioned_summary = report.per_processor[cpu].as_ref().unwrap();
            let isolated_summary = isolated_report.summary.unwrap();
            assert_eq!(partitioned_summary.completed, isolated_summary.completed);
            assert_eq!(partitioned_summary.max_turnaround, isolated_summary.max_turnaround);
            assert_eq!(partitioned_summary.max_waiting, isolated_summary.max_waiting);
        }
    }
}

#[test]
fn global_partitioned_metrics_cover_the_whole_workload() {
    let mut table = sim::load(synthetic_workload(43, 17));
    let report = sim::run_partitioned(&mut table, Algorithm::Sjf, 2);
    let global = report.global.unwrap();
    assert_eq!(global.completed, 17);

    let per: usize = report
        .per_processor
        .iter()
        .map(|summary| summary.as_ref().map_or(0, |s| s.completed))
        .sum();
    assert_eq!(per, 17);

    let max_turnaround = table.processes().map(|p| p.turnaround_time).max().unwrap();
    assert_eq!(global.max_turnaround, max_turnaround);
}

#[test]
fn fifo_and_sjf_agree_when_arrivals_serialize_them() {
    let specs = vec![
        ProcessSpec {
            arrival_time: 0,
            cpu_bursts: vec![5],
            io_bursts: vec![],
        },
        ProcessSpec {
            arrival_time: 1,
            cpu_bursts: vec![3],
            io_bursts: vec![],
        },
    ];

    let mut fifo = sim::load(specs.clone());
    sim::run(&mut fifo, Algorithm::Fifo);
    let mut sjf = sim::load(specs);
    sim::run(&mut sjf, Algorithm::Sjf);

    assert_eq!(outcomes(&fifo), outcomes(&sjf));
}
