use std::env;
use std::fs;
use std::process::ExitCode;

use anyhow::{Context, Result};

use sched_model::core::MetricsSummary;
use sched_model::sim::{self, ProcessSpec};
use sched_model::{Algorithm, Ticks};

fn main() -> ExitCode {
    env_logger::Builder::from_default_env().init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 || args.len() > 4 {
        eprintln!(
            "Usage: {} <scheduling-algorithm> <path-to-workload-description-file> [num-processors]",
            args.first().map(String::as_str).unwrap_or("sched_model")
        );
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<()> {
    let algorithm: Algorithm = args[1].parse()?;
    let input = fs::read_to_string(&args[2])
        .with_context(|| format!("reading workload file {}", args[2]))?;
    let mut table = sim::load(parse_workload(&input)?);

    match args.get(3) {
        None => {
            let report = sim::run(&mut table, algorithm);
            print_summary(algorithm.label(), report.summary.as_ref());
        }
        Some(raw) => {
            let num_processors: usize = raw
                .parse()
                .ok()
                .filter(|&n| n > 0)
                .with_context(|| format!("num-processors must be a positive integer, got {raw:?}"))?;
            let report = sim::run_partitioned(&mut table, algorithm, num_processors);
            if algorithm == Algorithm::Fifo {
                for (id, summary) in report.per_processor.iter().enumerate() {
                    print_processor_block(id, summary.as_ref());
                }
            }
            print_summary(algorithm.label(), report.global.as_ref());
        }
    }

    Ok(())
}

// One process per line: arrival time, then alternating CPU and I/O burst
// values, terminated by -1 (end of line also terminates; a trailing unpaired
// value is a CPU burst). Blank lines are skipped.
fn parse_workload(input: &str) -> Result<Vec<ProcessSpec>> {
    let mut specs = Vec::new();
    for (lineno, line) in input.lines().enumerate() {
        let mut tokens = line.split_whitespace();
        let Some(first) = tokens.next() else { continue };
        let arrival_time = parse_value(first, lineno)?;

        let mut cpu_bursts = Vec::new();
        let mut io_bursts = Vec::new();
        loop {
            let Some(token) = tokens.next() else { break };
            if token == "-1" {
                break;
            }
            cpu_bursts.push(parse_value(token, lineno)?);

            let Some(token) = tokens.next() else { break };
            if token == "-1" {
                break;
            }
            io_bursts.push(parse_value(token, lineno)?);
        }

        specs.push(ProcessSpec {
            arrival_time,
            cpu_bursts,
            io_bursts,
        });
    }
    Ok(specs)
}

fn parse_value(token: &str, lineno: usize) -> Result<Ticks> {
    token.parse::<Ticks>().ok().with_context(|| {
        format!(
            "line {}: time values must be non-negative integers, got {token:?}",
            lineno + 1
        )
    })
}

fn print_summary(label: &str, summary: Option<&MetricsSummary>) {
    let Some(summary) = summary else {
        println!("{label}: no processes completed");
        return;
    };
    println!("{label} Average Turnaround Time: {}", summary.avg_turnaround);
    println!("{label} Max Turnaround Time: {}", summary.max_turnaround);
    println!("{label} Average Waiting Time: {}", summary.avg_waiting);
    println!("{label} Max Waiting Time: {}", summary.max_waiting);
    println!(
        "{label} Throughput: {} processes per second",
        summary.throughput
    );
    println!(
        "{label} Simulator Run Time: {} seconds",
        summary.run_time.as_secs_f64()
    );
}

fn print_processor_block(id: usize, summary: Option<&MetricsSummary>) {
    println!("Processor {id} - FIFO Metrics:");
    match summary {
        None => println!("no processes completed"),
        Some(summary) => {
            println!("Average Turnaround Time: {}", summary.avg_turnaround);
            println!("Max Turnaround Time: {}", summary.max_turnaround);
            println!("Average Waiting Time: {}", summary.avg_waiting);
            println!("Max Waiting Time: {}", summary.max_waiting);
            println!(
                "Throughput: {} processes per second",
                summary.throughput
            );
        }
    }
    println!("----------------------------------");
}
