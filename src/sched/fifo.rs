use super::Policy;
use crate::core::state::{ProcKey, ProcessTable, Ticks};

// Non-preemptive, strictly in assigned order. Assumes the workload is already
// sorted by arrival time and never re-sorts it.
pub struct FifoPolicy;

impl Policy for FifoPolicy {
    fn init() -> Self {
        Self
    }

    fn run(
        &mut self,
        procs: &mut ProcessTable,
        assigned: &[ProcKey],
        clock: &mut Ticks,
    ) -> Vec<ProcKey> {
        let mut completed = Vec::with_capacity(assigned.len());
        for &key in assigned {
            let process = procs.process_mut(key);
            if *clock < process.arrival_time {
                *clock = process.arrival_time;
            }
            process.waiting_time = clock.saturating_sub(process.arrival_time);
            // Every CPU burst runs back to back; I/O bursts never touch the clock
            *clock = clock.saturating_add(process.total_cpu());
            process.finish(*clock);
            completed.push(key);
        }
        completed
    }
}
