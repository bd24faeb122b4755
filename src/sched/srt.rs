use super::Policy;
use crate::core::state::{ProcKey, ProcessTable, Ticks};

// Preemptive shortest-remaining-time. One time unit per iteration: the
// minimum-remaining process runs for a single tick, then selection repeats
// from scratch, so a newly arrived shorter job preempts on the next tick.
pub struct SrtPolicy;

impl Policy for SrtPolicy {
    fn init() -> Self {
        Self
    }

    fn run(
        &mut self,
        procs: &mut ProcessTable,
        assigned: &[ProcKey],
        clock: &mut Ticks,
    ) -> Vec<ProcKey> {
        let mut pool = assigned.to_vec();
        let mut ready: Vec<ProcKey> = Vec::new();
        let mut completed = Vec::with_capacity(assigned.len());

        while !pool.is_empty() || !ready.is_empty() {
            for key in super::drain_arrivals(procs, &mut pool, *clock) {
                if procs.process(key).remaining_time == 0 {
                    // Nothing to run; completes the moment it is admitted
                    let process = procs.process_mut(key);
                    process.finish(*clock);
                    process.derive_waiting();
                    completed.push(key);
                } else {
                    ready.push(key);
                }
            }

            if ready.is_empty() {
                if let Some(at) = super::next_arrival(procs, &pool) {
                    *clock = at;
                }
                continue;
            }

            let slot = ready
                .iter()
                .enumerate()
                .min_by_key(|&(_, &key)| procs.process(key).remaining_time)
                .map(|(slot, _)| slot)
                .expect("ready list is non-empty");
            let key = ready[slot];

            let process = procs.process_mut(key);
            process.remaining_time -= 1;
            *clock = clock.saturating_add(1);

            if process.remaining_time == 0 {
                process.finish(*clock);
                process.derive_waiting();
                ready.remove(slot);
                completed.push(key);
            }
        }

        completed
    }
}
