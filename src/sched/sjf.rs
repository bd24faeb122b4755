use super::Policy;
use crate::core::state::{ProcKey, ProcessTable, Ticks};

// Non-preemptive shortest-job-first. Admission moves arrived processes from
// the pool into a ready list; the shortest remaining time runs to completion.
// Equal remaining times pick the process encountered first, in admission
// order.
pub struct SjfPolicy;

impl Policy for SjfPolicy {
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
            ready.extend(super::drain_arrivals(procs, &mut pool, *clock));

            if ready.is_empty() {
                *clock = super::next_arrival(procs, &pool).expect("idle with an empty pool");
                continue;
            }

            // min_by_key keeps the first of equal remaining times
            let slot = ready
                .iter()
                .enumerate()
                .min_by_key(|&(_, &key)| procs.process(key).remaining_time)
                .map(|(slot, _)| slot)
                .expect("ready list is non-empty");
            let key = ready.remove(slot);

            let process = procs.process_mut(key);
            process.waiting_time = clock.saturating_sub(process.arrival_time);
            *clock = clock.saturating_add(process.remaining_time);
            process.finish(*clock);
            completed.push(key);
        }

        completed
    }
}
