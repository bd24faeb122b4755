use keyed_priority_queue::KeyedPriorityQueue;

use super::Policy;
use crate::core::state::{ProcKey, ProcessTable, RunKey, Ticks};

// Fair-ordering approximation: the same tick-by-tick model as preemptive
// SJF, but the ready set is an ordered queue keyed by current remaining time
// instead of a linear scan. The key carries the process id as a tie-break,
// so two processes holding the same remaining-time value stay individually
// tracked; ties run the lower id first.
pub struct CfsPolicy {
    ready: KeyedPriorityQueue<ProcKey, RunKey>,
}

impl CfsPolicy {
    fn enqueue(&mut self, procs: &ProcessTable, key: ProcKey) {
        let process = procs.process(key);
        self.ready.push(
            key,
            RunKey {
                remaining: process.remaining_time,
                id: process.id,
            },
        );
    }
}

impl Policy for CfsPolicy {
    fn init() -> Self {
        Self {
            ready: KeyedPriorityQueue::new(),
        }
    }

    fn run(
        &mut self,
        procs: &mut ProcessTable,
        assigned: &[ProcKey],
        clock: &mut Ticks,
    ) -> Vec<ProcKey> {
        let mut pool = assigned.to_vec();
        let mut completed = Vec::with_capacity(assigned.len());

        while !pool.is_empty() || !self.ready.is_empty() {
            for key in super::drain_arrivals(procs, &mut pool, *clock) {
                if procs.process(key).remaining_time == 0 {
                    let process = procs.process_mut(key);
                    process.finish(*clock);
                    process.derive_waiting();
                    completed.push(key);
                } else {
                    self.enqueue(procs, key);
                }
            }

            let (key, _) = match self.ready.pop() {
                Some(entry) => entry,
                None => {
                    if let Some(at) = super::next_arrival(procs, &pool) {
                        *clock = at;
                    }
                    continue;
                }
            };

            let process = procs.process_mut(key);
            process.remaining_time -= 1;
            *clock = clock.saturating_add(1);

            if process.remaining_time == 0 {
                process.finish(*clock);
                process.derive_waiting();
                completed.push(key);
            } else {
                // Re-key under the decremented remaining time
                let rekey = RunKey {
                    remaining: process.remaining_time,
                    id: process.id,
                };
                self.ready.push(key, rekey);
            }
        }

        completed
    }
}
