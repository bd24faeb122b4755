use rustc_hash::FxHashSet;

use crate::core::state::{ProcKey, ProcessTable};

// Post-run invariant checks, active in debug builds only. A policy run must
// complete every assigned process exactly once and leave every record
// finalized.
pub fn audit_run(table: &ProcessTable, assigned: &[ProcKey], completed: &[ProcKey]) {
    debug_assert_eq!(
        completed.len(),
        assigned.len(),
        "run must complete every assigned process"
    );

    let mut seen = FxHashSet::default();
    for &key in completed {
        debug_assert!(
            seen.insert(key),
            "process {} appears twice in the completion log",
            table.process(key).id
        );
    }

    for &key in assigned {
        let process = table.process(key);
        debug_assert!(
            seen.contains(&key),
            "assigned process {} missing from the completion log",
            process.id
        );
        debug_assert_eq!(
            process.remaining_time, 0,
            "completed process {} still owes service",
            process.id
        );
        match process.completion_time {
            Some(at) => debug_assert!(
                at >= process.arrival_time,
                "process {} completed before it arrived",
                process.id
            ),
            None => debug_assert!(false, "process {} was never finalized", process.id),
        }
    }
}
