use slotmap::{SlotMap, new_key_type};

// Workload-order index; stable for the process's lifetime
pub type ProcessId = usize;
pub type CpuId = usize;
pub type Ticks = u64;

new_key_type! {
    pub struct ProcKey;
}

// KeyedPriorityQueue is a max-heap, so RunKey's Ord is reversed: the queue's
// greatest entry is the process with the least remaining time. Ties fall to
// the lower process id, so two processes holding the same remaining-time
// value never collapse onto a single entry.
#[derive(PartialEq, Eq, Hash, Debug, Copy, Clone)]
pub struct RunKey {
    pub remaining: Ticks,
    pub id: ProcessId,
}

impl PartialOrd for RunKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RunKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .remaining
            .cmp(&self.remaining)
            .then_with(|| other.id.cmp(&self.id))
    }
}

#[derive(Debug, Clone)]
pub struct Process {
    pub id: ProcessId,
    pub arrival_time: Ticks,
    pub cpu_bursts: Vec<Ticks>,
    pub io_bursts: Vec<Ticks>,
    pub remaining_time: Ticks,
    pub turnaround_time: Ticks,
    pub waiting_time: Ticks,
    pub completion_time: Option<Ticks>,
}

impl Process {
    fn new(
        id: ProcessId,
        arrival_time: Ticks,
        cpu_bursts: Vec<Ticks>,
        io_bursts: Vec<Ticks>,
    ) -> Self {
        let remaining_time = cpu_bursts.first().copied().unwrap_or(0);
        Self {
            id,
            arrival_time,
            cpu_bursts,
            io_bursts,
            remaining_time,
            turnaround_time: 0,
            waiting_time: 0,
            completion_time: None,
        }
    }

    pub fn total_cpu(&self) -> Ticks {
        self.cpu_bursts.iter().sum()
    }

    pub fn is_completed(&self) -> bool {
        self.completion_time.is_some()
    }

    // Finalize at `now`. Remaining time is driven to 0 here; waiting time is
    // the caller's to set, since its definition differs per policy.
    pub fn finish(&mut self, now: Ticks) {
        debug_assert!(
            self.completion_time.is_none(),
            "process {} completed twice",
            self.id
        );
        self.remaining_time = 0;
        self.turnaround_time = now.saturating_sub(self.arrival_time);
        self.completion_time = Some(now);
    }

    // Preemptive policies derive waiting time from the finalized turnaround
    // rather than accumulating it tick by tick
    pub fn derive_waiting(&mut self) {
        self.waiting_time = self.turnaround_time.saturating_sub(self.total_cpu());
    }

    // Required before handing the same record to another policy invocation
    pub fn reset(&mut self) {
        self.remaining_time = self.cpu_bursts.first().copied().unwrap_or(0);
        self.turnaround_time = 0;
        self.waiting_time = 0;
        self.completion_time = None;
    }
}

// Arena of owned process records. Policies move ProcKey handles between
// their pool, ready structure and completion log; the records themselves
// never move.
#[derive(Debug, Default)]
pub struct ProcessTable {
    procs: SlotMap<ProcKey, Process>,
    order: Vec<ProcKey>,
}

impl ProcessTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        arrival_time: Ticks,
        cpu_bursts: Vec<Ticks>,
        io_bursts: Vec<Ticks>,
    ) -> ProcKey {
        let id = self.order.len();
        let key = self
            .procs
            .insert(Process::new(id, arrival_time, cpu_bursts, io_bursts));
        self.order.push(key);
        debug_assert_eq!(self.procs.len(), self.order.len(), "arena out of sync");
        key
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    // Handles in workload order
    pub fn keys(&self) -> &[ProcKey] {
        &self.order
    }

    pub fn process(&self, key: ProcKey) -> &Process {
        &self.procs[key]
    }

    pub fn process_mut(&mut self, key: ProcKey) -> &mut Process {
        &mut self.procs[key]
    }

    pub fn processes(&self) -> impl Iterator<Item = &Process> {
        self.order.iter().map(|&key| &self.procs[key])
    }

    pub fn reset(&mut self) {
        for (_, process) in &mut self.procs {
            process.reset();
        }
    }
}
