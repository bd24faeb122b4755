pub mod metrics;
pub mod observer;
pub mod state;

pub use metrics::{Metrics, MetricsSummary};
pub use state::{CpuId, ProcKey, Process, ProcessId, ProcessTable, RunKey, Ticks};
