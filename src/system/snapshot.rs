use chrono::{DateTime, Local};
use serde::Serialize;

use super::counters::{CounterSources, CpuSnapshot, MemoryStat};
use super::cpu::estimate_usage;
use super::process::{ProcessRow, ProcessSampler, ProcessSource};

/// Everything one frame shows about the host.
#[derive(Debug, Clone, Serialize)]
pub struct Sample {
    pub taken_at: DateTime<Local>,
    pub cpu_percent: f64,
    pub memory: MemoryStat,
    pub processes: Vec<ProcessRow>,
}

/// Owns the rolling CPU snapshot; the previous one lives only until the next
/// delta is taken.
pub struct Collector<S> {
    sources: CounterSources,
    sampler: ProcessSampler<S>,
    prev_cpu: CpuSnapshot,
}

impl<S: ProcessSource> Collector<S> {
    pub fn new(sources: CounterSources, sampler: ProcessSampler<S>) -> Self {
        let prev_cpu = sources.read_cpu_counters();
        Collector {
            sources,
            sampler,
            prev_cpu,
        }
    }

    pub fn sample(&mut self, requested_rows: usize) -> Sample {
        let curr = self.sources.read_cpu_counters();
        let cpu_percent = estimate_usage(&self.prev_cpu, &curr);
        self.prev_cpu = curr;

        let memory = self.sources.read_memory();
        let processes = self.sampler.sample(requested_rows);
        tracing::debug!(
            cpu_percent,
            mem_percent = memory.used_percent(),
            processes = processes.len(),
            "collected sample"
        );

        Sample {
            taken_at: Local::now(),
            cpu_percent,
            memory,
            processes,
        }
    }
}
