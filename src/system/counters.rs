use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use serde::Serialize;

/// Cumulative CPU time buckets as exposed by the kernel, in clock ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuSnapshot {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
    pub steal: u64,
}

impl CpuSnapshot {
    /// Sum of all buckets, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        [
            self.user,
            self.nice,
            self.system,
            self.idle,
            self.iowait,
            self.irq,
            self.softirq,
            self.steal,
        ]
        .into_iter()
        .fold(0, u64::saturating_add)
    }

    pub fn idle_all(&self) -> u64 {
        self.idle.saturating_add(self.iowait)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MemoryStat {
    pub total_kb: u64,
    pub available_kb: u64,
}

impl MemoryStat {
    pub fn used_percent(&self) -> f64 {
        if self.total_kb == 0 {
            return 0.0;
        }
        let used = self.total_kb.saturating_sub(self.available_kb);
        used as f64 / self.total_kb as f64 * 100.0
    }
}

#[derive(Debug, Clone)]
pub struct CounterSources {
    pub cpu_stat: PathBuf,
    pub meminfo: PathBuf,
}

impl Default for CounterSources {
    fn default() -> Self {
        Self {
            cpu_stat: PathBuf::from("/proc/stat"),
            meminfo: PathBuf::from("/proc/meminfo"),
        }
    }
}

impl CounterSources {
    /// Aggregate CPU counters from the first line of the stat source.
    /// Returns a zero snapshot when the source is missing or malformed.
    pub fn read_cpu_counters(&self) -> CpuSnapshot {
        let file = match File::open(&self.cpu_stat) {
            Ok(file) => file,
            Err(err) => {
                tracing::debug!(path = %self.cpu_stat.display(), %err, "cpu counters unavailable");
                return CpuSnapshot::default();
            }
        };
        let mut line = String::new();
        if let Err(err) = BufReader::new(file).read_line(&mut line) {
            tracing::debug!(path = %self.cpu_stat.display(), %err, "cpu counters unreadable");
            return CpuSnapshot::default();
        }
        parse_cpu_line(&line)
    }

    /// Total and available memory. Zero totals mean "no data".
    pub fn read_memory(&self) -> MemoryStat {
        match File::open(&self.meminfo) {
            Ok(file) => read_meminfo(BufReader::new(file)),
            Err(err) => {
                tracing::debug!(path = %self.meminfo.display(), %err, "meminfo unavailable");
                MemoryStat::default()
            }
        }
    }
}

pub fn parse_cpu_line(line: &str) -> CpuSnapshot {
    let mut tokens = line.split_whitespace();
    if tokens.next().is_none() {
        return CpuSnapshot::default();
    }

    let mut fields = [0u64; 8];
    for (slot, token) in fields.iter_mut().zip(tokens) {
        match token.parse() {
            Ok(value) => *slot = value,
            Err(_) => return CpuSnapshot::default(),
        }
    }

    let [user, nice, system, idle, iowait, irq, softirq, steal] = fields;
    CpuSnapshot {
        user,
        nice,
        system,
        idle,
        iowait,
        irq,
        softirq,
        steal,
    }
}

pub fn parse_meminfo(content: &str) -> MemoryStat {
    read_meminfo(content.as_bytes())
}

fn read_meminfo<R: BufRead>(reader: R) -> MemoryStat {
    let mut total = None;
    let mut available = None;

    let parse_kb = |line: &str| -> u64 {
        line.split_whitespace()
            .nth(1)
            .and_then(|s| s.parse().ok())
            .unwrap_or(0)
    };

    for line in reader.lines() {
        let Ok(line) = line else { break };
        if line.starts_with("MemTotal:") {
            total = Some(parse_kb(&line));
        } else if line.starts_with("MemAvailable:") {
            available = Some(parse_kb(&line));
        }
        if total.is_some() && available.is_some() {
            break;
        }
    }

    MemoryStat {
        total_kb: total.unwrap_or(0),
        available_kb: available.unwrap_or(0),
    }
}
