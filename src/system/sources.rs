use std::process::Command;
use std::time::Instant;

use sysinfo::{MINIMUM_CPU_UPDATE_INTERVAL, ProcessRefreshKind, ProcessesToUpdate, System};

use super::process::{ProcessSource, RawProcess};

/// Process table read through `sysinfo`. The `System` is kept between calls
/// because per-process CPU usage is computed from consecutive refreshes.
pub struct SysinfoSource {
    sys: System,
    last_refresh: Instant,
}

impl Default for SysinfoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoSource {
    pub fn new() -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_memory().with_cpu(),
        );
        SysinfoSource {
            sys,
            last_refresh: Instant::now(),
        }
    }

    /// Refreshes closer together than sysinfo's minimum interval produce
    /// meaningless per-process CPU, so the first listing after construction
    /// waits out the remainder.
    fn wait_for_cpu_interval(&self) {
        let elapsed = self.last_refresh.elapsed();
        if let Some(remaining) = MINIMUM_CPU_UPDATE_INTERVAL.checked_sub(elapsed)
            && !remaining.is_zero()
        {
            tracing::debug!(?remaining, "waiting for cpu measurement window");
            std::thread::sleep(remaining);
        }
    }
}

impl ProcessSource for SysinfoSource {
    fn list(&mut self, limit: usize) -> Vec<RawProcess> {
        self.wait_for_cpu_interval();
        self.sys.refresh_memory();
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_memory().with_cpu(),
        );
        self.last_refresh = Instant::now();

        let total_memory = self.sys.total_memory();
        let mut rows: Vec<RawProcess> = self
            .sys
            .processes()
            .iter()
            .map(|(pid, process)| {
                let memory = process.memory();
                let mem_percent = if total_memory > 0 {
                    memory as f64 / total_memory as f64 * 100.0
                } else {
                    0.0
                };
                RawProcess {
                    pid: Some(pid.as_u32()),
                    name: Some(process.name().to_string_lossy().to_string()),
                    cpu_percent: Some(process.cpu_usage() as f64),
                    mem_percent: Some(mem_percent),
                    rss_kb: Some(memory / 1024),
                }
            })
            .collect();

        rows.sort_by(|a, b| {
            let ca = a.cpu_percent.unwrap_or(0.0);
            let cb = b.cpu_percent.unwrap_or(0.0);
            cb.total_cmp(&ca)
        });
        rows.truncate(limit);
        rows
    }
}

/// Builds the provider named in configuration; unknown names fall back to
/// `sysinfo`.
pub fn source_from_config(provider: &str) -> Box<dyn ProcessSource> {
    match provider.trim().to_lowercase().as_str() {
        "ps" => Box::new(PsSource::default()),
        "sysinfo" => Box::new(SysinfoSource::new()),
        other => {
            tracing::warn!(provider = other, "unknown process provider, using sysinfo");
            Box::new(SysinfoSource::new())
        }
    }
}

/// Process table read from `ps` output.
pub struct PsSource {
    program: String,
}

impl Default for PsSource {
    fn default() -> Self {
        Self {
            program: "ps".to_string(),
        }
    }
}

impl PsSource {
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl ProcessSource for PsSource {
    fn list(&mut self, limit: usize) -> Vec<RawProcess> {
        let output = Command::new(&self.program)
            .args(["-eo", "pid,comm,pcpu,pmem,rss", "--no-headers", "--sort=-pcpu"])
            .output();
        let output = match output {
            Ok(output) if output.status.success() => output,
            Ok(output) => {
                tracing::warn!(status = %output.status, "ps exited unsuccessfully");
                return Vec::new();
            }
            Err(err) => {
                tracing::warn!(program = %self.program, %err, "failed to run process lister");
                return Vec::new();
            }
        };

        String::from_utf8_lossy(&output.stdout)
            .lines()
            .filter(|line| !line.trim().is_empty())
            .take(limit)
            .map(parse_ps_line)
            .collect()
    }
}

/// `pid comm pcpu pmem rss`; the command name is a single token.
pub fn parse_ps_line(line: &str) -> RawProcess {
    let mut fields = line.split_whitespace();
    RawProcess {
        pid: fields.next().and_then(|s| s.parse().ok()),
        name: fields.next().map(str::to_string),
        cpu_percent: fields.next().and_then(|s| s.parse().ok()),
        mem_percent: fields.next().and_then(|s| s.parse().ok()),
        rss_kb: fields.next().and_then(|s| s.parse().ok()),
    }
}
