pub mod counters;
pub mod cpu;
pub mod kill;
pub mod process;
pub mod snapshot;
pub mod sources;

use sysinfo::{CpuRefreshKind, RefreshKind, System};

/// Number of logical cores, queried once at startup. Never less than 1.
pub fn logical_cores() -> usize {
    let sys = System::new_with_specifics(RefreshKind::nothing().with_cpu(CpuRefreshKind::nothing()));
    let count = sys.cpus().len();
    if count == 0 {
        tracing::debug!("core count unavailable, assuming 1");
    }
    count.max(1)
}
