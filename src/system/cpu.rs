use super::counters::CpuSnapshot;

/// Utilization between two counter snapshots, in percent of the whole machine.
///
/// Deltas saturate at zero, so a counter reset between samples reads as idle
/// rather than wrapping around.
pub fn estimate_usage(prev: &CpuSnapshot, curr: &CpuSnapshot) -> f64 {
    let total_delta = curr.total().saturating_sub(prev.total());
    let idle_delta = curr.idle_all().saturating_sub(prev.idle_all());
    if total_delta == 0 {
        return 0.0;
    }
    let busy = 1.0 - idle_delta as f64 / total_delta as f64;
    (busy * 100.0).clamp(0.0, 100.0)
}
