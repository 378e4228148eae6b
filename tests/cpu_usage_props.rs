use proptest::prelude::*;
use sysmon::system::counters::CpuSnapshot;
use sysmon::system::cpu::estimate_usage;

fn snapshot(fields: [u64; 8]) -> CpuSnapshot {
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

fn add(base: [u64; 8], delta: [u64; 8]) -> [u64; 8] {
    let mut out = base;
    for (o, d) in out.iter_mut().zip(delta) {
        *o += d;
    }
    out
}

proptest! {
    #[test]
    fn non_decreasing_counters_stay_in_range(
        base in prop::array::uniform8(0u64..1_000_000_000),
        delta in prop::array::uniform8(0u64..1_000_000),
    ) {
        let prev = snapshot(base);
        let curr = snapshot(add(base, delta));
        let usage = estimate_usage(&prev, &curr);
        prop_assert!((0.0..=100.0).contains(&usage), "usage {} out of range", usage);
    }

    #[test]
    fn unchanged_total_is_exactly_zero(
        base in prop::array::uniform8(0u64..1_000_000_000),
    ) {
        let snap = snapshot(base);
        prop_assert_eq!(estimate_usage(&snap, &snap), 0.0);
    }

    #[test]
    fn arbitrary_resets_never_escape_range(
        a in prop::array::uniform8(0u64..1_000_000_000),
        b in prop::array::uniform8(0u64..1_000_000_000),
    ) {
        let usage = estimate_usage(&snapshot(a), &snapshot(b));
        prop_assert!((0.0..=100.0).contains(&usage), "usage {} out of range", usage);
    }

    #[test]
    fn idle_only_growth_is_zero_usage(
        base in prop::array::uniform8(0u64..1_000_000_000),
        idle in 1u64..1_000_000,
    ) {
        let prev = snapshot(base);
        let mut next = base;
        next[3] += idle;
        prop_assert_eq!(estimate_usage(&prev, &snapshot(next)), 0.0);
    }
}
