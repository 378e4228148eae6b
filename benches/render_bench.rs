use chrono::Local;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use std::hint::black_box;
use sysmon::app::{App, SortMode};
use sysmon::system::counters::MemoryStat;
use sysmon::system::process::ProcessRow;
use sysmon::system::snapshot::Sample;
use sysmon::system::sources::parse_ps_line;
use sysmon::ui;
use sysmon::ui::render::{rank, render};
use sysmon::ui::theme::Theme;

fn make_rows(n: usize) -> Vec<ProcessRow> {
    (0..n)
        .map(|i| ProcessRow {
            pid: i as u32 + 1,
            name: format!("proc_{i}_with_a_fairly_long_name"),
            cpu_percent: ((i * 37) % 1000) as f64 / 10.0,
            mem_percent: ((i * 53) % 1000) as f64 / 10.0,
            rss_kb: ((n - i) as u64 + 1) * 1024,
        })
        .collect()
}

fn make_sample(n: usize) -> Sample {
    Sample {
        taken_at: Local::now(),
        cpu_percent: 42.0,
        memory: MemoryStat {
            total_kb: 16_384_000,
            available_kb: 8_000_000,
        },
        processes: make_rows(n),
    }
}

fn bench_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_50_500_2000");

    for size in [50usize, 500, 2000] {
        let rows = make_rows(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &rows, |b, rows| {
            b.iter(|| {
                black_box(rank(black_box(rows), SortMode::Cpu, 10));
                black_box(rank(black_box(rows), SortMode::Memory, 10));
            })
        });
    }

    group.finish();
}

fn bench_ps_parse(c: &mut Criterion) {
    let output: String = (0..500)
        .map(|i| format!("{:>6} worker_{i} {}.{} 0.{} {}\n", i + 1, i % 100, i % 10, i % 10, i * 64))
        .collect();

    c.bench_function("ps_parse_500", |b| {
        b.iter(|| {
            let parsed: Vec<_> = black_box(&output).lines().map(parse_ps_line).collect();
            black_box(parsed);
        })
    });
}

fn bench_frame_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_render_10_50_200");
    let theme = Theme::default();
    let sample = make_sample(500);

    for top_n in [10usize, 50, 200] {
        let app = App {
            top_n,
            ..App::default()
        };
        group.bench_with_input(BenchmarkId::from_parameter(top_n), &app, |b, app| {
            b.iter(|| {
                let backend = TestBackend::new(120, 60);
                let mut terminal = Terminal::new(backend).expect("bench terminal init failed");
                terminal
                    .draw(|frame| ui::draw(frame, render(black_box(app), &sample, &theme)))
                    .expect("bench draw failed");
                black_box(terminal.backend());
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_rank, bench_ps_parse, bench_frame_render);
criterion_main!(benches);
