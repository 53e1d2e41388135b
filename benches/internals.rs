use chrono::Utc;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use sweepmin::display;
use sweepmin::errors::SweepError;
use sweepmin::parse;
use sweepmin::sweep::{self, SweepPlan};
use sweepmin::trial;
use sweepmin::types::{GroupResult, SweepReport, TrialSpec};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Raw benchmark output: `noise` build lines followed by one timing line per
/// problem size.
fn make_output(noise: usize, seconds: f64) -> Vec<String> {
    let mut lines: Vec<String> = (0..noise)
        .map(|i| format!("[javac] Compiling source file {} of {}", i, noise))
        .collect();
    lines.push(format!(
        "Section3:MonteCarlo:Run:SizeA\t{:?} (s) \t 81234.5\t (Samples/s)",
        seconds / 10.0
    ));
    lines.push(format!(
        "Section3:MonteCarlo:Run:SizeB\t{:?} (s) \t 8123.45\t (Samples/s)",
        seconds
    ));
    lines
}

fn make_groups(plan: &SweepPlan) -> Vec<GroupResult> {
    plan.specs()
        .enumerate()
        .map(|(i, spec)| GroupResult {
            cutoff: spec.cutoff,
            procs: spec.procs,
            size: spec.size,
            min_seconds: Some(1.0 + i as f64 / 100.0),
            trials: vec![1.0 + i as f64 / 100.0; plan.repeats],
            error: None,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Benchmarks: parse
// ---------------------------------------------------------------------------

fn bench_extract_timing(c: &mut Criterion) {
    let inputs = [
        (
            "jgf_timer",
            "Section3:MonteCarlo:Run:SizeB\t12.345678 (s) \t 810.37274\t (Samples/s)",
        ),
        ("flush", "Section3:Run:SizeB time was:  0123.456789(s)"),
        (
            "scientific",
            "Section3:MonteCarlo:Run:SizeA\t4.5E-4 (s) \t 1.0E7\t (Samples/s)",
        ),
    ];

    let mut group = c.benchmark_group("extract_timing");
    for (name, input) in &inputs {
        group.bench_with_input(BenchmarkId::new("input", name), input, |b, s| {
            b.iter(|| parse::extract_timing(s).unwrap());
        });
    }
    group.finish();
}

fn bench_timings_for_marker(c: &mut Criterion) {
    let mut group = c.benchmark_group("timings_for_marker");
    for &noise in &[0, 50, 500, 5000] {
        let lines = make_output(noise, 1.5);
        group.bench_with_input(BenchmarkId::from_parameter(noise), &lines, |b, lines| {
            b.iter(|| parse::timings_for_marker(lines, "Run:SizeB").unwrap());
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmarks: trial and sweep
// ---------------------------------------------------------------------------

fn bench_min_timing(c: &mut Criterion) {
    let spec = TrialSpec {
        cutoff: 1024,
        procs: 7,
        size: 1,
    };
    let outputs: Vec<Vec<String>> = (0..5).map(|i| make_output(20, 3.0 - i as f64 * 0.25)).collect();

    c.bench_function("min_timing", |b| {
        b.iter(|| {
            let mut run = 0;
            let mut runner = |_spec: &TrialSpec| {
                let lines = outputs[run % outputs.len()].clone();
                run += 1;
                Ok::<_, SweepError>(lines)
            };
            trial::min_timing(&mut runner, &spec, trial::DEFAULT_REPEATS).unwrap()
        });
    });
}

fn bench_full_sweep(c: &mut Criterion) {
    let plan = SweepPlan::default();
    let output = make_output(20, 2.0);

    c.bench_function("run_sweep_default_plan", |b| {
        b.iter(|| {
            let mut runner = |_spec: &TrialSpec| Ok::<_, SweepError>(output.clone());
            sweep::run_sweep(&mut runner, &plan, |_| {}).unwrap()
        });
    });
}

// ---------------------------------------------------------------------------
// Benchmarks: display
// ---------------------------------------------------------------------------

fn bench_display(c: &mut Criterion) {
    let plan = SweepPlan::default();
    let groups = make_groups(&plan);
    let report = SweepReport {
        generated_at: Utc::now(),
        command: "make test".to_string(),
        repeats: plan.repeats,
        size: plan.size,
        groups: groups.clone(),
    };

    let mut group = c.benchmark_group("display");
    group.bench_function("text_lines", |b| {
        b.iter(|| {
            groups
                .iter()
                .map(display::format_group)
                .collect::<Vec<_>>()
        });
    });
    group.bench_function("json", |b| {
        b.iter(|| display::format_json(&report).unwrap());
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_extract_timing,
    bench_timings_for_marker,
    bench_min_timing,
    bench_full_sweep,
    bench_display,
);
criterion_main!(benches);
