//! Benchmarks for request classification and model routing.
//!
//! Benchmark targets:
//! - Signal analysis: <50µs for long prompts
//! - Model selection: <100µs including classification

// Criterion macros generate items without docs - this is expected for benchmarks
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use std::sync::Arc;
use std::time::Duration;

use agentic_router::classifier::{self, RequestSignals};
use agentic_router::{ModelRegistry, ModelRouter};

const SHORT_PROMPT: &str = "quickly fix this";
const MEDIUM_PROMPT: &str = "explain this complex algorithm in detail and show the exact steps";
const LONG_PROMPT: &str = "I'm trying to figure out how the scheduler in our service decides \
    which worker handles a job. Can you explain the architecture, walk through the code in \
    src/scheduler.rs, run the tests, and suggest a refactor that keeps production behavior \
    exactly the same while making the design easier to reason about?";

fn bench_signal_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("signal_analysis");
    group.measurement_time(Duration::from_secs(5));

    for (name, prompt) in [
        ("short", SHORT_PROMPT),
        ("medium", MEDIUM_PROMPT),
        ("long", LONG_PROMPT),
    ] {
        group.throughput(Throughput::Bytes(prompt.len() as u64));
        group.bench_with_input(BenchmarkId::new("analyze", name), prompt, |b, p| {
            b.iter(|| RequestSignals::analyze(black_box(p)));
        });
    }

    group.bench_function("extract_topics_long", |b| {
        b.iter(|| classifier::extract_topics(black_box(LONG_PROMPT)));
    });

    group.finish();
}

fn bench_model_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("model_selection");
    let router = ModelRouter::new(Arc::new(ModelRegistry::builtin()));

    for max in [1usize, 3, 7] {
        group.bench_with_input(BenchmarkId::new("select_models", max), &max, |b, &max| {
            b.iter(|| router.select_models(black_box(LONG_PROMPT), Some(150_000), max));
        });
    }

    let signals = RequestSignals::analyze(LONG_PROMPT);
    group.bench_function("select_for_signals", |b| {
        b.iter(|| router.select_for_signals(black_box(&signals), None, 3));
    });

    group.finish();
}

criterion_group!(benches, bench_signal_analysis, bench_model_selection);
criterion_main!(benches);
