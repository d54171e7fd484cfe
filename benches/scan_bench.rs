//! Log scanning performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use llm_error_glossary::models::Glossary;
use llm_error_glossary::services::scanner::scan_log;
use llm_error_glossary::services::updater::merge_matches;

const NOISE_LINE: &str = "2024-05-01 10:00:00.123 INFO worker job=42 step=render took 12ms";
const GEMINI_LINE: &str = r#"2024-05-01 10:00:01.456 ERROR Gemini API request failed with status 429: {"error": {"code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED", "details": [{"reason": "RATE_LIMIT"}]}}"#;
const OPENAI_LINE: &str = "2024-05-01 10:00:02.789 ERROR OpenAI API error 429: Rate limit exceeded: free-models-per-day-high-balance";
const FALLBACK_LINE: &str = "2024-05-01 10:00:03.000 WARN upstream HTTP 429: Too Many Requests";

/// Build a synthetic log where one line in `every` is an error
fn synthetic_log(lines: usize, every: usize) -> String {
    let errors = [GEMINI_LINE, OPENAI_LINE, FALLBACK_LINE];
    (0..lines)
        .map(|i| {
            if i % every == 0 {
                errors[(i / every) % errors.len()]
            } else {
                NOISE_LINE
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Adversarial log: long lines full of near-miss fragments
fn adversarial_log(lines: usize) -> String {
    let line = "rate ".repeat(200) + &"429 ".repeat(50) + &"{\"".repeat(100);
    vec![line; lines].join("\n")
}

fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan_log");

    for size in [1_000usize, 10_000, 50_000] {
        let log = synthetic_log(size, 50);
        group.bench_with_input(BenchmarkId::new("synthetic", size), &log, |b, log| {
            b.iter(|| scan_log(black_box(log)))
        });
    }

    let log = adversarial_log(500);
    group.bench_function("adversarial", |b| b.iter(|| scan_log(black_box(&log))));

    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let log = synthetic_log(10_000, 10);
    let matches = scan_log(&log);

    c.bench_function("merge_matches", |b| {
        b.iter(|| {
            let mut glossary = Glossary::new();
            merge_matches(&mut glossary, black_box(&matches))
        })
    });
}

criterion_group!(benches, bench_scan, bench_merge);
criterion_main!(benches);
