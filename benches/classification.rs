//! Benchmarks for decode_errors hot paths.
//!
//! Covers identity hits, predicate scans and pass-through, each over rule
//! sets of growing size.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use decode_errors::identity::{SharedError, sentinel, shared};
use decode_errors::{ClassifiedError, Code, Decoder, MessageCatalog, Rule, matchers};
use std::hint::black_box;
use std::io;
use std::sync::Arc;

const RULE_SET_SIZES: [usize; 4] = [1, 10, 100, 1000];

/// One sentinel rule per code, plus the sentinels themselves.
fn sentinel_rules(count: usize) -> (Vec<Rule>, Vec<SharedError>) {
    let errors: Vec<SharedError> = (0..count).map(|i| sentinel(format!("error {}", i))).collect();
    let rules = errors
        .iter()
        .enumerate()
        .map(|(i, e)| Rule::new(Code::new(i as i32 + 1), format!("error.{}", i)).with_error(Arc::clone(e)))
        .collect();
    (rules, errors)
}

/// `count` never-matching predicates followed by an io::Error rule.
fn matcher_rules(count: usize) -> Vec<Rule> {
    let mut rules: Vec<Rule> = (0..count)
        .map(|i| {
            let target = sentinel(format!("unreachable {}", i));
            Rule::new(Code::new(i as i32 + 1), "error.never").with_matcher(matchers::is(target))
        })
        .collect();
    rules.push(Rule::new(Code::new(-1), "error.io").with_matcher(matchers::is_type::<io::Error>()));
    rules
}

// ============================================================================
// Classification
// ============================================================================

fn bench_identity_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("identity_hit");

    for count in RULE_SET_SIZES {
        let (rules, errors) = sentinel_rules(count);
        let decoder = Decoder::new(rules);
        let target = Arc::clone(&errors[count / 2]);

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| black_box(decoder.translate(Arc::clone(&target))))
        });
    }

    group.finish();
}

fn bench_matcher_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("matcher_scan");
    let err = shared(io::Error::other("disk"));

    for count in RULE_SET_SIZES {
        let decoder = Decoder::new(matcher_rules(count));

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| black_box(decoder.translate(Arc::clone(&err))))
        });
    }

    group.finish();
}

fn bench_pass_through(c: &mut Criterion) {
    let mut group = c.benchmark_group("pass_through");
    let err = sentinel("unmatched");

    for count in RULE_SET_SIZES {
        let (rules, _errors) = sentinel_rules(count);
        let decoder = Decoder::new(rules);

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| black_box(decoder.translate(Arc::clone(&err))))
        });
    }

    group.finish();
}

fn bench_translated_message(c: &mut Criterion) {
    let err = sentinel("client error");
    let catalog: MessageCatalog = [("error.client", "Bad request.")].into_iter().collect();
    let decoder = Decoder::builder(vec![
        Rule::new(Code::new(1001), "error.client").with_error(Arc::clone(&err)),
    ])
    .message_translator(catalog)
    .build();

    c.bench_function("translate_with_catalog", |b| {
        b.iter(|| black_box(decoder.translate(Arc::clone(&err))))
    });
}

// ============================================================================
// Compilation
// ============================================================================

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");

    for count in RULE_SET_SIZES {
        let (rules, _errors) = sentinel_rules(count);

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| black_box(Decoder::new(rules.clone())))
        });
    }

    group.finish();
}

// ============================================================================
// Diagnostics
// ============================================================================

fn bench_internal_log_write(c: &mut Criterion) {
    let err = ClassifiedError::new(Code::new(1001), "error.client", sentinel("client error 1"));

    c.bench_function("internal_log_write_to", |b| {
        b.iter(|| {
            let mut buffer = String::new();
            err.internal_log().write_to(&mut buffer).ok();
            black_box(buffer)
        })
    });
}

criterion_group!(
    classification_benches,
    bench_identity_hit,
    bench_matcher_scan,
    bench_pass_through,
    bench_translated_message,
);

criterion_group!(compile_benches, bench_compile);

criterion_group!(diagnostics_benches, bench_internal_log_write);

criterion_main!(classification_benches, compile_benches, diagnostics_benches);
