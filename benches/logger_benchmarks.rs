//! Criterion benchmarks for organizer_log

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use organizer_log::core::Record;
use organizer_log::prelude::*;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn quiet_logger(pattern: &str) -> Logger {
    Logger::builder("bench")
        .level(Level::Debug)
        .pattern(pattern)
        .console(ConsoleSink::with_writer(std::io::sink()))
        .build()
        .expect("Failed to build logger")
}

// ============================================================================
// Logger Creation Benchmarks
// ============================================================================

fn bench_logger_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("logger_creation");
    group.throughput(Throughput::Elements(1));

    group.bench_function("console_only", |b| {
        b.iter(|| black_box(quiet_logger(DEFAULT_PATTERN)));
    });

    group.bench_function("with_callback", |b| {
        b.iter(|| {
            let logger = Logger::builder("bench")
                .console(ConsoleSink::with_writer(std::io::sink()))
                .callback(Arc::new(|entry: Entry| {
                    black_box(entry);
                }))
                .build()
                .expect("Failed to build logger");
            black_box(logger)
        });
    });

    group.finish();
}

// ============================================================================
// Logging Performance Benchmarks
// ============================================================================

fn bench_console_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("console_logging");
    group.throughput(Throughput::Elements(1));

    let logger = quiet_logger(DEFAULT_PATTERN);

    for level in Level::ALL {
        group.bench_function(level.to_str(), |b| {
            b.iter(|| logger.log(level, black_box("Benchmark message")));
        });
    }

    group.finish();
}

fn bench_file_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("file_logging");
    group.throughput(Throughput::Elements(1));

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = quiet_logger(DEFAULT_PATTERN);

    logger.set_file(&File::rotating(temp_dir.path().join("bench.log"), 1024 * 1024, 3));
    group.bench_function("rotating", |b| {
        b.iter(|| logger.info(black_box("Rotating file message")));
    });

    logger.set_file(&File::daily(temp_dir.path().join("daily.log"), 0, 0));
    group.bench_function("daily", |b| {
        b.iter(|| logger.info(black_box("Daily file message")));
    });

    group.finish();
}

fn bench_callback_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("callback_logging");
    group.throughput(Throughput::Elements(1));

    let logger = quiet_logger("[%l] %v");
    logger.set_callback(Some(Arc::new(|entry: Entry| {
        black_box(entry);
    })));

    group.bench_function("entry_delivery", |b| {
        b.iter(|| logger.info(black_box("Callback message")));
    });

    group.finish();
}

fn bench_multiline_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("multiline_split");
    let logger = quiet_logger("%v");

    for lines in [1usize, 4, 16] {
        let message = vec!["line of text"; lines].join("\n");
        group.throughput(Throughput::Elements(lines as u64));
        group.bench_with_input(BenchmarkId::from_parameter(lines), &message, |b, message| {
            b.iter(|| logger.info(black_box(message)));
        });
    }

    group.finish();
}

fn bench_concurrent_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_logging");

    for threads in [2usize, 4, 8] {
        group.throughput(Throughput::Elements((threads * 100) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(threads), &threads, |b, &threads| {
            let logger = Arc::new(quiet_logger(DEFAULT_PATTERN));
            b.iter(|| {
                let handles: Vec<_> = (0..threads)
                    .map(|_| {
                        let logger = Arc::clone(&logger);
                        thread::spawn(move || {
                            for i in 0..100 {
                                logger.info(format!("Concurrent message {}", i));
                            }
                        })
                    })
                    .collect();
                for handle in handles {
                    handle.join().expect("Logging thread panicked");
                }
            });
        });
    }

    group.finish();
}

// ============================================================================
// Formatting Benchmarks
// ============================================================================

fn bench_pattern_formatting(c: &mut Criterion) {
    let mut group = c.benchmark_group("pattern_formatting");
    group.throughput(Throughput::Elements(1));

    let record = Record::new("bench", BackendLevel::Warn, "Formatting benchmark payload");
    for (name, pattern) in [
        ("payload_only", "%v"),
        ("default", DEFAULT_PATTERN),
        ("full", "%+ %L %t %P %E.%F %z"),
    ] {
        let formatter = PatternFormatter::new(pattern);
        group.bench_function(name, |b| {
            b.iter(|| black_box(formatter.format(black_box(&record))));
        });
    }

    group.finish();
}

fn bench_level_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_filtering");
    group.throughput(Throughput::Elements(1));

    let logger = quiet_logger(DEFAULT_PATTERN);
    logger.set_level(Level::Error);

    group.bench_function("filtered_debug", |b| {
        b.iter(|| logger.debug(black_box("Filtered message")));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_logger_creation,
    bench_console_logging,
    bench_file_logging,
    bench_callback_logging,
    bench_multiline_split,
    bench_concurrent_logging,
    bench_pattern_formatting,
    bench_level_filtering,
);

criterion_main!(benches);
