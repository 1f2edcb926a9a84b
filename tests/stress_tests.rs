//! Stress tests for concurrent logging and live reconfiguration
//!
//! These tests verify:
//! - No records are lost when many threads share one logger
//! - File and callback sinks can be swapped while other threads log
//! - The sink count stays consistent under concurrent reconfiguration
//! - Receivers are never invoked concurrently

use organizer_log::prelude::*;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

const THREADS: usize = 8;
const RECORDS_PER_THREAD: usize = 500;

fn quiet_logger(name: &str) -> Arc<Logger> {
    Arc::new(
        Logger::builder(name)
            .level(Level::Debug)
            .pattern("%t %v")
            .console(ConsoleSink::with_writer(std::io::sink()))
            .build()
            .expect("Failed to build logger"),
    )
}

/// Every record from every thread reaches the file exactly once
#[test]
fn test_concurrent_logging_loses_nothing() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("concurrent.log");

    let logger = quiet_logger("concurrent");
    logger.set_file(&File::rotating(&log_file, 64 * 1024 * 1024, 1));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..RECORDS_PER_THREAD {
                    logger.info(format!("thread-{} record-{}", t, i));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Logging thread panicked");
    }
    logger.flush().expect("Failed to flush");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert_eq!(content.lines().count(), THREADS * RECORDS_PER_THREAD);
    assert_eq!(
        logger.metrics().total_logged(),
        (THREADS * RECORDS_PER_THREAD) as u64
    );

    // Per-thread order is preserved
    for t in 0..THREADS {
        let prefix = format!("thread-{} ", t);
        let indices: Vec<usize> = content
            .lines()
            .filter_map(|line| line.split_once(' ').map(|(_, rest)| rest))
            .filter(|rest| rest.starts_with(&prefix))
            .filter_map(|rest| rest.rsplit_once("record-"))
            .filter_map(|(_, n)| n.parse().ok())
            .collect();
        assert_eq!(indices, (0..RECORDS_PER_THREAD).collect::<Vec<_>>());
    }
}

/// Swapping sinks under load never deadlocks and never leaves stray sinks
#[test]
fn test_reconfiguration_under_load() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = quiet_logger("reconfigure");
    let delivered = Arc::new(AtomicUsize::new(0));

    let writers: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..RECORDS_PER_THREAD {
                    let level = Level::ALL[i % Level::ALL.len()];
                    logger.log(level, format!("{}:{}\nsecond line", t, i));
                }
            })
        })
        .collect();

    for round in 0..50 {
        let file = match round % 3 {
            0 => File::rotating(temp_dir.path().join("swap.log"), 4096, 2),
            1 => File::daily(temp_dir.path().join("daily.log"), 0, 0),
            _ => File::none(),
        };
        logger.set_file(&file);

        let counter = Arc::clone(&delivered);
        let callback: Option<Callback> = if round % 2 == 0 {
            Some(Arc::new(move |_: Entry| {
                counter.fetch_add(1, Ordering::Relaxed);
            }))
        } else {
            None
        };
        logger.set_callback(callback);

        let expected =
            1 + usize::from(logger.has_file_sink()) + usize::from(logger.has_callback_sink());
        assert_eq!(logger.sink_count(), expected);
    }

    for handle in writers {
        handle.join().expect("Logging thread panicked");
    }

    assert_eq!(logger.metrics().sink_failures(), 0);
    assert_eq!(
        logger.metrics().total_logged(),
        (THREADS * RECORDS_PER_THREAD * 2) as u64
    );

    // Clearing keeps the callback sink with nothing to deliver to
    logger.set_file(&File::none());
    logger.set_callback(None);
    assert!(!logger.has_file_sink());
    assert_eq!(logger.sink_names(), vec!["console", "callback"]);

    let counter = Arc::clone(&delivered);
    logger.set_callback(Some(Arc::new(move |_: Entry| {
        counter.fetch_add(1, Ordering::Relaxed);
    })));
    let before = delivered.load(Ordering::Relaxed);
    logger.error("after reconfiguration");
    assert_eq!(delivered.load(Ordering::Relaxed), before + 1);
}

/// Receivers run one at a time even when many threads log
#[test]
fn test_callback_invocations_are_serialized() {
    let logger = quiet_logger("serialized");
    let active = Arc::new(AtomicUsize::new(0));
    let overlaps = Arc::new(AtomicUsize::new(0));
    let calls = Arc::new(AtomicUsize::new(0));

    {
        let active = Arc::clone(&active);
        let overlaps = Arc::clone(&overlaps);
        let calls = Arc::clone(&calls);
        logger.set_callback(Some(Arc::new(move |_: Entry| {
            if active.fetch_add(1, Ordering::SeqCst) != 0 {
                overlaps.fetch_add(1, Ordering::SeqCst);
            }
            calls.fetch_add(1, Ordering::SeqCst);
            active.fetch_sub(1, Ordering::SeqCst);
        })));
    }

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..RECORDS_PER_THREAD {
                    logger.debug(format!("record {}", i));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Logging thread panicked");
    }

    assert_eq!(overlaps.load(Ordering::SeqCst), 0);
    assert_eq!(calls.load(Ordering::SeqCst), THREADS * RECORDS_PER_THREAD);
}

/// Callbacks that log on every thread neither deadlock nor recurse
#[test]
fn test_concurrent_reentrant_callbacks() {
    let logger = quiet_logger("reentrant");
    let calls = Arc::new(AtomicUsize::new(0));

    {
        let weak = Arc::downgrade(&logger);
        let calls = Arc::clone(&calls);
        logger.set_callback(Some(Arc::new(move |entry: Entry| {
            calls.fetch_add(1, Ordering::SeqCst);
            if let Some(logger) = weak.upgrade() {
                logger.warn(format!("echo {}", entry.message));
            }
        })));
    }

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..100 {
                    logger.info(format!("{}-{}", t, i));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Logging thread panicked");
    }

    assert_eq!(calls.load(Ordering::SeqCst), THREADS * 100);
    assert_eq!(logger.metrics().reentrant_drops(), (THREADS * 100) as u64);
}
