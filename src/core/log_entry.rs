//! Record and entry structures

use super::log_level::{BackendLevel, Level};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_THREAD_ID: AtomicU64 = AtomicU64::new(1);

// Thread-local cache so each thread is numbered once
thread_local! {
    static THREAD_ID_CACHE: Cell<u64> = const { Cell::new(0) };
}

/// Small, stable numeric id for the calling thread
pub fn current_thread_id() -> u64 {
    THREAD_ID_CACHE.with(|cache| {
        let cached = cache.get();
        if cached != 0 {
            return cached;
        }
        let id = NEXT_THREAD_ID.fetch_add(1, Ordering::Relaxed);
        cache.set(id);
        id
    })
}

/// A single line travelling through the sink pipeline
#[derive(Debug, Clone)]
pub struct Record<'a> {
    pub logger_name: &'a str,
    pub level: BackendLevel,
    pub time: DateTime<Local>,
    pub payload: &'a str,
    pub thread_id: u64,
}

impl<'a> Record<'a> {
    pub fn new(logger_name: &'a str, level: BackendLevel, payload: &'a str) -> Self {
        Self {
            logger_name,
            level,
            time: Local::now(),
            payload,
            thread_id: current_thread_id(),
        }
    }

    pub fn with_time(mut self, time: DateTime<Local>) -> Self {
        self.time = time;
        self
    }
}

/// Value delivered to callback receivers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub time: DateTime<Local>,
    pub level: Level,
    /// Raw payload, before pattern formatting
    pub message: String,
    /// Pattern-rendered line without its line terminator
    pub formatted_message: String,
}
