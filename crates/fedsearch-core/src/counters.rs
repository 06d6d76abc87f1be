//! Process-lifetime query counters for health reporting.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Thread-safe counters for locally-served queries.
///
/// Incremented from arbitrary concurrent requests; a health report may
/// momentarily trail the request that triggered it. Reset only when the
/// process restarts.
#[derive(Debug)]
pub struct QueryCounters {
    ok: AtomicU64,
    error: AtomicU64,
    started_at: DateTime<Utc>,
}

impl QueryCounters {
    /// Creates counters anchored to the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ok: AtomicU64::new(0),
            error: AtomicU64::new(0),
            started_at: Utc::now(),
        }
    }

    /// Records one successfully served local query.
    pub fn record_ok(&self) {
        self.ok.fetch_add(1, Ordering::Relaxed);
    }

    /// Records one failed local query.
    pub fn record_error(&self) {
        self.error.fetch_add(1, Ordering::Relaxed);
    }

    /// Takes a point-in-time view for a health report.
    #[must_use]
    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            queries_ok: self.ok.load(Ordering::Relaxed),
            queries_error: self.error.load(Ordering::Relaxed),
            up_since: self.started_at,
        }
    }
}

impl Default for QueryCounters {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable snapshot of [`QueryCounters`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CounterSnapshot {
    pub queries_ok: u64,
    pub queries_error: u64,
    pub up_since: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_counters_start_at_zero() {
        let counters = QueryCounters::new();
        let snapshot = counters.snapshot();
        assert_eq!(snapshot.queries_ok, 0);
        assert_eq!(snapshot.queries_error, 0);
    }

    #[test]
    fn test_counters_accumulate() {
        let counters = QueryCounters::new();
        counters.record_ok();
        counters.record_ok();
        counters.record_error();

        let snapshot = counters.snapshot();
        assert_eq!(snapshot.queries_ok, 2);
        assert_eq!(snapshot.queries_error, 1);
    }

    #[test]
    fn test_concurrent_increments() {
        let counters = Arc::new(QueryCounters::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let counters = Arc::clone(&counters);
            handles.push(std::thread::spawn(move || {
                for _ in 0..100 {
                    counters.record_ok();
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(counters.snapshot().queries_ok, 800);
    }
}
