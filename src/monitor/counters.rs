use std::sync::atomic::{AtomicU64, Ordering};

/// Bucket 0 holds exceptions and codes outside 1xx..5xx.
pub const STATUS_BUCKETS: usize = 6;

#[repr(align(64))]
#[derive(Debug, Default)]
struct PaddedCounter(AtomicU64);

impl PaddedCounter {
    fn increment(&self) -> u64 {
        self.0.fetch_add(1, Ordering::AcqRel).saturating_add(1)
    }

    fn get(&self) -> u64 {
        self.0.load(Ordering::Acquire)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CounterSnapshot {
    pub completed: u64,
    pub buckets: [u64; STATUS_BUCKETS],
}

impl CounterSnapshot {
    #[must_use]
    pub fn successes(&self) -> u64 {
        self.buckets.get(2).copied().unwrap_or(0)
    }
}

/// Lock-free completion and status-class counters.
#[derive(Debug, Default)]
pub struct StatusCounters {
    completed: PaddedCounter,
    buckets: [PaddedCounter; STATUS_BUCKETS],
}

#[must_use]
pub const fn bucket_index(status_code: u16) -> usize {
    match status_code {
        100..=599 => (status_code / 100) as usize,
        _ => 0,
    }
}

impl StatusCounters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one finished request; returns the completed total including it.
    pub fn record(&self, status_code: u16) -> u64 {
        if let Some(bucket) = self.buckets.get(bucket_index(status_code)) {
            bucket.increment();
        }
        self.completed.increment()
    }

    #[must_use]
    pub fn snapshot(&self) -> CounterSnapshot {
        let mut buckets = [0u64; STATUS_BUCKETS];
        for (slot, counter) in buckets.iter_mut().zip(self.buckets.iter()) {
            *slot = counter.get();
        }
        CounterSnapshot {
            completed: self.completed.get(),
            buckets,
        }
    }
}
