use dashmap::DashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

const MAX_SHARES_PER_MINUTE: u32 = 10;
const MAX_SHARES_PER_HOUR: u32 = 60;
const CLEANUP_INTERVAL_SECS: u64 = 300;

#[derive(Clone)]
struct RequestRecord {
    minute_count: u32,
    hour_count: u32,
    minute_start: Instant,
    hour_start: Instant,
}

impl RequestRecord {
    fn starting_at(now: Instant) -> Self {
        Self {
            minute_count: 0,
            hour_count: 0,
            minute_start: now,
            hour_start: now,
        }
    }
}

/// Per-key fixed-window limiter (per minute and per hour).
#[derive(Clone)]
pub struct RateLimiter<K: Eq + Hash> {
    requests: Arc<DashMap<K, RequestRecord>>,
    last_cleanup: Arc<Mutex<Instant>>,
    per_minute: u32,
    per_hour: u32,
}

impl<K: Eq + Hash + Clone> RateLimiter<K> {
    pub fn new() -> Self {
        Self::with_limits(MAX_SHARES_PER_MINUTE, MAX_SHARES_PER_HOUR)
    }

    pub fn with_limits(per_minute: u32, per_hour: u32) -> Self {
        Self {
            requests: Arc::new(DashMap::new()),
            last_cleanup: Arc::new(Mutex::new(Instant::now())),
            per_minute,
            per_hour,
        }
    }

    pub fn check(&self, key: K) -> Result<(), RateLimitError> {
        self.check_at(key, Instant::now())
    }

    fn check_at(&self, key: K, now: Instant) -> Result<(), RateLimitError> {
        self.maybe_cleanup(now);

        let mut record = self
            .requests
            .entry(key)
            .or_insert_with(|| RequestRecord::starting_at(now));

        if now.duration_since(record.minute_start) > Duration::from_secs(60) {
            record.minute_count = 0;
            record.minute_start = now;
        }

        if now.duration_since(record.hour_start) > Duration::from_secs(3600) {
            record.hour_count = 0;
            record.hour_start = now;
        }

        if record.minute_count >= self.per_minute {
            let wait_secs = 60u64.saturating_sub(now.duration_since(record.minute_start).as_secs());
            return Err(RateLimitError::TooManyPerMinute(wait_secs));
        }

        if record.hour_count >= self.per_hour {
            let wait_secs =
                3600u64.saturating_sub(now.duration_since(record.hour_start).as_secs());
            return Err(RateLimitError::TooManyPerHour(wait_secs));
        }

        record.minute_count += 1;
        record.hour_count += 1;

        Ok(())
    }

    /// Gives back the slot taken by the last successful `check` for `key`.
    pub fn refund(&self, key: &K) {
        if let Some(mut record) = self.requests.get_mut(key) {
            record.minute_count = record.minute_count.saturating_sub(1);
            record.hour_count = record.hour_count.saturating_sub(1);
        }
    }

    fn maybe_cleanup(&self, now: Instant) {
        let mut last_cleanup = self.last_cleanup.lock().unwrap_or_else(|e| e.into_inner());
        if now.duration_since(*last_cleanup) > Duration::from_secs(CLEANUP_INTERVAL_SECS) {
            self.requests
                .retain(|_, v| now.duration_since(v.hour_start) <= Duration::from_secs(3600));
            *last_cleanup = now;
        }
    }
}

impl<K: Eq + Hash + Clone> Default for RateLimiter<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RateLimitError {
    #[error("too many shares this minute, retry in {0}s")]
    TooManyPerMinute(u64),
    #[error("too many shares this hour, retry in {0}s")]
    TooManyPerHour(u64),
}

impl RateLimitError {
    pub fn user_message(&self) -> String {
        match self {
            Self::TooManyPerMinute(secs) => {
                format!("You're sharing too fast. Wait {} seconds.", secs)
            }
            Self::TooManyPerHour(secs) => {
                format!("Hourly share limit reached. Wait {} minutes.", secs.div_ceil(60))
            }
        }
    }
}
