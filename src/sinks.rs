use std::sync::{Mutex, PoisonError};

use log::LevelFilter;

use crate::store::{Connect, RedisConfig, RedisStore};
use crate::{JsonFormatter, LogFormatter, LogSink, Record, Result};

/// Default list retention in hours.
pub const DEFAULT_EXPIRE_HOURS: u64 = 24;

/// Publishes every record on a redis pub/sub channel.
pub struct ChannelSink<S = redis::Connection> {
    channel: String,
    store: Mutex<S>,
    level: LevelFilter,
    formatter: JsonFormatter,
}

impl<S: RedisStore> ChannelSink<S> {
    pub fn new(channel: impl Into<String>, store: S, level: LevelFilter) -> Self {
        Self {
            channel: channel.into(),
            store: Mutex::new(store),
            level,
            formatter: JsonFormatter::new(),
        }
    }
}

impl<S: Connect> ChannelSink<S> {
    /// Connect to the store and build the sink in one go.
    pub fn to(
        channel: impl Into<String>,
        config: &RedisConfig,
        level: LevelFilter,
    ) -> Result<Self> {
        Ok(Self::new(channel, S::connect(config)?, level))
    }
}

impl<S: RedisStore> LogSink for ChannelSink<S> {
    fn level(&self) -> LevelFilter {
        self.level
    }

    fn write_log(&self, record: &Record) -> Result<()> {
        let payload = self.formatter.format(record)?;
        let mut store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        store.publish(&self.channel, &payload)
    }

    fn flush(&self) {}
}

/// Appends every record to a redis list and refreshes its TTL.
///
/// The TTL is reset on every write, so the list lives for `expire_hours`
/// past the most recent record, not past the first one. The append and the
/// TTL reset are two separate redis calls; a crash between them can leave
/// a list with no expiry set.
///
/// Pass [`DEFAULT_EXPIRE_HOURS`] for the standard 24 hour retention.
pub struct ListSink<S = redis::Connection> {
    log_key: String,
    store: Mutex<S>,
    level: LevelFilter,
    expire_secs: i64,
    formatter: JsonFormatter,
}

impl<S: RedisStore> ListSink<S> {
    pub fn new(
        log_key: impl Into<String>,
        store: S,
        level: LevelFilter,
        expire_hours: u64,
    ) -> Self {
        Self {
            log_key: log_key.into(),
            store: Mutex::new(store),
            level,
            expire_secs: expire_hours as i64 * 3600,
            formatter: JsonFormatter::new(),
        }
    }

    /// Configured retention in seconds.
    pub fn expire_secs(&self) -> i64 {
        self.expire_secs
    }
}

impl<S: Connect> ListSink<S> {
    /// Connect to the store and build the sink in one go.
    pub fn to(
        log_key: impl Into<String>,
        config: &RedisConfig,
        level: LevelFilter,
        expire_hours: u64,
    ) -> Result<Self> {
        Ok(Self::new(log_key, S::connect(config)?, level, expire_hours))
    }
}

impl<S: RedisStore> LogSink for ListSink<S> {
    fn level(&self) -> LevelFilter {
        self.level
    }

    fn write_log(&self, record: &Record) -> Result<()> {
        let payload = self.formatter.format(record)?;
        let mut store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        store.rpush(&self.log_key, &payload)?;
        store.expire(&self.log_key, self.expire_secs)
    }

    fn flush(&self) {}
}

/// Discards everything. The builder's default before a real sink is chosen.
pub struct NullSink {}

impl NullSink {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for NullSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for NullSink {
    fn level(&self) -> LevelFilter {
        LevelFilter::Off
    }

    fn write_log(&self, _record: &Record) -> Result<()> {
        Ok(())
    }

    fn flush(&self) {}
}
