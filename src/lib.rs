//! Ship log records to redis.
//!
//! Records are encoded as JSON payloads and delivered through one of two
//! sinks: [`ChannelSink`] publishes every payload on a pub/sub channel,
//! [`ListSink`] appends to a list and refreshes its TTL on every write.
//! Both plug into the `log` facade through [`Builder`], or can be driven
//! directly with hand-built [`Record`]s.
//!
//! ```no_run
//! use log::LevelFilter;
//! use redislog::{Builder, ChannelSink, RedisConfig};
//!
//! let sink: ChannelSink = ChannelSink::to("app:events", &RedisConfig::default(), LevelFilter::Info)?;
//!
//! Builder::new()
//!     .with_level(LevelFilter::Info)
//!     .with_sink(Box::new(sink))
//!     .init()?;
//!
//! log::info!("boot");
//! # Ok::<(), redislog::Error>(())
//! ```

mod error;
mod formatters;
mod logger;
mod record;
mod sinks;
mod store;

pub use error::{Error, Result};
pub use formatters::JsonFormatter;
pub use logger::{Builder, Logger};
pub use record::{Record, Traceback};
pub use sinks::{ChannelSink, ListSink, NullSink, DEFAULT_EXPIRE_HOURS};
pub use store::{connect, Connect, RedisConfig, RedisStore, DEFAULT_PORT};

pub trait LogFormatter: Send + Sync {
    fn format(&self, record: &Record) -> Result<String>;
}

pub trait LogSink: Send + Sync {
    /// Minimum severity this sink accepts. The dispatching logger applies
    /// the filter, the sink only carries it.
    fn level(&self) -> log::LevelFilter;
    fn write_log(&self, record: &Record) -> Result<()>;
    fn flush(&self);
}
