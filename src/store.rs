use crate::Result;

/// Default redis server port.
pub const DEFAULT_PORT: u16 = 6379;

#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub host: String,
    pub port: u16,
}

impl RedisConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// The three redis operations the sinks need.
///
/// Connection management, pooling, reconnects and timeouts all stay behind
/// the implementation; the sinks only issue these calls sequentially.
pub trait RedisStore: Send {
    fn publish(&mut self, channel: &str, message: &str) -> Result<()>;

    /// Append to the tail of a list, creating it if absent.
    fn rpush(&mut self, key: &str, message: &str) -> Result<()>;

    /// Set or reset the key's time-to-live.
    fn expire(&mut self, key: &str, seconds: i64) -> Result<()>;
}

impl RedisStore for redis::Connection {
    fn publish(&mut self, channel: &str, message: &str) -> Result<()> {
        redis::Commands::publish::<_, _, ()>(self, channel, message)?;
        Ok(())
    }

    fn rpush(&mut self, key: &str, message: &str) -> Result<()> {
        redis::Commands::rpush::<_, _, ()>(self, key, message)?;
        Ok(())
    }

    fn expire(&mut self, key: &str, seconds: i64) -> Result<()> {
        redis::Commands::expire::<_, ()>(self, key, seconds)?;
        Ok(())
    }
}

/// Stores that can build themselves from connection parameters.
///
/// The sink factories go through this seam, so they work against any store
/// implementation, not just a live redis connection.
pub trait Connect: RedisStore + Sized {
    fn connect(config: &RedisConfig) -> Result<Self>;
}

impl Connect for redis::Connection {
    fn connect(config: &RedisConfig) -> Result<Self> {
        connect(config)
    }
}

pub fn connect(config: &RedisConfig) -> Result<redis::Connection> {
    let client = redis::Client::open(format!("redis://{}:{}/", config.host, config.port))?;
    Ok(client.get_connection()?)
}
