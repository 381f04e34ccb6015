use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use log::Level;
use serde_json::Value;

/// A single log event, normalized and ready for formatting.
///
/// The dispatching [`Logger`](crate::Logger) builds one of these from every
/// `log::Record` it accepts; callers that need a timestamp or traceback of
/// their own can build records by hand and feed them straight to a sink.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    pub logger: String,
    pub message: String,
    pub traceback: Option<Traceback>,
    /// Extra structured fields carried into the payload as-is.
    pub fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            logger: String::new(),
            message: message.into(),
            traceback: None,
            fields: BTreeMap::new(),
        }
    }

    pub fn with_timestamp(self, timestamp: DateTime<Utc>) -> Self {
        Self { timestamp, ..self }
    }

    pub fn with_logger(self, logger: impl Into<String>) -> Self {
        Self {
            logger: logger.into(),
            ..self
        }
    }

    pub fn with_traceback(self, traceback: Traceback) -> Self {
        Self {
            traceback: Some(traceback),
            ..self
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }
}

impl From<&log::Record<'_>> for Record {
    fn from(record: &log::Record) -> Self {
        Self {
            timestamp: Utc::now(),
            level: record.level(),
            logger: record.target().to_string(),
            message: record.args().to_string(),
            traceback: None,
            fields: BTreeMap::new(),
        }
    }
}

/// Structured error information attached to a record.
///
/// Captures the error's type name, message and source chain so the
/// formatter can flatten it to readable text.
#[derive(Debug, Clone, PartialEq)]
pub struct Traceback {
    pub exception: String,
    pub message: String,
    pub causes: Vec<String>,
}

impl Traceback {
    pub fn capture<E: std::error::Error>(err: &E) -> Self {
        let mut causes = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }

        Self {
            exception: std::any::type_name::<E>().to_string(),
            message: err.to_string(),
            causes,
        }
    }

    pub fn render(&self) -> String {
        let mut out = format!("{}: {}", self.exception, self.message);
        for cause in &self.causes {
            out.push_str("\nCaused by: ");
            out.push_str(cause);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use std::fmt;

    use super::*;

    #[derive(Debug)]
    struct ConnectError {
        source: std::io::Error,
    }

    impl fmt::Display for ConnectError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "could not reach upstream")
        }
    }

    impl std::error::Error for ConnectError {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.source)
        }
    }

    #[test]
    fn traceback_captures_type_name_and_chain() {
        let err = ConnectError {
            source: std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused"),
        };

        let traceback = Traceback::capture(&err);

        assert!(traceback.exception.ends_with("ConnectError"));
        assert_eq!(traceback.message, "could not reach upstream");
        assert_eq!(traceback.causes, vec!["refused".to_string()]);
    }

    #[test]
    fn traceback_render_includes_causes() {
        let err = ConnectError {
            source: std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused"),
        };

        let text = Traceback::capture(&err).render();

        assert!(text.contains("ConnectError"));
        assert!(text.contains("could not reach upstream"));
        assert!(text.contains("Caused by: refused"));
    }

    #[test]
    fn record_from_log_record() {
        let record = Record::from(
            &log::Record::builder()
                .args(format_args!("boot"))
                .level(Level::Info)
                .target("app")
                .build(),
        );

        assert_eq!(record.level, Level::Info);
        assert_eq!(record.logger, "app");
        assert_eq!(record.message, "boot");
        assert!(record.traceback.is_none());
        assert!(record.fields.is_empty());
    }

    #[test]
    fn record_builder_methods() {
        let record = Record::new(Level::Warn, "disk space low")
            .with_logger("worker")
            .with_field("free_mb", serde_json::json!(12));

        assert_eq!(record.logger, "worker");
        assert_eq!(record.fields["free_mb"], serde_json::json!(12));
    }
}
