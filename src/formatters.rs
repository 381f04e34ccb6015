use serde_json::{Map, Value};

use crate::{LogFormatter, Record, Result};

/// JSON-encodes a record for serializing through redis.
///
/// The timestamp goes out as an ISO-8601 string and any traceback as its
/// rendered text, so payload consumers never see structured date or error
/// values. The input record is left untouched.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl LogFormatter for JsonFormatter {
    fn format(&self, record: &Record) -> Result<String> {
        let mut data = Map::new();
        data.insert("time".into(), Value::String(record.timestamp.to_rfc3339()));
        data.insert("level".into(), Value::String(record.level.to_string()));
        data.insert("logger".into(), Value::String(record.logger.clone()));
        data.insert("message".into(), Value::String(record.message.clone()));

        if let Some(traceback) = &record.traceback {
            data.insert("traceback".into(), Value::String(traceback.render()));
        }

        // Extra fields ride along but never clobber the reserved keys.
        for (key, value) in &record.fields {
            data.entry(key.clone()).or_insert_with(|| value.clone());
        }

        Ok(serde_json::to_string(&Value::Object(data))?)
    }
}
