use log::{LevelFilter, Log};

use crate::sinks::NullSink;
use crate::{LogSink, Record, Result};

/// Bridges the `log` facade to the configured sinks.
pub struct Logger {
    filter: LevelFilter,
    sinks: Vec<Box<dyn LogSink>>,
}

impl Logger {
    pub fn new(filter: LevelFilter, sinks: Vec<Box<dyn LogSink>>) -> Self {
        Self { filter, sinks }
    }

    /// Install this logger as the process-wide `log` backend.
    pub fn init(self) -> Result<()> {
        log::set_max_level(self.filter);
        log::set_boxed_logger(Box::new(self))?;

        Ok(())
    }

    /// Hand a record to every sink whose level accepts it.
    ///
    /// Sink failures are reported to stderr and the remaining sinks still
    /// run; a broken redis connection must not take down the host process.
    pub fn dispatch(&self, record: &Record) {
        for sink in &self.sinks {
            if sink.level() < record.level {
                continue;
            }
            if let Err(err) = sink.write_log(record) {
                eprintln!("redislog: {}", err);
            }
        }
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.filter >= metadata.level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            self.dispatch(&Record::from(record));
        }
    }

    fn flush(&self) {
        for sink in &self.sinks {
            sink.flush();
        }
    }
}

pub struct Builder {
    filter: LevelFilter,
    sinks: Vec<Box<dyn LogSink>>,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            filter: LevelFilter::Off,
            sinks: Vec::new(),
        }
    }

    pub fn with_level(self, filter: LevelFilter) -> Self {
        Self { filter, ..self }
    }

    pub fn with_sink(mut self, sink: Box<dyn LogSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn build(self) -> Logger {
        if self.sinks.is_empty() {
            Logger::new(self.filter, vec![Box::new(NullSink::new())])
        } else {
            Logger::new(self.filter, self.sinks)
        }
    }

    pub fn init(self) -> Result<()> {
        self.build().init()
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use log::Level;

    use super::*;

    struct CountingSink {
        level: LevelFilter,
        writes: Arc<AtomicUsize>,
    }

    impl CountingSink {
        fn new(level: LevelFilter) -> (Self, Arc<AtomicUsize>) {
            let writes = Arc::new(AtomicUsize::new(0));
            let sink = Self {
                level,
                writes: writes.clone(),
            };
            (sink, writes)
        }
    }

    impl LogSink for CountingSink {
        fn level(&self) -> LevelFilter {
            self.level
        }

        fn write_log(&self, _record: &Record) -> Result<()> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn flush(&self) {}
    }

    #[test]
    fn dispatch_honors_per_sink_levels() {
        let (verbose, verbose_writes) = CountingSink::new(LevelFilter::Trace);
        let (quiet, quiet_writes) = CountingSink::new(LevelFilter::Warn);

        let logger = Logger::new(
            LevelFilter::Trace,
            vec![Box::new(verbose), Box::new(quiet)],
        );

        logger.dispatch(&Record::new(Level::Info, "boot"));

        assert_eq!(verbose_writes.load(Ordering::SeqCst), 1);
        assert_eq!(quiet_writes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn dispatch_reaches_every_accepting_sink() {
        let (first, first_writes) = CountingSink::new(LevelFilter::Trace);
        let (second, second_writes) = CountingSink::new(LevelFilter::Trace);

        let logger = Logger::new(LevelFilter::Trace, vec![Box::new(first), Box::new(second)]);

        logger.dispatch(&Record::new(Level::Error, "boom"));

        assert_eq!(first_writes.load(Ordering::SeqCst), 1);
        assert_eq!(second_writes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn enabled_respects_the_global_filter() {
        let logger = Logger::new(LevelFilter::Warn, vec![Box::new(NullSink::new())]);

        let warn = log::MetadataBuilder::new().level(Level::Warn).build();
        let debug = log::MetadataBuilder::new().level(Level::Debug).build();

        assert!(logger.enabled(&warn));
        assert!(!logger.enabled(&debug));
    }

    #[test]
    fn builder_defaults_to_a_null_sink() {
        let logger = Builder::new().with_level(LevelFilter::Info).build();

        // Nothing to assert on the wire, but dispatch must not panic.
        logger.dispatch(&Record::new(Level::Info, "boot"));
    }
}
