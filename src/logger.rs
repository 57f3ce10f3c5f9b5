use log::{LevelFilter, Metadata, Record};
use sentry_log::SentryLogger;

pub struct Logger {
    level: LevelFilter,
}

impl Logger {
    pub fn new(level: LevelFilter) -> Self {
        Logger { level }
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            println!("[{}] {} - {}", record.target(), record.level(), record.args());
        }
    }

    fn flush(&self) {}
}


/// Installs the stdout logger behind the Sentry bridge and starts the
/// Sentry client. Without a DSN the client stays disabled.
/// Keep the guard alive until the process exits.
pub fn init(sentry_dsn: Option<&str>) -> sentry::ClientInitGuard {
    let guard = sentry::init(sentry::ClientOptions {
        dsn: sentry_dsn.and_then(|dsn| dsn.parse().ok()),
        release: sentry::release_name!(),
        ..Default::default()
    });

    let level = LevelFilter::Info;
    let logger = SentryLogger::with_dest(Logger::new(level));

    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(level);
    }

    guard
}
