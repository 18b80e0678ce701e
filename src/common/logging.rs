//! Logging infrastructure for freeslot

use log::Level;
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize the freeslot logging system
///
/// Reads the filter from `RUST_LOG` and defaults to `Info` otherwise.
/// Only the first call has an effect.
pub fn init() {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        builder
            .format(|buf, record| {
                use std::io::Write;

                let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f");

                let level_str = match record.level() {
                    Level::Error => "\x1b[31mERROR\x1b[0m",
                    Level::Warn => "\x1b[33mWARN\x1b[0m",
                    Level::Info => "\x1b[32mINFO\x1b[0m",
                    Level::Debug => "\x1b[36mDEBUG\x1b[0m",
                    Level::Trace => "\x1b[37mTRACE\x1b[0m",
                };

                writeln!(
                    buf,
                    "{} [{}] {}: {}",
                    timestamp,
                    level_str,
                    record.target(),
                    record.args()
                )
            })
            .filter_level(log::LevelFilter::Info)
            .parse_default_env();

        // Another logger may already be installed, e.g. by a test harness
        if builder.try_init().is_ok() {
            log::info!("freeslot logging initialized");
        }
    });
}

/// Initialize logging with a specific level
pub fn init_with_level(level: log::LevelFilter) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        builder
            .format(|buf, record| {
                use std::io::Write;

                let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f");

                writeln!(
                    buf,
                    "{} [{}] {}: {}",
                    timestamp,
                    record.level(),
                    record.target(),
                    record.args()
                )
            })
            .filter_level(level);

        if builder.try_init().is_ok() {
            log::info!("freeslot logging initialized with level: {level:?}");
        }
    });
}

/// Log an error message under the freeslot target
#[macro_export]
macro_rules! freeslot_error {
    ($($arg:tt)*) => {
        log::error!(target: "freeslot", $($arg)*)
    };
}

/// Log a warning message under the freeslot target
#[macro_export]
macro_rules! freeslot_warn {
    ($($arg:tt)*) => {
        log::warn!(target: "freeslot", $($arg)*)
    };
}

/// Log an info message under the freeslot target
#[macro_export]
macro_rules! freeslot_info {
    ($($arg:tt)*) => {
        log::info!(target: "freeslot", $($arg)*)
    };
}

/// Log a debug message under the freeslot target
#[macro_export]
macro_rules! freeslot_debug {
    ($($arg:tt)*) => {
        log::debug!(target: "freeslot", $($arg)*)
    };
}

/// Log a trace message under the freeslot target
#[macro_export]
macro_rules! freeslot_trace {
    ($($arg:tt)*) => {
        log::trace!(target: "freeslot", $($arg)*)
    };
}
