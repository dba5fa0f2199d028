use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{LevelFilter, Log, Metadata, Record};

/// Logger that prints every record to stdout with a UTC timestamp.
pub struct StdoutLogger;

impl Log for StdoutLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        println!(
            "{} [{}] {}:{} - {}",
            format_timestamp(),
            record.level(),
            record.file().unwrap_or("unknown"),
            record.line().unwrap_or(0),
            record.args()
        );
    }

    fn flush(&self) {
        std::io::stdout().flush().ok();
    }
}

/// Install [`StdoutLogger`] as the global logger.
///
/// Debug builds log at Debug, release builds at Info. Calling this more than
/// once is a no-op.
pub fn init_stdout_logger() {
    static LOGGER: StdoutLogger = StdoutLogger;

    let max_level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(max_level);
    }
}

/// Current time as `YYYY-MM-DDTHH:MM:SS` (UTC).
pub fn format_timestamp() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let (year, month, day) = civil_from_days((secs / 86400) as i64);
    let time_of_day = secs % 86400;

    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
        year,
        month,
        day,
        time_of_day / 3600,
        (time_of_day % 3600) / 60,
        time_of_day % 60
    )
}

/// Convert days since Unix epoch to civil date (year, month, day).
/// Howard Hinnant's algorithm (public domain),
/// http://howardhinnant.github.io/date_algorithms.html
fn civil_from_days(z: i64) -> (i64, u32, u32) {
    let z = z + 719468;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = (z - era * 146097) as u32;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if m <= 2 { y + 1 } else { y };
    (y, m, d)
}

/// Log an error and exit the process with a failing status.
///
/// The log facade has no Fatal level, so this logs at Error, flushes stdout,
/// and calls `std::process::exit(1)`.
#[macro_export]
macro_rules! log_fatal {
    ($($arg:tt)*) => {{
        $crate::log::error!($($arg)*);
        {
            use std::io::Write;
            let _ = std::io::stdout().flush();
        }
        // No trailing semicolon: the macro evaluates to `!` so it can sit in
        // any expression position.
        std::process::exit(1)
    }};
}
