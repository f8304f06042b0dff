// src/log.rs
//
// Opt-in debug logging. The sink comes from AUDIT_SCRAPE_LOG: unset means
// disabled, "-" means stderr, anything else is a file to append to. A
// one-shot CLI must not drop log files unasked.

use std::fs::OpenOptions;
use std::io::Write;
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

use crate::params::LOG_ENV;

static LOG_LOCK: Mutex<()> = Mutex::new(());
static START: OnceLock<Instant> = OnceLock::new();
static SINK: OnceLock<Option<String>> = OnceLock::new();

fn sink() -> Option<&'static str> {
    SINK.get_or_init(|| std::env::var(LOG_ENV).ok().filter(|v| !v.is_empty()))
        .as_deref()
}

fn fmt_elapsed(ms: u128) -> String {
    let ms = ms as u64;
    format!(
        "{:02}:{:02}:{:02}.{:03}",
        ms / 3_600_000,
        ms % 3_600_000 / 60_000,
        ms % 60_000 / 1_000,
        ms % 1_000
    )
}

/// Internal logging function; use the macros.
pub fn write_log(level: &str, msg: &str) {
    let Some(target) = sink() else { return };
    let elapsed = fmt_elapsed(START.get_or_init(Instant::now).elapsed().as_millis());
    let line = format!("[{elapsed}][{level}] {msg}\n");

    let Ok(_guard) = LOG_LOCK.lock() else { return };
    if target == "-" {
        let _ = std::io::stderr().write_all(line.as_bytes());
    } else if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(target) {
        let _ = file.write_all(line.as_bytes());
    }
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        $crate::log::write_log("INFO", &format!($($arg)*))
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        $crate::log::write_log("DEBUG", &format!($($arg)*))
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        $crate::log::write_log("ERROR", &format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_is_hh_mm_ss_ms() {
        assert_eq!(fmt_elapsed(0), "00:00:00.000");
        assert_eq!(fmt_elapsed(3_661_001), "01:01:01.001");
    }
}
