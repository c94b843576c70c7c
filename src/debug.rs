//! Logging bridge for par-vfont.
//!
//! Routes every `log::info!()` etc. from the binary and the library crates
//! to `par_vfont_debug.log` in the system temp directory (`/tmp` on
//! Unix/macOS, `%TEMP%` on Windows). When `RUST_LOG` is set, records are
//! mirrored to stderr as well.
//!
//! Level precedence: `--log-level` flag, then `RUST_LOG`, then the numeric
//! `DEBUG_LEVEL` variable (0 off .. 4 trace), then `warn`.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{LevelFilter, Log, Metadata, Record};
use parking_lot::Mutex;

struct LogBridge {
    level: LevelFilter,
    file: Mutex<Option<File>>,
    mirror_stderr: bool,
}

static BRIDGE: OnceLock<LogBridge> = OnceLock::new();

/// Path of the debug log file.
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join("par_vfont_debug.log")
}

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Format one log line: `[timestamp] [LEVEL] [target] message`.
fn format_line(timestamp: &str, level: log::Level, target: &str, msg: &str) -> String {
    format!("[{}] [{:<5}] [{}] {}\n", timestamp, level, target, msg)
}

/// Map the legacy numeric `DEBUG_LEVEL` value to a filter.
fn level_from_debug_level(value: &str) -> Option<LevelFilter> {
    match value.trim().parse::<u8>().ok()? {
        0 => Some(LevelFilter::Off),
        1 => Some(LevelFilter::Error),
        2 => Some(LevelFilter::Info),
        3 => Some(LevelFilter::Debug),
        4 => Some(LevelFilter::Trace),
        _ => None,
    }
}

/// Resolve the effective level from the flag and the environment values.
fn resolve_level(
    cli_level: Option<LevelFilter>,
    rust_log: Option<&str>,
    debug_level: Option<&str>,
) -> LevelFilter {
    cli_level
        .or_else(|| rust_log.and_then(|v| LevelFilter::from_str(v.trim()).ok()))
        .or_else(|| debug_level.and_then(level_from_debug_level))
        .unwrap_or(LevelFilter::Warn)
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(
            &get_timestamp(),
            record.level(),
            record.target(),
            &record.args().to_string(),
        );

        if let Some(file) = self.file.lock().as_mut() {
            // A failed write must not disturb rendering output
            let _ = file.write_all(line.as_bytes());
        }
        if self.mirror_stderr {
            eprint!("{}", line);
        }
    }

    fn flush(&self) {
        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.flush();
        }
    }
}

/// Install the logging bridge. Calling it again is a no-op.
pub fn init_log_bridge(cli_level: Option<LevelFilter>) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let debug_level = std::env::var("DEBUG_LEVEL").ok();
    let level = resolve_level(cli_level, rust_log.as_deref(), debug_level.as_deref());

    let file = if level != LevelFilter::Off {
        OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(log_path())
            .ok()
    } else {
        None
    };

    let bridge = BRIDGE.get_or_init(|| LogBridge {
        level,
        file: Mutex::new(file),
        mirror_stderr: rust_log.is_some(),
    });

    if log::set_logger(bridge).is_ok() {
        log::set_max_level(bridge.level);
        log::info!(
            "par-vfont {} logging at {} to {:?}",
            crate::VERSION,
            bridge.level,
            log_path()
        );
    }
}
