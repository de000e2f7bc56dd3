//! Run-scoped logging
//!
//! Every run writes its events into a fresh file named after the local start time, e.g.
//! `logs/10_19_2026_14_03_59.log`. The level is taken from `RUST_LOG` and defaults to `info`.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Local};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::error::{Result, ResultExt, SetupError};

static INSTALLED: AtomicBool = AtomicBool::new(false);

/// Keeps the log file of a run open
///
/// Events are written by a background thread. Dropping the handle flushes the remaining
/// events and closes the file, so it must live until the end of the run.
pub struct LogHandle {
    path: PathBuf,
    _guard: WorkerGuard,
}

impl LogHandle {
    /// Path of the log file of this run
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// File name of the log of a run started at `start`
pub fn log_file_name(start: DateTime<Local>) -> String {
    format!("{}.log", start.format("%m_%d_%Y_%H_%M_%S"))
}

/// Installs the global subscriber, writing into a new file in `dir`
///
/// Must be called at most once per process. Later calls fail before touching the file system.
pub fn init_logging<P: AsRef<Path>>(dir: P) -> Result<LogHandle> {
    if INSTALLED.swap(true, Ordering::SeqCst) {
        return Err(SetupError::LoggingInstalled).during("installing the log subscriber");
    }
    let dir = dir.as_ref();
    fs::create_dir_all(dir).during("creating the log directory")?;

    let file_name = log_file_name(Local::now());
    let (writer, guard) = non_blocking(rolling::never(dir, &file_name));

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true);

    Registry::default()
        .with(filter)
        .with(file_layer)
        .try_init()
        .during("installing the log subscriber")?;

    let path = dir.join(file_name);
    tracing::info!("logging to {}", path.display());

    Ok(LogHandle {
        path,
        _guard: guard,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn file_name_follows_the_start_time() {
        let start = Local.with_ymd_and_hms(2026, 3, 7, 9, 5, 1).unwrap();
        assert_eq!(log_file_name(start), "03_07_2026_09_05_01.log");
    }
}
