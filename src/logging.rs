//! Logger bootstrap.
//!
//! Messages elsewhere in the crate use `event=... module=... status=...` key/value pairs.
//! Without a log directory everything goes to stderr; with one, to size-rotated files
//! with warnings also echoed to stderr.

use flexi_logger::{
    Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming, WriteMode,
};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

const LOG_FILE_BASENAME: &str = "greenway";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;

static LOGGING_STATE: OnceLock<LoggingState> = OnceLock::new();

struct LoggingState {
    level: &'static str,
    log_dir: Option<PathBuf>,
    _logger: LoggerHandle,
}

/// Maps user input to one of the levels the logger accepts.
///
/// # Errors
///
/// Returns `Err` for anything other than trace, debug, info, warn or error.
pub fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!("unsupported log level `{other}`")),
    }
}

/// Starts the logger once per process. Repeating the same call is a no-op.
///
/// # Errors
///
/// Returns `Err` if the level is unsupported, the directory cannot be created, the backend
/// fails to start, or logging is already running with a different configuration.
pub fn init_logging(level: &str, log_dir: Option<&Path>) -> Result<(), String> {
    let level = normalize_level(level)?;
    let log_dir = log_dir.map(Path::to_path_buf);

    if let Some(state) = LOGGING_STATE.get() {
        return check_same(state, level, log_dir.as_deref());
    }

    let logger = Logger::try_with_str(level).map_err(|e| format!("invalid log level `{level}`: {e}"))?;
    let logger = match &log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .map_err(|e| format!("failed to create log directory `{}`: {e}", dir.display()))?;
            logger
                .log_to_file(FileSpec::default().directory(dir).basename(LOG_FILE_BASENAME))
                .rotate(
                    Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(MAX_LOG_FILES),
                )
                .write_mode(WriteMode::BufferAndFlush)
                .append()
                .duplicate_to_stderr(Duplicate::Warn)
                .format_for_files(flexi_logger::detailed_format)
        }
        None => logger.log_to_stderr().format(flexi_logger::default_format),
    };
    let handle = logger
        .start()
        .map_err(|e| format!("failed to start logger: {e}"))?;

    log::info!(
        "event=app_start module=logging status=ok level={level} version={}",
        env!("CARGO_PKG_VERSION")
    );

    let state = LOGGING_STATE.get_or_init(|| LoggingState {
        level,
        log_dir: log_dir.clone(),
        _logger: handle,
    });
    check_same(state, level, log_dir.as_deref())
}

fn check_same(state: &LoggingState, level: &str, log_dir: Option<&Path>) -> Result<(), String> {
    if state.log_dir.as_deref() != log_dir {
        return Err("logging already initialized with a different directory".to_string());
    }
    if state.level != level {
        return Err(format!(
            "logging already initialized with level `{}`; refusing to switch to `{level}`",
            state.level
        ));
    }
    Ok(())
}
