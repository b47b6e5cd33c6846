//! File-based logging bootstrap.
//!
//! stdoutは画面描画に使うため、診断ログはファイルに送る。
//! 初期化はプロセスにつき1回。同一ディレクトリへの再初期化は冪等で、
//! 別ディレクトリへの切り替えは拒否する。

use std::path::{Path, PathBuf};

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use once_cell::sync::OnceCell;

const LOG_FILE_BASENAME: &str = "bookshelf";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

static LOGGER: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    log_dir: PathBuf,
    _handle: LoggerHandle,
}

/// ファイルロガーを初期化する。
pub fn init(log_dir: &Path) -> Result<(), String> {
    if let Some(state) = LOGGER.get() {
        if state.log_dir == log_dir {
            return Ok(());
        }
        return Err(format!(
            "logging already initialized at `{}`; refusing to switch to `{}`",
            state.log_dir.display(),
            log_dir.display()
        ));
    }

    LOGGER
        .get_or_try_init(|| {
            std::fs::create_dir_all(log_dir).map_err(|e| {
                format!(
                    "failed to create log directory `{}`: {e}",
                    log_dir.display()
                )
            })?;

            let handle = Logger::try_with_str(default_level())
                .map_err(|e| format!("invalid log level: {e}"))?
                .log_to_file(
                    FileSpec::default()
                        .directory(log_dir)
                        .basename(LOG_FILE_BASENAME),
                )
                .rotate(
                    Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(MAX_LOG_FILES),
                )
                .write_mode(WriteMode::BufferAndFlush)
                .append()
                .format_for_files(flexi_logger::detailed_format)
                .start()
                .map_err(|e| format!("failed to start logger: {e}"))?;

            Ok(LoggingState {
                log_dir: log_dir.to_path_buf(),
                _handle: handle,
            })
        })
        .map(|_| ())
}

/// ビルドモードに応じた既定レベル。
pub fn default_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}
