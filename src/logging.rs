use std::path::PathBuf;
use std::sync::OnceLock;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Initialise logging. With `debug` disabled the level is fixed at `info`;
/// with it enabled `RUST_LOG` may override the default `debug` level.
///
/// When `log_file` is set, output is mirrored to that file through a
/// non-blocking writer. Calling this more than once keeps the first
/// subscriber.
pub fn init(debug: bool, log_file: Option<PathBuf>) {
    // Ignore RUST_LOG unless debug logging was asked for, so a stray
    // variable in the user's environment cannot make the launcher noisy.
    let level = if debug { "debug" } else { "info" };
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        EnvFilter::new(level)
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match log_file.and_then(file_writer) {
        Some((writer, guard)) => {
            let installed = builder
                .with_ansi(false)
                .with_writer(std::io::stderr.and(writer))
                .try_init()
                .is_ok();
            if installed {
                let _ = FILE_GUARD.set(guard);
            }
        }
        None => {
            let _ = builder.try_init();
        }
    }
}

fn file_writer(
    path: PathBuf,
) -> Option<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let name = path.file_name()?.to_owned();
    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!("failed to create log directory {}: {e}", dir.display());
        return None;
    }
    let appender = tracing_appender::rolling::never(dir, name);
    Some(tracing_appender::non_blocking(appender))
}
