use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;

/// Installs the default subscriber: daily-rolling file log, non-blocking
/// writer. The embedding application calls this once at startup and keeps
/// the returned guard alive for the life of the process; libraries and
/// tests leave the subscriber alone.
pub fn init(log_dir: &str) -> WorkerGuard {
    let file_appender = rolling::daily(log_dir, "ems.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .pretty()
        .init();

    guard
}
