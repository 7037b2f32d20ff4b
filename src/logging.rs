use super::*;

const DEFAULT_FILTER: &str = "loctally=info";
const LOG_ENV: &str = "LOCTALLY_LOG";
const LOG_FILE: &str = "loctally.log";

/// Routes `tracing` output to `loctally.log` in `directory`, since the
/// terminal belongs to the interface. Log lines are flushed until the returned
/// guard is dropped.
pub(crate) fn init(directory: &Path) -> Result<WorkerGuard> {
  fs::create_dir_all(directory).with_context(|| {
    format!("could not create log directory {}", directory.display())
  })?;

  let (writer, guard) = tracing_appender::non_blocking(
    tracing_appender::rolling::never(directory, LOG_FILE),
  );

  let filter = EnvFilter::try_from_env(LOG_ENV)
    .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

  tracing_subscriber::fmt()
    .with_writer(writer)
    .with_env_filter(filter)
    .with_ansi(false)
    .try_init()
    .map_err(|error| anyhow!(error))?;

  Ok(guard)
}
