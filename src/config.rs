use super::*;

const APP_DIR: &str = "loctally";
const LEDGER_FILE: &str = "ledger.json";

#[derive(Debug)]
pub(crate) struct Config {
  pub(crate) data_dir: PathBuf,
  pub(crate) ledger_path: PathBuf,
  pub(crate) policy: ResponsePolicy,
  pub(crate) single: bool,
  pub(crate) source: Source,
}

impl Config {
  /// Directory for the ledger and log file: `LOCTALLY_DATA_DIR`, then the XDG
  /// data directory, then `~/.local/share`.
  fn data_dir<F>(var: F) -> Result<PathBuf>
  where
    F: Fn(&str) -> Option<String>,
  {
    if let Some(dir) = var("LOCTALLY_DATA_DIR") {
      return Ok(PathBuf::from(dir));
    }

    let base_dir = if let Some(dir) = var("XDG_DATA_HOME") {
      PathBuf::from(dir)
    } else if let Some(home) = var("HOME") {
      PathBuf::from(home).join(".local").join("share")
    } else {
      env::current_dir()?.join(".local").join("share")
    };

    Ok(base_dir.join(APP_DIR))
  }

  pub(crate) fn from_arguments(arguments: &Arguments) -> Result<Self> {
    let data_dir = Self::data_dir(|name| {
      env::var(name).ok().filter(|value| !value.is_empty())
    })
    .context("could not determine data directory")?;

    let ledger_path = arguments
      .ledger
      .clone()
      .unwrap_or_else(|| data_dir.join(LEDGER_FILE));

    Ok(Self {
      data_dir,
      ledger_path,
      policy: arguments.stale_responses,
      single: arguments.single,
      source: Source::parse(&arguments.base)?,
    })
  }
}
