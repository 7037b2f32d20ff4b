use super::*;

#[derive(Debug, Parser)]
#[command(
  name = "loctally",
  version,
  about = "Browse scraped comment feeds and tally where commenters are from."
)]
pub(crate) struct Arguments {
  /// Root serving `manifest.json` and `<item>/comments.json`, as an http(s)
  /// URL or a local directory
  #[arg(long, env = "LOCTALLY_BASE", default_value = DEFAULT_BASE, global = true)]
  pub(crate) base: String,
  /// Ledger file holding location tallies and recorded votes
  #[arg(long, env = "LOCTALLY_LEDGER_FILE", global = true)]
  pub(crate) ledger: Option<PathBuf>,
  /// Read a single `comments.json` at the root instead of a manifest
  #[arg(long, global = true)]
  pub(crate) single: bool,
  /// How to treat comments that arrive after a newer item was selected
  #[arg(long, value_enum, default_value_t = ResponsePolicy::Latest)]
  pub(crate) stale_responses: ResponsePolicy,
  #[command(subcommand)]
  pub(crate) subcommand: Option<Subcommand>,
}

#[derive(Debug, clap::Subcommand)]
pub(crate) enum Subcommand {
  /// Count fetched comments, replies included, per location
  Census {
    /// Only count this item's comments
    #[arg(long)]
    item: Option<String>,
  },
  /// Print the tally leaderboard from the ledger
  Report,
}
