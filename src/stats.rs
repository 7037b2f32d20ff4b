use super::*;

pub(crate) const NO_VOTES: &str = "No votes yet.";

/// Positive tallies, highest first. Equal tallies keep the iteration order of
/// `counts`, which is alphabetical by location.
pub(crate) fn leaderboard(counts: &BTreeMap<String, u64>) -> Vec<(&str, u64)> {
  let mut ranked = counts
    .iter()
    .filter(|(_, count)| **count > 0)
    .map(|(location, count)| (location.as_str(), *count))
    .collect::<Vec<_>>();

  ranked.sort_by(|a, b| b.1.cmp(&a.1));

  ranked
}

/// One line per ranked location, or the empty-state placeholder. Counts line
/// up by display width, so wide characters take two columns.
pub(crate) fn stats_lines(counts: &BTreeMap<String, u64>) -> Vec<String> {
  let ranked = leaderboard(counts);

  if ranked.is_empty() {
    return vec![NO_VOTES.to_string()];
  }

  let width = ranked
    .iter()
    .map(|(location, _)| location.width())
    .max()
    .unwrap_or(0);

  ranked
    .iter()
    .enumerate()
    .map(|(index, (location, count))| {
      let padding = " ".repeat(width - location.width());
      format!("{:>2}. {location}{padding}  {count}", index + 1)
    })
    .collect()
}
