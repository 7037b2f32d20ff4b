use super::*;

const CENSUS_PARALLELISM: usize = 4;

const NO_COMMENTS_FOUND: &str = "No comments found.";

const UNKNOWN_LOCATION: &str = "unknown";

/// Fetches comments and prints how many, replies included, came from each
/// location.
pub(crate) async fn census(
  config: &Config,
  item: Option<String>,
  out: &mut impl Write,
) -> Result {
  let client = Client::new(config.source.clone());

  let collections = match (config.single, item) {
    (true, _) => vec![
      client
        .fetch_comments(None)
        .await
        .context("could not load comments")?,
    ],
    (false, Some(item)) => vec![
      client
        .fetch_comments(Some(item.as_str()))
        .await
        .with_context(|| format!("could not load comments for {item}"))?,
    ],
    (false, None) => {
      let entries = client
        .fetch_manifest()
        .await
        .context("could not load manifest")?;

      info!(items = entries.len(), "taking census of manifest");

      let mut collections = Vec::new();

      for (id, result) in
        client.fetch_all_comments(&entries, CENSUS_PARALLELISM).await
      {
        match result {
          Ok(comments) => collections.push(comments),
          Err(error) => {
            warn!(item = %id, %error, "skipping item");
            eprintln!("skipping {id}: {error}");
          }
        }
      }

      collections
    }
  };

  write_census(&location_census(&collections), collections.len(), out)
}

/// Comments per location across `collections`. Placeholder locations are
/// folded into `unknown`.
pub(crate) fn location_census(
  collections: &[Vec<Comment>],
) -> BTreeMap<String, u64> {
  let mut census = BTreeMap::new();

  for (_, comment) in collections
    .iter()
    .flat_map(|comments| Comment::flatten(comments))
  {
    let location = if is_tallyable(&comment.location) {
      comment.location.trim()
    } else {
      UNKNOWN_LOCATION
    };

    *census.entry(location.to_string()).or_insert(0) += 1;
  }

  census
}

/// Prints the ledger's leaderboard and how many votes produced it.
pub(crate) fn report(config: &Config, out: &mut impl Write) -> Result {
  let ledger = Ledger::load(config.ledger_path.clone());

  for line in stats_lines(ledger.counts()) {
    writeln!(out, "{line}")?;
  }

  let votes = u64::try_from(ledger.vote_count()).unwrap_or(u64::MAX);

  writeln!(out)?;
  writeln!(
    out,
    "{} tallied in {}",
    format_count(votes, "vote"),
    ledger.path().display()
  )?;

  Ok(())
}

fn write_census(
  census: &BTreeMap<String, u64>,
  collections: usize,
  out: &mut impl Write,
) -> Result {
  if census.is_empty() {
    writeln!(out, "{NO_COMMENTS_FOUND}")?;
    return Ok(());
  }

  for line in stats_lines(census) {
    writeln!(out, "{line}")?;
  }

  let total = census.values().sum::<u64>();

  writeln!(out)?;
  writeln!(
    out,
    "{} from {} across {}",
    format_count(total, "comment"),
    format_count(u64::try_from(census.len()).unwrap_or(u64::MAX), "location"),
    format_count(u64::try_from(collections).unwrap_or(u64::MAX), "collection"),
  )?;

  Ok(())
}
