use super::*;

#[derive(Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
struct Snapshot {
  counts: BTreeMap<String, u64>,
  votes: BTreeMap<VoteKey, String>,
}

/// Outcome of toggling a vote.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Toggle {
  Counted { location: String },
  Ignored,
  Uncounted { location: String },
}

/// Location tallies plus the vote keys that produced them.
///
/// `counts[loc]` always equals the number of entries in `votes` whose stored
/// location is `loc`, and zero tallies are dropped from `counts`. Both halves
/// are persisted together in one JSON document after every mutation.
#[derive(Debug)]
pub(crate) struct Ledger {
  counts: BTreeMap<String, u64>,
  path: PathBuf,
  votes: BTreeMap<VoteKey, String>,
}

impl Ledger {
  pub(crate) fn clear(&mut self) -> Result {
    self.persist(Snapshot::default())?;

    info!("cleared all location tallies");

    Ok(())
  }

  pub(crate) fn counts(&self) -> &BTreeMap<String, u64> {
    &self.counts
  }

  pub(crate) fn is_counted(&self, key: &VoteKey) -> bool {
    self.votes.contains_key(key)
  }

  /// Reads the ledger at `path`. A missing, empty, or unreadable ledger yields
  /// an empty one; tallies that disagree with the stored votes are rebuilt.
  pub(crate) fn load(path: PathBuf) -> Self {
    let snapshot = match fs::read(&path) {
      Ok(data) if data.iter().all(u8::is_ascii_whitespace) => Snapshot::default(),
      Ok(data) => serde_json::from_slice::<Snapshot>(&data).unwrap_or_else(
        |error| {
          warn!(path = %path.display(), %error, "ignoring malformed ledger");
          Snapshot::default()
        },
      ),
      Err(error) if error.kind() == io::ErrorKind::NotFound => {
        Snapshot::default()
      }
      Err(error) => {
        warn!(path = %path.display(), %error, "could not read ledger");
        Snapshot::default()
      }
    };

    let Snapshot { counts, mut votes } = snapshot;

    votes.retain(|_, location| is_tallyable(location));

    let tally = Self::tally(&votes);

    if tally != counts {
      warn!(
        path = %path.display(),
        "ledger tallies disagree with recorded votes, rebuilding"
      );
    }

    debug!(path = %path.display(), votes = votes.len(), "loaded ledger");

    Self {
      counts: tally,
      path,
      votes,
    }
  }

  pub(crate) fn path(&self) -> &Path {
    &self.path
  }

  /// Writes `snapshot` and adopts it. The in-memory ledger is left as it was
  /// when the write fails.
  fn persist(&mut self, snapshot: Snapshot) -> Result {
    if let Some(parent) = self.path.parent() {
      fs::create_dir_all(parent).with_context(|| {
        format!("could not create ledger directory {}", parent.display())
      })?;
    }

    let serialized = serde_json::to_vec_pretty(&snapshot)?;

    let staging = self.path.with_extension("json.tmp");

    fs::write(&staging, serialized)
      .with_context(|| format!("could not write {}", staging.display()))?;

    fs::rename(&staging, &self.path)
      .with_context(|| format!("could not replace {}", self.path.display()))?;

    self.counts = snapshot.counts;
    self.votes = snapshot.votes;

    Ok(())
  }

  fn tally(votes: &BTreeMap<VoteKey, String>) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();

    for location in votes.values() {
      *counts.entry(location.clone()).or_insert(0) += 1;
    }

    counts
  }

  /// Counts `location` under `key`, or withdraws the vote already recorded
  /// under `key`. A withdrawal decrements the location stored at vote time,
  /// which may differ from `location` when the same user posted several
  /// comments from different places. Untallyable locations leave the ledger
  /// untouched either way. Locations are stored trimmed.
  pub(crate) fn toggle(
    &mut self,
    key: &VoteKey,
    location: &str,
  ) -> Result<Toggle> {
    let location = location.trim();

    if !is_tallyable(location) {
      return Ok(Toggle::Ignored);
    }

    let mut votes = self.votes.clone();

    if let Some(previous) = votes.remove(key) {
      self.persist(Snapshot {
        counts: Self::tally(&votes),
        votes,
      })?;

      debug!(%key, location = %previous, "withdrew vote");

      return Ok(Toggle::Uncounted { location: previous });
    }

    votes.insert(key.clone(), location.to_string());

    self.persist(Snapshot {
      counts: Self::tally(&votes),
      votes,
    })?;

    debug!(%key, %location, "counted vote");

    Ok(Toggle::Counted {
      location: location.to_string(),
    })
  }

  pub(crate) fn vote_count(&self) -> usize {
    self.votes.len()
  }
}

#[cfg(test)]
mod tests {
  use {super::*, tempfile::TempDir};

  fn key(raw: &str) -> VoteKey {
    let (item, user) = raw.split_once(':').unwrap();

    VoteKey::for_comment(
      &Comment {
        user: user.into(),
        ..Comment::default()
      },
      Some(item),
    )
  }

  fn ledger() -> (TempDir, Ledger) {
    let dir = tempfile::tempdir().unwrap();
    let ledger = Ledger::load(dir.path().join("ledger.json"));
    (dir, ledger)
  }

  fn assert_consistent(ledger: &Ledger) {
    assert_eq!(ledger.counts, Ledger::tally(&ledger.votes));
    assert!(ledger.counts.values().all(|count| *count > 0));
  }

  #[test]
  fn toggle_counts_then_withdraws() {
    let (_dir, mut ledger) = ledger();

    assert_eq!(
      ledger.toggle(&key("42:Alice"), "Paris").unwrap(),
      Toggle::Counted {
        location: "Paris".into()
      }
    );

    assert_eq!(ledger.counts()["Paris"], 1);
    assert!(ledger.is_counted(&key("42:Alice")));

    assert_eq!(
      ledger.toggle(&key("42:Alice"), "Paris").unwrap(),
      Toggle::Uncounted {
        location: "Paris".into()
      }
    );

    assert!(ledger.counts().is_empty());
    assert_eq!(ledger.vote_count(), 0);
  }

  #[test]
  fn toggling_twice_restores_prior_state() {
    let (_dir, mut ledger) = ledger();

    ledger.toggle(&key("1:bob"), "Lyon").unwrap();
    ledger.toggle(&key("1:carol"), "Paris").unwrap();

    let (counts, votes) = (ledger.counts.clone(), ledger.votes.clone());

    ledger.toggle(&key("1:dave"), "Paris").unwrap();
    ledger.toggle(&key("1:dave"), "Paris").unwrap();

    assert_eq!(ledger.counts, counts);
    assert_eq!(ledger.votes, votes);
  }

  #[test]
  fn sentinel_locations_are_never_tallied() {
    let (dir, mut ledger) = ledger();

    for location in ["", "Unknown", "未知"] {
      assert_eq!(
        ledger.toggle(&key("42:Alice"), location).unwrap(),
        Toggle::Ignored
      );
    }

    assert!(ledger.counts().is_empty());
    assert_eq!(ledger.vote_count(), 0);
    assert!(!dir.path().join("ledger.json").exists());
  }

  #[test]
  fn withdrawal_decrements_the_stored_location() {
    let (_dir, mut ledger) = ledger();

    ledger.toggle(&key("42:Alice"), "Paris").unwrap();

    assert_eq!(
      ledger.toggle(&key("42:Alice"), "Berlin").unwrap(),
      Toggle::Uncounted {
        location: "Paris".into()
      }
    );

    assert!(ledger.counts().is_empty());
    assert_consistent(&ledger);
  }

  #[test]
  fn sentinel_comment_cannot_withdraw_an_existing_vote() {
    let (_dir, mut ledger) = ledger();

    ledger.toggle(&key("42:Alice"), "Paris").unwrap();

    assert_eq!(
      ledger.toggle(&key("42:Alice"), "Unknown").unwrap(),
      Toggle::Ignored
    );

    assert_eq!(ledger.counts()["Paris"], 1);
    assert!(ledger.is_counted(&key("42:Alice")));
  }

  #[test]
  fn tallies_match_votes_over_a_long_toggle_sequence() {
    let (_dir, mut ledger) = ledger();

    let users = ["a", "b", "c", "d", "e"];
    let locations = ["Paris", "Lyon", "Unknown", "Nice", ""];

    let mut seed = 17_usize;

    for _ in 0..200 {
      seed = seed.wrapping_mul(31).wrapping_add(7) % 1009;

      let user = users[seed % users.len()];
      let location = locations[(seed / 5) % locations.len()];

      ledger.toggle(&key(&format!("9:{user}")), location).unwrap();

      assert_consistent(&ledger);
    }
  }

  #[test]
  fn state_survives_reload() {
    let (dir, mut ledger) = ledger();

    ledger.toggle(&key("42:Alice"), "Paris").unwrap();
    ledger.toggle(&key("42:Bob"), "Paris").unwrap();
    ledger.toggle(&key("7:Alice"), "Lyon").unwrap();

    let reloaded = Ledger::load(dir.path().join("ledger.json"));

    assert_eq!(reloaded.counts()["Paris"], 2);
    assert_eq!(reloaded.counts()["Lyon"], 1);
    assert!(reloaded.is_counted(&key("7:Alice")));
    assert!(!dir.path().join("ledger.json.tmp").exists());
  }

  #[test]
  fn clear_empties_both_halves_and_persists() {
    let (dir, mut ledger) = ledger();

    for user in ["a", "b", "c"] {
      ledger.toggle(&key(&format!("1:{user}")), user).unwrap();
    }

    ledger.clear().unwrap();

    assert!(ledger.counts().is_empty());

    let reloaded = Ledger::load(dir.path().join("ledger.json"));

    assert!(reloaded.counts().is_empty());
    assert_eq!(reloaded.vote_count(), 0);
  }

  #[test]
  fn malformed_ledger_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.json");

    for contents in ["", "\n", "not json", "[1, 2]", r#"{"counts": "x"}"#] {
      fs::write(&path, contents).unwrap();

      let ledger = Ledger::load(path.clone());

      assert!(ledger.counts().is_empty(), "{contents:?}");
      assert_eq!(ledger.vote_count(), 0, "{contents:?}");
    }
  }

  #[test]
  fn inconsistent_tallies_are_rebuilt_from_votes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.json");

    fs::write(
      &path,
      r#"{
        "counts": {"Paris": 5, "Unknown": 2, "Lyon": 0},
        "votes": {"1:a": "Paris", "1:b": "Paris", "1:c": "Unknown"}
      }"#,
    )
    .unwrap();

    let ledger = Ledger::load(path);

    assert_eq!(
      ledger.counts().iter().collect::<Vec<_>>(),
      vec![(&"Paris".to_string(), &2)]
    );
    assert_eq!(ledger.vote_count(), 2);
  }

  #[test]
  fn failed_write_leaves_the_ledger_untouched() {
    let dir = tempfile::tempdir().unwrap();

    let blocker = dir.path().join("blocker");

    fs::write(&blocker, "not a directory").unwrap();

    let mut ledger = Ledger::load(blocker.join("ledger.json"));

    assert!(ledger.toggle(&key("42:Alice"), "Paris").is_err());

    assert!(!ledger.is_counted(&key("42:Alice")));
    assert!(ledger.counts().is_empty());
    assert_eq!(ledger.vote_count(), 0);
  }

  #[test]
  fn failed_clear_keeps_recorded_votes() {
    let dir = tempfile::tempdir().unwrap();

    let parent = dir.path().join("tallies");

    let mut ledger = Ledger::load(parent.join("ledger.json"));

    ledger.toggle(&key("42:Alice"), "Paris").unwrap();

    fs::remove_dir_all(&parent).unwrap();
    fs::write(&parent, "not a directory").unwrap();

    assert!(ledger.clear().is_err());
    assert!(ledger.toggle(&key("42:Alice"), "Paris").is_err());

    assert_eq!(ledger.counts()["Paris"], 1);
    assert!(ledger.is_counted(&key("42:Alice")));
  }

  #[test]
  fn locations_are_stored_trimmed() {
    let (dir, mut ledger) = ledger();

    assert_eq!(
      ledger.toggle(&key("42:Alice"), "  Paris ").unwrap(),
      Toggle::Counted {
        location: "Paris".into()
      }
    );

    ledger.toggle(&key("42:Bob"), "Paris").unwrap();

    assert_eq!(ledger.counts().len(), 1);
    assert_eq!(ledger.counts()["Paris"], 2);

    let reloaded = Ledger::load(dir.path().join("ledger.json"));

    assert_eq!(reloaded.counts()["Paris"], 2);
  }
}
