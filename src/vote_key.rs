use super::*;

const SENTINEL_LOCATIONS: [&str; 3] = ["", "Unknown", "未知"];

/// Identity under which one tally is tracked.
///
/// Keys are scoped to a user within an item (`<item>:<user>`), or to the user
/// alone when there is only one comment collection. Several comments by the
/// same user therefore share a key, and a key never depends on where a comment
/// sits in the collection.
#[derive(
  Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(transparent)]
pub(crate) struct VoteKey(String);

impl Display for VoteKey {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl VoteKey {
  pub(crate) fn for_comment(comment: &Comment, item_id: Option<&str>) -> Self {
    match item_id {
      Some(item_id) => Self(format!("{item_id}:{}", comment.user)),
      None => Self(comment.user.clone()),
    }
  }
}

/// Whether a location may be tallied at all.
pub(crate) fn is_tallyable(location: &str) -> bool {
  !SENTINEL_LOCATIONS.contains(&location.trim())
}
