use super::*;

/// One scraped comment and, recursively, the replies scraped beneath it.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub(crate) struct Comment {
  #[serde(deserialize_with = "deserialize_string")]
  pub(crate) content: String,
  #[serde(deserialize_with = "deserialize_optional_string")]
  pub(crate) image_path: Option<String>,
  #[serde(deserialize_with = "deserialize_string")]
  pub(crate) location: String,
  #[serde(deserialize_with = "deserialize_null_default")]
  pub(crate) replies: Vec<Comment>,
  #[serde(deserialize_with = "deserialize_optional_string")]
  pub(crate) reply_to: Option<String>,
  #[serde(deserialize_with = "deserialize_string")]
  pub(crate) scrape_time: String,
  #[serde(deserialize_with = "deserialize_string")]
  pub(crate) time: String,
  #[serde(deserialize_with = "deserialize_string")]
  pub(crate) user: String,
}

impl Comment {
  /// Depth-first walk over `comments` and all their replies, paired with the
  /// nesting depth of each comment.
  pub(crate) fn flatten(comments: &[Comment]) -> Vec<(usize, &Comment)> {
    let mut flattened = Vec::new();

    let mut stack = comments
      .iter()
      .rev()
      .map(|comment| (0_usize, comment))
      .collect::<Vec<_>>();

    while let Some((depth, comment)) = stack.pop() {
      flattened.push((depth, comment));

      stack.extend(
        comment
          .replies
          .iter()
          .rev()
          .map(|reply| (depth.saturating_add(1), reply)),
      );
    }

    flattened
  }
}
