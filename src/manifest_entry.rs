use super::*;

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub(crate) struct ManifestEntry {
  pub(crate) comment_count: u64,
  #[serde(deserialize_with = "deserialize_string")]
  pub(crate) id: String,
  #[serde(deserialize_with = "deserialize_string")]
  pub(crate) scrape_date: String,
  #[serde(deserialize_with = "deserialize_string")]
  pub(crate) title: String,
  #[serde(deserialize_with = "deserialize_string")]
  pub(crate) url: String,
}

impl ManifestEntry {
  pub(crate) fn detail(&self) -> String {
    let count = format_count(self.comment_count, "comment");

    match self.scrape_day() {
      "" => count,
      day => format!("{count} • {day}"),
    }
  }

  pub(crate) fn label(&self) -> &str {
    if self.title.trim().is_empty() {
      &self.id
    } else {
      &self.title
    }
  }

  pub(crate) fn scrape_day(&self) -> &str {
    self.scrape_date.split(' ').next().unwrap_or_default()
  }
}
