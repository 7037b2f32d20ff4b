use super::*;

/// What to do with a comments response that arrives after a newer request.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub(crate) enum ResponsePolicy {
  /// Apply every response in arrival order, even superseded ones
  Arrival,
  /// Drop responses to anything but the most recent request
  #[default]
  Latest,
}

impl ResponsePolicy {
  pub(crate) fn accepts(self, request_id: u64, latest: Option<u64>) -> bool {
    match self {
      Self::Arrival => true,
      Self::Latest => latest == Some(request_id),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn latest_only_accepts_the_newest_request() {
    assert!(ResponsePolicy::Latest.accepts(3, Some(3)));
    assert!(!ResponsePolicy::Latest.accepts(2, Some(3)));
    assert!(!ResponsePolicy::Latest.accepts(0, None));
  }

  #[test]
  fn arrival_accepts_everything() {
    assert!(ResponsePolicy::Arrival.accepts(2, Some(3)));
    assert!(ResponsePolicy::Arrival.accepts(0, None));
  }
}
