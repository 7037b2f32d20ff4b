use super::*;

/// Contents of the comment pane.
pub(crate) enum Feed {
  Failed(String),
  Idle,
  Loading(String),
  Ready(FeedView),
}

impl Feed {
  pub(crate) fn view(&self) -> Option<&FeedView> {
    match self {
      Self::Ready(view) => Some(view),
      _ => None,
    }
  }

  pub(crate) fn view_mut(&mut self) -> Option<&mut FeedView> {
    match self {
      Self::Ready(view) => Some(view),
      _ => None,
    }
  }
}
