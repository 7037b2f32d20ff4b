use super::*;

const ANONYMOUS_LABEL: &str = "anonymous";
const EMPTY_CONTENT_LABEL: &str = "[no content]";
const UNKNOWN_LOCATION_LABEL: &str = "unknown";

/// Display-ready form of one comment in the flattened feed.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Card {
  pub(crate) content: String,
  pub(crate) counted: bool,
  pub(crate) depth: usize,
  pub(crate) image: Option<Location>,
  pub(crate) key: VoteKey,
  pub(crate) location: String,
  pub(crate) reply_to: Option<String>,
  pub(crate) time: String,
  pub(crate) user: String,
}

impl Card {
  pub(crate) fn body(&self) -> &str {
    if self.content.trim().is_empty() {
      EMPTY_CONTENT_LABEL
    } else {
      &self.content
    }
  }

  pub(crate) fn header(&self) -> String {
    let mut header = self.user_label().to_string();

    for part in [self.time.as_str(), self.location_label()] {
      if !part.is_empty() {
        header.push_str(" • ");
        header.push_str(part);
      }
    }

    header
  }

  pub(crate) fn is_tallyable(&self) -> bool {
    is_tallyable(&self.location)
  }

  pub(crate) fn location_label(&self) -> &str {
    if self.location.trim().is_empty() {
      UNKNOWN_LOCATION_LABEL
    } else {
      &self.location
    }
  }

  pub(crate) fn marker(&self) -> &'static str {
    match (self.is_tallyable(), self.counted) {
      (_, true) => "[x]",
      (true, false) => "[ ]",
      (false, false) => "[-]",
    }
  }

  pub(crate) fn user_label(&self) -> &str {
    if self.user.trim().is_empty() {
      ANONYMOUS_LABEL
    } else {
      &self.user
    }
  }
}

/// Flattens `comments` depth-first into cards.
///
/// The result depends only on the arguments: `item_id` scopes both the vote
/// keys and image locations, and `ledger` decides which cards are counted.
pub(crate) fn render_cards(
  comments: &[Comment],
  ledger: &Ledger,
  item_id: Option<&str>,
  source: &Source,
) -> Vec<Card> {
  Comment::flatten(comments)
    .into_iter()
    .map(|(depth, comment)| {
      let key = VoteKey::for_comment(comment, item_id);

      let image = comment
        .image_path
        .as_deref()
        .filter(|path| !path.trim().is_empty())
        .map(|path| match item_id {
          Some(item_id) => source.locate(&[item_id, path]),
          None => source.locate(&[path]),
        });

      Card {
        content: comment.content.clone(),
        counted: ledger.is_counted(&key),
        depth,
        image,
        key,
        location: comment.location.clone(),
        reply_to: comment
          .reply_to
          .clone()
          .filter(|target| !target.trim().is_empty()),
        time: comment.time.clone(),
        user: comment.user.clone(),
      }
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use {super::*, tempfile::TempDir};

  fn comment(user: &str, location: &str, replies: Vec<Comment>) -> Comment {
    Comment {
      content: format!("{user} says hi"),
      location: location.into(),
      replies,
      time: "1h ago".into(),
      user: user.into(),
      ..Comment::default()
    }
  }

  fn ledger() -> (TempDir, Ledger) {
    let dir = tempfile::tempdir().unwrap();
    let ledger = Ledger::load(dir.path().join("ledger.json"));
    (dir, ledger)
  }

  fn source() -> Source {
    Source::parse("http://localhost/scraped_data").unwrap()
  }

  #[test]
  fn replies_follow_their_parent_with_increasing_depth() {
    let (_dir, ledger) = ledger();

    let comments = vec![
      comment(
        "alice",
        "Paris",
        vec![comment("bob", "Lyon", vec![comment("carol", "Nice", vec![])])],
      ),
      comment("dave", "Lille", vec![]),
    ];

    let cards = render_cards(&comments, &ledger, Some("42"), &source());

    assert_eq!(
      cards
        .iter()
        .map(|card| (card.depth, card.user.as_str()))
        .collect::<Vec<_>>(),
      vec![(0, "alice"), (1, "bob"), (2, "carol"), (0, "dave")]
    );
  }

  #[test]
  fn empty_fields_fall_back_to_placeholder_labels() {
    let (_dir, ledger) = ledger();

    let comments = vec![Comment::default()];

    let card = &render_cards(&comments, &ledger, Some("42"), &source())[0];

    assert_eq!(card.user_label(), "anonymous");
    assert_eq!(card.location_label(), "unknown");
    assert_eq!(card.body(), "[no content]");
    assert_eq!(card.header(), "anonymous • unknown");
    assert_eq!(card.marker(), "[-]");
    assert!(!card.is_tallyable());
  }

  #[test]
  fn cards_sharing_a_key_are_counted_together() {
    let (_dir, mut ledger) = ledger();

    let comments = vec![
      comment("Alice", "Paris", vec![]),
      comment("Bob", "Paris", vec![comment("Alice", "Paris", vec![])]),
    ];

    let cards = render_cards(&comments, &ledger, Some("42"), &source());

    ledger.toggle(&cards[0].key, &cards[0].location).unwrap();

    let cards = render_cards(&comments, &ledger, Some("42"), &source());

    assert_eq!(
      cards.iter().map(|card| card.counted).collect::<Vec<_>>(),
      vec![true, false, true]
    );
    assert_eq!(cards[0].marker(), "[x]");
    assert_eq!(cards[1].marker(), "[ ]");
  }

  #[test]
  fn vote_state_survives_reordering_of_the_collection() {
    let (_dir, mut ledger) = ledger();

    let mut comments = vec![
      comment("Alice", "Paris", vec![]),
      comment("Bob", "Lyon", vec![]),
      comment("Carol", "Nice", vec![]),
    ];

    let cards = render_cards(&comments, &ledger, Some("42"), &source());

    ledger.toggle(&cards[1].key, &cards[1].location).unwrap();

    comments.reverse();

    let counted = render_cards(&comments, &ledger, Some("42"), &source())
      .into_iter()
      .filter(|card| card.counted)
      .map(|card| card.user)
      .collect::<Vec<_>>();

    assert_eq!(counted, vec!["Bob".to_string()]);
  }

  #[test]
  fn votes_are_scoped_to_the_item() {
    let (_dir, mut ledger) = ledger();

    let comments = vec![comment("Alice", "Paris", vec![])];

    let cards = render_cards(&comments, &ledger, Some("42"), &source());

    ledger.toggle(&cards[0].key, &cards[0].location).unwrap();

    assert!(!render_cards(&comments, &ledger, Some("43"), &source())[0].counted);
    assert!(!render_cards(&comments, &ledger, None, &source())[0].counted);
  }

  #[test]
  fn images_resolve_against_the_item_directory() {
    let (_dir, ledger) = ledger();

    let comments = vec![Comment {
      image_path: Some("comment_images/a.jpg".into()),
      reply_to: Some("  ".into()),
      ..Comment::default()
    }];

    let card = &render_cards(&comments, &ledger, Some("42"), &source())[0];

    assert_eq!(
      card.image.as_ref().map(ToString::to_string).as_deref(),
      Some("http://localhost/scraped_data/42/comment_images/a.jpg")
    );
    assert_eq!(card.reply_to, None);

    let card = &render_cards(&comments, &ledger, None, &source())[0];

    assert_eq!(
      card.image.as_ref().map(ToString::to_string).as_deref(),
      Some("http://localhost/scraped_data/comment_images/a.jpg")
    );
  }

  #[test]
  fn rendering_is_repeatable() {
    let (_dir, ledger) = ledger();

    let comments = vec![comment("Alice", "Paris", vec![comment("Bob", "", vec![])])];

    assert_eq!(
      render_cards(&comments, &ledger, Some("42"), &source()),
      render_cards(&comments, &ledger, Some("42"), &source())
    );
  }
}
