use super::*;

/// Scrollable list of cards with a selection cursor.
#[derive(Debug, Default)]
pub(crate) struct FeedView {
  cards: Vec<Card>,
  offset: usize,
  selected: Option<usize>,
}

impl FeedView {
  pub(crate) fn cards(&self) -> &[Card] {
    &self.cards
  }

  pub(crate) fn is_empty(&self) -> bool {
    self.cards.is_empty()
  }

  pub(crate) fn move_by(&mut self, delta: isize) {
    let Some(current) = self.selected else {
      return;
    };

    let max_index = self.cards.len().saturating_sub(1);

    self.selected = Some(
      current
        .saturating_add_signed(delta)
        .min(max_index),
    );
  }

  pub(crate) fn new(cards: Vec<Card>) -> Self {
    let selected = (!cards.is_empty()).then_some(0);

    Self {
      cards,
      offset: 0,
      selected,
    }
  }

  pub(crate) fn offset(&self) -> usize {
    self.offset.min(self.selected.unwrap_or(0))
  }

  /// Swaps in freshly rendered cards for the same collection, keeping the
  /// cursor where it was.
  pub(crate) fn replace_cards(&mut self, cards: Vec<Card>) {
    self.selected = match (self.selected, cards.len()) {
      (_, 0) => None,
      (Some(selected), len) => Some(selected.min(len - 1)),
      (None, _) => Some(0),
    };

    self.cards = cards;
  }

  pub(crate) fn selected_card(&self) -> Option<&Card> {
    self.selected.and_then(|index| self.cards.get(index))
  }

  pub(crate) fn selected_index(&self) -> Option<usize> {
    self.selected
  }

  pub(crate) fn set_offset(&mut self, offset: usize) {
    self.offset = offset;
  }
}
