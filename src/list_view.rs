pub(crate) struct ListView<T> {
  items: Vec<T>,
  offset: usize,
  selected: usize,
}

impl<T> Default for ListView<T> {
  fn default() -> Self {
    Self {
      items: Vec::new(),
      offset: 0,
      selected: 0,
    }
  }
}

impl<T> ListView<T> {
  pub(crate) fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub(crate) fn items(&self) -> &[T] {
    &self.items
  }

  pub(crate) fn new(items: Vec<T>) -> Self {
    Self {
      items,
      offset: 0,
      selected: 0,
    }
  }

  pub(crate) fn offset(&self) -> usize {
    if self.items.is_empty() {
      0
    } else {
      self.offset.min(self.selected)
    }
  }

  pub(crate) fn select_by(&mut self, delta: isize) {
    self.set_selected(self.selected.saturating_add_signed(delta));
  }

  pub(crate) fn select_where<F>(&mut self, predicate: F) -> bool
  where
    F: Fn(&T) -> bool,
  {
    match self.items.iter().position(predicate) {
      Some(index) => {
        self.selected = index;
        true
      }
      None => false,
    }
  }

  pub(crate) fn selected_index(&self) -> Option<usize> {
    if self.items.is_empty() {
      None
    } else {
      Some(self.selected.min(self.items.len().saturating_sub(1)))
    }
  }

  pub(crate) fn selected_item(&self) -> Option<&T> {
    self
      .selected_index()
      .and_then(|index| self.items.get(index))
  }

  pub(crate) fn set_offset(&mut self, offset: usize) {
    self.offset = offset.min(self.items.len().saturating_sub(1));
  }

  pub(crate) fn set_selected(&mut self, index: usize) {
    self.selected = index.min(self.items.len().saturating_sub(1));
  }
}
