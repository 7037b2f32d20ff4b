use super::*;

/// Manifest entries shown in the item pane, plus the outcome of the most
/// recent manifest load.
#[derive(Default)]
pub(crate) struct ItemList {
  error: Option<String>,
  loading: bool,
  view: ListView<ManifestEntry>,
}

impl ItemList {
  pub(crate) fn error(&self) -> Option<&str> {
    self.error.as_deref()
  }

  pub(crate) fn fail(&mut self, message: String) {
    self.error = Some(message);
    self.loading = false;
  }

  pub(crate) fn find(&self, id: &str) -> Option<&ManifestEntry> {
    self.view.items().iter().find(|entry| entry.id == id)
  }

  pub(crate) fn is_loading(&self) -> bool {
    self.loading
  }

  pub(crate) fn replace(&mut self, entries: Vec<ManifestEntry>) {
    self.error = None;
    self.loading = false;
    self.view = ListView::new(entries);
  }

  pub(crate) fn start_loading(&mut self) {
    self.loading = true;
  }

  pub(crate) fn view(&self) -> &ListView<ManifestEntry> {
    &self.view
  }

  pub(crate) fn view_mut(&mut self) -> &mut ListView<ManifestEntry> {
    &mut self.view
  }
}
