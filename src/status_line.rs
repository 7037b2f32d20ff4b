use super::*;

const FLASH_DURATION: Duration = Duration::from_secs(3);

/// Key hints for the focused pane, briefly replaced by feedback messages.
pub(crate) struct StatusLine {
  base: &'static str,
  flash: Option<(String, Instant)>,
}

impl StatusLine {
  pub(crate) fn flash(&mut self, message: String) {
    self.flash = Some((message, Instant::now() + FLASH_DURATION));
  }

  pub(crate) fn new(base: &'static str) -> Self {
    Self { base, flash: None }
  }

  pub(crate) fn set_base(&mut self, base: &'static str) {
    self.base = base;
  }

  pub(crate) fn text(&self) -> &str {
    self
      .flash
      .as_ref()
      .map_or(self.base, |(message, _)| message.as_str())
  }

  pub(crate) fn tick(&mut self) {
    if self
      .flash
      .as_ref()
      .is_some_and(|(_, expires_at)| Instant::now() >= *expires_at)
    {
      self.flash = None;
    }
  }
}
