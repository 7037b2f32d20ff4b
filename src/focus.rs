use super::*;

/// Pane that receives navigation keys.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Focus {
  Feed,
  Items,
}

impl Focus {
  pub(crate) fn handle_key(self, key: KeyEvent) -> Command {
    let control = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
      KeyCode::Char('q' | 'Q') | KeyCode::Esc => Command::Quit,
      KeyCode::Char('?') => Command::ShowHelp,
      KeyCode::Char('c') if control => Command::Quit,
      KeyCode::Char('c' | 'C') => Command::ClearStats,
      KeyCode::Char('r' | 'R') => Command::Reload,
      KeyCode::Tab | KeyCode::BackTab => Command::FocusNext,
      KeyCode::Left | KeyCode::Char('h') => Command::FocusItems,
      KeyCode::Right | KeyCode::Char('l') => Command::FocusFeed,
      KeyCode::Down | KeyCode::Char('j') => Command::SelectNext,
      KeyCode::Up | KeyCode::Char('k') => Command::SelectPrevious,
      KeyCode::PageDown => Command::PageDown,
      KeyCode::PageUp => Command::PageUp,
      KeyCode::Char('d') if control => Command::PageDown,
      KeyCode::Char('u') if control => Command::PageUp,
      KeyCode::Home | KeyCode::Char('g') => Command::SelectFirst,
      KeyCode::End | KeyCode::Char('G') => Command::SelectLast,
      KeyCode::Enter => match self {
        Self::Feed => Command::ToggleVote,
        Self::Items => Command::SelectItem,
      },
      KeyCode::Char(' ') if self == Self::Feed => Command::ToggleVote,
      KeyCode::Char('o' | 'O') if self == Self::Feed => Command::OpenImage,
      _ => Command::None,
    }
  }

  pub(crate) fn status(self) -> &'static str {
    match self {
      Self::Feed => FEED_STATUS,
      Self::Items => ITEMS_STATUS,
    }
  }
}
