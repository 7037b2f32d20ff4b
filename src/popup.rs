use super::*;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Popup {
  ConfirmClear,
  Help,
}

impl Popup {
  fn area(self, area: Rect) -> Rect {
    let text = self.text();

    let width = text
      .lines()
      .map(|line| line.chars().count())
      .max()
      .unwrap_or(0)
      .saturating_add(4);

    let height = text.lines().count().saturating_add(2);

    let width = u16::try_from(width).unwrap_or(u16::MAX).min(area.width);
    let height = u16::try_from(height).unwrap_or(u16::MAX).min(area.height);

    Rect::new(
      area.x + area.width.saturating_sub(width) / 2,
      area.y + area.height.saturating_sub(height) / 2,
      width,
      height,
    )
  }

  pub(crate) fn draw(self, frame: &mut Frame) {
    let area = self.area(frame.area());

    let border = match self {
      Self::ConfirmClear => Style::default().fg(Color::Red),
      Self::Help => Style::default().fg(Color::Cyan),
    };

    let popup = Paragraph::new(self.text())
      .block(
        Block::default()
          .title(self.title())
          .borders(Borders::ALL)
          .border_style(border),
      )
      .wrap(Wrap { trim: false });

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
  }

  pub(crate) fn handle_key(self, key: KeyEvent) -> Command {
    match (self, key.code) {
      (Self::ConfirmClear, KeyCode::Char('y' | 'Y')) => Command::ConfirmClear,
      (Self::ConfirmClear, KeyCode::Char('n' | 'N') | KeyCode::Esc) => {
        Command::ClosePopup
      }
      (Self::Help, KeyCode::Char('?') | KeyCode::Esc) => Command::ClosePopup,
      (Self::Help, KeyCode::Char('q' | 'Q')) => Command::Quit,
      _ => Command::None,
    }
  }

  fn text(self) -> &'static str {
    match self {
      Self::ConfirmClear => CONFIRM_CLEAR_TEXT,
      Self::Help => HELP_TEXT,
    }
  }

  fn title(self) -> &'static str {
    match self {
      Self::ConfirmClear => CONFIRM_CLEAR_TITLE,
      Self::Help => HELP_TITLE,
    }
  }
}
