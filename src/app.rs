use super::*;

pub(crate) struct App {
  client: Client,
  event_rx: UnboundedReceiver<Event>,
  event_tx: UnboundedSender<Event>,
  handle: Handle,
  state: State,
}

impl App {
  fn card_list_item(card: &Card, available_width: u16) -> ListItem {
    let indent = format!("{BASE_INDENT}{}", "  ".repeat(card.depth));

    let marker_style = if card.counted {
      Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
      Style::default().fg(Color::DarkGray)
    };

    let mut lines = vec![Line::from(vec![
      Span::raw(indent.clone()),
      Span::styled(card.marker(), marker_style),
      Span::raw(" "),
      Span::styled(
        card.header(),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
      ),
    ])];

    if let Some(target) = &card.reply_to {
      lines.push(Line::from(vec![
        Span::raw(indent.clone()),
        Span::styled(
          format!("↳ replying to {target}"),
          Style::default().fg(Color::DarkGray),
        ),
      ]));
    }

    let wrap_width = usize::from(available_width)
      .saturating_sub(indent.chars().count())
      .max(1);

    for line in wrap_text(card.body(), wrap_width) {
      lines.push(Line::from(vec![Span::raw(indent.clone()), Span::raw(line)]));
    }

    if let Some(image) = &card.image {
      lines.push(Line::from(vec![
        Span::raw(indent.clone()),
        Span::styled(
          format!("image: {} (o to open)", truncate(&image.to_string(), 60)),
          Style::default().fg(Color::Blue),
        ),
      ]));
    }

    lines.push(Line::from(Span::raw(indent)));

    ListItem::new(lines)
  }

  fn draw(&mut self, frame: &mut Frame) {
    let layout = Layout::default()
      .direction(Direction::Vertical)
      .margin(1)
      .constraints([Constraint::Min(0), Constraint::Length(1)])
      .split(frame.area());

    let panes = if self.state.items().is_some() {
      Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
          Constraint::Percentage(26),
          Constraint::Min(0),
          Constraint::Percentage(24),
        ])
        .split(layout[0])
    } else {
      Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Percentage(26)])
        .split(layout[0])
    };

    let (feed_area, stats_area) = if self.state.items().is_some() {
      self.draw_items(frame, panes[0]);
      (panes[1], panes[2])
    } else {
      (panes[0], panes[1])
    };

    self.draw_feed(frame, feed_area);
    self.draw_stats(frame, stats_area);

    let status = Paragraph::new(self.state.status().to_string())
      .style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, layout[1]);

    if let Some(popup) = self.state.popup() {
      popup.draw(frame);
    }
  }

  fn draw_feed(&mut self, frame: &mut Frame, area: Rect) {
    let title = match self.state.active_item() {
      Some(id) => format!(" Comments • {} ", truncate(id, 30)),
      None => " Comments ".to_string(),
    };

    let block = Self::pane(title, self.state.focus() == Focus::Feed);

    self.state.set_list_height(usize::from(block.inner(area).height));

    let inner_width = block.inner(area).width;

    let placeholder = |text: &str, color: Color| {
      Paragraph::new(Line::from(vec![
        Span::raw(BASE_INDENT),
        Span::styled(text.to_string(), Style::default().fg(color)),
      ]))
      .wrap(Wrap { trim: true })
    };

    match self.state.feed_mut() {
      Feed::Failed(message) => {
        frame.render_widget(placeholder(message, Color::Red).block(block), area);
      }
      Feed::Idle => {
        frame.render_widget(placeholder(IDLE_FEED, Color::DarkGray).block(block), area);
      }
      Feed::Loading(message) => {
        frame.render_widget(
          placeholder(message, Color::DarkGray).block(block),
          area,
        );
      }
      Feed::Ready(view) if view.is_empty() => {
        frame.render_widget(placeholder(NO_COMMENTS, Color::DarkGray).block(block), area);
      }
      Feed::Ready(view) => {
        let items = view
          .cards()
          .iter()
          .map(|card| Self::card_list_item(card, inner_width))
          .collect::<Vec<_>>();

        let mut list_state = ListState::default()
          .with_selected(view.selected_index())
          .with_offset(view.offset());

        let list = List::new(items)
          .block(block)
          .highlight_style(Style::default().bg(Color::Rgb(40, 44, 52)));

        frame.render_stateful_widget(list, area, &mut list_state);

        view.set_offset(list_state.offset());
      }
    }
  }

  fn draw_items(&mut self, frame: &mut Frame, area: Rect) {
    let block = Self::pane(" Items ".into(), self.state.focus() == Focus::Items);

    let active = self.state.active_item().map(str::to_string);

    let Some(items) = self.state.items_mut() else {
      return;
    };

    let mut rows = Vec::new();

    if let Some(error) = items.error() {
      rows.push(ListItem::new(Line::from(vec![
        Span::raw(BASE_INDENT),
        Span::styled(error.to_string(), Style::default().fg(Color::Red)),
      ])));
    } else if items.view().is_empty() {
      let text = if items.is_loading() {
        LOADING_ITEMS
      } else {
        NO_ITEMS
      };

      rows.push(ListItem::new(Line::from(vec![
        Span::raw(BASE_INDENT),
        Span::styled(text, Style::default().fg(Color::DarkGray)),
      ])));
    }

    let leading = rows.len();

    for entry in items.view().items() {
      let is_active = active.as_deref() == Some(entry.id.as_str());

      let title_style = if is_active {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
      } else {
        Style::default().fg(Color::White)
      };

      rows.push(ListItem::new(vec![
        Line::from(vec![
          Span::raw(if is_active { "▸" } else { BASE_INDENT }),
          Span::styled(truncate(entry.label(), 40), title_style),
        ]),
        Line::from(vec![
          Span::raw(BASE_INDENT),
          Span::styled(entry.detail(), Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(Span::raw(BASE_INDENT)),
      ]));
    }

    let view = items.view_mut();

    let mut list_state = ListState::default()
      .with_selected(view.selected_index().map(|index| index + leading))
      .with_offset(view.offset());

    let list = List::new(rows)
      .block(block)
      .highlight_style(Style::default().bg(Color::Rgb(40, 44, 52)));

    frame.render_stateful_widget(list, area, &mut list_state);

    view.set_offset(list_state.offset().saturating_sub(leading));
  }

  fn draw_stats(&self, frame: &mut Frame, area: Rect) {
    let ledger = self.state.ledger();

    let total = u64::try_from(ledger.vote_count()).unwrap_or(u64::MAX);

    let mut lines = vec![
      Line::from(Span::styled(
        format!("{BASE_INDENT}{} tallied", format_count(total, "vote")),
        Style::default().fg(Color::DarkGray),
      )),
      Line::from(""),
    ];

    lines.extend(stats_lines(ledger.counts()).into_iter().map(|line| {
      Line::from(vec![Span::raw(BASE_INDENT), Span::raw(line)])
    }));

    let stats = Paragraph::new(lines)
      .block(Self::pane(" Locations ".into(), false))
      .wrap(Wrap { trim: false });

    frame.render_widget(stats, area);
  }

  fn execute_effect(&mut self, effect: Effect) {
    match effect {
      Effect::FetchComments {
        item_id,
        request_id,
      } => {
        let (client, sender) = (self.client.clone(), self.event_tx.clone());

        self.handle.spawn(async move {
          let result = client.fetch_comments(item_id.as_deref()).await;

          let _ = sender.send(Event::Comments {
            item_id,
            request_id,
            result,
          });
        });
      }
      Effect::FetchManifest { request_id } => {
        let (client, sender) = (self.client.clone(), self.event_tx.clone());

        self.handle.spawn(async move {
          let _ = sender.send(Event::Manifest {
            request_id,
            result: client.fetch_manifest().await,
          });
        });
      }
      Effect::OpenLocation { location } => {
        let target = location.to_string();

        match webbrowser::open(&target) {
          Ok(()) => {
            info!(%target, "opened image");
            self
              .state
              .flash(format!("Opened {}", truncate(&target, 80)));
          }
          Err(error) => {
            warn!(%target, %error, "could not open image");
            self.state.flash(format!("Could not open image: {error}"));
          }
        }
      }
    }
  }

  pub(crate) fn new(client: Client, state: State) -> Self {
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    Self {
      client,
      event_rx,
      event_tx,
      handle: Handle::current(),
      state,
    }
  }

  fn pane(title: String, focused: bool) -> Block<'static> {
    let style = if focused {
      Style::default().fg(Color::Cyan)
    } else {
      Style::default().fg(Color::DarkGray)
    };

    Block::default()
      .title(title)
      .borders(Borders::ALL)
      .border_style(style)
  }

  fn process_pending_events(&mut self) {
    self.state.tick();

    while let Ok(event) = self.event_rx.try_recv() {
      self.state.handle_event(event);

      for effect in self.state.take_effects() {
        self.execute_effect(effect);
      }
    }
  }

  pub(crate) fn run(
    &mut self,
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
  ) -> Result {
    for effect in self.state.start().effects {
      self.execute_effect(effect);
    }

    loop {
      self.process_pending_events();

      terminal.draw(|frame| self.draw(frame))?;

      if !crossterm_event::poll(Duration::from_millis(200))? {
        continue;
      }

      let CrosstermEvent::Key(key) = crossterm_event::read()? else {
        continue;
      };

      if key.kind != KeyEventKind::Press {
        continue;
      }

      let command = self.state.handle_key(key);

      match self.state.dispatch_command(command) {
        Ok(dispatch) => {
          for effect in dispatch.effects {
            self.execute_effect(effect);
          }

          if dispatch.should_exit {
            break;
          }
        }
        Err(error) => {
          error!(?command, "{error:#}");
          self.state.clear_pending_effects();
          self.state.flash(format!("error: {error}"));
        }
      }
    }

    Ok(())
  }
}
