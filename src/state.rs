use super::*;

pub(crate) struct State {
  active_item: Option<String>,
  comments: Vec<Comment>,
  feed: Feed,
  focus: Focus,
  items: Option<ItemList>,
  latest_comments_request: Option<u64>,
  latest_manifest_request: Option<u64>,
  ledger: Ledger,
  list_height: usize,
  next_request_id: u64,
  pending_effects: Vec<Effect>,
  policy: ResponsePolicy,
  popup: Option<Popup>,
  source: Source,
  status: StatusLine,
}

impl State {
  pub(crate) fn active_item(&self) -> Option<&str> {
    self.active_item.as_deref()
  }

  fn active_label(&self) -> String {
    match (&self.items, self.active_item.as_deref()) {
      (Some(items), Some(id)) => items
        .find(id)
        .map_or_else(|| id.to_string(), |entry| entry.label().to_string()),
      (_, Some(id)) => id.to_string(),
      (_, None) => "comments".to_string(),
    }
  }

  pub(crate) fn clear_pending_effects(&mut self) {
    self.pending_effects.clear();
  }

  fn clear_stats(&mut self) -> Result {
    self.popup = None;

    self.ledger.clear()?;

    self.rerender_feed();

    self.status.flash("Cleared all tallies".into());

    Ok(())
  }

  pub(crate) fn dispatch_command(
    &mut self,
    command: Command,
  ) -> Result<CommandDispatch> {
    debug_assert!(
      self.pending_effects.is_empty(),
      "command dispatch should start without pending effects"
    );

    let mut should_exit = false;

    match command {
      Command::ClearStats => self.popup = Some(Popup::ConfirmClear),
      Command::ClosePopup => self.popup = None,
      Command::ConfirmClear => self.clear_stats()?,
      Command::FocusFeed => self.set_focus(Focus::Feed),
      Command::FocusItems => self.set_focus(Focus::Items),
      Command::FocusNext => self.set_focus(match self.focus {
        Focus::Feed => Focus::Items,
        Focus::Items => Focus::Feed,
      }),
      Command::None => {}
      Command::OpenImage => self.open_image(),
      Command::PageDown => self.move_selection(self.page_jump()),
      Command::PageUp => self.move_selection(-self.page_jump()),
      Command::Quit => should_exit = true,
      Command::Reload => self.reload(),
      Command::SelectFirst => self.move_selection(isize::MIN),
      Command::SelectItem => self.select_highlighted_item(),
      Command::SelectLast => self.move_selection(isize::MAX),
      Command::SelectNext => self.move_selection(1),
      Command::SelectPrevious => self.move_selection(-1),
      Command::ShowHelp => self.popup = Some(Popup::Help),
      Command::ToggleVote => self.toggle_vote()?,
    }

    Ok(CommandDispatch {
      effects: std::mem::take(&mut self.pending_effects),
      should_exit,
    })
  }

  pub(crate) fn feed(&self) -> &Feed {
    &self.feed
  }

  pub(crate) fn feed_mut(&mut self) -> &mut Feed {
    &mut self.feed
  }

  pub(crate) fn flash(&mut self, message: String) {
    self.status.flash(message);
  }

  pub(crate) fn focus(&self) -> Focus {
    self.focus
  }

  pub(crate) fn handle_event(&mut self, event: Event) {
    match event {
      Event::Comments {
        item_id,
        request_id,
        result,
      } => {
        if !self
          .policy
          .accepts(request_id, self.latest_comments_request)
        {
          debug!(request_id, "dropping superseded comments response");
          return;
        }

        let item = item_id.as_deref().unwrap_or("-");

        match result {
          Ok(comments) => {
            info!(item, request_id, count = comments.len(), "loaded comments");

            self.comments = comments;
            self.feed = Feed::Ready(FeedView::new(self.render()));
          }
          Err(error) => {
            error!(item, request_id, %error, "could not load comments");

            let label = item_id.unwrap_or_else(|| "comments".into());

            self.feed =
              Feed::Failed(format!("Could not load {label}: {error}"));
          }
        }
      }
      Event::Manifest { request_id, result } => {
        if !self
          .policy
          .accepts(request_id, self.latest_manifest_request)
        {
          debug!(request_id, "dropping superseded manifest response");
          return;
        }

        let Some(items) = self.items.as_mut() else {
          return;
        };

        match result {
          Ok(entries) => {
            info!(count = entries.len(), "loaded manifest");

            let first = entries.first().map(|entry| entry.id.clone());

            items.replace(entries);

            match first {
              Some(id) => self.select_item(id),
              None => {
                self.active_item = None;
                self.feed = Feed::Idle;
              }
            }
          }
          Err(error) => {
            error!(%error, "could not load manifest");
            items.fail(format!("Could not load item list: {error}"));
          }
        }
      }
    }
  }

  pub(crate) fn handle_key(&self, key: KeyEvent) -> Command {
    match self.popup {
      Some(popup) => popup.handle_key(key),
      None => self.focus.handle_key(key),
    }
  }

  pub(crate) fn items(&self) -> Option<&ItemList> {
    self.items.as_ref()
  }

  pub(crate) fn items_mut(&mut self) -> Option<&mut ItemList> {
    self.items.as_mut()
  }

  pub(crate) fn ledger(&self) -> &Ledger {
    &self.ledger
  }

  fn load_comments(&mut self, item_id: Option<String>) {
    let request_id = self.next_request_id();

    self.latest_comments_request = Some(request_id);

    self.feed = Feed::Loading(format!("Loading {}...", self.active_label()));

    debug!(item = item_id.as_deref().unwrap_or("-"), request_id, "requesting comments");

    self.pending_effects.push(Effect::FetchComments {
      item_id,
      request_id,
    });
  }

  fn load_manifest(&mut self) {
    let request_id = self.next_request_id();

    self.latest_manifest_request = Some(request_id);

    if let Some(items) = self.items.as_mut() {
      items.start_loading();
    }

    self.pending_effects.push(Effect::FetchManifest { request_id });
  }

  fn move_selection(&mut self, delta: isize) {
    match self.focus {
      Focus::Feed => {
        if let Some(view) = self.feed.view_mut() {
          view.move_by(delta);
        }
      }
      Focus::Items => {
        if let Some(items) = self.items.as_mut() {
          items.view_mut().select_by(delta);
        }
      }
    }
  }

  /// Single-collection mode when `single` is set; otherwise items come from
  /// the manifest and votes are scoped per item.
  pub(crate) fn new(
    ledger: Ledger,
    source: Source,
    policy: ResponsePolicy,
    single: bool,
  ) -> Self {
    let focus = if single { Focus::Feed } else { Focus::Items };

    Self {
      active_item: None,
      comments: Vec::new(),
      feed: Feed::Idle,
      focus,
      items: (!single).then(ItemList::default),
      latest_comments_request: None,
      latest_manifest_request: None,
      ledger,
      list_height: 0,
      next_request_id: 0,
      pending_effects: Vec::new(),
      policy,
      popup: None,
      source,
      status: StatusLine::new(focus.status()),
    }
  }

  fn next_request_id(&mut self) -> u64 {
    let request_id = self.next_request_id;
    self.next_request_id = self.next_request_id.wrapping_add(1);
    request_id
  }

  fn open_image(&mut self) {
    let Some(card) = self.feed.view().and_then(FeedView::selected_card) else {
      return;
    };

    match card.image.clone() {
      Some(location) => {
        self.pending_effects.push(Effect::OpenLocation { location });
      }
      None => self.status.flash("This comment has no image".into()),
    }
  }

  fn page_jump(&self) -> isize {
    isize::try_from(self.list_height.saturating_sub(1).max(1))
      .unwrap_or(isize::MAX)
  }

  pub(crate) fn popup(&self) -> Option<Popup> {
    self.popup
  }

  fn reload(&mut self) {
    if self.items.is_some() {
      self.load_manifest();
    } else {
      self.load_comments(None);
    }
  }

  fn render(&self) -> Vec<Card> {
    render_cards(
      &self.comments,
      &self.ledger,
      self.vote_scope(),
      &self.source,
    )
  }

  fn rerender_feed(&mut self) {
    if self.feed.view().is_none() {
      return;
    }

    let cards = self.render();

    if let Some(view) = self.feed.view_mut() {
      view.replace_cards(cards);
    }
  }

  fn select_highlighted_item(&mut self) {
    let Some(id) = self
      .items
      .as_ref()
      .and_then(|items| items.view().selected_item())
      .map(|entry| entry.id.clone())
    else {
      return;
    };

    self.select_item(id);
    self.set_focus(Focus::Feed);
  }

  /// Makes `id` the active item and requests its comments. Any request still
  /// in flight is left running.
  fn select_item(&mut self, id: String) {
    if let Some(items) = self.items.as_mut() {
      items.view_mut().select_where(|entry| entry.id == id);
    }

    info!(item = %id, "selected item");

    self.active_item = Some(id.clone());

    self.load_comments(Some(id));
  }

  fn set_focus(&mut self, focus: Focus) {
    if self.items.is_none() {
      return;
    }

    self.focus = focus;
    self.status.set_base(focus.status());
  }

  pub(crate) fn set_list_height(&mut self, height: usize) {
    self.list_height = height;
  }

  /// Begins loading: the manifest, or the lone comment collection.
  pub(crate) fn start(&mut self) -> CommandDispatch {
    self.reload();

    CommandDispatch {
      effects: std::mem::take(&mut self.pending_effects),
      should_exit: false,
    }
  }

  pub(crate) fn status(&self) -> &str {
    self.status.text()
  }

  /// Effects queued while handling events, such as the comments fetch that
  /// follows a manifest load.
  pub(crate) fn take_effects(&mut self) -> Vec<Effect> {
    std::mem::take(&mut self.pending_effects)
  }

  pub(crate) fn tick(&mut self) {
    self.status.tick();
  }

  fn toggle_vote(&mut self) -> Result {
    if self.items.is_some() && self.active_item.is_none() {
      return Ok(());
    }

    let Some(card) = self.feed.view().and_then(FeedView::selected_card) else {
      return Ok(());
    };

    let (key, location, user) = (
      card.key.clone(),
      card.location.clone(),
      card.user_label().to_string(),
    );

    let toggled = self.ledger.toggle(&key, &location)?;

    self.rerender_feed();

    match toggled {
      Toggle::Counted { location } => {
        self.status.flash(format!("Counted {location} for {user}"));
      }
      Toggle::Uncounted { location } => {
        self.status.flash(format!("Withdrew {location} for {user}"));
      }
      Toggle::Ignored => {}
    }

    Ok(())
  }

  fn vote_scope(&self) -> Option<&str> {
    if self.items.is_some() {
      self.active_item.as_deref()
    } else {
      None
    }
  }
}
