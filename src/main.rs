use {
  anyhow::{Context, anyhow, bail},
  app::App,
  arguments::{Arguments, Subcommand},
  card::{Card, render_cards},
  clap::{Parser, ValueEnum},
  client::Client,
  command::Command,
  command_dispatch::CommandDispatch,
  comment::Comment,
  config::Config,
  crossterm::{
    event as crossterm_event,
    event::{
      Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    },
    execute,
    style::Stylize,
    terminal::{
      EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
      enable_raw_mode,
    },
  },
  effect::Effect,
  event::Event,
  feed::Feed,
  feed_view::FeedView,
  focus::Focus,
  futures::stream::{self, StreamExt},
  item_list::ItemList,
  ledger::{Ledger, Toggle},
  list_view::ListView,
  load_error::LoadError,
  manifest_entry::ManifestEntry,
  popup::Popup,
  ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
      Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap,
    },
  },
  report::{census, report},
  reqwest::{StatusCode, Url},
  response_policy::ResponsePolicy,
  serde::{
    Deserialize, Deserializer, Serialize,
    de::{self, DeserializeOwned, Unexpected},
  },
  serde_json::Value,
  source::{Location, Source},
  state::State,
  stats::stats_lines,
  status_line::StatusLine,
  std::{
    backtrace::BacktraceStatus,
    collections::BTreeMap,
    env,
    fmt::{self, Display, Formatter},
    fs,
    io::{self, IsTerminal, Stdout, Write},
    path::{Path, PathBuf},
    process,
    time::{Duration, Instant},
  },
  thiserror::Error,
  tokio::{
    runtime::Handle,
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
  },
  tracing::{debug, error, info, warn},
  tracing_appender::non_blocking::WorkerGuard,
  tracing_subscriber::EnvFilter,
  unicode_width::UnicodeWidthStr,
  utils::{
    deserialize_null_default, deserialize_optional_string, deserialize_string,
    format_count, truncate, wrap_text,
  },
  vote_key::{VoteKey, is_tallyable},
};

mod app;
mod arguments;
mod card;
mod client;
mod command;
mod command_dispatch;
mod comment;
mod config;
mod effect;
mod event;
mod feed;
mod feed_view;
mod focus;
mod item_list;
mod ledger;
mod list_view;
mod load_error;
mod logging;
mod manifest_entry;
mod popup;
mod report;
mod response_policy;
mod source;
mod state;
mod stats;
mod status_line;
mod utils;
mod vote_key;

const DEFAULT_BASE: &str = "http://localhost:5173/scraped_data";

const ITEMS_STATUS: &str = "↑/k up • ↓/j down • enter open • tab feed • r reload • c clear • q quit • ? help";

const FEED_STATUS: &str = "↑/k up • ↓/j down • space/enter count • o image • tab items • c clear • q quit • ? help";

const IDLE_FEED: &str = "Select an item to browse its comments.";
const NO_COMMENTS: &str = "No comments for this item.";
const LOADING_ITEMS: &str = "Loading items...";
const NO_ITEMS: &str = "No items in the manifest.";

const CONFIRM_CLEAR_TITLE: &str = "Clear tallies";
const CONFIRM_CLEAR_TEXT: &str = "\
Forget every recorded vote and location tally?

  y   clear everything
  n   keep them
";

const HELP_TITLE: &str = "Help";

const BASE_INDENT: &str = " ";

const HELP_TEXT: &str = "\
Navigation:
  tab     switch between items and comments
  ← / h   focus the item list
  → / l   focus the comment feed
  ↑ / k   move selection up
  ↓ / j   move selection down
  pg↓     page down
  pg↑     page up
  ctrl+d  page down
  ctrl+u  page up
  home/g  jump to the first entry
  end/G   jump to the last entry

Items:
  enter   load the selected item's comments
  r       reload the manifest

Comments:
  space   count or withdraw the commenter's location
  enter   count or withdraw the commenter's location
  o       open the comment's image

Tallies:
  c       clear every tally (asks first)

General:
  q       quit
  esc     close this help or quit
  ?       toggle this help
";

type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;

fn browse(config: Config) -> Result {
  let ledger = Ledger::load(config.ledger_path.clone());

  info!(
    source = %config.source,
    ledger = %config.ledger_path.display(),
    votes = ledger.vote_count(),
    "starting browser"
  );

  let state = State::new(
    ledger,
    config.source.clone(),
    config.policy,
    config.single,
  );

  let mut app = App::new(Client::new(config.source), state);

  let mut terminal = initialize_terminal()?;

  let result = app.run(&mut terminal);

  restore_terminal(&mut terminal)?;

  result
}

fn initialize_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
  enable_raw_mode()?;

  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen)?;

  Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(
  terminal: &mut Terminal<CrosstermBackend<Stdout>>,
) -> Result {
  disable_raw_mode()?;

  execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

  terminal.show_cursor()?;

  Ok(())
}

async fn run() -> Result {
  let arguments = Arguments::parse();

  let config = Config::from_arguments(&arguments)?;

  let _guard = logging::init(&config.data_dir)
    .context("could not initialize logging")?;

  let mut stdout = io::stdout();

  match arguments.subcommand {
    Some(Subcommand::Census { item }) => {
      census(&config, item, &mut stdout).await
    }
    Some(Subcommand::Report) => report(&config, &mut stdout),
    None => browse(config),
  }
}

#[tokio::main]
async fn main() {
  if let Err(error) = run().await {
    let use_color = io::stderr().is_terminal();

    if use_color {
      eprintln!("{} {error}", "error:".bold().red());
    } else {
      eprintln!("error: {error}");
    }

    for (i, error) in error.chain().skip(1).enumerate() {
      if i == 0 {
        eprintln!();

        if use_color {
          eprintln!("{}", "because:".bold().red());
        } else {
          eprintln!("because:");
        }
      }

      if use_color {
        eprintln!("{} {error}", "-".bold().red());
      } else {
        eprintln!("- {error}");
      }
    }

    let backtrace = error.backtrace();

    if backtrace.status() == BacktraceStatus::Captured {
      if use_color {
        eprintln!("{}", "backtrace:".bold().red());
      } else {
        eprintln!("backtrace:");
      }

      eprintln!("{backtrace}");
    }

    process::exit(1);
  }
}
