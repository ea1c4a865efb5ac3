use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use chrono::Local;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as TermEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use daybook::{
    navigator::{Applied, CalendarNavigator, FetchOutcome, FetchRequest},
    storage::config::Config,
    ui::theme::Theme,
};

use crate::cli::{build_authenticator, build_store};
use crate::tui::{
    presentation::ui,
    screen::{CalendarScreen, KeyAction},
};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub async fn run_tui(config: Config) -> anyhow::Result<()> {
    let auth = build_authenticator(&config)?;
    let store = build_store(&config, &auth)?;

    let today = Local::now().date_naive();
    let navigator = CalendarNavigator::new(Arc::new(store), today);
    let theme = Theme::get_by_name(&config.ui.theme);
    let mut screen = CalendarScreen::new(navigator, today, theme, config.ui.notice_ttl());

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut screen).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    res.context("calendar session failed")
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    screen: &mut CalendarScreen,
) -> io::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<FetchOutcome>();

    let initial = screen.navigator.reload();
    spawn_fetch(&screen.navigator, initial, &tx);

    loop {
        drain_outcomes(screen, &mut rx);
        screen.navigator.expire_notice(screen.notice_ttl);

        terminal.draw(|f| ui(f, screen))?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }

        if let TermEvent::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match screen.handle_key(key.code) {
                KeyAction::Quit => return Ok(()),
                KeyAction::Fetch(request) => spawn_fetch(&screen.navigator, request, &tx),
                KeyAction::Redraw => {}
            }
        }
    }
}

fn spawn_fetch(navigator: &CalendarNavigator, request: FetchRequest, tx: &UnboundedSender<FetchOutcome>) {
    let fetch = navigator.fetch(request);
    let tx = tx.clone();
    tokio::spawn(async move {
        // The receiver only goes away when the session has ended.
        let _ = tx.send(fetch.await);
    });
}

fn drain_outcomes(screen: &mut CalendarScreen, rx: &mut UnboundedReceiver<FetchOutcome>) {
    while let Ok(outcome) = rx.try_recv() {
        if let Applied::Replaced { dates } = screen.navigator.apply(outcome) {
            tracing::debug!("Loaded entries for {} dates", dates);
        }
    }
}
