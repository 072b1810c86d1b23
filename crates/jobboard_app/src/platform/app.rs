use std::sync::mpsc;
use std::time::Duration;

use board_logging::{board_debug, board_info};
use jobboard_core::{update, AppState, Msg};
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::{logging, ui};

/// Input poll interval; also bounds how long engine results wait for a redraw.
const TICK_INTERVAL: Duration = Duration::from_millis(75);

pub fn run_app() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    logging::initialize(config.log_destination, config.log_level);
    board_info!("Starting job board against {}", config.fetch.base_url);

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(config.fetch.clone(), msg_tx)?;

    let mut terminal = ratatui::init();
    let result = App::new(runner, msg_rx).run(&mut terminal);
    ratatui::restore();
    board_info!("Job board stopped");
    result
}

/// What a key press asks the app to do.
#[derive(Debug, Clone, PartialEq, Eq)]
enum KeyAction {
    Dispatch(Msg),
    Quit,
}

struct App {
    state: AppState,
    runner: EffectRunner,
    msg_rx: mpsc::Receiver<Msg>,
    needs_redraw: bool,
    quit: bool,
}

impl App {
    fn new(runner: EffectRunner, msg_rx: mpsc::Receiver<Msg>) -> Self {
        Self {
            state: AppState::new(),
            runner,
            msg_rx,
            needs_redraw: true,
            quit: false,
        }
    }

    fn run(mut self, terminal: &mut DefaultTerminal) -> anyhow::Result<()> {
        while !self.quit {
            self.process_pending_messages();
            if self.needs_redraw {
                let view = self.state.view();
                terminal.draw(|frame| ui::render::render(frame, &view))?;
                self.needs_redraw = false;
            }
            if event::poll(TICK_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                    Event::Resize(..) => self.needs_redraw = true,
                    _ => {}
                }
            }
        }
        Ok(())
    }

    fn process_pending_messages(&mut self) {
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.dispatch_msg(msg);
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        board_debug!("Dispatch {}", msg_name(&msg));
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            self.needs_redraw = true;
        }
        self.state = state;
        self.runner.enqueue(effects);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let alert_open = self.state.alert().is_some();
        match map_key(key, alert_open, self.state.selected()) {
            Some(KeyAction::Dispatch(msg)) => self.dispatch_msg(msg),
            Some(KeyAction::Quit) => self.quit = true,
            None => {}
        }
    }
}

/// Maps a key press to an action. While an alert is open it only accepts
/// dismissal.
fn map_key(key: KeyEvent, alert_open: bool, selected: Option<usize>) -> Option<KeyAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(KeyAction::Quit);
    }

    if alert_open {
        return match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => {
                Some(KeyAction::Dispatch(Msg::AlertDismissed))
            }
            _ => None,
        };
    }

    let msg = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return Some(KeyAction::Quit),
        KeyCode::Char('f') | KeyCode::Char('r') => Msg::FetchClicked,
        KeyCode::Down | KeyCode::Char('j') => Msg::SelectNext,
        KeyCode::Up | KeyCode::Char('k') => Msg::SelectPrevious,
        KeyCode::Char('s') | KeyCode::Char('c') => Msg::ShareClicked { index: selected? },
        KeyCode::Enter | KeyCode::Char('a') => Msg::ApplyClicked { index: selected? },
        _ => return None,
    };
    Some(KeyAction::Dispatch(msg))
}

/// Message name without payload; postings and share text stay out of the log.
fn msg_name(msg: &Msg) -> &'static str {
    match msg {
        Msg::FetchClicked => "FetchClicked",
        Msg::FetchSucceeded { .. } => "FetchSucceeded",
        Msg::FetchFailed(_) => "FetchFailed",
        Msg::ShareClicked { .. } => "ShareClicked",
        Msg::ShareCopied { .. } => "ShareCopied",
        Msg::CopiedExpired { .. } => "CopiedExpired",
        Msg::ApplyClicked { .. } => "ApplyClicked",
        Msg::SelectNext => "SelectNext",
        Msg::SelectPrevious => "SelectPrevious",
        Msg::AlertDismissed => "AlertDismissed",
    }
}
