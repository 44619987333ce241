use std::io::{self, Stdout};
use std::time::Duration;

use cellboard_core::{update, AppState, AsyncState, Msg};
use cellboard_logging::{board_debug, board_info, board_warn};
use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{cursor, execute};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::ui;
use super::ui::input::InputAction;

pub fn run_app(config: AppConfig) -> anyhow::Result<()> {
    board_info!(
        "Starting cellboard target={} storage={:?}",
        config.request_target,
        config.storage_dir
    );

    let runner = EffectRunner::new(&config)?;
    let mut controller = Controller::new(AppState::new(config.request_target.clone()), runner);
    controller.dispatch(Msg::Started);

    let result = match TerminalSession::enter() {
        Ok(mut session) => event_loop(&mut session.terminal, &mut controller, config.tick_rate),
        Err(err) => Err(err.into()),
    };

    controller.shutdown();
    board_info!("cellboard stopped");
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    controller: &mut Controller,
    tick_rate: Duration,
) -> anyhow::Result<()> {
    let mut needs_draw = true;
    loop {
        if needs_draw {
            let view = controller.state.view();
            terminal.draw(|frame| ui::render::draw(frame, &view))?;
            needs_draw = false;
        }

        if event::poll(tick_rate)? {
            let action = match event::read()? {
                Event::Key(key) => ui::input::map_key(key, controller.state.draft()),
                Event::Paste(text) => Some(ui::input::map_paste(&text, controller.state.draft())),
                Event::Resize(..) => {
                    needs_draw = true;
                    None
                }
                _ => None,
            };
            match action {
                Some(InputAction::Quit) => return Ok(()),
                Some(InputAction::Dispatch(msg)) => needs_draw |= controller.dispatch(msg),
                None => {}
            }
        } else {
            needs_draw |= controller.dispatch(Msg::Tick);
        }

        for msg in controller.runner.poll() {
            needs_draw |= controller.dispatch(msg);
        }
    }
}

/// Owns the state and routes every message through `update`.
struct Controller {
    state: AppState,
    runner: EffectRunner,
}

impl Controller {
    fn new(mut state: AppState, runner: EffectRunner) -> Self {
        state.subscribe_list(|items| board_debug!("List now holds {} items", items.len()));
        state.subscribe_counter(|counter| board_info!("{} bears around here", counter.bears));
        state.subscribe_todo(|todo| match todo {
            AsyncState::Pending => board_debug!("Todo fetch pending"),
            AsyncState::Ready(_) => board_debug!("Todo fetch resolved"),
            AsyncState::Errored(message) => board_warn!("Todo fetch errored: {}", message),
        });
        Self { state, runner }
    }

    /// Applies `msg` and returns whether a redraw is due.
    fn dispatch(&mut self, msg: Msg) -> bool {
        match &msg {
            Msg::Tick => {}
            Msg::DraftChanged(text) => board_debug!("Input text {:?}", text),
            Msg::AddToListClicked => {
                board_debug!("Adding {:?} to list", self.state.draft())
            }
            other => board_debug!("Dispatch {:?}", other),
        }

        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;
        self.runner.enqueue(effects);
        was_dirty
    }

    fn shutdown(self) {
        self.runner.shutdown();
    }
}

/// Raw mode plus alternate screen, restored on drop.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen, EnableBracketedPaste, cursor::Hide)
        {
            restore_terminal(&mut io::stdout());
            return Err(err);
        }
        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(err) => {
                restore_terminal(&mut io::stdout());
                Err(err)
            }
        }
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        restore_terminal(self.terminal.backend_mut());
    }
}

fn restore_terminal(out: &mut impl io::Write) {
    let _ = disable_raw_mode();
    let _ = execute!(out, DisableBracketedPaste, LeaveAlternateScreen, cursor::Show);
}
