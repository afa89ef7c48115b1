//! Play command implementation - interactive TUI game.

#![allow(clippy::needless_pass_by_value)]

use super::view::{self, Screen};
use super::{clock_seed, CliError};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use slide48::input::{Point, SwipeTracker};
use slide48::replay::Recording;
use slide48::store::JsonFileStore;
use slide48::{Direction, GameConfig, Session};
use std::io::stdout;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Drag distance, in terminal columns, that counts as a swipe.
const DRAG_THRESHOLD: f64 = 3.0;

/// Terminal rows are roughly twice as tall as columns are wide.
const ROW_ASPECT: f64 = 2.0;

const CONTROLS: &str = " [←↑↓→/wasd/hjkl] Move  [drag] Swipe  [u] Undo  [n] New game  [q] Quit ";

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the TUI fails, or the
/// recording cannot be saved.
pub(crate) fn execute(
    seed: Option<u64>,
    size: usize,
    best_file: PathBuf,
    save: Option<PathBuf>,
) -> Result<(), CliError> {
    let seed = seed.unwrap_or_else(clock_seed);
    let config = GameConfig {
        size,
        ..GameConfig::default()
    };

    let store = JsonFileStore::new(best_file);
    let session = Session::with_store(config, StdRng::seed_from_u64(seed), Box::new(store))?;
    info!(seed, size, best = session.best_score(), "starting game");

    let session = run_tui(session, seed)?;
    info!(
        score = session.score(),
        best = session.best_score(),
        actions = session.actions().len(),
        "game closed"
    );

    if let Some(path) = save {
        let recording = Recording::new(seed, config, session.actions().to_vec());
        recording.save(&path)?;
        println!("Recording saved to {}", path.display());
    }

    println!("Score: {}  Best: {}", session.score(), session.best_score());
    Ok(())
}

/// What the event loop should do after an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Move(Direction),
    Undo,
    NewGame,
    Quit,
}

/// App state for the TUI.
struct App {
    session: Session<StdRng>,
    seed: u64,
    swipe: SwipeTracker,
    message: String,
}

impl App {
    fn new(session: Session<StdRng>, seed: u64) -> Self {
        Self {
            session,
            seed,
            swipe: SwipeTracker::new(DRAG_THRESHOLD),
            message: String::new(),
        }
    }

    /// Run a command. Returns `false` when the app should exit.
    fn run(&mut self, command: Command) -> bool {
        match command {
            Command::Move(direction) => {
                let outcome = self.session.play(direction);
                self.message = if outcome.moved && outcome.score_delta > 0 {
                    format!("+{}", outcome.score_delta)
                } else {
                    String::new()
                };
            }
            Command::Undo => {
                self.message = if self.session.undo() {
                    "Undone".to_string()
                } else {
                    "Nothing to undo".to_string()
                };
            }
            Command::NewGame => {
                self.session.new_game();
                self.message = "New game".to_string();
            }
            Command::Quit => return false,
        }
        true
    }

    fn on_mouse(&mut self, mouse: MouseEvent) -> Option<Command> {
        let at = Point::new(f64::from(mouse.column), f64::from(mouse.row) * ROW_ASPECT);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.swipe.press(at);
                None
            }
            MouseEventKind::Up(MouseButton::Left) => self.swipe.release(at).map(Command::Move),
            _ => None,
        }
    }
}

/// Map a key press to a command.
fn key_command(key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('u') => Some(Command::Undo),
        KeyCode::Char('n') => Some(Command::NewGame),
        KeyCode::Up => Some(Command::Move(Direction::Up)),
        KeyCode::Down => Some(Command::Move(Direction::Down)),
        KeyCode::Left => Some(Command::Move(Direction::Left)),
        KeyCode::Right => Some(Command::Move(Direction::Right)),
        KeyCode::Char(c) => c.to_string().parse().ok().map(Command::Move),
        _ => None,
    }
}

fn run_tui(session: Session<StdRng>, seed: u64) -> Result<Session<StdRng>, CliError> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| CliError::new(e.to_string()))?;

    let mut app = App::new(session, seed);
    let result = event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;

    result.map(|()| app.session)
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
) -> Result<(), CliError> {
    loop {
        let status = format!("Seed: {}  {}", app.seed, app.message);
        terminal
            .draw(|f| {
                view::draw(
                    f,
                    &Screen {
                        title: "slide48",
                        state: app.session.state(),
                        best: app.session.best_score(),
                        status,
                        controls: CONTROLS,
                    },
                );
            })
            .map_err(|e| CliError::new(e.to_string()))?;

        if !event::poll(Duration::from_millis(100)).map_err(|e| CliError::new(e.to_string()))? {
            continue;
        }

        let command = match event::read().map_err(|e| CliError::new(e.to_string()))? {
            Event::Key(key) if key.kind == KeyEventKind::Press => key_command(key),
            Event::Mouse(mouse) => app.on_mouse(mouse),
            _ => None,
        };

        if let Some(command) = command
            && !app.run(command)
        {
            return Ok(());
        }
    }
}
