//! Replay command implementation.

#![allow(clippy::needless_pass_by_value)]

use super::output::JsonReplayResult;
use super::view::{self, Screen};
use super::{CliError, ReplayFormat};
use slide48::replay::{Recording, ReplayEngine};
use std::path::PathBuf;
use tracing::info;

const CONTROLS: &str = " [←/→] Step  [Home/End] First/last  [q] Quit ";

/// Execute the replay command.
///
/// # Errors
///
/// Returns an error if the recording cannot be loaded or replayed.
pub(crate) fn execute(
    recording_path: PathBuf,
    format: ReplayFormat,
    step: Option<usize>,
) -> Result<(), CliError> {
    // Load recording
    let recording = Recording::load(&recording_path).map_err(|e| {
        CliError::new(format!("Failed to load recording {}: {e}", recording_path.display()))
    })?;
    info!(
        path = %recording_path.display(),
        seed = recording.seed,
        actions = recording.len(),
        "loaded recording"
    );

    match format {
        ReplayFormat::Tui => {
            let engine = ReplayEngine::new_at_step(recording, step.unwrap_or(0))?;
            run_replay_tui(engine)
        }
        ReplayFormat::Text => {
            let engine = ReplayEngine::new_at_step(recording, step.unwrap_or(0))?;
            print_text_replay(engine);
            Ok(())
        }
        ReplayFormat::Json => {
            // Final position unless a step was asked for
            let target = step.unwrap_or(recording.len());
            let engine = ReplayEngine::new_at_step(recording, target)?;
            let json = serde_json::to_string_pretty(&JsonReplayResult::from_engine(&engine))
                .map_err(|e| CliError::new(e.to_string()))?;
            println!("{json}");
            Ok(())
        }
    }
}

fn run_replay_tui(mut engine: ReplayEngine) -> Result<(), CliError> {
    use crossterm::{
        event::{self, Event, KeyCode, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    };
    use ratatui::{backend::CrosstermBackend, Terminal};
    use std::io::stdout;
    use std::time::Duration;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| CliError::new(e.to_string()))?;

    let result = loop {
        let status = format!("Step {}/{}", engine.step(), engine.recording().len());
        if let Err(e) = terminal.draw(|f| {
            view::draw(
                f,
                &Screen {
                    title: "slide48 replay",
                    state: engine.state(),
                    best: engine.best_score(),
                    status,
                    controls: CONTROLS,
                },
            );
        }) {
            break Err(CliError::new(e.to_string()));
        }

        // Handle input
        match event::poll(Duration::from_millis(100)) {
            Ok(false) => continue,
            Ok(true) => {}
            Err(e) => break Err(e.into()),
        }
        let key = match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => key,
            Ok(_) => continue,
            Err(e) => break Err(e.into()),
        };

        // Stepping past either end is not an error here
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => break Ok(()),
            KeyCode::Right | KeyCode::Char('l') => {
                let _ = engine.step_forward();
            }
            KeyCode::Left | KeyCode::Char('h') => {
                let _ = engine.step_backward();
            }
            KeyCode::Home => {
                let _ = engine.goto_step(0);
            }
            KeyCode::End => {
                let last = engine.recording().len();
                let _ = engine.goto_step(last);
            }
            _ => {}
        }
    };

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result
}

fn print_text_replay(mut engine: ReplayEngine) {
    println!("Replay of game (seed: {})", engine.recording().seed);
    println!("Board size: {}", engine.recording().config.size);
    println!();

    loop {
        if let Some(action) = engine.step().checked_sub(1).map(|i| engine.recording().actions[i]) {
            println!("=== Step {} ({action:?}) ===", engine.step());
        } else {
            println!("=== Step {} ===", engine.step());
        }
        println!("{}", engine.render_ascii());

        if engine.step_forward().is_err() {
            println!("=== END OF RECORDING ===");
            break;
        }
    }
}
