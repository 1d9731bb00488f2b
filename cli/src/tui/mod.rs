pub mod app;
pub mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use wellness_core::{FileKeyValueStore, ProgressCalendar};

use crate::tui::app::{App, InputMode};

pub fn run(calendar: ProgressCalendar<FileKeyValueStore>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(calendar);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    finish(res)
}

/// Surfaces a failed event loop once the terminal has been restored.
fn finish(res: io::Result<()>) -> Result<()> {
    if let Err(err) = &res {
        tracing::error!("TUI exited with error: {:?}", err);
    }
    Ok(res?)
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App<FileKeyValueStore>,
) -> io::Result<()> {
    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .map_err(|e| io::Error::other(e.to_string()))?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.input_mode() {
            InputMode::Normal => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Right | KeyCode::Char('l') => app.next(),
                KeyCode::Left | KeyCode::Char('h') => app.previous(),
                KeyCode::Down | KeyCode::Char('j') => app.down(),
                KeyCode::Up | KeyCode::Char('k') => app.up(),
                KeyCode::Enter | KeyCode::Char(' ') => app.open_picker(),
                _ => {}
            },
            InputMode::Picking => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => app.close_picker(),
                KeyCode::Char(c @ '0'..='5') => {
                    if let Some(score) = c.to_digit(10) {
                        app.pick_score(score as u8);
                    }
                }
                KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => app.next_swatch(),
                KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => app.previous_swatch(),
                KeyCode::Up | KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('k') => {
                    app.toggle_swatch_row()
                }
                KeyCode::Enter | KeyCode::Char(' ') => app.pick_selected(),
                _ => {}
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_reports_loop_errors() {
        assert!(finish(Ok(())).is_ok());
        let err = finish(Err(io::Error::other("terminal went away"))).unwrap_err();
        assert!(err.to_string().contains("terminal went away"));
    }
}
