//! Terminal event loop for the calculator screen.

use std::{
    io,
    time::{Duration, Instant},
};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use tracing::{debug, info};

use crate::{
    state::{CalculatorScreen, Focus, TextField},
    views,
};

/// How long to wait for input before redrawing, so notices can expire.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Cash percentage change for PgUp / PgDn.
const PAGE_STEP: i16 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

/// Runs the interactive screen until the user quits.
///
/// The terminal is restored even when the loop fails.
pub fn run(screen: &mut CalculatorScreen) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!("calculator screen opened");
    let res = run_loop(&mut terminal, screen);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    info!("calculator screen closed");

    res
}

fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    screen: &mut CalculatorScreen,
) -> Result<()> {
    loop {
        screen.expire_notice(Instant::now());
        terminal.draw(|f| views::render(f, screen))?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if handle_key(screen, key) == KeyOutcome::Quit {
                return Ok(());
            }
        }
    }
}

/// Applies one key press to the screen.
pub fn handle_key(
    screen: &mut CalculatorScreen,
    key: KeyEvent,
) -> KeyOutcome {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let on_slider = screen.focus() == Focus::CashPercent;

    match key.code {
        KeyCode::Esc => return KeyOutcome::Quit,
        KeyCode::Char('q' | 'c') if ctrl => return KeyOutcome::Quit,
        KeyCode::Tab | KeyCode::Down => screen.focus_next(),
        KeyCode::BackTab | KeyCode::Up => screen.focus_prev(),
        KeyCode::Left if on_slider => screen.step_percent(-1),
        KeyCode::Right if on_slider => screen.step_percent(1),
        KeyCode::Home if on_slider => screen.set_percent(0),
        KeyCode::End if on_slider => screen.set_percent(u8::MAX),
        KeyCode::Left => screen.move_cursor(TextField::move_left),
        KeyCode::Right => screen.move_cursor(TextField::move_right),
        KeyCode::Home => screen.move_cursor(TextField::move_home),
        KeyCode::End => screen.move_cursor(TextField::move_end),
        KeyCode::PageUp => screen.step_percent(PAGE_STEP),
        KeyCode::PageDown => screen.step_percent(-PAGE_STEP),
        KeyCode::Backspace => screen.backspace(),
        KeyCode::Delete => screen.delete(),
        KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
            screen.insert_char(c)
        }
        other => debug!(?other, "ignored key"),
    }
    KeyOutcome::Continue
}
