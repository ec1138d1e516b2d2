use std::io::{self, Stderr};

use crossterm::event::{self, Event};
use crossterm::terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::{Terminal, TerminalOptions, Viewport};

use crate::selector::{Outcome, SelectorState};
use crate::theme::Theme;
use crate::widgets::SelectorWidget;

const MAX_HEIGHT: u16 = 12;

/// Asks for one of `options`, starting on `selected`. `None` if cancelled.
pub fn select_one(title: &str, options: &[String], selected: usize, theme: &Theme) -> anyhow::Result<Option<String>> {
    let mut state = SelectorState::single(title, options.to_vec(), selected);
    let confirmed = run(&mut state, theme)?;
    Ok(if confirmed { state.highlighted().map(str::to_string) } else { None })
}

/// Asks for any subset of `options`, starting with `marked`. `None` if cancelled.
pub fn select_many(
    title: &str,
    options: &[String],
    marked: &[String],
    theme: &Theme,
) -> anyhow::Result<Option<Vec<String>>> {
    let mut state = SelectorState::multi(title, options.to_vec(), marked);
    let confirmed = run(&mut state, theme)?;
    Ok(confirmed.then(|| state.marked()))
}

/// Draws the prompt in an inline viewport on stderr until it is confirmed
/// (`true`) or cancelled (`false`). The viewport is cleared afterwards.
fn run(state: &mut SelectorState, theme: &Theme) -> anyhow::Result<bool> {
    let height = SelectorWidget::height_for(state.options().len(), MAX_HEIGHT);
    let backend = CrosstermBackend::new(io::stderr());
    let mut terminal = Terminal::with_options(backend, TerminalOptions { viewport: Viewport::Inline(height) })?;

    terminal::enable_raw_mode()?;
    let outcome = event_loop(&mut terminal, state, theme);
    let cleared = terminal.clear();
    terminal::disable_raw_mode()?;
    cleared?;

    Ok(outcome? == Outcome::Confirm)
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    state: &mut SelectorState,
    theme: &Theme,
) -> anyhow::Result<Outcome> {
    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            SelectorWidget { state: &*state, theme }.render(frame, area);
        })?;
        if let Event::Key(key) = event::read()? {
            match state.handle_key(key) {
                Outcome::Continue => {}
                done => return Ok(done),
            }
        }
    }
}
