//! `tui`: interactive terminal calculator

use std::io;

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use keycalc::core::history::History;
use keycalc::core::ExpressionEngine;
use keycalc::tui::{keypad_area, render, CalculatorApp, InputHandler};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};

use crate::error::CliResult;

/// Runs the terminal calculator until the user quits
pub fn run_tui(history_limit: usize) -> CliResult<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let engine = ExpressionEngine::with_history(History::with_capacity(history_limit));
    let result = run_app(&mut terminal, CalculatorApp::with_engine(engine));

    // restore the terminal even when the loop failed
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

/// Returns true for a left click
fn is_left_click(mouse: &MouseEvent) -> bool {
    mouse.kind == MouseEventKind::Down(MouseButton::Left)
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: CalculatorApp,
) -> CliResult<()> {
    let input_handler = InputHandler::new();
    let mut keypad = Rect::default();

    while !app.should_quit() {
        terminal.draw(|frame| {
            keypad = keypad_area(frame.area());
            render(&app, frame);
        })?;

        match event::read()? {
            Event::Key(key) => app.handle_action(input_handler.handle_key(key)),
            Event::Mouse(mouse) if is_left_click(&mouse) => {
                app.click(keypad, mouse.column, mouse.row);
            }
            _ => {}
        }
    }

    Ok(())
}
