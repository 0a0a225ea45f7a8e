//! TUI rendering

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Widget, Wrap},
    Frame,
};

use super::app::CalculatorApp;
use super::keypad::KeypadWidget;
use crate::core::format::format_number;

/// Title of the outer frame
pub const TITLE: &str = " keycalc ";

/// Keyboard help
pub const HELP_SHORTCUTS: &[(&str, &str)] = &[
    ("0-9 .", "Enter number"),
    ("+-*/", "Operator"),
    ("= ⏎", "Evaluate"),
    ("Esc c", "Clear"),
    ("⌫", "Backspace"),
    ("Ctrl+L", "Clear history"),
    ("Ctrl+C", "Quit"),
];

/// Operator precedence hint
pub const PRECEDENCE_HINT: &str = "× ÷ before + −";

/// Number of history lines shown
const HISTORY_LINES: usize = 10;

/// Renders the calculator UI to the frame
pub fn render(app: &CalculatorApp, frame: &mut Frame) {
    frame.render_widget(CalculatorUI::new(app), frame.area());
}

/// Where the keypad is drawn for a given terminal area
#[must_use]
pub fn keypad_area(area: Rect) -> Rect {
    columns(area)[1]
}

/// Main panel, keypad, help sidebar
fn columns(area: Rect) -> [Rect; 3] {
    Layout::horizontal([
        Constraint::Min(30),
        Constraint::Length(26),
        Constraint::Length(24),
    ])
    .margin(1)
    .areas(area)
}

/// Centers a `width` x `height` box inside `area`
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Calculator UI widget
#[derive(Debug)]
pub struct CalculatorUI<'a> {
    app: &'a CalculatorApp,
}

impl<'a> CalculatorUI<'a> {
    /// Creates a new calculator UI widget
    #[must_use]
    pub fn new(app: &'a CalculatorApp) -> Self {
        Self { app }
    }

    fn render_display(&self, area: Rect, buf: &mut Buffer) {
        let text = self.app.engine().state().display_text();
        Paragraph::new(Span::styled(
            text,
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .title(" Display ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .render(area, buf);
    }

    /// Drawn only while there is an expression to show
    fn render_expression(&self, area: Rect, buf: &mut Buffer) {
        let text = self.app.engine().state().expression_text();
        if text.is_empty() {
            return;
        }
        Paragraph::new(Span::styled(text, Style::default().fg(Color::Gray)))
            .alignment(Alignment::Right)
            .block(
                Block::default()
                    .title(" Expression ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .render(area, buf);
    }

    fn render_history(&self, area: Rect, buf: &mut Buffer) {
        let items: Vec<ListItem> = self
            .app
            .engine()
            .history()
            .iter_rev()
            .take(HISTORY_LINES)
            .map(|entry| {
                ListItem::new(Line::from(vec![
                    Span::styled(entry.expression.as_str(), Style::default().fg(Color::Gray)),
                    Span::raw(" = "),
                    Span::styled(
                        format_number(entry.result),
                        Style::default().fg(Color::Cyan),
                    ),
                ]))
            })
            .collect();

        List::new(items)
            .block(
                Block::default()
                    .title(" History (newest first) ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Blue)),
            )
            .render(area, buf);
    }

    fn render_help(&self, area: Rect, buf: &mut Buffer) {
        let [shortcuts_area, hint_area] =
            Layout::vertical([Constraint::Min(9), Constraint::Length(3)]).areas(area);

        let shortcuts: Vec<ListItem> = HELP_SHORTCUTS
            .iter()
            .map(|(key, desc)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{key:>7}"), Style::default().fg(Color::Yellow)),
                    Span::raw(" "),
                    Span::styled(*desc, Style::default().fg(Color::Gray)),
                ]))
            })
            .collect();

        List::new(shortcuts)
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .render(shortcuts_area, buf);

        Paragraph::new(Span::styled(
            PRECEDENCE_HINT,
            Style::default().fg(Color::Cyan),
        ))
        .block(
            Block::default()
                .title(" Precedence ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .render(hint_area, buf);
    }

    fn render_error(&self, area: Rect, buf: &mut Buffer) {
        let Some(error) = self.app.error() else {
            return;
        };
        let popup = centered(area, 44, 5);
        Clear.render(popup, buf);
        Paragraph::new(vec![
            Line::from(Span::styled(
                error.to_string(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "press any key",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" Error ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
        .render(popup, buf);
    }
}

impl Widget for CalculatorUI<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(TITLE)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .render(area, buf);

        let [main_area, keypad_area, help_area] = columns(area);
        let [display_area, expression_area, history_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
        ])
        .areas(main_area);

        self.render_display(display_area, buf);
        self.render_expression(expression_area, buf);
        self.render_history(history_area, buf);
        KeypadWidget::new(self.app.keypad()).render(keypad_area, buf);
        self.render_help(help_area, buf);
        self.render_error(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn type_keys(app: &mut CalculatorApp, keys: &str) {
        for key in Key::parse_sequence(keys) {
            app.press(key);
        }
    }

    fn draw(app: &CalculatorApp) -> String {
        let mut terminal = Terminal::new(TestBackend::new(90, 24)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_render_initial() {
        let app = CalculatorApp::new();
        let content = draw(&app);
        assert!(content.contains("Display"));
        assert!(content.contains("Keypad"));
        assert!(!content.contains("Expression"));
        assert!(content.contains(PRECEDENCE_HINT));
    }

    #[test]
    fn test_render_expression_panel() {
        let mut app = CalculatorApp::new();
        type_keys(&mut app, "12+3");
        let content = draw(&app);
        assert!(content.contains("Expression"));
        assert!(content.contains("12 +"));
    }

    #[test]
    fn test_render_result_and_history() {
        let mut app = CalculatorApp::new();
        type_keys(&mut app, "2+3*4=");
        let content = draw(&app);
        assert!(content.contains("2 + 3 × 4 = 14"));
        assert!(content.contains("History"));
    }

    #[test]
    fn test_render_error_popup() {
        let mut app = CalculatorApp::new();
        type_keys(&mut app, "1/0=");
        let content = draw(&app);
        assert!(content.contains("Division by zero"));
        assert!(content.contains("press any key"));

        app.press(Key::Enter);
        assert!(!draw(&app).contains("Division by zero"));
    }

    #[test]
    fn test_render_small_terminal() {
        let app = CalculatorApp::new();
        let mut terminal = Terminal::new(TestBackend::new(20, 6)).unwrap();
        terminal.draw(|frame| render(&app, frame)).unwrap();
    }

    #[test]
    fn test_keypad_area_inside_frame() {
        let area = Rect::new(0, 0, 90, 24);
        let keypad = keypad_area(area);
        assert_eq!(keypad.width, 26);
        assert!(keypad.x > 0 && keypad.right() < area.right());
    }

    #[test]
    fn test_centered() {
        let popup = centered(Rect::new(0, 0, 80, 20), 40, 4);
        assert_eq!(popup, Rect::new(20, 8, 40, 4));
        let clipped = centered(Rect::new(0, 0, 10, 3), 40, 4);
        assert_eq!(clipped, Rect::new(0, 0, 10, 3));
    }
}
