//! On-screen keypad
//!
//! Mirrors the button grid of the calculator face. Buttons light up when the
//! matching key is pressed and can be clicked with the mouse.
//!
//! ```text
//! [ C ] [ ← ] [ ÷ ] [ × ]
//! [ 7 ] [ 8 ] [ 9 ] [ − ]
//! [ 4 ] [ 5 ] [ 6 ] [ + ]
//! [ 1 ] [ 2 ] [ 3 ] [ = ]
//! [    0    ] [ . ] [   ]
//! ```

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Widget},
};

use crate::core::{Command, Operation};

/// A single keypad button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButton {
    /// Text on the button
    pub label: &'static str,
    /// Command the button issues
    pub command: Command,
    /// Top row of the button
    pub row: usize,
    /// Left column of the button
    pub col: usize,
    /// Rows covered
    pub row_span: usize,
    /// Columns covered
    pub col_span: usize,
    /// Whether the button is highlighted
    pub pressed: bool,
}

impl KeypadButton {
    const fn new(label: &'static str, command: Command, row: usize, col: usize) -> Self {
        Self {
            label,
            command,
            row,
            col,
            row_span: 1,
            col_span: 1,
            pressed: false,
        }
    }

    const fn spanning(mut self, row_span: usize, col_span: usize) -> Self {
        self.row_span = row_span;
        self.col_span = col_span;
        self
    }

    /// Returns true if the button covers grid cell (`row`, `col`)
    #[must_use]
    pub const fn covers(&self, row: usize, col: usize) -> bool {
        row >= self.row
            && row < self.row + self.row_span
            && col >= self.col
            && col < self.col + self.col_span
    }

    fn style(&self) -> Style {
        if self.pressed {
            return Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD);
        }
        match self.command {
            Command::Digit(_) | Command::DecimalPoint => Style::default().fg(Color::White),
            Command::Operator(_) | Command::Backspace => Style::default().fg(Color::Yellow),
            Command::Equals => Style::default().fg(Color::Green),
            Command::Clear => Style::default().fg(Color::Red),
        }
    }
}

/// The keypad grid
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButton>,
    rows: usize,
    cols: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard layout
    #[must_use]
    pub fn new() -> Self {
        let digit = |d: u8, label, row, col| KeypadButton::new(label, Command::Digit(d), row, col);
        let op = |op: Operation, row, col| KeypadButton::new(op.symbol(), Command::Operator(op), row, col);

        let buttons = vec![
            KeypadButton::new("C", Command::Clear, 0, 0),
            KeypadButton::new("←", Command::Backspace, 0, 1),
            op(Operation::Divide, 0, 2),
            op(Operation::Multiply, 0, 3),
            digit(7, "7", 1, 0),
            digit(8, "8", 1, 1),
            digit(9, "9", 1, 2),
            op(Operation::Subtract, 1, 3),
            digit(4, "4", 2, 0),
            digit(5, "5", 2, 1),
            digit(6, "6", 2, 2),
            op(Operation::Add, 2, 3),
            digit(1, "1", 3, 0),
            digit(2, "2", 3, 1),
            digit(3, "3", 3, 2),
            KeypadButton::new("=", Command::Equals, 3, 3).spanning(2, 1),
            digit(0, "0", 4, 0).spanning(1, 2),
            KeypadButton::new(".", Command::DecimalPoint, 4, 2),
        ];

        Self {
            buttons,
            rows: 5,
            cols: 4,
        }
    }

    /// Number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Grid dimensions (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// All buttons
    pub fn buttons(&self) -> impl Iterator<Item = &KeypadButton> {
        self.buttons.iter()
    }

    /// The button covering a grid cell
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.covers(row, col))
    }

    /// Index of the button issuing `command`
    #[must_use]
    pub fn find_button(&self, command: Command) -> Option<usize> {
        self.buttons.iter().position(|b| b.command == command)
    }

    /// Highlights the button issuing `command`, releasing all others
    pub fn highlight(&mut self, command: Command) {
        self.release_all();
        if let Some(btn) = self
            .find_button(command)
            .and_then(|idx| self.buttons.get_mut(idx))
        {
            btn.pressed = true;
        }
    }

    /// Releases every button
    pub fn release_all(&mut self) {
        for btn in &mut self.buttons {
            btn.pressed = false;
        }
    }

    /// The highlighted button, if any
    #[must_use]
    pub fn pressed(&self) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.pressed)
    }

    /// Cell size inside a bordered `area`, or `None` when too small
    fn cell_size(&self, area: Rect) -> Option<(u16, u16)> {
        let width = area.width.saturating_sub(2) / self.cols as u16;
        let height = area.height.saturating_sub(2) / self.rows as u16;
        (width > 0 && height > 0).then_some((width, height))
    }

    /// Maps a mouse position inside the rendered `area` to a command
    #[must_use]
    pub fn hit_test(&self, area: Rect, x: u16, y: u16) -> Option<Command> {
        let (cell_w, cell_h) = self.cell_size(area)?;
        let inner_x = x.checked_sub(area.x + 1)?;
        let inner_y = y.checked_sub(area.y + 1)?;
        let col = (inner_x / cell_w) as usize;
        let row = (inner_y / cell_h) as usize;
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.get_button_at(row, col).map(|b| b.command)
    }
}

/// Keypad widget for rendering
#[derive(Debug)]
pub struct KeypadWidget<'a> {
    keypad: &'a Keypad,
}

impl<'a> KeypadWidget<'a> {
    /// Creates a new keypad widget
    #[must_use]
    pub fn new(keypad: &'a Keypad) -> Self {
        Self { keypad }
    }
}

impl Widget for KeypadWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(" Keypad ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .render(area, buf);

        let Some((cell_w, cell_h)) = self.keypad.cell_size(area) else {
            return;
        };
        let inner_x = area.x + 1;
        let inner_y = area.y + 1;

        for btn in self.keypad.buttons() {
            let x = inner_x + btn.col as u16 * cell_w;
            let y = inner_y + btn.row as u16 * cell_h;
            let width = cell_w * btn.col_span as u16;
            let height = cell_h * btn.row_span as u16;

            let label = format!("[{}]", btn.label);
            let label_width = label.chars().count() as u16;
            if width < label_width {
                continue;
            }
            let label_x = x + (width - label_width) / 2;
            let label_y = y + height / 2;
            buf.set_string(label_x, label_y, label, btn.style());
        }
    }
}
