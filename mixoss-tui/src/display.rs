//! Terminal display - positioned writes onto a persistent cell canvas
//!
//! Writes land in an off-screen buffer that survives between frames, so
//! only rows that were actually repainted change. `flush` hands the canvas
//! to ratatui, which diffs it against the screen.

use ratatui::{
    backend::{Backend, CrosstermBackend},
    buffer::Buffer,
    layout::Rect,
    style::Style,
    Terminal,
};
use std::io::{self, Stdout};

/// Positioned text output
pub trait Display {
    /// Current drawable area
    fn area(&self) -> Rect;

    /// Write text at (row, col), truncated at the right edge
    fn put_str(&mut self, row: u16, col: u16, text: &str, style: Style);

    fn put_char(&mut self, row: u16, col: u16, ch: char, style: Style);

    /// Blank `width` cells starting at (row, col)
    fn clear_span(&mut self, row: u16, col: u16, width: u16);

    /// Blank the whole screen
    fn clear(&mut self);

    /// Push pending writes to the terminal
    fn flush(&mut self) -> io::Result<()>;

    /// Adopt the terminal's current size and blank everything
    fn resize(&mut self) -> io::Result<()>;
}

/// Display over any ratatui backend
pub struct ScreenDisplay<B: Backend> {
    terminal: Terminal<B>,
    canvas: Buffer,
}

/// Display on the process's terminal
pub type TerminalDisplay = ScreenDisplay<CrosstermBackend<Stdout>>;

impl TerminalDisplay {
    pub fn stdout() -> io::Result<Self> {
        Self::new(CrosstermBackend::new(io::stdout()))
    }
}

impl<B: Backend> ScreenDisplay<B> {
    pub fn new(backend: B) -> io::Result<Self> {
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;
        let size = terminal.size()?;
        let canvas = Buffer::empty(Rect::new(0, 0, size.width, size.height));
        Ok(Self { terminal, canvas })
    }

    pub fn canvas(&self) -> &Buffer {
        &self.canvas
    }

    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }

    /// Text of one canvas row
    pub fn row_text(&self, row: u16) -> String {
        let area = self.canvas.area;
        if row >= area.height {
            return String::new();
        }
        (0..area.width)
            .map(|x| self.canvas[(x, row)].symbol())
            .collect()
    }

    fn in_bounds(&self, row: u16, col: u16) -> bool {
        row < self.canvas.area.height && col < self.canvas.area.width
    }
}

impl<B: Backend> Display for ScreenDisplay<B> {
    fn area(&self) -> Rect {
        self.canvas.area
    }

    fn put_str(&mut self, row: u16, col: u16, text: &str, style: Style) {
        if !self.in_bounds(row, col) {
            return;
        }
        let max_width = (self.canvas.area.width - col) as usize;
        self.canvas.set_stringn(col, row, text, max_width, style);
    }

    fn put_char(&mut self, row: u16, col: u16, ch: char, style: Style) {
        if !self.in_bounds(row, col) {
            return;
        }
        self.canvas[(col, row)].set_char(ch).set_style(style);
    }

    fn clear_span(&mut self, row: u16, col: u16, width: u16) {
        if !self.in_bounds(row, col) {
            return;
        }
        let end = col.saturating_add(width).min(self.canvas.area.width);
        for x in col..end {
            self.canvas[(x, row)].reset();
        }
    }

    fn clear(&mut self) {
        self.canvas.reset();
    }

    fn flush(&mut self) -> io::Result<()> {
        let canvas = &self.canvas;
        self.terminal.draw(|frame| {
            let area = frame.area().intersection(canvas.area);
            let buf = frame.buffer_mut();
            for y in area.top()..area.bottom() {
                for x in area.left()..area.right() {
                    buf[(x, y)] = canvas[(x, y)].clone();
                }
            }
        })?;
        Ok(())
    }

    fn resize(&mut self) -> io::Result<()> {
        let size = self.terminal.size()?;
        self.canvas.resize(Rect::new(0, 0, size.width, size.height));
        self.canvas.reset();
        self.terminal.clear()
    }
}
