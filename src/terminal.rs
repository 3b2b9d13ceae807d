use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{poll, read, Event, KeyCode, KeyEventKind},
    execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{
        disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::io::{self, stdout, Write};
use std::time::Duration;

/// Terminal abstraction for rendering
pub struct Terminal {
    width: u16,
    height: u16,
    buffer: Vec<Vec<Glyph>>,
    alternate_screen: bool,
}

/// A single character cell in the back buffer
#[derive(Clone, PartialEq)]
pub struct Glyph {
    pub ch: char,
    pub fg: Option<Color>,
    pub bold: bool,
}

impl Default for Glyph {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: None,
            bold: false,
        }
    }
}

/// Input the main loop cares about
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    Key(KeyCode),
    Resize(u16, u16),
}

impl Terminal {
    /// Initialize the terminal for drawing
    pub fn new(alternate_screen: bool) -> io::Result<Self> {
        let (width, height) = size()?;

        if alternate_screen {
            enable_raw_mode()?;
            execute!(stdout(), EnterAlternateScreen, Hide)?;
        }

        Ok(Self {
            width,
            height,
            buffer: vec![vec![Glyph::default(); width as usize]; height as usize],
            alternate_screen,
        })
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Reallocate the back buffer after the terminal changed size
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.buffer = vec![vec![Glyph::default(); width as usize]; height as usize];
    }

    /// Clear the back buffer
    pub fn clear(&mut self) {
        for row in &mut self.buffer {
            for glyph in row {
                *glyph = Glyph::default();
            }
        }
    }

    pub fn clear_screen(&self) -> io::Result<()> {
        execute!(stdout(), Clear(ClearType::All))?;
        Ok(())
    }

    /// Set a character at position with optional color; off-screen is ignored
    pub fn set(&mut self, x: i32, y: i32, ch: char, fg: Option<Color>, bold: bool) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            self.buffer[y as usize][x as usize] = Glyph { ch, fg, bold };
        }
    }

    pub fn set_str(&mut self, x: i32, y: i32, s: &str, fg: Option<Color>, bold: bool) {
        for (i, ch) in s.chars().enumerate() {
            self.set(x + i as i32, y, ch, fg, bold);
        }
    }

    /// Render the entire buffer to screen
    pub fn render(&self) -> io::Result<()> {
        let mut out = stdout();

        for (y, row) in self.buffer.iter().enumerate() {
            queue!(out, MoveTo(0, y as u16))?;

            for glyph in row {
                if glyph.bold {
                    queue!(out, SetAttribute(Attribute::Bold))?;
                }

                if let Some(color) = glyph.fg {
                    queue!(out, SetForegroundColor(color), Print(glyph.ch), ResetColor)?;
                } else {
                    queue!(out, Print(glyph.ch))?;
                }

                if glyph.bold {
                    queue!(out, SetAttribute(Attribute::Reset))?;
                }
            }
        }

        out.flush()?;
        Ok(())
    }

    /// Wait up to `timeout` for a key press or resize
    pub fn poll_input(&self, timeout: Duration) -> io::Result<Option<Input>> {
        if poll(timeout)? {
            match read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    return Ok(Some(Input::Key(key.code)));
                }
                Event::Resize(w, h) => return Ok(Some(Input::Resize(w, h))),
                _ => {}
            }
        }
        Ok(None)
    }

    /// Wait for a key press with timeout in milliseconds
    pub fn wait_key(&self, timeout_ms: u64) -> io::Result<Option<KeyCode>> {
        match self.poll_input(Duration::from_millis(timeout_ms))? {
            Some(Input::Key(code)) => Ok(Some(code)),
            _ => Ok(None),
        }
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if self.alternate_screen {
            if let Err(err) = execute!(stdout(), Show, LeaveAlternateScreen) {
                tracing::error!(?err, "failed to leave alternate screen");
            }
            if let Err(err) = disable_raw_mode() {
                tracing::error!(?err, "failed to disable raw mode");
            }
        }
    }
}
