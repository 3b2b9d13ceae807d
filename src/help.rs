use crate::terminal::Terminal;
use crossterm::cursor::MoveTo;
use crossterm::event::KeyCode;
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use std::io::{self, stdout, Write};

pub const HELP: &str = "\
TERMLIFE
─────────────────────────
Space    Play / pause
n        Step once (paused)
0-9 ⏎    Jump to generation
r        Reset and edit start set
hjkl     Move cursor (reset)
x        Toggle cell (reset)
c        Clear drawing (reset)
←/→      Narrower / wider
↑/↓      Shorter / taller
+/-      Faster / slower
e        Show current cells
!@#)     Color scheme
q/Esc    Quit
?        Close help";

/// Lines of the help box, padded and framed.
pub fn framed(help_text: &str) -> Vec<String> {
    let lines: Vec<&str> = help_text.lines().collect();
    let max_width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let rule = "─".repeat(max_width + 2);

    let mut out = Vec::with_capacity(lines.len() + 2);
    out.push(format!("┌{rule}┐"));
    for line in lines {
        let padding = max_width.saturating_sub(line.chars().count());
        out.push(format!("│ {}{} │", line, " ".repeat(padding)));
    }
    out.push(format!("└{rule}┘"));
    out
}

/// Show a modal help overlay on top of the last rendered frame.
/// Returns true if the user requested quit (q/Esc) while the overlay is open.
pub fn show_help_modal(term: &mut Terminal, help_text: &str) -> io::Result<bool> {
    if help_text.is_empty() {
        return Ok(false);
    }

    let (width, height) = term.size();
    let boxed = framed(help_text);
    let box_width = boxed.first().map(|l| l.chars().count()).unwrap_or(0);
    let start_x = (width as usize).saturating_sub(box_width) / 2;
    let start_y = (height as usize).saturating_sub(boxed.len()) / 2;

    let mut out = stdout();
    queue!(out, SetForegroundColor(Color::White))?;
    for (i, line) in boxed.iter().enumerate() {
        queue!(out, MoveTo(start_x as u16, (start_y + i) as u16), Print(line))?;
    }
    queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
    out.flush()?;

    loop {
        if let Some(code) = term.wait_key(50)? {
            match code {
                KeyCode::Char('?') => break,
                KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
                _ => {}
            }
        }
    }

    // Restore previous frame from back buffer.
    term.render()?;
    Ok(false)
}
