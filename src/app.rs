//! Interactive terminal board.
//!
//! The board view only ever learns about cells through published deltas, the
//! same way any other consumer of the engine would.

use crate::colors::ColorState;
use crate::config::RunConfig;
use crate::engine::{Bounds, Coord, StartSet};
use crate::error::StartSetError;
use crate::help::{show_help_modal, HELP};
use crate::playback::{LifeObserver, PlaybackController, PlaybackState};
use crate::settings::Settings;
use crate::terminal::{Input, Terminal};
use crossterm::event::KeyCode;
use crossterm::style::Color;
use std::collections::{BTreeSet, HashSet};
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Rows reserved above the board for the status line.
const STATUS_ROWS: u16 = 1;
/// Poll timeout when no autoplay step is pending.
const IDLE_POLL: Duration = Duration::from_millis(100);
const MIN_INTERVAL: Duration = Duration::from_millis(10);
const MAX_INTERVAL: Duration = Duration::from_secs(10);

/// What the board currently shows, maintained from published events.
#[derive(Debug, Default)]
pub struct BoardView {
    pub on: HashSet<Coord>,
    /// Cells switched on by the latest delta.
    pub newborn: HashSet<Coord>,
    pub generation: u64,
    pub message: String,
}

impl LifeObserver for BoardView {
    fn on_generation_changed(&mut self, generation: u64) {
        self.generation = generation;
    }

    fn on_delta(&mut self, turned_on: &[Coord], turned_off: &[Coord]) {
        for c in turned_off {
            self.on.remove(c);
        }
        self.newborn = turned_on.iter().copied().collect();
        self.on.extend(turned_on.iter().copied());
    }

    fn on_reset(&mut self) {
        self.newborn.clear();
    }

    fn on_stop(&mut self) {
        self.message = "pattern complete".into();
    }

    fn on_start_set_validation(&mut self, result: Result<Option<&StartSet>, &StartSetError>) {
        self.message = match result {
            Ok(Some(set)) => format!("start set: {} cells", set.len()),
            Ok(None) => "start set cleared".into(),
            Err(e) => e.to_string(),
        };
    }
}

pub enum Action {
    Continue,
    Help,
    Quit,
}

/// Keyboard state between frames
pub struct Controls {
    pub target_input: String,
    pub colors: ColorState,
    pub follow_terminal: bool,
    /// Board cell the edit keys act on.
    pub cursor: Coord,
    /// Start set being drawn while the board is reset.
    pub drawing: BTreeSet<Coord>,
    /// `drawing` differs from the stored start set.
    edited: bool,
}

impl Controls {
    pub fn new(follow_terminal: bool) -> Self {
        Self {
            target_input: String::new(),
            colors: ColorState::new(0),
            follow_terminal,
            cursor: Coord::new(0, 0),
            drawing: BTreeSet::new(),
            edited: false,
        }
    }

    pub fn handle_key(&mut self, code: KeyCode, pc: &mut PlaybackController<BoardView>) -> Action {
        if self.colors.handle_key(code) {
            return Action::Continue;
        }
        match code {
            KeyCode::Char('q') => return Action::Quit,
            KeyCode::Esc if self.target_input.is_empty() => return Action::Quit,
            KeyCode::Esc => self.target_input.clear(),
            KeyCode::Char('?') => return Action::Help,
            KeyCode::Char(c) if c.is_ascii_digit() => self.target_input.push(c),
            KeyCode::Backspace => {
                self.target_input.pop();
            }
            KeyCode::Enter => {
                let input = std::mem::take(&mut self.target_input);
                match input.parse::<u64>() {
                    Ok(target) => {
                        if self.commit_drawing(pc) {
                            if let Err(e) = pc.set_target_generation(target) {
                                pc.observer_mut().message = e.to_string();
                            }
                        }
                    }
                    Err(_) => pc.observer_mut().message = "type a generation number first".into(),
                }
            }
            KeyCode::Char(' ') => {
                if pc.state() == PlaybackState::Playing {
                    pc.pause();
                } else if self.commit_drawing(pc) {
                    if let Err(e) = pc.play() {
                        pc.observer_mut().message = e.to_string();
                    }
                }
            }
            KeyCode::Char('n') => {
                pc.step_once();
            }
            KeyCode::Char('r') => {
                pc.reset();
                self.drawing = pc
                    .simulation()
                    .start_set()
                    .map(|s| s.coords().iter().copied().collect())
                    .unwrap_or_default();
                self.edited = false;
            }
            KeyCode::Char('h') => self.cursor.x = self.cursor.x.saturating_sub(1),
            KeyCode::Char('k') => self.cursor.y = self.cursor.y.saturating_sub(1),
            KeyCode::Char('l') => self.cursor.x += 1,
            KeyCode::Char('j') => self.cursor.y += 1,
            KeyCode::Char('x') => {
                if pc.state() == PlaybackState::Reset {
                    if !self.drawing.remove(&self.cursor) {
                        self.drawing.insert(self.cursor);
                    }
                    self.edited = true;
                } else {
                    pc.observer_mut().message = "press r to edit the start set".into();
                }
            }
            KeyCode::Char('c') if pc.state() == PlaybackState::Reset => {
                self.drawing.clear();
                self.edited = true;
            }
            KeyCode::Char('e') => {
                let exported = pc.simulation().export_active();
                pc.observer_mut().message = exported;
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                pc.set_interval((pc.interval() / 2).max(MIN_INTERVAL));
            }
            KeyCode::Char('-') => {
                pc.set_interval((pc.interval() * 2).min(MAX_INTERVAL));
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down => {
                let b = pc.bounds();
                let (w, h) = match code {
                    KeyCode::Left => (b.width.saturating_sub(1).max(1), b.height),
                    KeyCode::Right => (b.width + 1, b.height),
                    KeyCode::Up => (b.width, b.height.saturating_sub(1).max(1)),
                    _ => (b.width, b.height + 1),
                };
                self.follow_terminal = false;
                pc.set_dimensions(w, h);
            }
            _ => {}
        }
        self.fit(pc.bounds());
        Action::Continue
    }

    /// Keep the cursor and the drawing inside `bounds`.
    pub fn fit(&mut self, bounds: Bounds) {
        self.cursor.x = self.cursor.x.min(bounds.width.saturating_sub(1));
        self.cursor.y = self.cursor.y.min(bounds.height.saturating_sub(1));
        let before = self.drawing.len();
        self.drawing.retain(|&c| bounds.contains(c));
        if self.drawing.len() != before {
            self.edited = true;
        }
    }

    /// Store an edited drawing as the start set. Returns false if it was
    /// rejected.
    fn commit_drawing(&mut self, pc: &mut PlaybackController<BoardView>) -> bool {
        if pc.state() != PlaybackState::Reset || !self.edited {
            return true;
        }
        if pc.set_start_cells(self.drawing.iter().copied()).is_err() {
            return false;
        }
        self.edited = false;
        self.drawing.clear();
        if let Some(start) = pc.simulation().start_set() {
            let json = start.to_json();
            pc.observer_mut().message = format!("start set {json}");
        }
        true
    }
}

fn board_bounds_for(width: u16, height: u16) -> Bounds {
    Bounds::new(width as u32, height.saturating_sub(STATUS_ROWS) as u32)
}

fn status_line(pc: &PlaybackController<BoardView>, controls: &Controls) -> String {
    let view = pc.observer();
    let mut line = format!(
        " gen {} | {} | {} on | {} | {}ms",
        view.generation,
        pc.state().label(),
        view.on.len(),
        pc.bounds(),
        pc.interval().as_millis(),
    );
    if pc.state() == PlaybackState::Reset {
        line.push_str(&format!(
            " | edit {},{} ({} drawn)",
            controls.cursor.x,
            controls.cursor.y,
            controls.drawing.len()
        ));
    }
    if !controls.target_input.is_empty() {
        line.push_str(&format!(" | jump to {}_", controls.target_input));
    }
    if !view.message.is_empty() {
        line.push_str(" | ");
        line.push_str(&view.message);
    }
    line.push_str(" | ? help");
    line
}

fn draw(
    term: &mut Terminal,
    pc: &PlaybackController<BoardView>,
    controls: &Controls,
    alive_char: char,
) -> io::Result<()> {
    term.clear();
    term.set_str(0, 0, &status_line(pc, controls), Some(Color::White), false);

    let bounds = pc.bounds();
    let view = pc.observer();
    for &c in &view.on {
        if !bounds.contains(c) {
            continue;
        }
        let (color, bold) = controls.colors.cell_color(view.newborn.contains(&c));
        term.set(c.x as i32, c.y as i32 + STATUS_ROWS as i32, alive_char, Some(color), bold);
    }

    if pc.state() == PlaybackState::Reset {
        let (color, _) = controls.colors.cell_color(true);
        for &c in &controls.drawing {
            term.set(c.x as i32, c.y as i32 + STATUS_ROWS as i32, alive_char, Some(color), false);
        }
        let cur = controls.cursor;
        let glyph = if controls.drawing.contains(&cur) { alive_char } else { '+' };
        term.set(cur.x as i32, cur.y as i32 + STATUS_ROWS as i32, glyph, Some(Color::White), true);
    }
    term.render()
}

/// Run the interactive board until the user quits
pub fn run(config: RunConfig) -> io::Result<()> {
    let mut term = Terminal::new(true)?;
    term.clear_screen()?;

    let (tw, th) = term.size();
    let bounds = config.bounds_or(board_bounds_for(tw, th));
    let mut pc = PlaybackController::new(bounds, BoardView::default()).with_interval(config.interval);
    let mut controls = Controls::new(config.follows_terminal());
    controls.cursor = Coord::new(bounds.width / 2, bounds.height / 2);
    controls.fit(bounds);

    match config.start.load(bounds, &config.custom_patterns) {
        Ok(input) => {
            if let Err(e) = input.apply(&mut pc) {
                debug!(error = %e, "initial start set rejected");
            }
        }
        Err(e) => pc.observer_mut().message = e.to_string(),
    }
    if pc.simulation().has_start_set() {
        let started = match config.target {
            Some(target) => pc.set_target_generation(target),
            None => pc.play(),
        };
        if let Err(e) = started {
            pc.observer_mut().message = e.to_string();
        }
    }
    info!(%bounds, "interactive session started");

    loop {
        draw(&mut term, &pc, &controls, config.alive_char)?;

        let now = Instant::now();
        let timeout = pc
            .next_deadline()
            .map(|d| d.saturating_duration_since(now).min(IDLE_POLL))
            .unwrap_or(IDLE_POLL);

        match term.poll_input(timeout)? {
            Some(Input::Key(code)) => match controls.handle_key(code, &mut pc) {
                Action::Quit => break,
                Action::Help => {
                    if show_help_modal(&mut term, HELP)? {
                        break;
                    }
                }
                Action::Continue => {}
            },
            Some(Input::Resize(w, h)) => {
                term.resize(w, h);
                term.clear_screen()?;
                if controls.follow_terminal {
                    let b = config.bounds_or(board_bounds_for(w, h));
                    pc.set_dimensions(b.width, b.height);
                    controls.fit(b);
                }
            }
            None => {}
        }

        pc.tick(Instant::now());
    }

    info!(log = %Settings::log_path().display(), "interactive session ended");
    Ok(())
}
