use crate::engine::{Bounds, Coord};
use crate::error::{SettingsError, StartSetError};
use crate::patterns;
use crate::playback::{LifeObserver, PlaybackController};
use crate::settings::Settings;
use rand::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ALIVE_CHAR: char = '#';

/// Where the initial board comes from
#[derive(Clone, Debug, Default, PartialEq)]
pub enum StartSource {
    #[default]
    Empty,
    Json(String),
    File(PathBuf),
    Pattern(String),
    Random { density: f64, seed: Option<u64> },
}

/// Start set ready to hand to the controller
#[derive(Clone, Debug, PartialEq)]
pub enum StartInput {
    Raw(String),
    Cells(Vec<Coord>),
}

impl StartSource {
    /// Read files and expand patterns for a board of `bounds`.
    pub fn load(
        &self,
        bounds: Bounds,
        custom: &BTreeMap<String, String>,
    ) -> Result<StartInput, SettingsError> {
        Ok(match self {
            StartSource::Empty => StartInput::Raw(String::new()),
            StartSource::Json(raw) => StartInput::Raw(raw.clone()),
            StartSource::File(path) => {
                let raw = fs::read_to_string(path).map_err(|source| SettingsError::Io {
                    path: path.clone(),
                    source,
                })?;
                StartInput::Raw(raw)
            }
            StartSource::Pattern(name) => match custom.get(name) {
                Some(raw) => StartInput::Raw(raw.clone()),
                None => match patterns::find(name) {
                    Some(p) => StartInput::Cells(p.centered(bounds)),
                    None => {
                        let mut available: Vec<&str> = patterns::names();
                        available.extend(custom.keys().map(String::as_str));
                        return Err(SettingsError::UnknownPattern {
                            name: name.clone(),
                            available: available.join(", "),
                        });
                    }
                },
            },
            StartSource::Random { density, seed } => {
                let mut rng = match seed {
                    Some(s) => StdRng::seed_from_u64(*s),
                    None => StdRng::from_entropy(),
                };
                StartInput::Cells(patterns::random(bounds, *density, &mut rng))
            }
        })
    }
}

impl StartInput {
    pub fn apply<O: LifeObserver>(
        self,
        controller: &mut PlaybackController<O>,
    ) -> Result<(), StartSetError> {
        match self {
            StartInput::Raw(raw) => controller.set_start_set(&raw),
            StartInput::Cells(cells) => controller.set_start_cells(cells),
        }
    }
}

/// Resolved options for a session: command line over settings over defaults.
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// `None` follows the terminal size.
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub interval: Duration,
    pub start: StartSource,
    pub target: Option<u64>,
    pub alive_char: char,
    pub custom_patterns: BTreeMap<String, String>,
}

impl RunConfig {
    pub fn from_settings(settings: Settings) -> Self {
        Self {
            width: settings.board.width,
            height: settings.board.height,
            interval: settings
                .board
                .interval_ms
                .map(Duration::from_millis)
                .unwrap_or(crate::playback::DEFAULT_INTERVAL),
            start: StartSource::Empty,
            target: None,
            alive_char: settings.board.alive_char.unwrap_or(DEFAULT_ALIVE_CHAR),
            custom_patterns: settings.patterns,
        }
    }

    /// Board size, falling back to `fallback` for unset dimensions.
    pub fn bounds_or(&self, fallback: Bounds) -> Bounds {
        Bounds::new(
            self.width.unwrap_or(fallback.width),
            self.height.unwrap_or(fallback.height),
        )
    }

    /// Whether the board tracks terminal resizes.
    pub fn follows_terminal(&self) -> bool {
        self.width.is_none() || self.height.is_none()
    }
}
