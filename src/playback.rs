//! Play / pause / reset / stop lifecycle around the generation engine.
//!
//! Everything runs on the caller's thread. Autoplay is a deadline the caller
//! polls with [`PlaybackController::tick`]; one tick runs one full step, so
//! steps can be delayed but never overlap.

use crate::engine::{parse_start_set, replay, Bounds, Coord, Delta, Simulation, StartSet};
use crate::error::{PlaybackError, StartSetError};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Autoplay interval used unless configured otherwise.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1000);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    /// Generation 0, empty board, no timer.
    #[default]
    Reset,
    /// Timer armed, stepping every interval.
    Playing,
    /// Timer cancelled; board and generation kept.
    Paused,
    /// Pattern is extinct or static.
    Stopped,
}

impl PlaybackState {
    pub fn label(&self) -> &'static str {
        match self {
            PlaybackState::Reset => "reset",
            PlaybackState::Playing => "playing",
            PlaybackState::Paused => "paused",
            PlaybackState::Stopped => "stopped",
        }
    }
}

/// Receives everything the engine publishes. All methods default to no-ops.
pub trait LifeObserver {
    fn on_generation_changed(&mut self, _generation: u64) {}
    fn on_delta(&mut self, _turned_on: &[Coord], _turned_off: &[Coord]) {}
    fn on_play(&mut self) {}
    fn on_pause(&mut self) {}
    fn on_reset(&mut self) {}
    fn on_stop(&mut self) {}
    fn on_start_set_validation(&mut self, _result: Result<Option<&StartSet>, &StartSetError>) {}
}

impl LifeObserver for () {}

impl<O: LifeObserver + ?Sized> LifeObserver for &mut O {
    fn on_generation_changed(&mut self, generation: u64) {
        (**self).on_generation_changed(generation)
    }
    fn on_delta(&mut self, turned_on: &[Coord], turned_off: &[Coord]) {
        (**self).on_delta(turned_on, turned_off)
    }
    fn on_play(&mut self) {
        (**self).on_play()
    }
    fn on_pause(&mut self) {
        (**self).on_pause()
    }
    fn on_reset(&mut self) {
        (**self).on_reset()
    }
    fn on_stop(&mut self) {
        (**self).on_stop()
    }
    fn on_start_set_validation(&mut self, result: Result<Option<&StartSet>, &StartSetError>) {
        (**self).on_start_set_validation(result)
    }
}

/// A published notification, as plain data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LifeEvent {
    Generation { generation: u64 },
    Delta { turned_on: Vec<Coord>, turned_off: Vec<Coord> },
    Play,
    Pause,
    Reset,
    Stop,
    StartSetAccepted { cells: Option<StartSet> },
    StartSetRejected { error: String },
}

/// Records every event in order.
impl LifeObserver for Vec<LifeEvent> {
    fn on_generation_changed(&mut self, generation: u64) {
        self.push(LifeEvent::Generation { generation });
    }
    fn on_delta(&mut self, turned_on: &[Coord], turned_off: &[Coord]) {
        self.push(LifeEvent::Delta {
            turned_on: turned_on.to_vec(),
            turned_off: turned_off.to_vec(),
        });
    }
    fn on_play(&mut self) {
        self.push(LifeEvent::Play);
    }
    fn on_pause(&mut self) {
        self.push(LifeEvent::Pause);
    }
    fn on_reset(&mut self) {
        self.push(LifeEvent::Reset);
    }
    fn on_stop(&mut self) {
        self.push(LifeEvent::Stop);
    }
    fn on_start_set_validation(&mut self, result: Result<Option<&StartSet>, &StartSetError>) {
        self.push(match result {
            Ok(cells) => LifeEvent::StartSetAccepted { cells: cells.cloned() },
            Err(e) => LifeEvent::StartSetRejected { error: e.to_string() },
        });
    }
}

pub struct PlaybackController<O: LifeObserver> {
    sim: Simulation,
    observer: O,
    state: PlaybackState,
    in_progress: bool,
    interval: Duration,
    next_tick: Option<Instant>,
}

impl<O: LifeObserver> PlaybackController<O> {
    pub fn new(bounds: Bounds, observer: O) -> Self {
        Self {
            sim: Simulation::new(bounds),
            observer,
            state: PlaybackState::Reset,
            in_progress: false,
            interval: DEFAULT_INTERVAL,
            next_tick: None,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn generation(&self) -> u64 {
        self.sim.generation()
    }

    pub fn bounds(&self) -> Bounds {
        self.sim.bounds()
    }

    pub fn is_in_progress(&self) -> bool {
        self.in_progress
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Takes effect from the next tick.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// When the next autoplay step is due, if playing.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.next_tick
    }

    /// Change the board size. Always resets playback first.
    pub fn set_dimensions(&mut self, width: u32, height: u32) {
        self.reset();
        let bounds = Bounds::new(width, height);
        if let Err(e) = self.sim.resize(bounds) {
            self.observer.on_start_set_validation(Err(&e));
        }
        info!(%bounds, "dimensions changed");
    }

    /// Validate and store raw start-set text. On rejection nothing changes.
    pub fn set_start_set(&mut self, raw: &str) -> Result<(), StartSetError> {
        let parsed = parse_start_set(raw, self.sim.bounds());
        self.accept_start_set(parsed)
    }

    /// Validate and store already-typed coordinates.
    pub fn set_start_cells<I>(&mut self, coords: I) -> Result<(), StartSetError>
    where
        I: IntoIterator<Item = Coord>,
    {
        let parsed = StartSet::from_coords(coords, self.sim.bounds()).map(Some);
        self.accept_start_set(parsed)
    }

    fn accept_start_set(
        &mut self,
        parsed: Result<Option<StartSet>, StartSetError>,
    ) -> Result<(), StartSetError> {
        match parsed {
            Ok(start) => {
                self.sim.set_start_set(start);
                self.observer.on_start_set_validation(Ok(self.sim.start_set()));
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "start set rejected");
                self.observer.on_start_set_validation(Err(&e));
                Err(e)
            }
        }
    }

    /// Start autoplay, or resume it when a session is already in progress.
    pub fn play(&mut self) -> Result<(), PlaybackError> {
        if self.state == PlaybackState::Playing {
            return Ok(());
        }
        if !self.in_progress {
            self.begin_session()?;
            let delta = self.sim.reseed();
            self.observer.on_generation_changed(0);
            self.publish(&delta);
        }
        self.state = PlaybackState::Playing;
        self.next_tick = Some(Instant::now() + self.interval);
        info!(generation = self.sim.generation(), "playing");
        self.observer.on_play();
        Ok(())
    }

    pub fn pause(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }
        self.next_tick = None;
        self.state = PlaybackState::Paused;
        info!(generation = self.sim.generation(), "paused");
        self.observer.on_pause();
    }

    /// Cancel any timer, switch every cell off and return to generation 0.
    pub fn reset(&mut self) {
        self.next_tick = None;
        self.in_progress = false;
        let delta = self.sim.clear();
        if !delta.is_empty() {
            self.publish(&delta);
        }
        self.state = PlaybackState::Reset;
        info!("reset");
        self.observer.on_generation_changed(0);
        self.observer.on_reset();
    }

    /// Jump to generation `target` and leave the board paused there, or
    /// stopped if the replay found the pattern extinct or static.
    pub fn set_target_generation(&mut self, target: u64) -> Result<(), PlaybackError> {
        if !self.in_progress {
            self.begin_session()?;
        }
        self.next_tick = None;

        let jump = replay::generation_delta(&mut self.sim, target);
        self.observer.on_generation_changed(self.sim.generation());
        self.publish(&jump.delta);

        if jump.settled || self.sim.active().is_empty() {
            self.stop();
        } else {
            self.state = PlaybackState::Paused;
            info!(generation = target, "jumped");
            self.observer.on_pause();
        }
        Ok(())
    }

    /// Run the autoplay step if it is due at `now`. Returns whether a step ran.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.next_tick {
            Some(deadline) if self.state == PlaybackState::Playing && now >= deadline => {}
            _ => return false,
        }
        if self.advance() {
            self.next_tick = Some(now + self.interval);
        }
        true
    }

    /// Single manual step while paused.
    pub fn step_once(&mut self) -> bool {
        if self.state != PlaybackState::Paused {
            return false;
        }
        self.advance();
        true
    }

    /// One published step. Returns false if the pattern stopped.
    fn advance(&mut self) -> bool {
        let delta = self.sim.step();
        self.observer.on_generation_changed(self.sim.generation());
        self.publish(&delta);
        if delta.is_empty() || self.sim.active().is_empty() {
            self.stop();
            return false;
        }
        true
    }

    fn stop(&mut self) {
        self.next_tick = None;
        self.in_progress = false;
        self.state = PlaybackState::Stopped;
        info!(generation = self.sim.generation(), "stopped");
        self.observer.on_stop();
    }

    fn begin_session(&mut self) -> Result<(), PlaybackError> {
        if !self.sim.has_start_set() {
            return Err(PlaybackError::NoStartSet);
        }
        self.in_progress = true;
        Ok(())
    }

    fn publish(&mut self, delta: &Delta) {
        let coords = delta.to_coords(self.sim.registry());
        self.observer.on_delta(&coords.turned_on, &coords.turned_off);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(raw: &str) -> PlaybackController<Vec<LifeEvent>> {
        let mut pc = PlaybackController::new(Bounds::new(10, 10), Vec::new());
        pc.set_start_set(raw).unwrap();
        pc.observer_mut().clear();
        pc
    }

    fn later(pc: &PlaybackController<Vec<LifeEvent>>) -> Instant {
        pc.next_deadline().unwrap() + Duration::from_millis(1)
    }

    #[test]
    fn play_without_start_set_is_refused() {
        let mut pc = PlaybackController::new(Bounds::new(5, 5), Vec::new());
        assert_eq!(pc.play(), Err(PlaybackError::NoStartSet));
        assert_eq!(pc.state(), PlaybackState::Reset);
        assert!(pc.observer().is_empty());

        pc.set_start_set("[]").unwrap();
        assert_eq!(pc.play(), Err(PlaybackError::NoStartSet));
    }

    #[test]
    fn play_seeds_and_arms_timer() {
        let mut pc = controller("[[1,1],[2,1],[3,1]]");
        pc.play().unwrap();
        assert_eq!(pc.state(), PlaybackState::Playing);
        assert!(pc.next_deadline().is_some());
        let events = pc.observer();
        assert_eq!(events[0], LifeEvent::Generation { generation: 0 });
        match &events[1] {
            LifeEvent::Delta { turned_on, turned_off } => {
                assert_eq!(turned_on.len(), 3);
                assert!(turned_off.is_empty());
            }
            other => panic!("expected delta, got {other:?}"),
        }
        assert_eq!(events[2], LifeEvent::Play);
    }

    #[test]
    fn tick_before_deadline_does_nothing() {
        let mut pc = controller("[[1,1],[2,1],[3,1]]");
        pc.play().unwrap();
        let deadline = pc.next_deadline().unwrap();
        assert!(!pc.tick(deadline - Duration::from_millis(1)));
        assert_eq!(pc.generation(), 0);
        assert!(pc.tick(deadline));
        assert_eq!(pc.generation(), 1);
    }

    #[test]
    fn pause_and_resume_keep_the_board() {
        let mut pc = controller("[[1,1],[2,1],[3,1]]");
        pc.play().unwrap();
        pc.tick(later(&pc));
        pc.pause();
        assert_eq!(pc.state(), PlaybackState::Paused);
        assert!(pc.next_deadline().is_none());
        assert!(!pc.tick(Instant::now() + Duration::from_secs(60)));

        let before = pc.simulation().active_coords();
        pc.observer_mut().clear();
        pc.play().unwrap();
        assert_eq!(pc.generation(), 1);
        assert_eq!(pc.simulation().active_coords(), before);
        assert_eq!(pc.observer().as_slice(), &[LifeEvent::Play]);
    }

    #[test]
    fn static_pattern_stops_on_first_tick() {
        let mut pc = controller("[[2,2],[3,2],[2,3],[3,3]]");
        pc.play().unwrap();
        assert!(pc.tick(later(&pc)));
        assert_eq!(pc.state(), PlaybackState::Stopped);
        assert!(!pc.is_in_progress());
        assert_eq!(pc.observer().last(), Some(&LifeEvent::Stop));
    }

    #[test]
    fn reset_turns_everything_off() {
        let mut pc = controller("[[1,1],[2,1],[3,1]]");
        pc.play().unwrap();
        pc.observer_mut().clear();
        pc.reset();
        assert_eq!(pc.state(), PlaybackState::Reset);
        assert!(pc.simulation().active().is_empty());
        assert_eq!(
            pc.observer().as_slice(),
            &[
                LifeEvent::Delta {
                    turned_on: vec![],
                    turned_off: vec![Coord::new(1, 1), Coord::new(2, 1), Coord::new(3, 1)],
                },
                LifeEvent::Generation { generation: 0 },
                LifeEvent::Reset,
            ]
        );
    }

    #[test]
    fn target_generation_pauses_without_timer() {
        let mut pc = controller("[[1,1],[2,1],[3,1]]");
        pc.set_target_generation(3).unwrap();
        assert_eq!(pc.state(), PlaybackState::Paused);
        assert_eq!(pc.generation(), 3);
        assert!(pc.next_deadline().is_none());
        assert_eq!(
            pc.simulation().active_coords(),
            vec![Coord::new(2, 0), Coord::new(2, 1), Coord::new(2, 2)]
        );
        assert_eq!(pc.observer().last(), Some(&LifeEvent::Pause));
    }

    #[test]
    fn target_generation_while_playing_cancels_timer() {
        let mut pc = controller("[[1,1],[2,1],[3,1]]");
        pc.play().unwrap();
        pc.set_target_generation(1).unwrap();
        assert_eq!(pc.state(), PlaybackState::Paused);
        assert!(!pc.tick(Instant::now() + Duration::from_secs(60)));
        assert_eq!(pc.generation(), 1);
    }

    #[test]
    fn rejected_start_set_changes_nothing() {
        let mut pc = controller("[[1,1],[2,1],[3,1]]");
        pc.play().unwrap();
        let active = pc.simulation().active_coords();
        pc.observer_mut().clear();

        assert!(pc.set_start_set("[[1,1],").is_err());
        assert!(pc.set_start_set("[[10,0]]").is_err());
        assert_eq!(pc.simulation().active_coords(), active);
        assert_eq!(pc.simulation().start_set().map(StartSet::len), Some(3));
        assert!(matches!(pc.observer()[0], LifeEvent::StartSetRejected { .. }));
        assert!(matches!(pc.observer()[1], LifeEvent::StartSetRejected { .. }));
    }

    #[test]
    fn resize_resets_and_drops_unfit_start_set() {
        let mut pc = controller("[[8,8]]");
        pc.play().unwrap();
        pc.observer_mut().clear();
        pc.set_dimensions(5, 5);
        assert_eq!(pc.state(), PlaybackState::Reset);
        assert!(pc.simulation().start_set().is_none());
        assert!(matches!(
            pc.observer().last(),
            Some(LifeEvent::StartSetRejected { .. })
        ));
    }

    #[test]
    fn manual_step_only_when_paused() {
        let mut pc = controller("[[1,1],[2,1],[3,1]]");
        assert!(!pc.step_once());
        pc.set_target_generation(1).unwrap();
        assert!(pc.step_once());
        assert_eq!(pc.generation(), 2);
    }

    #[test]
    fn repeated_jump_keeps_session() {
        let mut pc = controller("[[1,1],[2,1],[3,1]]");
        pc.set_target_generation(5).unwrap();
        pc.set_target_generation(5).unwrap();
        assert_eq!(pc.state(), PlaybackState::Paused);
        assert!(pc.is_in_progress());

        pc.play().unwrap();
        assert_eq!(pc.generation(), 5);
    }

    #[test]
    fn jump_onto_still_life_stops() {
        let mut pc = controller("[[2,2],[3,2],[2,3],[3,3]]");
        pc.set_target_generation(4).unwrap();
        assert_eq!(pc.state(), PlaybackState::Stopped);
        assert_eq!(pc.generation(), 4);
    }

    #[test]
    fn play_after_stop_restarts_session() {
        let mut pc = controller("[[4,4]]");
        pc.set_target_generation(1).unwrap();
        assert_eq!(pc.state(), PlaybackState::Stopped);
        pc.play().unwrap();
        assert_eq!(pc.generation(), 0);
        assert_eq!(pc.simulation().active_coords(), vec![Coord::new(4, 4)]);
    }
}
