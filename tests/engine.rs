//! End-to-end behavior of the engine through the playback controller.

use std::collections::HashSet;
use std::time::{Duration, Instant};
use termlife::engine::{CellRegistry, Coord};
use termlife::{Bounds, LifeEvent, PlaybackController, PlaybackState};

const LINE: &str = "[[0,9],[1,9],[2,9],[3,9],[4,9],[5,9],[6,9],[7,9],[8,9],[9,9]]";
// Boards after N steps from the start set (generation N).
const GEN1: &str = "[[1,8],[2,8],[3,8],[4,8],[5,8],[6,8],[7,8],[8,8],[1,9],[2,9],[3,9],[4,9],[5,9],[6,9],[7,9],[8,9]]";
const GEN2: &str = "[[1,8],[1,9],[2,7],[3,7],[4,7],[5,7],[6,7],[7,7],[8,8],[8,9]]";
const GEN3: &str = "[[1,8],[2,7],[3,6],[3,7],[3,8],[4,6],[4,7],[4,8],[5,6],[5,7],[5,8],[6,6],[6,7],[6,8],[7,7],[8,8]]";
const GEN4: &str = "[[2,6],[4,5],[4,9],[5,5],[5,9],[7,6]]";

fn coords(json: &str) -> HashSet<Coord> {
    serde_json::from_str::<Vec<Coord>>(json).unwrap().into_iter().collect()
}

fn active(pc: &PlaybackController<Vec<LifeEvent>>) -> HashSet<Coord> {
    pc.simulation().active_coords().into_iter().collect()
}

fn line_controller() -> PlaybackController<Vec<LifeEvent>> {
    let mut pc = PlaybackController::new(Bounds::new(10, 10), Vec::new());
    pc.set_start_set(LINE).unwrap();
    pc
}

fn tick(pc: &mut PlaybackController<Vec<LifeEvent>>) {
    let due = pc.next_deadline().expect("timer armed") + Duration::from_millis(1);
    assert!(pc.tick(due));
}

#[test]
fn autoplay_runs_the_line_to_extinction() {
    let mut pc = line_controller();
    pc.play().unwrap();
    assert_eq!(active(&pc), coords(LINE));

    tick(&mut pc);
    assert_eq!(active(&pc), coords(GEN1));

    tick(&mut pc);
    assert_eq!(active(&pc), coords(GEN2));
    tick(&mut pc);
    assert_eq!(active(&pc), coords(GEN3));
    tick(&mut pc);
    assert_eq!(pc.generation(), 4);
    assert_eq!(active(&pc), coords(GEN4));
    assert_eq!(pc.state(), PlaybackState::Playing);

    tick(&mut pc);
    assert_eq!(pc.generation(), 5);
    assert!(active(&pc).is_empty());
    assert_eq!(pc.state(), PlaybackState::Stopped);
    assert!(pc.next_deadline().is_none());
    assert_eq!(pc.observer().last(), Some(&LifeEvent::Stop));
}

#[test]
fn jumps_match_stepped_generations() {
    let mut pc = line_controller();

    pc.set_target_generation(2).unwrap();
    assert_eq!(pc.generation(), 2);
    assert_eq!(active(&pc), coords(GEN2));
    assert_eq!(pc.state(), PlaybackState::Paused);

    pc.set_target_generation(3).unwrap();
    assert_eq!(active(&pc), coords(GEN3));

    pc.set_target_generation(4).unwrap();
    assert_eq!(active(&pc), coords(GEN4));
    assert_eq!(pc.state(), PlaybackState::Paused);

    pc.set_target_generation(5).unwrap();
    assert!(active(&pc).is_empty());
    assert_eq!(pc.state(), PlaybackState::Stopped);
}

#[test]
fn jump_publishes_one_minimal_delta() {
    let mut pc = line_controller();
    pc.set_target_generation(3).unwrap();
    pc.observer_mut().clear();

    pc.set_target_generation(4).unwrap();
    let deltas: Vec<_> = pc
        .observer()
        .iter()
        .filter_map(|e| match e {
            LifeEvent::Delta { turned_on, turned_off } => Some((turned_on.clone(), turned_off.clone())),
            _ => None,
        })
        .collect();
    assert_eq!(deltas.len(), 1);

    let (on, off) = &deltas[0];
    let on: HashSet<Coord> = on.iter().copied().collect();
    let off: HashSet<Coord> = off.iter().copied().collect();
    let before = coords(GEN3);
    let after = coords(GEN4);
    assert_eq!(on, after.difference(&before).copied().collect());
    assert_eq!(off, before.difference(&after).copied().collect());
    assert!(on.is_disjoint(&off));
}

#[test]
fn jump_to_zero_after_seeding_changes_nothing() {
    let mut pc = line_controller();
    pc.play().unwrap();
    pc.pause();
    pc.observer_mut().clear();

    pc.set_target_generation(0).unwrap();
    assert!(pc.observer().contains(&LifeEvent::Delta { turned_on: vec![], turned_off: vec![] }));
    assert_eq!(active(&pc), coords(LINE));
    assert_eq!(pc.state(), PlaybackState::Paused);
    assert!(pc.is_in_progress());
}

#[test]
fn jumping_to_the_shown_generation_keeps_position() {
    let mut pc = PlaybackController::new(Bounds::new(20, 20), Vec::new());
    pc.set_start_set("[[2,1],[3,2],[1,3],[2,3],[3,3]]").unwrap();

    pc.set_target_generation(8).unwrap();
    assert_eq!(pc.state(), PlaybackState::Paused);
    pc.set_target_generation(8).unwrap();
    assert_eq!(pc.state(), PlaybackState::Paused);
    assert_eq!(pc.generation(), 8);
    assert_eq!(active(&pc), coords("[[4,3],[5,4],[3,5],[4,5],[5,5]]"));

    pc.play().unwrap();
    assert_eq!(pc.state(), PlaybackState::Playing);
    assert_eq!(pc.generation(), 8);
    tick(&mut pc);
    assert_eq!(pc.generation(), 9);
}

#[test]
fn replay_is_deterministic() {
    let mut first = line_controller();
    first.set_target_generation(3).unwrap();
    let mut second = line_controller();
    second.set_target_generation(3).unwrap();
    assert_eq!(active(&first), active(&second));

    first.set_target_generation(3).unwrap();
    assert_eq!(active(&first), active(&second));
}

#[test]
fn steps_never_report_a_cell_twice() {
    let mut pc = PlaybackController::new(Bounds::new(16, 16), Vec::new());
    pc.set_start_set("[[7,6],[8,6],[6,7],[7,7],[7,8]]").unwrap();
    pc.play().unwrap();
    for _ in 0..30 {
        if pc.state() != PlaybackState::Playing {
            break;
        }
        tick(&mut pc);
    }
    for event in pc.observer() {
        if let LifeEvent::Delta { turned_on, turned_off } = event {
            let on: HashSet<_> = turned_on.iter().collect();
            let off: HashSet<_> = turned_off.iter().collect();
            assert_eq!(on.len(), turned_on.len());
            assert_eq!(off.len(), turned_off.len());
            assert!(on.is_disjoint(&off));
        }
    }
}

#[test]
fn still_life_publishes_empty_delta_and_stops() {
    let mut pc = PlaybackController::new(Bounds::new(8, 8), Vec::new());
    // Beehive
    pc.set_start_set("[[2,1],[3,1],[1,2],[4,2],[2,3],[3,3]]").unwrap();
    pc.play().unwrap();
    pc.observer_mut().clear();
    tick(&mut pc);
    assert_eq!(
        pc.observer().as_slice(),
        &[
            LifeEvent::Generation { generation: 1 },
            LifeEvent::Delta { turned_on: vec![], turned_off: vec![] },
            LifeEvent::Stop,
        ]
    );
}

#[test]
fn growing_one_dimension_keeps_cell_identity() {
    let mut registry = CellRegistry::with_bounds(Bounds::new(10, 10));
    let before: Vec<_> = (0..10)
        .flat_map(|x| (0..10).map(move |y| Coord::new(x, y)))
        .map(|c| (c, registry.id_of(c).unwrap()))
        .collect();

    registry.resize(Bounds::new(25, 10));
    for (c, id) in &before {
        assert_eq!(registry.id_of(*c), Some(*id));
        assert_eq!(registry.coord(*id), *c);
    }
    assert_eq!(registry.len(), 250);
}

#[test]
fn invalid_start_set_leaves_session_alone() {
    let mut pc = line_controller();
    pc.set_target_generation(2).unwrap();
    let board = active(&pc);
    pc.observer_mut().clear();

    assert!(pc.set_start_set("[[0,9], [1,9").is_err());
    assert_eq!(active(&pc), board);
    assert_eq!(pc.simulation().start_set().map(|s| s.len()), Some(10));
    assert!(matches!(pc.observer().as_slice(), [LifeEvent::StartSetRejected { .. }]));

    // The stored start set still drives the next jump.
    pc.set_target_generation(1).unwrap();
    assert_eq!(active(&pc), coords(GEN1));
}

#[test]
fn resize_mid_play_resets() {
    let mut pc = line_controller();
    pc.play().unwrap();
    tick(&mut pc);
    pc.set_dimensions(20, 10);
    assert_eq!(pc.state(), PlaybackState::Reset);
    assert_eq!(pc.generation(), 0);
    assert!(active(&pc).is_empty());
    assert!(!pc.tick(Instant::now() + Duration::from_secs(60)));

    // Start set still fits, so a new session can begin on the wider board.
    pc.play().unwrap();
    assert_eq!(active(&pc), coords(LINE));
}
