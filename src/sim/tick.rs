//! Per-frame simulation step
//!
//! One call per displayed frame. Pointer events the host collected since
//! the previous frame come in through [`TickInput`]; everything runs on one
//! logical thread, so the only removal hazard is the boundary check and a
//! same-frame click asking for the same target, which the population's
//! idempotent remove absorbs.

use glam::Vec2;

use super::state::{GameEvent, GamePhase, SessionState};

/// Pointer input gathered since the previous tick, in drawing-surface
/// coordinates (the front end translates by the canvas origin).
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer-down positions, one per click, in arrival order
    pub pointer_downs: Vec<Vec2>,
    /// Latest pointer-move position (circle-variant readout)
    pub pointer_move: Option<Vec2>,
}

/// Advance the session by one tick
pub fn tick(state: &mut SessionState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Terminal state halts everything; the session must be rebuilt to play
    // again.
    if state.phase == GamePhase::GameOver {
        return events;
    }

    state.ticks += 1;

    // Aging runs before dispatch: an explosion spawned by this tick's
    // clicks must still be at frame 0 when the frame is drawn.
    for explosion in state.population.explosions_mut() {
        explosion.frame += 1;
    }
    state.population.retire_finished_explosions();

    if let Some(point) = input.pointer_move {
        state.last_pointer = Some(point);
    }
    for &point in &input.pointer_downs {
        pointer_down(state, point, &mut events);
    }

    advance_targets(state, &mut events);

    events
}

/// Hit-test a click against the live targets. At most one target pops per
/// click, the first in creation order, even when discs overlap.
fn pointer_down(state: &mut SessionState, point: Vec2, events: &mut Vec<GameEvent>) {
    let hit = state
        .population
        .hit_test(point)
        .map(|t| (t.id, t.pos, t.radius));
    let Some((id, pos, radius)) = hit else {
        // Misses (including coordinates outside the surface) are not errors
        return;
    };

    if state.population.remove_target(id) {
        state.score += 1;
        events.push(GameEvent::TargetPopped { id });
        if state.mode.explosions {
            state
                .population
                .push_explosion(pos, radius, state.tuning.explosion_frames);
        }
    }

    if state.population.is_empty() {
        next_batch(state, events);
    }
}

/// Escape check, wall bounce, then straight-line motion, per target
fn advance_targets(state: &mut SessionState, events: &mut Vec<GameEvent>) {
    let bounds = state.bounds;
    let mut escaped = Vec::new();

    for t in state.population.targets_mut() {
        if t.pos.y - t.radius < 0.0 {
            escaped.push(t.id);
            continue;
        }
        if t.pos.x + t.radius > bounds.x || t.pos.x - t.radius < 0.0 {
            t.vel.x = -t.vel.x;
        }
        t.pos += t.vel;
    }

    for id in escaped {
        if !state.population.remove_target(id) {
            continue;
        }
        events.push(GameEvent::TargetEscaped { id });

        if state.mode.game_over_on_escape && state.phase == GamePhase::Running {
            state.phase = GamePhase::GameOver;
            events.push(GameEvent::GameOver { score: state.score });
            log::info!("game over at score {} (level {})", state.score, state.level);
        }
    }
}

/// The batch was cleared by clicks: advance the level (alien variant) and
/// refill the population.
fn next_batch(state: &mut SessionState, events: &mut Vec<GameEvent>) {
    if state.mode.level_progression {
        state.level += 1;
        state.batch_size += 1;
        events.push(GameEvent::LevelCleared { level: state.level });
        log::info!(
            "level {} reached, next batch holds {} targets",
            state.level,
            state.batch_size
        );
    }

    let outcome = state.population.spawn_batch(
        state.batch_size,
        state.level,
        state.bounds,
        &state.tuning,
        &mut state.rng,
    );
    if outcome.starved() {
        events.push(GameEvent::SpawnStarved {
            requested: outcome.requested,
            spawned: outcome.spawned,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance;
    use crate::sim::state::GameMode;
    use crate::tuning::Tuning;

    const BOUNDS: Vec2 = Vec2::new(1600.0, 1000.0);

    fn session(mode: GameMode) -> SessionState {
        SessionState::new(mode, Tuning::default(), BOUNDS, 7, 0)
    }

    fn click(point: Vec2) -> TickInput {
        TickInput {
            pointer_downs: vec![point],
            ..Default::default()
        }
    }

    fn first_target_pos(state: &SessionState) -> Vec2 {
        state.population.targets()[0].pos
    }

    #[test]
    fn test_targets_drift_upward_by_exactly_their_speed() {
        let mut state = session(GameMode::aliens());
        let before: Vec<(u32, f32, f32)> = state
            .population
            .targets()
            .iter()
            .map(|t| (t.id, t.pos.y, t.vel.y))
            .collect();

        tick(&mut state, &TickInput::default());

        for (id, y, vy) in before {
            let t = state
                .population
                .targets()
                .iter()
                .find(|t| t.id == id)
                .expect("no target escapes from the bottom edge");
            assert!((t.pos.y - (y + vy)).abs() < 1e-4);
            assert!(t.vel.y < 0.0);
        }
    }

    #[test]
    fn test_wall_overflow_flips_horizontal_velocity() {
        let mut state = session(GameMode::aliens());
        let id = {
            let t = state.population.targets_mut().next().unwrap();
            t.vel.x = 3.0;
            t.pos.x = BOUNDS.x - t.radius + 1.0;
            t.pos.y = 500.0;
            t.id
        };

        tick(&mut state, &TickInput::default());

        let t = state
            .population
            .targets()
            .iter()
            .find(|t| t.id == id)
            .unwrap();
        assert_eq!(t.vel.x, -3.0);
    }

    #[test]
    fn test_click_pops_at_most_one_target() {
        let mut state = session(GameMode::aliens());
        let shared = Vec2::new(300.0, 300.0);
        for t in state.population.targets_mut().take(2) {
            t.pos = shared;
        }
        let count = state.population.target_count();
        let first_id = state.population.targets()[0].id;

        let events = tick(&mut state, &click(shared));

        assert_eq!(state.score, 1);
        assert_eq!(state.population.target_count(), count - 1);
        assert!(events.contains(&GameEvent::TargetPopped { id: first_id }));
        assert_eq!(state.population.explosion_count(), 1);
    }

    #[test]
    fn test_click_outside_all_targets_is_a_noop() {
        let mut state = session(GameMode::aliens());
        let count = state.population.target_count();

        let events = tick(&mut state, &click(Vec2::new(-50.0, -50.0)));

        assert_eq!(state.score, 0);
        assert_eq!(state.population.target_count(), count);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::TargetPopped { .. })));
    }

    #[test]
    fn test_clearing_a_batch_advances_the_level() {
        let mut state = session(GameMode::aliens());
        let initial_batch = state.batch_size;

        let mut popped = 0;
        while popped < initial_batch {
            let target = first_target_pos(&state);
            let events = tick(&mut state, &click(target));
            popped += events
                .iter()
                .filter(|e| matches!(e, GameEvent::TargetPopped { .. }))
                .count() as u32;
            assert_eq!(state.phase, GamePhase::Running);
        }

        assert_eq!(state.level, 2);
        assert_eq!(state.batch_size, initial_batch + 1);
        assert_eq!(state.population.target_count() as u32, initial_batch + 1);

        let targets = state.population.targets();
        for (i, a) in targets.iter().enumerate() {
            for b in &targets[i + 1..] {
                assert!(distance(a.pos, b.pos) >= a.radius + b.radius);
            }
        }
    }

    #[test]
    fn test_circle_mode_refills_without_level_advance() {
        let mut state = session(GameMode::circles());
        let batch = state.batch_size;

        let mut popped = 0;
        while popped < batch {
            let target = first_target_pos(&state);
            let events = tick(&mut state, &click(target));
            popped += events
                .iter()
                .filter(|e| matches!(e, GameEvent::TargetPopped { .. }))
                .count() as u32;
            assert!(!events.iter().any(|e| matches!(e, GameEvent::LevelCleared { .. })));
        }

        assert_eq!(state.level, 1);
        assert_eq!(state.batch_size, batch);
        assert_eq!(state.population.target_count() as u32, batch);
        assert_eq!(state.score, batch as u64);
    }

    #[test]
    fn test_escape_fires_game_over_exactly_once() {
        let mut state = session(GameMode::aliens());
        // Two targets breach the top on the same tick
        for t in state.population.targets_mut().take(2) {
            t.pos.y = t.radius - 1.0;
        }
        state.score = 7;

        let events = tick(&mut state, &TickInput::default());
        let game_overs = events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
        assert!(events.contains(&GameEvent::GameOver { score: 7 }));
        assert_eq!(state.phase, GamePhase::GameOver);

        // Terminal state is inert
        let ticks = state.ticks;
        let target = first_target_pos(&state);
        let events = tick(&mut state, &click(target));
        assert!(events.is_empty());
        assert_eq!(state.ticks, ticks);
    }

    #[test]
    fn test_circle_mode_escape_is_silent_removal() {
        let mut state = session(GameMode::circles());
        let count = state.population.target_count();
        {
            let t = state.population.targets_mut().next().unwrap();
            t.pos.y = t.radius - 1.0;
        }

        let events = tick(&mut state, &TickInput::default());

        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.population.target_count(), count - 1);
        assert!(events.iter().any(|e| matches!(e, GameEvent::TargetEscaped { .. })));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })));
    }

    #[test]
    fn test_explosion_shows_every_frame_of_the_strip() {
        let mut state = session(GameMode::aliens());
        let max_frame = state.tuning.explosion_frames;

        // The creation tick leaves the explosion at frame 0 for drawing
        let target = first_target_pos(&state);
        tick(&mut state, &click(target));
        assert_eq!(state.population.explosion_count(), 1);
        assert_eq!(state.population.explosions()[0].frame, 0);

        // Frames 1 through max_frame - 1 on the following ticks
        for _ in 0..max_frame - 1 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.population.explosion_count(), 1);
        assert_eq!(state.population.explosions()[0].frame, max_frame - 1);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.population.explosion_count(), 0);
    }

    #[test]
    fn test_every_click_in_a_tick_is_dispatched() {
        let mut state = session(GameMode::aliens());
        let a = Vec2::new(200.0, 300.0);
        let b = Vec2::new(900.0, 300.0);
        {
            let mut targets = state.population.targets_mut();
            targets.next().unwrap().pos = a;
            targets.next().unwrap().pos = b;
        }

        let input = TickInput {
            pointer_downs: vec![a, b],
            ..Default::default()
        };
        let events = tick(&mut state, &input);

        assert_eq!(state.score, 2);
        let pops = events
            .iter()
            .filter(|e| matches!(e, GameEvent::TargetPopped { .. }))
            .count();
        assert_eq!(pops, 2);
    }

    #[test]
    fn test_pointer_move_records_readout_position() {
        let mut state = session(GameMode::circles());
        let input = TickInput {
            pointer_move: Some(Vec2::new(12.0, 34.0)),
            ..Default::default()
        };

        tick(&mut state, &input);
        assert_eq!(state.last_pointer, Some(Vec2::new(12.0, 34.0)));

        // Position sticks between moves
        tick(&mut state, &TickInput::default());
        assert_eq!(state.last_pointer, Some(Vec2::new(12.0, 34.0)));
    }

    #[test]
    fn test_starved_refill_reports_event() {
        let tight = Vec2::new(300.0, 4000.0);
        let mut state = SessionState::new(GameMode::circles(), Tuning::default(), tight, 3, 0);

        // Clear whatever fit; the refill on the same tight surface must cap
        // out rather than hang.
        while !state.population.is_empty() {
            let target = first_target_pos(&state);
            let events = tick(&mut state, &click(target));
            if events
                .iter()
                .any(|e| matches!(e, GameEvent::SpawnStarved { .. }))
            {
                return;
            }
        }
        panic!("expected a starved refill on a 300px-wide surface");
    }
}
