//! Fixed-order simulation step
//!
//! Advances one run by one step. The order inside a step is fixed for
//! determinism: scroll advance, vertical integration, hitbox computation,
//! then an obstacle scan in document order with first-match short-circuit
//! on lethal contact. Given the same input and delta sequences, a run
//! always produces the same outcome.

use crate::consts::*;
use crate::level::Mode;

use super::collision::{ContactEffect, Rect, player_hitbox, resolve_contact};
use super::state::{Engine, Outcome};

/// Input signals for a single step
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// The jump/flight signal: cube jumps from the ground while held, wave
    /// rises while held and dives while released
    pub hold: bool,
    /// Begin a fresh attempt; only honored once the run is over
    pub restart: bool,
}

/// Advance the engine by one step of at most [`MAX_STEP_DT`] seconds.
///
/// Larger deltas are clamped so a stalled frame cannot tunnel the player
/// through an obstacle. A zero-length step changes nothing.
pub fn tick(engine: &mut Engine, input: &TickInput, dt: f32) {
    if engine.run.outcome.is_terminal() {
        if input.restart {
            engine.restart();
        }
        return;
    }
    if dt <= 0.0 {
        return;
    }
    let dt = dt.min(MAX_STEP_DT);

    let Engine { level, player, run } = engine;

    // Mode and speed are sampled once per step; portal contacts during the
    // scan take effect from the next step on.
    let mode = run.mode;
    let speed = BASE_SPEED * run.speed_multiplier;
    run.offset_x += speed * dt;

    let prev_y = player.y;

    match mode {
        Mode::Cube => {
            if input.hold && player.on_ground {
                player.vy = JUMP_VELOCITY;
                player.on_ground = false;
            }
            player.vy += GRAVITY * dt;
            player.y += player.vy * dt;

            player.on_ground = false;
            if player.y + player.h >= GROUND_Y {
                player.y = GROUND_Y - player.h;
                player.vy = 0.0;
                player.on_ground = true;
                player.spin_speed = 0.0;
                player.rotation = 0.0;
            }

            // Airborne spin direction follows the sign of vy
            if !player.on_ground {
                player.spin_speed = if player.vy < 0.0 {
                    -CUBE_SPIN_RATE
                } else {
                    CUBE_SPIN_RATE
                };
                player.rotation += player.spin_speed * dt;
            }
        }
        Mode::Wave => {
            player.vy = if input.hold { WAVE_RISE_VY } else { WAVE_FALL_VY };
            player.y += player.vy * dt;
            if player.y < WAVE_TOP_MARGIN {
                player.y = WAVE_TOP_MARGIN;
            }
            if player.y + WAVE_HITBOX > GROUND_Y {
                player.y = GROUND_Y - WAVE_HITBOX;
            }

            player.tilt = player.vy * 0.01;
            player.rotation += player.tilt * dt;

            player.record_trail();
            player.fade_trail();
        }
    }

    let hitbox = player_hitbox(mode, player);

    let mut lethal = false;
    for ob in &level.obstacles {
        let rect = Rect::new(ob.x - run.offset_x, ob.y, ob.w, ob.h);
        if !hitbox.overlaps(&rect) {
            continue;
        }
        match resolve_contact(ob.kind, mode, player, prev_y, &rect) {
            ContactEffect::Lethal => {
                lethal = true;
                break;
            }
            ContactEffect::Land { y } => {
                player.y = y;
                player.vy = 0.0;
                player.on_ground = true;
                player.spin_speed = 0.0;
                player.rotation = 0.0;
            }
            ContactEffect::Hang { y } => {
                player.y = y;
                player.vy = 0.0;
            }
            ContactEffect::SwitchMode(next) => {
                run.mode = next;
                player.vy = 0.0;
                player.clear_trail();
            }
            ContactEffect::ResetSpeed => {
                run.speed_multiplier = 1.0;
            }
            ContactEffect::None => {}
        }
    }

    if lethal {
        // Death wins over completion when both land on the same step
        run.outcome = Outcome::Died;
        run.bank_best();
        log::debug!("died at offset {:.1}, score {}", run.offset_x, run.score.floor());
        return;
    }

    run.score += dt * speed / SCORE_DIVISOR;

    if run.offset_x > level.length + FINISH_MARGIN {
        run.outcome = Outcome::Completed;
        run.bank_best();
        log::debug!("level complete, score {}", run.score.floor());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::level::{LevelDocument, Obstacle, ObstacleKind};

    const DT: f32 = 1.0 / 120.0;

    fn level_with(obstacles: Vec<Obstacle>) -> LevelDocument {
        LevelDocument {
            length: 1000.0,
            obstacles,
            ..LevelDocument::default()
        }
    }

    fn run_until<F: Fn(&Engine) -> bool>(engine: &mut Engine, hold: bool, stop: F) {
        let input = TickInput {
            hold,
            ..Default::default()
        };
        for _ in 0..100_000 {
            tick(engine, &input, DT);
            if stop(engine) {
                return;
            }
        }
        panic!("run never reached the stop condition");
    }

    #[test]
    fn test_zero_step_is_a_noop() {
        let mut engine = Engine::new(LevelDocument::bundled());
        tick(&mut engine, &TickInput::default(), DT);
        let snapshot = engine.clone();
        tick(&mut engine, &TickInput::default(), 0.0);
        assert_eq!(engine, snapshot);
    }

    #[test]
    fn test_dt_is_clamped() {
        let mut engine = Engine::new(level_with(vec![]));
        tick(&mut engine, &TickInput::default(), 10.0);
        assert!((engine.run.offset_x - BASE_SPEED * MAX_STEP_DT).abs() < 1e-3);
    }

    #[test]
    fn test_grounded_idle_stays_grounded() {
        let mut engine = Engine::new(level_with(vec![]));
        tick(&mut engine, &TickInput::default(), DT);
        assert!(engine.player.on_ground);
        assert_eq!(engine.player.vy, 0.0);
        assert_eq!(engine.player.y, GROUND_Y - PLAYER_SIZE);
    }

    #[test]
    fn test_scroll_is_monotone_while_running() {
        let mut engine = Engine::new(level_with(vec![]));
        let mut last = 0.0;
        for _ in 0..600 {
            tick(&mut engine, &TickInput::default(), DT);
            assert!(engine.run.offset_x >= last);
            last = engine.run.offset_x;
        }
    }

    #[test]
    fn test_hold_jumps_from_ground() {
        let mut engine = Engine::new(level_with(vec![]));
        let input = TickInput {
            hold: true,
            ..Default::default()
        };
        tick(&mut engine, &input, DT);
        assert!(!engine.player.on_ground);
        assert!(engine.player.vy < 0.0);
        assert!(engine.player.y < GROUND_Y - PLAYER_SIZE);
        // Spin runs while airborne, rising half first
        assert!(engine.player.spin_speed < 0.0);
    }

    #[test]
    fn test_jump_arc_returns_to_ground() {
        let mut engine = Engine::new(level_with(vec![]));
        let input = TickInput {
            hold: true,
            ..Default::default()
        };
        tick(&mut engine, &input, DT);
        run_until(&mut engine, false, |e| e.player.on_ground);
        assert_eq!(engine.player.y, GROUND_Y - PLAYER_SIZE);
        assert_eq!(engine.player.rotation, 0.0);
    }

    #[test]
    fn test_empty_level_completes() {
        let mut engine = Engine::new(level_with(vec![]));
        run_until(&mut engine, false, |e| e.run.outcome.is_terminal());
        assert_eq!(engine.run.outcome, Outcome::Completed);
        assert!(engine.run.offset_x > 1000.0 + FINISH_MARGIN);
        assert!(engine.run.best > 0);
    }

    #[test]
    fn test_spike_kills_on_arrival() {
        // Spike at x=500: the scan is in screen space, so lethal overlap
        // starts on the first step where offset_x > 500 - SPAWN_X - PLAYER_SIZE
        let death_edge = 500.0 - SPAWN_X - PLAYER_SIZE;
        let mut engine = Engine::new(level_with(vec![Obstacle::new(
            ObstacleKind::Spike,
            500.0,
            GROUND_Y - 28.0,
        )]));
        loop {
            let before = engine.run.offset_x;
            tick(&mut engine, &TickInput::default(), DT);
            if engine.run.outcome == Outcome::Died {
                assert!(engine.run.offset_x > death_edge);
                assert!(before <= death_edge);
                break;
            }
            assert!(
                engine.run.offset_x <= death_edge,
                "scrolled past the spike alive"
            );
        }
    }

    #[test]
    fn test_death_beats_completion_same_step() {
        // The lethal overlap and the finish line share a threshold, so the
        // first step past it raises both conditions at once
        let length = 100.0;
        let spike_x = length + FINISH_MARGIN + SPAWN_X + PLAYER_SIZE;
        let mut engine = Engine::new(LevelDocument {
            length,
            obstacles: vec![Obstacle::new(
                ObstacleKind::Spike,
                spike_x,
                GROUND_Y - 28.0,
            )],
            ..LevelDocument::default()
        });
        run_until(&mut engine, false, |e| e.run.outcome.is_terminal());
        assert_eq!(engine.run.outcome, Outcome::Died);
    }

    #[test]
    fn test_score_stops_at_death() {
        let mut engine = Engine::new(level_with(vec![Obstacle::new(
            ObstacleKind::Spike,
            500.0,
            GROUND_Y - 28.0,
        )]));
        run_until(&mut engine, false, |e| e.run.outcome.is_terminal());
        assert_eq!(engine.run.outcome, Outcome::Died);
        let frozen = engine.run.score;
        tick(&mut engine, &TickInput::default(), DT);
        assert_eq!(engine.run.score, frozen);
        assert_eq!(engine.run.best, frozen.floor() as u64);
    }

    #[test]
    fn test_restart_after_death() {
        let mut engine = Engine::new(level_with(vec![Obstacle::new(
            ObstacleKind::Spike,
            500.0,
            GROUND_Y - 28.0,
        )]));
        run_until(&mut engine, false, |e| e.run.outcome.is_terminal());
        let best = engine.run.best;
        let input = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut engine, &input, DT);
        assert_eq!(engine.run.outcome, Outcome::Running);
        assert_eq!(engine.run.offset_x, 0.0);
        assert_eq!(engine.run.best, best);
        assert!(engine.player.on_ground);
    }

    #[test]
    fn test_wave_portal_switches_mode() {
        // Portal spanning the player's path at ground height
        let mut engine = Engine::new(level_with(vec![Obstacle::new(
            ObstacleKind::WavePortal,
            400.0,
            GROUND_Y - 40.0,
        )]));
        run_until(&mut engine, false, |e| e.run.mode == Mode::Wave);
        assert_eq!(engine.player.vy, 0.0);
        assert!(engine.run.outcome == Outcome::Running);
    }

    #[test]
    fn test_cube_portal_resets_wave_state() {
        let mut engine = Engine::new(LevelDocument {
            mode: Mode::Wave,
            length: 1000.0,
            obstacles: vec![Obstacle::new(
                ObstacleKind::CubePortal,
                400.0,
                GROUND_Y - 40.0,
            )],
            ..LevelDocument::default()
        });
        // Fly along the ground so the trail has content before the portal
        run_until(&mut engine, false, |e| e.run.mode == Mode::Cube);
        assert_eq!(engine.player.vy, 0.0);
        assert!(engine.player.trail.is_empty());
    }

    #[test]
    fn test_speed_portal_resets_multiplier() {
        let mut engine = Engine::new(level_with(vec![Obstacle::new(
            ObstacleKind::NormalSpeedPortal,
            400.0,
            GROUND_Y - 40.0,
        )]));
        engine.run.speed_multiplier = 2.0;
        run_until(&mut engine, false, |e| e.run.speed_multiplier == 1.0);
        assert_eq!(engine.run.outcome, Outcome::Running);
    }

    #[test]
    fn test_checkpoint_portal_is_inert() {
        let mut engine = Engine::new(level_with(vec![Obstacle::new(
            ObstacleKind::CheckpointPortal,
            400.0,
            GROUND_Y - 40.0,
        )]));
        run_until(&mut engine, false, |e| e.run.outcome.is_terminal());
        assert_eq!(engine.run.outcome, Outcome::Completed);
    }

    #[test]
    fn test_landing_on_block_while_falling() {
        // A long block under the spawn column; drop the player onto it
        let mut engine = Engine::new(level_with(vec![Obstacle {
            w: 800.0,
            ..Obstacle::new(ObstacleKind::Block, 0.0, GROUND_Y - 80.0)
        }]));
        engine.player.y = 200.0;
        engine.player.on_ground = false;
        run_until(&mut engine, false, |e| {
            e.player.on_ground || e.run.outcome.is_terminal()
        });
        assert_eq!(engine.run.outcome, Outcome::Running);
        assert_eq!(engine.player.y, GROUND_Y - 80.0 - PLAYER_SIZE);
        assert_eq!(engine.player.vy, 0.0);
        // Standing on a block is stable across further steps
        tick(&mut engine, &TickInput::default(), DT);
        assert_eq!(engine.player.y, GROUND_Y - 80.0 - PLAYER_SIZE);
    }

    #[test]
    fn test_hanging_below_block_kills_ascent() {
        // A long ceiling block crossing the jump arc
        let ceiling_y = GROUND_Y - 110.0;
        let mut engine = Engine::new(level_with(vec![Obstacle {
            w: 800.0,
            ..Obstacle::new(ObstacleKind::Block, 0.0, ceiling_y)
        }]));
        let input = TickInput {
            hold: true,
            ..Default::default()
        };
        tick(&mut engine, &input, DT);
        run_until(&mut engine, false, |e| e.player.vy == 0.0);
        assert_eq!(engine.run.outcome, Outcome::Running);
        assert_eq!(engine.player.y, ceiling_y + 18.0);
        assert!(!engine.player.on_ground);
    }

    #[test]
    fn test_block_side_hit_kills() {
        // A wall-height block straight ahead at ground level
        let mut engine = Engine::new(level_with(vec![Obstacle {
            h: 60.0,
            ..Obstacle::new(ObstacleKind::Block, 400.0, GROUND_Y - 60.0)
        }]));
        run_until(&mut engine, false, |e| e.run.outcome.is_terminal());
        assert_eq!(engine.run.outcome, Outcome::Died);
    }

    #[test]
    fn test_wave_stays_in_bounds_while_toggling() {
        let mut engine = Engine::new(LevelDocument {
            mode: Mode::Wave,
            length: 2000.0,
            ..LevelDocument::default()
        });
        // Toggle hold every 0.2 s for 5 s of simulated time
        let steps = (5.0 / DT) as usize;
        let toggle = (0.2 / DT) as usize;
        for i in 0..steps {
            let hold = (i / toggle) % 2 == 0;
            engine.step(DT, hold);
            let y = engine.player.y;
            assert!(
                (WAVE_TOP_MARGIN..=GROUND_Y - WAVE_HITBOX).contains(&y),
                "wave left the corridor at step {i}: y={y}"
            );
        }
    }

    #[test]
    fn test_bundled_level_first_spike_is_fatal_without_input() {
        let mut engine = Engine::new(LevelDocument::bundled());
        run_until(&mut engine, false, |e| e.run.outcome.is_terminal());
        assert_eq!(engine.run.outcome, Outcome::Died);
        // First spike sits at x=500
        assert!(engine.run.offset_x < 500.0);
    }
}
