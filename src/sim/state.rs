//! Run state and core simulation types
//!
//! Everything a run needs is owned by one [`Engine`] value, so independent
//! runs (and parallel tests) never share state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::level::{LevelDocument, Mode};

/// Terminal status of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    Running,
    /// Lethal contact; terminal until an explicit restart
    Died,
    /// Scrolled past the end of the level; terminal until an explicit restart
    Completed,
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Running)
    }
}

/// Trail point for wave-mode rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailPoint {
    pub pos: Vec2,
    pub alpha: f32,
    pub size: f32,
    pub rotation: f32,
}

/// Maximum number of trail points to store
pub const TRAIL_LENGTH: usize = 15;
/// Per-step alpha fade applied to every trail point
pub const TRAIL_FADE: f32 = 0.07;
/// Per-step size shrink applied to every trail point
pub const TRAIL_SHRINK: f32 = 0.2;
/// Trail points start at this size and are pruned below the visibility floor
pub const TRAIL_START_SIZE: f32 = 6.0;
const TRAIL_MIN_ALPHA: f32 = 0.1;
const TRAIL_MIN_SIZE: f32 = 2.0;

/// The player icon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// World-space top-left of the icon (x never scrolls; the level does)
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    /// Vertical velocity
    pub vy: f32,
    /// Cube mode only; wave mode never grounds
    pub on_ground: bool,
    /// Visual-only spin angle (degrees in cube mode, radians-ish in wave)
    pub rotation: f32,
    /// Wave-mode nose tilt, proportional to vy
    pub tilt: f32,
    /// Current airborne spin rate (cube mode)
    pub spin_speed: f32,
    /// Recent positions for the wave trail (oldest first)
    #[serde(skip)]
    pub trail: Vec<TrailPoint>,
}

impl PlayerState {
    /// Fixed spawn pose, used at level start and after every death
    pub fn spawn() -> Self {
        Self {
            x: SPAWN_X,
            y: GROUND_Y - PLAYER_SIZE,
            w: PLAYER_SIZE,
            h: PLAYER_SIZE,
            vy: 0.0,
            on_ground: true,
            rotation: 0.0,
            tilt: 0.0,
            spin_speed: 0.0,
            trail: Vec::with_capacity(TRAIL_LENGTH),
        }
    }

    /// Record the current wave hitbox center to the trail (call each step
    /// while in wave mode)
    pub fn record_trail(&mut self) {
        self.trail.push(TrailPoint {
            pos: Vec2::new(self.x + WAVE_HITBOX / 2.0, self.y + WAVE_HITBOX / 2.0),
            alpha: 1.0,
            size: TRAIL_START_SIZE,
            rotation: self.rotation,
        });
        if self.trail.len() > TRAIL_LENGTH {
            self.trail.remove(0);
        }
    }

    /// Fade every trail point one step and drop the ones below visibility
    pub fn fade_trail(&mut self) {
        for p in &mut self.trail {
            p.alpha -= TRAIL_FADE;
            p.size -= TRAIL_SHRINK;
        }
        self.trail
            .retain(|p| p.alpha > TRAIL_MIN_ALPHA && p.size > TRAIL_MIN_SIZE);
    }

    /// Clear trail (on spawn and on mode switch)
    pub fn clear_trail(&mut self) {
        self.trail.clear();
    }
}

/// Per-run scroll, scoring, and outcome state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    /// Active movement mode; portals change it between steps
    pub mode: Mode,
    /// World position of the viewport's left edge; monotone while running
    pub offset_x: f32,
    /// Scalar on the base scroll speed; only a reset-to-1 portal exists
    pub speed_multiplier: f32,
    /// Distance-proportional score, monotone while alive
    pub score: f32,
    /// Best floored score across restarts of this engine
    pub best: u64,
    pub outcome: Outcome,
}

impl RunState {
    fn new(mode: Mode) -> Self {
        Self {
            mode,
            offset_x: 0.0,
            speed_multiplier: 1.0,
            score: 0.0,
            best: 0,
            outcome: Outcome::Running,
        }
    }

    /// Fold the current score into the best-score tracker
    pub(super) fn bank_best(&mut self) {
        self.best = self.best.max(self.score.floor() as u64);
    }
}

/// One isolated simulation run: a frozen level copy plus mutable player and
/// run state. Construct one per attempt series; no global state exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Engine {
    /// Private copy of the document; concurrent edits elsewhere cannot
    /// corrupt a run in progress
    pub(crate) level: LevelDocument,
    pub player: PlayerState,
    pub run: RunState,
}

impl Engine {
    /// Freeze a document and spawn the player. Malformed documents are
    /// repaired with defaults rather than rejected.
    pub fn new(level: LevelDocument) -> Self {
        let level = level.sanitized();
        let run = RunState::new(level.mode);
        log::debug!(
            "starting run: {:?} ({} obstacles, length {})",
            level.name,
            level.obstacles.len(),
            level.length
        );
        Self {
            level,
            player: PlayerState::spawn(),
            run,
        }
    }

    /// Reset player and run state to the start of the level, identically
    /// after death or completion. Best score carries over.
    pub fn restart(&mut self) {
        let best = self.run.best;
        self.player = PlayerState::spawn();
        self.run = RunState::new(self.level.mode);
        self.run.best = best;
    }

    /// The frozen document this run plays
    pub fn level(&self) -> &LevelDocument {
        &self.level
    }

    /// Advance one step with the held-input signal and expose the results.
    /// Narrow-contract wrapper over [`tick`](super::tick::tick).
    pub fn step(&mut self, dt: f32, hold: bool) -> (&PlayerState, &RunState) {
        let input = super::tick::TickInput {
            hold,
            ..Default::default()
        };
        super::tick::tick(self, &input, dt);
        (&self.player, &self.run)
    }
}
