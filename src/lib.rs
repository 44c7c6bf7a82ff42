//! Wavedash - a side-scrolling reflex platformer core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement modes, collisions, run state)
//! - `level`: Level documents and the obstacle catalog
//! - `editor`: Authoring session (placement, selection, panning)
//! - `repository`: Narrow contract to the external level store
//! - `draft`: Local draft save/restore with lenient defaults

pub mod draft;
pub mod editor;
pub mod level;
pub mod repository;
pub mod sim;

pub use editor::{EditorIntent, EditorKey, EditorSession, Tool};
pub use level::{LevelDocument, Obstacle, ObstacleKind};
pub use sim::{Engine, Mode, Outcome, PlayerState, RunState, TickInput, tick};

/// Game configuration constants
pub mod consts {
    /// Viewport dimensions in world units
    pub const VIEW_WIDTH: f32 = 800.0;
    pub const VIEW_HEIGHT: f32 = 500.0;
    /// Ground line (top of the floor strip)
    pub const GROUND_Y: f32 = VIEW_HEIGHT * 0.82;

    /// Maximum single-step delta time; bounds displacement after a stall
    pub const MAX_STEP_DT: f32 = 0.04;

    /// Horizontal scroll speed before the portal multiplier
    pub const BASE_SPEED: f32 = 220.0;
    /// Score accrues at dt * speed / SCORE_DIVISOR (distance-proportional)
    pub const SCORE_DIVISOR: f32 = 120.0;
    /// Scroll overrun past the level length that counts as completion
    pub const FINISH_MARGIN: f32 = 120.0;

    /// Cube mode
    pub const GRAVITY: f32 = 1400.0;
    pub const JUMP_VELOCITY: f32 = -480.0;
    pub const PLAYER_SIZE: f32 = 34.0;
    pub const SPAWN_X: f32 = 100.0;
    /// Airborne spin rate, degrees per second
    pub const CUBE_SPIN_RATE: f32 = 400.0;

    /// Wave mode
    pub const WAVE_HITBOX: f32 = 20.0;
    pub const WAVE_RISE_VY: f32 = -320.0;
    pub const WAVE_FALL_VY: f32 = 380.0;
    pub const WAVE_TOP_MARGIN: f32 = 12.0;

    /// One-way platform tolerance band for landing/hanging resolution
    pub const PLATFORM_TOLERANCE: f32 = 10.0;
}
