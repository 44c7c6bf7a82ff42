//! Level documents and the obstacle catalog
//!
//! A level is pure data: geometry, an ordered obstacle list, metadata.
//! The simulation never mutates a document; the editor owns the one under
//! edit and the engine freezes a private copy at start.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Player movement behavior. A level names the mode it starts in; portals
/// switch it mid-run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Gravity and jumping
    #[default]
    Cube,
    /// Held-input sawtooth flight
    Wave,
}

/// The seven obstacle kinds and their interaction semantics.
///
/// `Spike` kills on any contact. `Block`/`Platform` are one-way surfaces in
/// cube mode and lethal in wave mode. The portal kinds never block; touching
/// one applies a side effect and the run continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ObstacleKind {
    #[default]
    Spike,
    Block,
    Platform,
    CubePortal,
    WavePortal,
    NormalSpeedPortal,
    /// Reserved; collides like the other portals but has no effect yet
    CheckpointPortal,
}

impl ObstacleKind {
    /// Catalog placement size (w, h) in world units
    pub fn default_size(&self) -> (f32, f32) {
        match self {
            ObstacleKind::Spike => (26.0, 28.0),
            ObstacleKind::Block => (56.0, 18.0),
            ObstacleKind::Platform => (110.0, 18.0),
            ObstacleKind::CubePortal
            | ObstacleKind::WavePortal
            | ObstacleKind::NormalSpeedPortal
            | ObstacleKind::CheckpointPortal => (40.0, 40.0),
        }
    }

    /// Portals trigger side effects instead of blocking or killing
    pub fn is_portal(&self) -> bool {
        matches!(
            self,
            ObstacleKind::CubePortal
                | ObstacleKind::WavePortal
                | ObstacleKind::NormalSpeedPortal
                | ObstacleKind::CheckpointPortal
        )
    }
}

/// One placed obstacle. Position is the world-space top-left corner; y is
/// not scrolled, only x is offset against the run's scroll position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub w: f32,
    #[serde(default)]
    pub h: f32,
    #[serde(rename = "type", default)]
    pub kind: ObstacleKind,
    /// Unused by collision logic (reserved)
    #[serde(default)]
    pub rotation: f32,
}

impl Obstacle {
    /// Place a kind at (x, y) with its catalog size
    pub fn new(kind: ObstacleKind, x: f32, y: f32) -> Self {
        let (w, h) = kind.default_size();
        Self {
            x,
            y,
            w,
            h,
            kind,
            rotation: 0.0,
        }
    }
}

/// Fallback level length when a document carries none
pub const DEFAULT_LENGTH: f32 = 5000.0;

fn default_length() -> f32 {
    DEFAULT_LENGTH
}

fn default_name() -> String {
    "Untitled Level".to_string()
}

fn default_difficulty() -> u8 {
    1
}

/// A serializable level description. Every field falls back to a default on
/// deserialize, so older or partial documents load without failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDocument {
    /// Movement mode the run starts in
    #[serde(default)]
    pub mode: Mode,
    /// Total horizontal extent in world units
    #[serde(default = "default_length")]
    pub length: f32,
    #[serde(default = "default_name")]
    pub name: String,
    /// Difficulty tier (1-7); descriptive only, the simulator ignores it
    #[serde(default = "default_difficulty")]
    pub difficulty: u8,
    #[serde(default)]
    pub description: String,
    /// Insertion order is preserved for rendering; simulation outcome does
    /// not depend on it except for same-step portal/lethal scan order
    #[serde(default)]
    pub obstacles: Vec<Obstacle>,
}

impl Default for LevelDocument {
    fn default() -> Self {
        Self {
            mode: Mode::Cube,
            length: DEFAULT_LENGTH,
            name: default_name(),
            difficulty: 1,
            description: String::new(),
            obstacles: Vec::new(),
        }
    }
}

impl LevelDocument {
    /// Substitute defaults for invalid core fields. Never fails; a broken
    /// document still runs (with no obstacles at worst).
    pub fn sanitized(mut self) -> Self {
        if !self.length.is_finite() || self.length <= 0.0 {
            self.length = DEFAULT_LENGTH;
        }
        if self.difficulty == 0 {
            self.difficulty = 1;
        }
        self
    }

    /// The level that ships with the game, used by the demo driver and as
    /// a fixture for run-through tests.
    pub fn bundled() -> Self {
        let spike = |x: f32| Obstacle::new(ObstacleKind::Spike, x, GROUND_Y - 28.0);
        Self {
            mode: Mode::Cube,
            length: 12000.0,
            name: "180 BPM Odyssey".to_string(),
            difficulty: 4,
            description: "A rhythm-based challenge perfectly synced to 180 BPM music!"
                .to_string(),
            obstacles: vec![
                spike(500.0),
                spike(650.0),
                spike(800.0),
                spike(950.0),
                Obstacle {
                    w: 80.0,
                    ..Obstacle::new(ObstacleKind::Block, 1133.0, GROUND_Y - 80.0)
                },
                spike(1250.0),
                spike(1466.0),
                spike(1600.0),
                Obstacle {
                    w: 120.0,
                    ..Obstacle::new(ObstacleKind::Platform, 1799.0, GROUND_Y - 150.0)
                },
                spike(2000.0),
                spike(2150.0),
                Obstacle::new(ObstacleKind::NormalSpeedPortal, 2300.0, 150.0),
            ],
        }
    }
}

/// Display name for a difficulty tier
pub fn difficulty_name(tier: u8) -> &'static str {
    match tier {
        1 => "Easy",
        2 => "Normal",
        3 => "Hard",
        4 => "Harder",
        5 => "Insane",
        6 => "Demon",
        7 => "Extreme Demon",
        _ => "Unrated",
    }
}
