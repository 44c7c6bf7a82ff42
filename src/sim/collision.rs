//! Axis-aligned collision testing and per-kind contact resolution
//!
//! Every obstacle collides as its full rectangle, portals included (they
//! are drawn round but hit square). The one tricky case is the one-way
//! block/platform resolution in cube mode, which needs the player's
//! position from before the current step's vertical integration.

use crate::consts::*;
use crate::level::{Mode, ObstacleKind};

use super::state::PlayerState;

/// Screen-space axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Strict-edge overlap test; rectangles that merely touch do not collide
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.x + self.w <= other.x
            || self.x >= other.x + other.w
            || self.y + self.h <= other.y
            || self.y >= other.y + other.h)
    }

    /// Point containment with inclusive edges (editor hit-testing)
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.w && py >= self.y && py <= self.y + self.h
    }
}

/// The rectangle used for collision testing this step. Wave mode flies a
/// hitbox smaller than and centered within the icon; cube mode uses the
/// full icon bounds.
pub fn player_hitbox(mode: Mode, player: &PlayerState) -> Rect {
    match mode {
        Mode::Wave => Rect::new(
            player.x + (player.w - WAVE_HITBOX) / 2.0,
            player.y + (player.h - WAVE_HITBOX) / 2.0,
            WAVE_HITBOX,
            WAVE_HITBOX,
        ),
        Mode::Cube => Rect::new(player.x, player.y, player.w, player.h),
    }
}

/// What a confirmed overlap does to the run. One exhaustive match over the
/// obstacle kind decides this; adding a kind is a localized change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactEffect {
    /// No gameplay effect (reserved kinds)
    None,
    /// The run ends this step
    Lethal,
    /// Ground-like landing on top of a block; snap to the carried y
    Land { y: f32 },
    /// Head bump into the underside; snap below and kill the ascent
    Hang { y: f32 },
    /// Portal: switch movement mode
    SwitchMode(Mode),
    /// Portal: back to 1x scroll speed
    ResetSpeed,
}

/// Resolve an overlap between the player hitbox and one obstacle.
///
/// `prev_y` is the player's y before this step's vertical integration;
/// discrete steps can put the previous frame slightly inside the obstacle
/// envelope, so landings are accepted within a fixed tolerance band below
/// the top edge (and hangs within the band above the bottom edge). A
/// contact outside both bands is a side hit and lethal.
pub fn resolve_contact(
    kind: ObstacleKind,
    mode: Mode,
    player: &PlayerState,
    prev_y: f32,
    obstacle: &Rect,
) -> ContactEffect {
    match kind {
        ObstacleKind::Spike => ContactEffect::Lethal,
        ObstacleKind::Block | ObstacleKind::Platform => {
            if mode != Mode::Cube {
                return ContactEffect::Lethal;
            }
            let prev_bottom = prev_y + player.h;
            let prev_top = prev_y;
            if prev_bottom <= obstacle.y + PLATFORM_TOLERANCE && player.vy > 0.0 {
                ContactEffect::Land {
                    y: obstacle.y - player.h,
                }
            } else if prev_top >= obstacle.y + obstacle.h - PLATFORM_TOLERANCE && player.vy < 0.0 {
                ContactEffect::Hang {
                    y: obstacle.y + obstacle.h,
                }
            } else {
                ContactEffect::Lethal
            }
        }
        ObstacleKind::CubePortal => ContactEffect::SwitchMode(Mode::Cube),
        ObstacleKind::WavePortal => ContactEffect::SwitchMode(Mode::Wave),
        ObstacleKind::NormalSpeedPortal => ContactEffect::ResetSpeed,
        ObstacleKind::CheckpointPortal => ContactEffect::None,
    }
}
