//! Deterministic simulation module
//!
//! All run-time gameplay logic lives here. This module must be pure and
//! deterministic:
//! - Fixed step order (scroll, integrate, hitbox, scan)
//! - Stable obstacle iteration in document order
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use crate::level::Mode;
pub use collision::{ContactEffect, Rect, player_hitbox, resolve_contact};
pub use state::{Engine, Outcome, PlayerState, RunState, TRAIL_LENGTH, TrailPoint};
pub use tick::{TickInput, tick};
