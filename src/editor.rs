//! Authoring session
//!
//! Translates pointer and keyboard intents into Level Document mutations.
//! Every intent is a no-op outside its tool context, and out-of-range
//! placements are clamped into the level bounds rather than rejected.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::level::{LevelDocument, Obstacle, ObstacleKind};
use crate::sim::collision::Rect;

/// Active editor tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Place,
    Select,
    Erase,
    Pan,
}

/// Keyboard intents the editor responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKey {
    /// Scroll left; `fast` is the modifier-held variant
    Left { fast: bool },
    Right { fast: bool },
    Home,
    End,
    Delete,
    Escape,
}

/// One editor input event in viewport-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditorIntent {
    PointerDown { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    PointerUp,
    Key(EditorKey),
}

/// Placements never land above this line (keeps the HUD strip clear)
const MIN_PLACE_Y: f32 = 40.0;
/// Default placement grid
const DEFAULT_GRID: f32 = 20.0;
/// Arrow-key scroll step, and the modifier-held variant
const SCROLL_STEP: f32 = 50.0;
const SCROLL_STEP_FAST: f32 = 200.0;

/// Interactive authoring state over one Level Document
#[derive(Debug, Clone)]
pub struct EditorSession {
    pub level: LevelDocument,
    pub tool: Tool,
    /// Obstacle kind new placements use
    pub place_kind: ObstacleKind,
    /// Horizontal scroll of the editor viewport
    pub view_offset: f32,
    pub snap_to_grid: bool,
    pub grid_size: f32,
    /// Index into `level.obstacles`; identity, not ownership
    pub selected: Option<usize>,
    panning: bool,
    drag_start_x: f32,
    drag_start_offset: f32,
}

impl EditorSession {
    pub fn new(level: LevelDocument) -> Self {
        Self {
            level,
            tool: Tool::Place,
            place_kind: ObstacleKind::Spike,
            view_offset: 0.0,
            snap_to_grid: true,
            grid_size: DEFAULT_GRID,
            selected: None,
            panning: false,
            drag_start_x: 0.0,
            drag_start_offset: 0.0,
        }
    }

    /// The currently selected obstacle, if any
    pub fn selected_obstacle(&self) -> Option<&Obstacle> {
        self.selected.and_then(|i| self.level.obstacles.get(i))
    }

    /// Apply one intent and return the session for chaining
    pub fn apply(&mut self, intent: EditorIntent) -> &mut Self {
        match intent {
            EditorIntent::PointerDown { x, y } => self.pointer_down(x, y),
            EditorIntent::PointerMove { x, y } => self.pointer_move(x, y),
            EditorIntent::PointerUp => self.panning = false,
            EditorIntent::Key(key) => self.key(key),
        }
        self
    }

    fn pointer_down(&mut self, x: f32, y: f32) {
        match self.tool {
            Tool::Pan => {
                self.panning = true;
                self.drag_start_x = x;
                self.drag_start_offset = self.view_offset;
            }
            Tool::Place => self.place(x, y),
            Tool::Select => {
                if let Some(i) = self.hit_test(x, y) {
                    self.selected = Some(i);
                }
            }
            Tool::Erase => self.erase(x, y),
        }
    }

    fn pointer_move(&mut self, x: f32, y: f32) {
        if self.panning {
            let dragged = self.drag_start_offset + (self.drag_start_x - x);
            self.view_offset = self.clamp_view(dragged.round());
        }
    }

    /// Place the active kind at a viewport-local point, snapped and clamped
    fn place(&mut self, local_x: f32, local_y: f32) {
        let mut world_x = self.view_offset + local_x;
        let mut world_y = local_y.max(MIN_PLACE_Y);

        if self.snap_to_grid {
            world_x = (world_x / self.grid_size).round() * self.grid_size;
            world_y = (world_y / self.grid_size).round() * self.grid_size;

            // Seat spikes on the ground when they land close to it, so
            // precise manual placement isn't needed
            let (_, spike_h) = ObstacleKind::Spike.default_size();
            let seated = GROUND_Y - spike_h;
            if self.place_kind == ObstacleKind::Spike
                && (world_y - seated).abs() < self.grid_size * 2.0
            {
                world_y = seated;
            }
        }

        let mut ob = Obstacle::new(self.place_kind, world_x, world_y);
        ob.x = ob.x.clamp(0.0, (self.level.length - ob.w).max(0.0));
        ob.y = ob.y.clamp(0.0, GROUND_Y - ob.h);
        log::debug!("placed {:?} at ({}, {})", ob.kind, ob.x, ob.y);
        self.level.obstacles.push(ob);
    }

    /// Topmost obstacle under a viewport-local point: obstacles are scanned
    /// in reverse document order so the most recently added wins
    fn hit_test(&self, local_x: f32, local_y: f32) -> Option<usize> {
        let wx = self.view_offset + local_x;
        let wy = local_y;
        self.level
            .obstacles
            .iter()
            .enumerate()
            .rev()
            .find(|(_, o)| Rect::new(o.x, o.y, o.w, o.h).contains(wx, wy))
            .map(|(i, _)| i)
    }

    fn erase(&mut self, x: f32, y: f32) {
        let Some(i) = self.hit_test(x, y) else {
            return;
        };
        self.level.obstacles.remove(i);
        // Keep the selection pointing at the same obstacle, or drop it
        self.selected = match self.selected {
            Some(s) if s == i => None,
            Some(s) if s > i => Some(s - 1),
            other => other,
        };
    }

    fn key(&mut self, key: EditorKey) {
        match key {
            EditorKey::Left { fast } => {
                self.view_offset = self.clamp_view(self.view_offset - scroll_step(fast));
            }
            EditorKey::Right { fast } => {
                self.view_offset = self.clamp_view(self.view_offset + scroll_step(fast));
            }
            EditorKey::Home => self.view_offset = 0.0,
            EditorKey::End => self.view_offset = self.max_view_offset(),
            EditorKey::Delete => {
                if let Some(i) = self.selected.take()
                    && i < self.level.obstacles.len()
                {
                    self.level.obstacles.remove(i);
                }
            }
            EditorKey::Escape => self.selected = None,
        }
    }

    fn max_view_offset(&self) -> f32 {
        (self.level.length - VIEW_WIDTH).max(0.0)
    }

    fn clamp_view(&self, offset: f32) -> f32 {
        offset.max(0.0).min(self.max_view_offset())
    }
}

fn scroll_step(fast: bool) -> f32 {
    if fast { SCROLL_STEP_FAST } else { SCROLL_STEP }
}
