// Pointer hit-testing against the hit-circles that sit just above each hole.

use super::holes::{Hole, Holes, TargetKind};
use super::score::ScoreBoard;
use crate::config::GameConfig;

/// Canvas backing-store size in device pixels plus the pixel ratio used to
/// map viewport (CSS) coordinates onto it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub dpr: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, dpr: f64) -> Self {
        Self { width, height, dpr }
    }

    /// Viewport (client) coordinates to canvas pixels, given the canvas'
    /// on-screen origin.
    pub fn to_canvas(&self, client: (f64, f64), origin: (f64, f64)) -> (f64, f64) {
        (
            (client.0 - origin.0) * self.dpr,
            (client.1 - origin.1) * self.dpr,
        )
    }

    pub fn hole_size(&self, cfg: &GameConfig) -> f64 {
        self.width.min(self.height) * cfg.hole_scale
    }

    pub fn hole_center(&self, hole: &Hole) -> (f64, f64) {
        let (x, y) = hole.position();
        (x * self.width, y * self.height)
    }
}

/// Index of the first hole, in grid order, whose hit-circle contains `point`
/// and that holds a target.
pub fn hit_test(
    holes: &Holes,
    viewport: &Viewport,
    cfg: &GameConfig,
    point: (f64, f64),
) -> Option<usize> {
    let size = viewport.hole_size(cfg);
    let r = size * cfg.hit_radius_scale;
    holes.iter().position(|hole| {
        let (cx, cy) = viewport.hole_center(hole);
        let dx = point.0 - cx;
        let dy = point.1 - (cy - size * cfg.pop_offset_scale);
        dx * dx + dy * dy <= r * r && hole.active().is_some()
    })
}

/// Clear the hole's target, start its hit flash and score it.
/// Returns the kind hit and the points awarded, or `None` if the hole was empty.
pub fn strike(
    hole: &mut Hole,
    scores: &mut ScoreBoard,
    cfg: &GameConfig,
    now: f64,
) -> Option<(TargetKind, u64)> {
    let kind = hole.active.take()?;
    hole.expires_at = 0.0;
    hole.hit_flash_until = now + cfg.hit_flash_ms;
    let points = match kind {
        TargetKind::Basic => scores.add_score(cfg.basic_points),
        TargetKind::Bonus => {
            let points = scores.add_score(cfg.bonus_points);
            scores.set_multiplier(cfg.bonus_multiplier, cfg.bonus_multiplier_ms, now);
            points
        }
    };
    Some((kind, points))
}
