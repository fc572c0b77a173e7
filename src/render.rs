//! Per-frame drawing. The pass is read-only over holes and score state and
//! goes through [`Surface`], so the canvas binding lives in `web` and tests can
//! record draw calls instead.

use crate::assets::Sprite;
use crate::config::GameConfig;
use crate::game::{Holes, TargetKind, Viewport};

const HOLE_FALLBACK: &str = "rgba(0,0,0,0.45)";
const BASIC_FALLBACK: &str = "#ffffff";
const BONUS_FALLBACK: &str = "#ffcc00";
const FLASH_FALLBACK: &str = "#fff";

/// Drawing primitives the renderer needs.
pub trait Surface {
    fn clear(&mut self, width: f64, height: f64);
    /// Draw a loaded sprite into the box. Returns false if the sprite is not
    /// available so the caller draws a fallback.
    fn draw_sprite(&mut self, sprite: Sprite, x: f64, y: f64, w: f64, h: f64) -> bool;
    fn fill_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, color: &str);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str);
    fn stroke_circle(&mut self, cx: f64, cy: f64, r: f64, line_width: f64, color: &str);
    fn set_alpha(&mut self, alpha: f64);
}

/// Fade factor of a hit flash at `ts`, or `None` once it is over.
pub fn flash_alpha(hit_flash_until: f64, ts: f64, flash_ms: f64) -> Option<f64> {
    if hit_flash_until <= 0.0 || ts >= hit_flash_until || flash_ms <= 0.0 {
        return None;
    }
    Some(((hit_flash_until - ts) / flash_ms).clamp(0.0, 1.0))
}

pub fn render<S: Surface + ?Sized>(
    surface: &mut S,
    holes: &Holes,
    viewport: &Viewport,
    cfg: &GameConfig,
    ts: f64,
) {
    surface.clear(viewport.width, viewport.height);

    let hole_size = viewport.hole_size(cfg);
    let pop = hole_size * 0.9;

    for hole in holes.iter() {
        let (cx, cy) = viewport.hole_center(hole);

        let half = hole_size / 2.0;
        if !surface.draw_sprite(Sprite::Hole, cx - half, cy - half, hole_size, hole_size) {
            surface.fill_ellipse(cx, cy, hole_size * 0.45, hole_size * 0.30, HOLE_FALLBACK);
        }

        if let Some(kind) = hole.active() {
            let (sprite, color) = match kind {
                TargetKind::Basic => (Sprite::Target, BASIC_FALLBACK),
                TargetKind::Bonus => (Sprite::Bonus, BONUS_FALLBACK),
            };
            if !surface.draw_sprite(sprite, cx - pop / 2.0, cy - pop * 0.75, pop, pop) {
                let side = pop * 0.66;
                surface.fill_rect(cx - pop / 3.0, cy - pop * 0.9, side, side, color);
            }
        }

        if let Some(alpha) = flash_alpha(hole.hit_flash_until(), ts, cfg.hit_flash_ms) {
            surface.set_alpha(alpha);
            if !surface.draw_sprite(Sprite::Hit, cx - pop / 2.0, cy - pop / 2.0, pop, pop) {
                let line_width = 6.0 * viewport.dpr;
                surface.stroke_circle(cx, cy - pop * 0.2, pop * 0.25, line_width, FLASH_FALLBACK);
            }
            surface.set_alpha(1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Op {
        Clear,
        Sprite(Sprite),
        Ellipse(String),
        Rect(String),
        Ring,
        Alpha(f64),
    }

    #[derive(Default)]
    struct Recorder {
        loaded: Vec<Sprite>,
        ops: Vec<Op>,
    }

    impl Surface for Recorder {
        fn clear(&mut self, _w: f64, _h: f64) {
            self.ops.push(Op::Clear);
        }
        fn draw_sprite(&mut self, sprite: Sprite, _x: f64, _y: f64, _w: f64, _h: f64) -> bool {
            if self.loaded.contains(&sprite) {
                self.ops.push(Op::Sprite(sprite));
                true
            } else {
                false
            }
        }
        fn fill_ellipse(&mut self, _cx: f64, _cy: f64, _rx: f64, _ry: f64, color: &str) {
            self.ops.push(Op::Ellipse(color.into()));
        }
        fn fill_rect(&mut self, _x: f64, _y: f64, _w: f64, _h: f64, color: &str) {
            self.ops.push(Op::Rect(color.into()));
        }
        fn stroke_circle(&mut self, _cx: f64, _cy: f64, _r: f64, _lw: f64, _color: &str) {
            self.ops.push(Op::Ring);
        }
        fn set_alpha(&mut self, alpha: f64) {
            self.ops.push(Op::Alpha(alpha));
        }
    }

    #[test]
    fn no_assets_draws_fallback_shapes() {
        let mut holes = Holes::new();
        holes.get_mut(0).unwrap().force_target(TargetKind::Bonus, 1e9);
        holes.get_mut(1).unwrap().hit_flash_until = 180.0;
        let mut rec = Recorder::default();
        let cfg = GameConfig::default();
        render(&mut rec, &holes, &Viewport::new(400.0, 600.0, 2.0), &cfg, 100.0);

        assert_eq!(rec.ops[0], Op::Clear);
        let ellipses = rec.ops.iter().filter(|o| matches!(o, Op::Ellipse(_))).count();
        assert_eq!(ellipses, 7);
        assert!(rec.ops.contains(&Op::Rect(BONUS_FALLBACK.into())));
        assert!(rec.ops.contains(&Op::Ring));
        assert!(rec.ops.contains(&Op::Alpha(0.5)));
        assert_eq!(rec.ops.last(), Some(&Op::Ellipse(HOLE_FALLBACK.into())));
    }

    #[test]
    fn loaded_sprites_replace_fallbacks() {
        let mut holes = Holes::new();
        holes.get_mut(2).unwrap().force_target(TargetKind::Basic, 1e9);
        let mut rec = Recorder {
            loaded: Sprite::ALL.to_vec(),
            ..Recorder::default()
        };
        let view = Viewport::new(400.0, 400.0, 1.0);
        render(&mut rec, &holes, &view, &GameConfig::default(), 0.0);
        assert!(rec.ops.iter().all(|o| matches!(o, Op::Clear | Op::Sprite(_))));
        assert!(rec.ops.contains(&Op::Sprite(Sprite::Target)));
    }

    #[test]
    fn flash_fades_linearly_and_ends() {
        assert_eq!(flash_alpha(0.0, 10.0, 160.0), None);
        assert_eq!(flash_alpha(1_160.0, 1_000.0, 160.0), Some(1.0));
        assert_eq!(flash_alpha(1_160.0, 1_080.0, 160.0), Some(0.5));
        assert_eq!(flash_alpha(1_160.0, 1_160.0, 160.0), None);
    }
}
