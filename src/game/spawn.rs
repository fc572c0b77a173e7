// Per-frame spawn pass. Expiry is lazy: a target outlives its deadline until
// the first pass that observes `now > expires_at`.

use rand::Rng;

use super::holes::{Holes, TargetKind};
use crate::config::GameConfig;

/// Run one spawn pass over every hole.
///
/// `dt_ms` is only consulted when the config uses a per-second spawn rate.
pub fn spawn_pass<R: Rng>(
    holes: &mut Holes,
    cfg: &GameConfig,
    now: f64,
    dt_ms: f64,
    rng: &mut R,
) -> usize {
    let chance = cfg.spawn_rate.chance(dt_ms);
    let mut spawned = 0;
    for hole in holes.iter_mut() {
        if hole.active.is_some() && now > hole.expires_at {
            hole.active = None;
        }
        if now < hole.next_spawn_at || hole.active.is_some() {
            continue;
        }
        if !rng.gen_bool(chance) {
            continue;
        }
        let kind = if rng.gen_bool(cfg.bonus_chance) {
            TargetKind::Bonus
        } else {
            TargetKind::Basic
        };
        let lifetime = match kind {
            TargetKind::Bonus => rng.gen_range(cfg.bonus_lifetime_ms.clone()),
            TargetKind::Basic => rng.gen_range(cfg.basic_lifetime_ms.clone()),
        };
        hole.active = Some(kind);
        hole.expires_at = now + lifetime;
        hole.next_spawn_at = now + rng.gen_range(cfg.cooldown_ms.clone());
        spawned += 1;
    }
    spawned
}
