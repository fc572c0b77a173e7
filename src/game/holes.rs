// Target grid: fixed hole slots and their per-slot target state.

/// Normalized (x, y) centres of the seven holes, in hit-test order.
pub const HOLE_LAYOUT: [(f64, f64); HOLE_COUNT] = [
    (0.2, 0.25),
    (0.5, 0.25),
    (0.8, 0.25),
    (0.2, 0.55),
    (0.5, 0.55),
    (0.8, 0.55),
    (0.5, 0.83),
];

pub const HOLE_COUNT: usize = 7;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetKind {
    /// Common target worth base points.
    Basic,
    /// Rare target that also switches on the score multiplier.
    Bonus,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Hole {
    position: (f64, f64),
    pub(crate) active: Option<TargetKind>,
    pub(crate) expires_at: f64,
    pub(crate) next_spawn_at: f64,
    pub(crate) hit_flash_until: f64,
}

impl Hole {
    fn new(position: (f64, f64)) -> Self {
        Self {
            position,
            active: None,
            expires_at: 0.0,
            next_spawn_at: 0.0,
            hit_flash_until: 0.0,
        }
    }

    pub fn position(&self) -> (f64, f64) {
        self.position
    }

    pub fn active(&self) -> Option<TargetKind> {
        self.active
    }

    pub fn expires_at(&self) -> f64 {
        self.expires_at
    }

    pub fn next_spawn_at(&self) -> f64 {
        self.next_spawn_at
    }

    pub fn hit_flash_until(&self) -> f64 {
        self.hit_flash_until
    }

    /// Put a target in the hole with the given expiry, bypassing the spawn roll.
    pub fn force_target(&mut self, kind: TargetKind, expires_at: f64) {
        self.active = Some(kind);
        self.expires_at = expires_at;
    }

    fn reset(&mut self) {
        self.active = None;
        self.expires_at = 0.0;
        self.next_spawn_at = 0.0;
        self.hit_flash_until = 0.0;
    }
}

/// The hole collection. Order is fixed and matches `HOLE_LAYOUT`.
#[derive(Clone, Debug, PartialEq)]
pub struct Holes([Hole; HOLE_COUNT]);

impl Holes {
    pub fn new() -> Self {
        Self(HOLE_LAYOUT.map(Hole::new))
    }

    pub fn reset(&mut self) {
        self.0.iter_mut().for_each(Hole::reset);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Hole> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Hole> {
        self.0.iter_mut()
    }

    pub fn get(&self, index: usize) -> Option<&Hole> {
        self.0.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Hole> {
        self.0.get_mut(index)
    }

    pub fn active_count(&self) -> usize {
        self.0.iter().filter(|h| h.active.is_some()).count()
    }
}

impl Default for Holes {
    fn default() -> Self {
        Self::new()
    }
}
