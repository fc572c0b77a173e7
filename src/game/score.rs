// Score accumulator and the timed multiplier window.

#[derive(Clone, Debug, PartialEq)]
pub struct ScoreBoard {
    score: u64,
    multiplier: u32,
    multiplier_expires_at: f64,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self {
            score: 0,
            multiplier: 1,
            multiplier_expires_at: 0.0,
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    pub fn multiplier_expires_at(&self) -> f64 {
        self.multiplier_expires_at
    }

    /// Adds `base` scaled by the current multiplier and returns the points awarded.
    pub fn add_score(&mut self, base: u64) -> u64 {
        let awarded = base.saturating_mul(u64::from(self.multiplier));
        self.score = self.score.saturating_add(awarded);
        awarded
    }

    /// Replaces any running window; windows never stack.
    pub fn set_multiplier(&mut self, value: u32, duration_ms: f64, now: f64) {
        self.multiplier = value.max(1);
        self.multiplier_expires_at = now + duration_ms;
    }

    /// Lazy expiry, polled once per frame. Returns true if the multiplier reverted.
    pub fn expire_multiplier(&mut self, now: f64) -> bool {
        if self.multiplier > 1 && now >= self.multiplier_expires_at {
            self.multiplier = 1;
            return true;
        }
        false
    }

    pub fn multiplier_label(&self) -> String {
        format!("x{}", self.multiplier)
    }
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self::new()
    }
}
