//! Round state machine: the session object that owns the holes, the score
//! board and the RNG, and the per-frame / per-tap entry points the web layer
//! drives. Everything here takes explicit timestamps so it runs natively in
//! tests without a browser.

use rand::Rng;

use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::host::{Haptic, Host};

pub mod hit;
pub mod holes;
pub mod score;
pub mod spawn;

pub use hit::Viewport;
pub use holes::{HOLE_COUNT, HOLE_LAYOUT, Hole, Holes, TargetKind};
pub use score::ScoreBoard;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
}

/// What a frame callback should do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Round in progress; render and schedule another frame.
    Continue,
    /// Time ran out on this frame. Render once more, then stop.
    Ended { score: u64 },
    /// No round running; nothing changed.
    Idle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TapOutcome {
    Hit {
        hole: usize,
        kind: TargetKind,
        points: u64,
    },
    Miss,
    /// Tap outside a running round.
    Ignored,
}

/// Numbers shown next to the canvas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hud {
    pub seconds_left: u64,
    pub score: u64,
    pub multiplier: String,
}

pub struct Game<R> {
    config: GameConfig,
    /// Replaces `config` at the next `start`.
    pending_config: Option<GameConfig>,
    holes: Holes,
    scores: ScoreBoard,
    phase: Phase,
    time_remaining_ms: f64,
    last_frame_at: Option<f64>,
    haptics_enabled: bool,
    rng: R,
}

impl<R: Rng> Game<R> {
    pub fn new(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let time_remaining_ms = config.round_ms;
        Ok(Self {
            config,
            pending_config: None,
            holes: Holes::new(),
            scores: ScoreBoard::new(),
            phase: Phase::Idle,
            time_remaining_ms,
            last_frame_at: None,
            haptics_enabled: true,
            rng,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Takes effect from the next `start`; the running round keeps its
    /// current values.
    pub fn set_config(&mut self, config: GameConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.pending_config = Some(config);
        Ok(())
    }

    pub fn holes(&self) -> &Holes {
        &self.holes
    }

    pub fn holes_mut(&mut self) -> &mut Holes {
        &mut self.holes
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn time_remaining_ms(&self) -> f64 {
        self.time_remaining_ms
    }

    pub fn haptics_enabled(&self) -> bool {
        self.haptics_enabled
    }

    pub fn toggle_haptics(&mut self) -> bool {
        self.haptics_enabled = !self.haptics_enabled;
        log::debug!("haptics {}", if self.haptics_enabled { "on" } else { "off" });
        self.haptics_enabled
    }

    /// Reset everything but the haptics toggle and enter `Running`.
    pub fn start(&mut self, host: &dyn Host) {
        if let Some(config) = self.pending_config.take() {
            self.config = config;
        }
        self.phase = Phase::Running;
        self.time_remaining_ms = self.config.round_ms;
        self.scores = ScoreBoard::new();
        self.holes.reset();
        self.last_frame_at = None;
        self.cue(host, Haptic::SelectionChanged);
        log::info!("round started ({} ms)", self.config.round_ms);
    }

    /// One display frame at timestamp `ts`.
    pub fn frame(&mut self, ts: f64) -> FrameOutcome {
        if self.phase != Phase::Running {
            return FrameOutcome::Idle;
        }
        let dt = self.last_frame_at.map_or(0.0, |last| (ts - last).max(0.0));
        self.last_frame_at = Some(ts);

        self.time_remaining_ms = (self.time_remaining_ms - dt).max(0.0);
        if self.time_remaining_ms <= 0.0 {
            self.phase = Phase::Idle;
            let score = self.scores.score();
            log::info!("round over, score {score}");
            return FrameOutcome::Ended { score };
        }

        if self.scores.expire_multiplier(ts) {
            log::debug!("multiplier expired at {ts:.0}");
        }
        let spawned = spawn::spawn_pass(&mut self.holes, &self.config, ts, dt, &mut self.rng);
        if spawned > 0 {
            log::trace!("spawned {spawned} at {ts:.0}");
        }
        FrameOutcome::Continue
    }

    /// Pointer press at `point` in canvas pixels.
    pub fn tap(
        &mut self,
        point: (f64, f64),
        viewport: &Viewport,
        now: f64,
        host: &dyn Host,
    ) -> TapOutcome {
        if self.phase != Phase::Running {
            return TapOutcome::Ignored;
        }
        let struck = hit::hit_test(&self.holes, viewport, &self.config, point).and_then(|index| {
            let hole = self.holes.get_mut(index)?;
            let (kind, points) = hit::strike(hole, &mut self.scores, &self.config, now)?;
            Some((index, kind, points))
        });
        match struck {
            Some((hole, kind, points)) => {
                self.cue(host, Haptic::ImpactLight);
                log::debug!("hit {kind:?} in hole {hole} for {points}");
                TapOutcome::Hit { hole, kind, points }
            }
            None => {
                self.cue(host, Haptic::NotificationWarning);
                TapOutcome::Miss
            }
        }
    }

    pub fn hud(&self) -> Hud {
        Hud {
            seconds_left: (self.time_remaining_ms / 1000.0).ceil().max(0.0) as u64,
            score: self.scores.score(),
            multiplier: self.scores.multiplier_label(),
        }
    }

    fn cue(&self, host: &dyn Host, cue: Haptic) {
        if self.haptics_enabled {
            host.haptic(cue);
        }
    }
}
