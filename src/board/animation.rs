use super::{CellPos, Direction, Slide};
use std::f64::consts::PI;

/// easeOutElastic, see https://easings.net/#easeOutElastic
/// - overshoots past 1.0 and settles, the block wobbles into place
/// - exactly 0.0 at x = 0 and exactly 1.0 at x >= 1
pub fn ease_out_elastic(x: f64) -> f64 {
    if x >= 1.0 {
        return 1.0;
    }
    if x <= 0.0 {
        return 0.0;
    }
    2f64.powf(-10.0 * x) * ((x * 10.0 - 0.75) * (2.0 * PI / 3.0)).sin() + 1.0
}

/// ELI5:
/// ┌──────────────── Block Animation Flow ───────────────────┐
/// │  From State  →  Event            →  To State            │
/// ├─────────────────────────────────────────────────────────┤
/// │  Idle        →  move requested   →  Moving              │
/// │  Moving      →  move requested   →  Moving (queued)     │
/// │  Moving      →  progress >= 1.0  →  Idle                │
/// └─────────────────────────────────────────────────────────┘
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub enum BlockAnimation {
    #[default]
    Idle,
    Moving(Motion),
}

impl BlockAnimation {
    pub fn is_moving(&self) -> bool {
        matches!(self, BlockAnimation::Moving(_))
    }

    pub fn direction(&self) -> Option<Direction> {
        match self {
            BlockAnimation::Idle => None,
            BlockAnimation::Moving(motion) => Some(motion.direction),
        }
    }
}

/// Returned by `Motion::step` because a motion can:
/// - Continue (InProgress)
/// - End      (Done)
/// Both carry the block coordinate on the movement axis for this frame
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum IsMoving {
    InProgress(f64),
    Done(f64),
}

/// One slide in flight, positions are pixels on the movement axis
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Motion {
    pub start_tick: f64,
    pub start_position: f64,
    pub distance: f64,
    pub direction: Direction,
    pub target: CellPos,
}

impl Motion {
    pub fn start(slide: &Slide, start_tick: f64, start_position: f64, cell_size: f64) -> Self {
        Motion {
            start_tick,
            start_position,
            distance: slide.target_position(cell_size) - start_position,
            direction: slide.direction,
            target: slide.target,
        }
    }

    /// Fraction of the motion elapsed at `tick`, clamped to 0.0..=1.0
    pub fn progress(&self, tick: f64, duration: f64) -> f64 {
        if duration <= 0.0 {
            return 1.0;
        }
        ((tick - self.start_tick) / duration).clamp(0.0, 1.0)
    }

    pub fn position_at(&self, progress: f64) -> f64 {
        self.start_position + ease_out_elastic(progress) * self.distance
    }

    pub fn step(&self, tick: f64, duration: f64) -> IsMoving {
        let progress = self.progress(tick, duration);
        let position = self.position_at(progress);
        if progress >= 1.0 {
            IsMoving::Done(position)
        } else {
            IsMoving::InProgress(position)
        }
    }
}
