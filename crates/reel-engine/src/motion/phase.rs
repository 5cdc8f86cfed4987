// motion/phase.rs
//
// The motion-phase state machine's vocabulary: the phase enum, the per-phase
// context structs (swing, bounce), and the mutable per-spin motion state.
// Each phase carries its own tween state so no callback captures anything.

use super::drop::DropSpin;
use super::easing::Easing;
use super::tween::ScalarTween;

/// Current phase of a reel, with per-phase context where one is needed.
#[derive(Debug, Clone)]
pub enum MotionPhase {
    Idle,
    /// Cosmetic backward swing before the main loop.
    StartSwing(SwingState),
    Accelerating,
    Cruising,
    Decelerating,
    /// Forward-then-back overshoot before settling.
    EndBounce(BounceState),
    /// Drop/cascade presentation instead of continuous rolling.
    Dropping(DropSpin),
    /// Frozen after a synchronization error. Only `reset` leaves this state.
    Faulted,
}

impl MotionPhase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            MotionPhase::Idle => PhaseKind::Idle,
            MotionPhase::StartSwing(_) => PhaseKind::StartSwing,
            MotionPhase::Accelerating => PhaseKind::Accelerating,
            MotionPhase::Cruising => PhaseKind::Cruising,
            MotionPhase::Decelerating => PhaseKind::Decelerating,
            MotionPhase::EndBounce(_) => PhaseKind::EndBounce,
            MotionPhase::Dropping(_) => PhaseKind::Dropping,
            MotionPhase::Faulted => PhaseKind::Faulted,
        }
    }
}

/// Payload-free phase discriminant for guards, events and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    Idle,
    StartSwing,
    Accelerating,
    Cruising,
    Decelerating,
    EndBounce,
    Dropping,
    Faulted,
}

/// Uniform offset tween applied to every slot during the start swing.
/// Produces per-tick deltas; the caller applies the direction sign.
#[derive(Debug, Clone)]
pub struct SwingState {
    tween: ScalarTween,
    last_offset: f32,
}

impl SwingState {
    pub fn new(distance: f32, duration: f32, easing: Easing) -> Self {
        Self {
            tween: ScalarTween::new(0.0, distance, duration, easing),
            last_offset: 0.0,
        }
    }

    /// Advance and return the offset delta for this tick.
    pub fn advance(&mut self, dt: f32) -> f32 {
        let offset = self.tween.advance(dt);
        let delta = offset - self.last_offset;
        self.last_offset = offset;
        delta
    }

    pub fn is_complete(&self) -> bool {
        self.tween.is_complete()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BounceLeg {
    Forward,
    Back,
}

/// Two-leg overshoot: out by `distance`, then back to the starting offset.
/// Offset deltas are axis-agnostic; the caller applies the direction sign.
#[derive(Debug, Clone)]
pub struct BounceState {
    leg: BounceLeg,
    tween: ScalarTween,
    distance: f32,
    back_time: f32,
    easing: Easing,
    last_offset: f32,
}

impl BounceState {
    pub fn new(distance: f32, forward_time: f32, back_time: f32, easing: Easing) -> Self {
        Self {
            leg: BounceLeg::Forward,
            tween: ScalarTween::new(0.0, distance, forward_time, easing),
            distance,
            back_time,
            easing,
            last_offset: 0.0,
        }
    }

    /// Advance and return the offset delta for this tick. Positive while
    /// overshooting, negative on the way back.
    pub fn advance(&mut self, dt: f32) -> f32 {
        let v = self.tween.advance(dt);
        let offset = match self.leg {
            BounceLeg::Forward => v,
            BounceLeg::Back => self.distance - v,
        };
        let delta = offset - self.last_offset;
        self.last_offset = offset;

        if self.leg == BounceLeg::Forward && self.tween.is_complete() {
            self.leg = BounceLeg::Back;
            self.tween = ScalarTween::new(0.0, self.distance, self.back_time, self.easing);
        }
        delta
    }

    pub fn is_complete(&self) -> bool {
        self.leg == BounceLeg::Back && self.tween.is_complete()
    }
}

/// Mutable rolling state, reset at the start of every spin.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionState {
    pub cur_speed: f32,
    pub at_top_speed: bool,
    /// A stop plan is active; boundary crossings consume changes.
    pub stopping: bool,
    /// The remaining changes must reproduce the target window exactly.
    pub exact_window: bool,
    pub changes_remaining: usize,
    pub base_changes: usize,
    pub total_changes: usize,
    /// Extra full rotations requested before settling; always ≥ 1.
    pub stop_mult: u32,
    pub need_slow: bool,
    /// Turbo flag latched at `start_rolling`.
    pub turbo: bool,
    /// Ring index of the slot currently nearest the trailing bound.
    pub last_slot: usize,
}

impl MotionState {
    pub fn new(initial_last: usize) -> Self {
        Self {
            cur_speed: 0.0,
            at_top_speed: false,
            stopping: false,
            exact_window: false,
            changes_remaining: 0,
            base_changes: 0,
            total_changes: 0,
            stop_mult: 1,
            need_slow: false,
            turbo: false,
            last_slot: initial_last,
        }
    }

    /// Return to the between-spins state. `stop_mult` resets too; the
    /// controller re-requests emphasis per spin.
    pub fn reset(&mut self, initial_last: usize) {
        *self = Self::new(initial_last);
    }
}
