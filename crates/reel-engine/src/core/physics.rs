// core/physics.rs
//
// Physics Parameter Set — raw tuning numbers, the rate-derived effective
// copy, and the per-tick displacement for whichever motion phase is active.
// Speeds are world units per second; displacement per tick is
// speed × distance-multiple × dt.

use serde::{Deserialize, Serialize};

use crate::api::context::SpinContext;
use crate::motion::phase::MotionState;

/// Rolling speed tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedTuning {
    /// Speed at which acceleration hands over to cruising.
    pub to_top_speed: f32,
    /// Acceleration applied from standstill.
    pub to_top_acc: f32,
    pub cruise_speed: f32,
    /// Cruise used while more than two changes remain during deceleration.
    pub slow_cruise_speed: f32,
    /// Speed for the final symbol changes before settle.
    pub last_symbol_speed: f32,
    /// Deep slow-motion multiplier for the anticipation window (0..1).
    pub slow_motion_rate: f32,
    /// Fast-forward multiplier applied to the deceleration displacement.
    pub pass_rate: f32,
    /// Distance multiples: [normal, turbo].
    pub distance_multiple: [f32; 2],
}

impl Default for SpeedTuning {
    fn default() -> Self {
        Self {
            to_top_speed: 1800.0,
            to_top_acc: 4500.0,
            cruise_speed: 1800.0,
            slow_cruise_speed: 1500.0,
            last_symbol_speed: 1200.0,
            slow_motion_rate: 0.2,
            pass_rate: 3.0,
            distance_multiple: [1.0, 1.4],
        }
    }
}

/// Start-swing and end-bounce tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwingTuning {
    pub start_distance: f32,
    pub start_time: f32,
    pub end_distance: f32,
    pub end_time: f32,
    /// End-bounce back-leg duration when fast-forward is active.
    pub end_pass_time: f32,
}

impl Default for SwingTuning {
    fn default() -> Self {
        Self {
            start_distance: 40.0,
            start_time: 0.15,
            end_distance: 40.0,
            end_time: 0.15,
            end_pass_time: 0.05,
        }
    }
}

/// Drop-mode tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropTuning {
    pub drop_in_time: f32,
    pub drop_out_time: f32,
    /// Per-row stagger delay for drop-in, scaled by the row offset.
    pub drop_in_symbol_delay: f32,
    pub drop_out_symbol_delay: f32,
    pub bounce_distance: f32,
    pub bounce_time: f32,
}

impl Default for DropTuning {
    fn default() -> Self {
        Self {
            drop_in_time: 0.2,
            drop_out_time: 0.2,
            drop_in_symbol_delay: 0.05,
            drop_out_symbol_delay: 0.05,
            bounce_distance: 20.0,
            bounce_time: 0.1,
        }
    }
}

/// Raw tuning as configured; `ReelPhysics::derive` produces the effective
/// copy for the active rate multiplier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReelTuning {
    #[serde(default)]
    pub speed: SpeedTuning,
    #[serde(default)]
    pub swing: SwingTuning,
    #[serde(default)]
    pub drop: DropTuning,
}

/// Effective parameter set: every speed scaled by the rate, every duration
/// divided by it. Distances and pure ratios stay as configured.
#[derive(Debug, Clone)]
pub struct ReelPhysics {
    pub speed: SpeedTuning,
    pub swing: SwingTuning,
    pub drop: DropTuning,
}

impl ReelPhysics {
    pub fn derive(tuning: &ReelTuning, rate: f32) -> Self {
        let mut speed = tuning.speed.clone();
        speed.to_top_speed *= rate;
        speed.to_top_acc *= rate;
        speed.cruise_speed *= rate;
        speed.slow_cruise_speed *= rate;
        speed.last_symbol_speed *= rate;

        let mut swing = tuning.swing.clone();
        swing.start_time /= rate;
        swing.end_time /= rate;
        swing.end_pass_time /= rate;

        let mut drop = tuning.drop.clone();
        drop.drop_in_time /= rate;
        drop.drop_out_time /= rate;
        drop.drop_in_symbol_delay /= rate;
        drop.drop_out_symbol_delay /= rate;
        drop.bounce_time /= rate;

        Self { speed, swing, drop }
    }

    /// Per-tick displacement for the rolling phases. Integrates the
    /// acceleration ramp, flips `at_top_speed` on handover, and applies the
    /// turbo distance multiple plus the deceleration modifiers.
    pub fn tick_displacement(
        &self,
        motion: &mut MotionState,
        ctx: &SpinContext,
        dt: f32,
        engine_rows: usize,
    ) -> f32 {
        let dms = self.distance_multiple(motion.turbo);
        if !motion.at_top_speed && !motion.stopping {
            let dis = (motion.cur_speed * dt + 0.5 * self.speed.to_top_acc * dt * dt) * dms;
            motion.cur_speed += self.speed.to_top_acc * dt;
            if motion.cur_speed >= self.speed.to_top_speed {
                motion.at_top_speed = true;
            }
            dis
        } else if !motion.stopping {
            self.speed.cruise_speed * dms * dt
        } else if ctx.fast_forward {
            self.speed.cruise_speed * self.speed.pass_rate * dms * dt
        } else {
            let base = if motion.changes_remaining >= 3 {
                self.speed.slow_cruise_speed
            } else {
                self.speed.last_symbol_speed
            };
            base * dms * dt * self.slow_motion_multiplier(motion, ctx, engine_rows)
        }
    }

    pub fn distance_multiple(&self, turbo: bool) -> f32 {
        if turbo {
            self.speed.distance_multiple[1]
        } else {
            self.speed.distance_multiple[0]
        }
    }

    /// Anticipation slow-motion, staged by progress through the change
    /// countdown: mild early, deep once the window is almost aligned.
    fn slow_motion_multiplier(
        &self,
        motion: &MotionState,
        ctx: &SpinContext,
        engine_rows: usize,
    ) -> f32 {
        if !(ctx.result_ready && motion.need_slow && !motion.turbo) {
            return 1.0;
        }
        let slow = self.speed.slow_motion_rate;
        if motion.changes_remaining <= engine_rows {
            return slow;
        }
        let adjusted = motion.total_changes.saturating_sub(engine_rows) as f32;
        let done = (motion.total_changes - motion.changes_remaining) as f32;
        if done <= (adjusted * 0.6).floor() {
            slow + (1.0 - slow) * 0.2
        } else if done <= (adjusted * 0.8).floor() {
            slow + (1.0 - slow) * 0.13
        } else {
            slow + (1.0 - slow) * 0.1
        }
    }
}
