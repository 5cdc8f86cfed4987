// reel.rs
//
// The Reel — owns one slot ring plus the motion state machine and drives
// them from a single advance(dt) entry point. The spin controller calls the
// operations, polls the returned completions, and drains the event queue
// once per frame.

use crate::api::context::SpinContext;
use crate::api::types::{Completion, DropType, ReelEvent, SymbolId};
use crate::config::{ReelConfig, ReelProfile, SymbolConfig};
use crate::core::physics::ReelPhysics;
use crate::core::ring::{Slot, SlotRing};
use crate::core::time::FixedTicker;
use crate::error::ReelError;
use crate::motion::drop::{DropConfig, DropSpin};
use crate::motion::easing::Easing;
use crate::motion::phase::{BounceState, MotionPhase, MotionState, PhaseKind, SwingState};
use crate::motion::stop::{plan_stop, FillerPicker};

/// Server-authoritative data for one spin. Owned by the spin controller,
/// handed to the reel before `start_rolling`.
#[derive(Debug, Clone, Default)]
pub struct StripData {
    /// The full reel band; filler symbols walk through it while scrolling.
    pub strip: Vec<SymbolId>,
    /// Per-ring-row display symbols, used as the drop-in fallback.
    pub current_strip: Vec<SymbolId>,
    /// Per-ring-row pay values for the settled window.
    pub current_pay_strip: Vec<u32>,
    /// Per-ring-row symbols that must be visible at rest.
    pub current_symbol_index_strip: Vec<SymbolId>,
    /// Offset into `strip` where the stop must land. Must be in range by
    /// `spin_stop` time or the spin aborts.
    pub rng: usize,
}

/// One reel: a slot ring, its physics, and the phase state machine.
pub struct Reel {
    profile: ReelProfile,
    config: ReelConfig,
    symbol_config: SymbolConfig,
    ring: Option<SlotRing>,
    physics: ReelPhysics,
    rate: f32,
    motion: MotionState,
    phase: MotionPhase,
    strip: StripData,
    filler: FillerPicker,
    ticker: FixedTicker,
    events: Vec<ReelEvent>,
    completion: Option<Completion>,
    easing: Easing,
    blur: bool,
}

impl Reel {
    pub fn new(profile: ReelProfile) -> Self {
        let physics = ReelPhysics::derive(&profile.tuning, 1.0);
        Self {
            profile,
            config: ReelConfig::default(),
            symbol_config: SymbolConfig::default(),
            ring: None,
            physics,
            rate: 1.0,
            motion: MotionState::new(0),
            phase: MotionPhase::Idle,
            strip: StripData::default(),
            filler: FillerPicker::new(0),
            ticker: FixedTicker::default(),
            events: Vec::new(),
            completion: None,
            easing: Easing::Smooth,
            blur: false,
        }
    }

    /// One-time setup: build the slot ring. Calling again with the same
    /// geometry is a no-op; different geometry is a configuration error.
    pub fn configure(
        &mut self,
        config: ReelConfig,
        symbols: SymbolConfig,
    ) -> Result<(), ReelError> {
        if self.ring.is_some() {
            if config != self.config || symbols != self.symbol_config {
                return Err(ReelError::GeometryMismatch);
            }
            return Ok(());
        }
        let ring = SlotRing::build(&config, &symbols)?;
        self.motion.reset(ring.initial_last_slot());
        self.filler = FillerPicker::new(config.reel_index as u64);
        self.config = config;
        self.symbol_config = symbols;
        self.ring = Some(ring);
        Ok(())
    }

    /// Clear motion state between spins. Idempotent; also the only way out
    /// of the `Faulted` state. The filler cursor rewinds relative to the
    /// last stop offset so the band appears continuous across spins.
    pub fn reset(&mut self) {
        self.filler.rewind(self.strip.rng, self.strip.strip.len());
        let initial_last = self
            .ring
            .as_ref()
            .map(|r| r.initial_last_slot())
            .unwrap_or(0);
        self.motion.reset(initial_last);
        self.phase = MotionPhase::Idle;
        self.easing = Easing::Smooth;
        self.blur = false;
        self.completion = None;
    }

    pub fn set_strip_data(&mut self, data: StripData) {
        self.strip = data;
    }

    /// Extra full rotations before settling, for visual emphasis. Clamped
    /// to at least 1.
    pub fn set_stop_multiplier(&mut self, mult: u32) {
        self.motion.stop_mult = mult.max(1);
    }

    /// Re-derive the effective physics for a global rate multiplier:
    /// speeds scale up, durations scale down.
    pub fn set_rate(&mut self, rate: f32) {
        self.rate = rate;
        self.physics = ReelPhysics::derive(&self.profile.tuning, rate);
    }

    /// Begin the continuous rolling loop. The turbo flag is latched here
    /// for the whole spin.
    pub fn start_rolling(&mut self, ctx: &SpinContext, easing: Easing) -> Result<(), ReelError> {
        if self.ring.is_none() {
            return Err(ReelError::NotConfigured);
        }
        if !self.profile.features.normal_rolling {
            return Err(ReelError::RollingDisabled);
        }
        if self.phase.kind() != PhaseKind::Idle {
            return Err(ReelError::WrongPhase(self.phase.kind()));
        }

        self.motion.turbo = ctx.turbo_enabled;
        self.motion.cur_speed = 0.0;
        self.motion.at_top_speed = false;
        self.motion.stopping = false;
        self.motion.exact_window = false;
        self.easing = easing;
        self.blur = true;
        if let Some(ring) = self.ring.as_mut() {
            ring.set_masked_visible(true);
        }
        self.phase = if self.profile.features.start_swing {
            MotionPhase::StartSwing(SwingState::new(
                self.physics.swing.start_distance,
                self.physics.swing.start_time,
                easing,
            ))
        } else {
            MotionPhase::Accelerating
        };
        log::debug!("reel {}: rolling", self.config.reel_index);
        Ok(())
    }

    /// Request the stop: compute the change countdown from the current
    /// visual state and begin decelerating. Fails fast when the rng offset
    /// does not fit the strip — the reel freezes rather than settling on
    /// undefined symbols.
    pub fn spin_stop(&mut self, need_slow: bool) -> Result<Completion, ReelError> {
        let ring = match self.ring.as_ref() {
            Some(ring) => ring,
            None => return Err(ReelError::NotConfigured),
        };
        match self.phase.kind() {
            PhaseKind::Accelerating | PhaseKind::Cruising => {}
            other => return Err(ReelError::WrongPhase(other)),
        }
        let len = self.strip.strip.len();
        if self.strip.rng >= len {
            log::warn!(
                "reel {}: rng offset {} outside strip of length {}; freezing",
                self.config.reel_index,
                self.strip.rng,
                len
            );
            self.phase = MotionPhase::Faulted;
            return Err(ReelError::RngOutOfRange {
                rng: self.strip.rng,
                len,
            });
        }

        let plan = plan_stop(ring, self.motion.stop_mult);
        self.motion.need_slow = need_slow;
        self.motion.base_changes = plan.base_changes;
        self.motion.changes_remaining = plan.changes_remaining;
        self.motion.total_changes = plan.changes_remaining;
        self.motion.stopping = true;
        self.motion.exact_window = false;
        self.blur = false;
        self.phase = MotionPhase::Decelerating;
        log::debug!(
            "reel {}: stopping, {} changes ({} base)",
            self.config.reel_index,
            plan.changes_remaining,
            plan.base_changes
        );

        let completion = Completion::pending();
        self.completion = Some(completion.clone());
        Ok(completion)
    }

    /// Run the drop presentation instead of the rolling loop.
    pub fn start_drop(&mut self, cfg: DropConfig) -> Result<Completion, ReelError> {
        if self.ring.is_none() {
            return Err(ReelError::NotConfigured);
        }
        if !self.profile.features.drop_rolling {
            return Err(ReelError::DropDisabled);
        }
        if self.phase.kind() != PhaseKind::Idle {
            return Err(ReelError::WrongPhase(self.phase.kind()));
        }

        let symbols = cfg
            .symbols
            .clone()
            .unwrap_or_else(|| self.strip.current_strip.clone());
        let pays = cfg
            .pays
            .clone()
            .unwrap_or_else(|| self.strip.current_pay_strip.clone());
        if cfg.drop_type != DropType::Out && (symbols.is_empty() || pays.is_empty()) {
            return Err(ReelError::MissingDropStrips);
        }

        let completion = Completion::pending();
        self.completion = Some(completion.clone());
        if let Some(ring) = self.ring.as_mut() {
            let spin = DropSpin::new(
                cfg,
                symbols,
                pays,
                self.motion.stop_mult,
                self.config.reel_index,
                completion.clone(),
                ring,
                &self.physics,
            );
            self.phase = MotionPhase::Dropping(spin);
        }
        Ok(completion)
    }

    /// External tick entry point: fold the frame delta into fixed engine
    /// ticks and advance the active phase.
    pub fn advance(&mut self, frame_dt: f32, ctx: &SpinContext) {
        let steps = self.ticker.steps(frame_dt);
        for _ in 0..steps {
            self.step(ctx);
        }
    }

    fn step(&mut self, ctx: &SpinContext) {
        match self.phase.kind() {
            PhaseKind::Idle | PhaseKind::Faulted => {}
            PhaseKind::StartSwing => self.swing_step(),
            PhaseKind::Accelerating | PhaseKind::Cruising | PhaseKind::Decelerating => {
                self.roll_step(ctx)
            }
            PhaseKind::EndBounce => self.bounce_step(),
            PhaseKind::Dropping => self.drop_step(ctx),
        }
    }

    /// Cosmetic lead-in: every slot swings backward together, then the main
    /// loop pulls them forward through it.
    fn swing_step(&mut self) {
        let dt = self.ticker.dt();
        let sign = self.config.direction.roll_sign();
        let mut finished = false;
        if let MotionPhase::StartSwing(swing) = &mut self.phase {
            let delta = swing.advance(dt);
            if let Some(ring) = self.ring.as_mut() {
                ring.translate_all(delta * -sign);
            }
            finished = swing.is_complete();
        }
        if finished {
            self.phase = MotionPhase::Accelerating;
        }
    }

    fn roll_step(&mut self, ctx: &SpinContext) {
        let dt = self.ticker.dt();
        let dis_raw =
            self.physics
                .tick_displacement(&mut self.motion, ctx, dt, self.config.engine_rows);
        if self.phase.kind() == PhaseKind::Accelerating && self.motion.at_top_speed {
            self.phase = MotionPhase::Cruising;
        }
        let direction = self.config.direction;
        let sign = direction.roll_sign();
        let in_order = direction.is_in_order();
        let ring = match self.ring.as_mut() {
            Some(ring) => ring,
            None => return,
        };

        // On the final change, shorten the step so the trailing slot lands
        // exactly on the bound instead of overshooting it.
        let mut dis = dis_raw;
        if self.motion.stopping && self.motion.changes_remaining == 1 {
            let v = ring.axis_of(self.motion.last_slot);
            let bound = ring.trailing_bound();
            if sign > 0.0 {
                if v + dis >= bound {
                    dis = bound - v;
                }
            } else if v - dis <= bound {
                dis = v - bound;
            }
        }
        let delta = dis * sign;

        // Every slot moves; the trailing slot last, because its crossing
        // decides which slot trails next tick.
        let last = self.motion.last_slot;
        for i in 0..ring.len() {
            if i != last {
                ring.translate_slot(i, delta);
            }
        }
        let new_axis = ring.axis_of(last) + delta;
        ring.set_axis(last, new_axis);
        if !ring.crossed_trailing(new_axis) {
            return;
        }

        // Recycle past the leading slot and take the next symbol.
        let lead = if in_order {
            ring.next_index(last)
        } else {
            ring.prev_index(last)
        };
        let new_last = if in_order {
            ring.prev_index(last)
        } else {
            ring.next_index(last)
        };

        if self.motion.stopping {
            self.motion.changes_remaining = self.motion.changes_remaining.saturating_sub(1);
            if self.motion.changes_remaining + 1 == self.motion.base_changes {
                self.motion.exact_window = true;
            }
        }

        let (symbol, pay) = if self.motion.exact_window {
            (
                self.strip
                    .current_symbol_index_strip
                    .get(last)
                    .copied()
                    .unwrap_or_default(),
                self.strip.current_pay_strip.get(last).copied().unwrap_or(0),
            )
        } else {
            let symbol =
                self.filler
                    .next(&self.strip.strip, &self.profile.filler_tables, in_order);
            (symbol, 0)
        };

        let lead_axis = ring.axis_of(lead);
        ring.set_axis(last, lead_axis - sign * ring.pitch());
        ring.slot_mut(last).set_symbol(symbol, pay);
        self.motion.last_slot = new_last;

        if self.motion.stopping && self.motion.changes_remaining == 0 {
            if self.profile.features.end_bounce {
                let per_sec = (dis_raw / dt).max(f32::EPSILON);
                let forward_time = self.physics.swing.end_distance / per_sec;
                let back_time = if ctx.fast_forward {
                    self.physics.swing.end_pass_time
                } else {
                    self.physics.swing.end_time
                };
                self.phase = MotionPhase::EndBounce(BounceState::new(
                    self.physics.swing.end_distance,
                    forward_time,
                    back_time,
                    Easing::Linear,
                ));
            } else {
                self.settle();
            }
        }
    }

    fn bounce_step(&mut self) {
        let dt = self.ticker.dt();
        let sign = self.config.direction.roll_sign();
        let mut finished = false;
        if let MotionPhase::EndBounce(bounce) = &mut self.phase {
            let delta = bounce.advance(dt);
            if let Some(ring) = self.ring.as_mut() {
                ring.translate_all(delta * sign);
            }
            finished = bounce.is_complete();
        }
        if finished {
            self.settle();
        }
    }

    fn drop_step(&mut self, ctx: &SpinContext) {
        let dt = self.ticker.dt();
        let mut finished = false;
        if let MotionPhase::Dropping(spin) = &mut self.phase {
            if let Some(ring) = self.ring.as_mut() {
                finished = spin.advance(
                    dt,
                    ring,
                    &self.physics,
                    ctx,
                    &self.profile.features,
                    &mut self.events,
                );
            }
        }
        if finished {
            self.completion = None;
            self.phase = MotionPhase::Idle;
        }
    }

    fn settle(&mut self) {
        if let Some(ring) = self.ring.as_mut() {
            // Sub-pixel drift accumulates over thousands of translations;
            // settle snaps every slot to its exact home.
            ring.snap_all_home();
            ring.set_masked_visible(false);
        }
        self.blur = false;
        self.motion.stopping = false;
        self.motion.exact_window = false;
        self.motion.at_top_speed = false;
        self.motion.cur_speed = 0.0;
        self.phase = MotionPhase::Idle;
        self.events.push(ReelEvent::RollingEnded {
            reel: self.config.reel_index,
        });
        if let Some(completion) = self.completion.take() {
            completion.resolve();
        }
        log::debug!("reel {}: settled", self.config.reel_index);
    }

    /// Bulk-assign symbols and pays by ring index, outside any animation.
    pub fn set_symbols(&mut self, symbols: &[SymbolId], pays: &[u32]) {
        if let Some(ring) = self.ring.as_mut() {
            for i in 0..ring.len() {
                let slot = ring.slot_mut(i);
                let symbol = symbols.get(i).copied().unwrap_or(slot.symbol);
                let pay = pays.get(i).copied().unwrap_or(slot.pay);
                slot.set_symbol(symbol, pay);
            }
        }
    }

    // -- Read-only state for the controller and the renderer --

    pub fn phase_kind(&self) -> PhaseKind {
        self.phase.kind()
    }

    pub fn is_settled(&self) -> bool {
        self.phase.kind() == PhaseKind::Idle
    }

    /// Symbols should render motion-blurred while the reel cruises.
    pub fn is_blurred(&self) -> bool {
        self.blur
    }

    /// The active rate multiplier set by `set_rate`.
    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Easing requested for this spin's swing legs.
    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn config(&self) -> &ReelConfig {
        &self.config
    }

    pub fn motion(&self) -> &MotionState {
        &self.motion
    }

    pub fn ring(&self) -> Option<&SlotRing> {
        self.ring.as_ref()
    }

    pub fn slots(&self) -> &[Slot] {
        self.ring.as_ref().map(|r| r.slots()).unwrap_or(&[])
    }

    /// Non-masked slot symbols in ring order — the settled window.
    pub fn visible_symbols(&self) -> Vec<SymbolId> {
        match &self.ring {
            Some(ring) => ring
                .visible()
                .iter()
                .map(|&i| ring.slot(i).symbol)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Drain queued notifications; call once per frame.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, ReelEvent> {
        self.events.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::DropBounceType;
    use crate::config::{ReelDirection, ReelFeatures};
    use crate::core::time::DEFAULT_TICK_DT;

    fn features_all() -> ReelFeatures {
        ReelFeatures {
            start_swing: true,
            end_bounce: true,
            normal_rolling: true,
            drop_rolling: true,
            drop_bounce: false,
        }
    }

    fn reel(direction: ReelDirection, features: ReelFeatures) -> Reel {
        let profile = ReelProfile {
            features,
            ..ReelProfile::default()
        };
        let mut reel = Reel::new(profile);
        let config = ReelConfig {
            direction,
            ..ReelConfig::default()
        };
        reel.configure(config, SymbolConfig::default()).unwrap();
        reel
    }

    fn strip_data() -> StripData {
        StripData {
            strip: [3, 1, 4, 1, 5, 9, 2, 6].map(SymbolId).to_vec(),
            current_strip: [9, 4, 1, 5, 9].map(SymbolId).to_vec(),
            current_pay_strip: vec![0, 10, 5, 25, 0],
            current_symbol_index_strip: [9, 4, 1, 5, 9].map(SymbolId).to_vec(),
            rng: 2,
        }
    }

    fn run_until_complete(reel: &mut Reel, ctx: &SpinContext, completion: &Completion) -> usize {
        let mut ticks = 0;
        while !completion.is_complete() {
            reel.advance(DEFAULT_TICK_DT, ctx);
            ticks += 1;
            assert!(ticks < 100_000, "reel never settled");
        }
        ticks
    }

    fn roll_to_cruise(reel: &mut Reel, ctx: &SpinContext) {
        for _ in 0..120 {
            reel.advance(DEFAULT_TICK_DT, ctx);
        }
        assert_eq!(reel.phase_kind(), PhaseKind::Cruising);
    }

    #[test]
    fn settles_on_target_window() {
        let ctx = SpinContext::new();
        let mut reel = reel(ReelDirection::TopToBottom, features_all());
        reel.set_strip_data(strip_data());

        reel.start_rolling(&ctx, Easing::Smooth).unwrap();
        assert!(reel.is_blurred());
        roll_to_cruise(&mut reel, &ctx);

        let completion = reel.spin_stop(false).unwrap();
        run_until_complete(&mut reel, &ctx, &completion);

        assert_eq!(
            reel.visible_symbols(),
            vec![SymbolId(4), SymbolId(1), SymbolId(5)]
        );
        assert_eq!(reel.phase_kind(), PhaseKind::Idle);
        assert!(!reel.is_blurred());
        let slots = reel.slots();
        assert!(slots[0].hidden && slots[4].hidden);
        for slot in slots {
            assert_eq!(slot.pos, slot.home);
        }
        let events: Vec<_> = reel.drain_events().collect();
        assert!(events.contains(&ReelEvent::RollingEnded { reel: 0 }));
    }

    #[test]
    fn settles_on_target_window_every_direction() {
        for direction in [
            ReelDirection::TopToBottom,
            ReelDirection::BottomToTop,
            ReelDirection::LeftToRight,
            ReelDirection::RightToLeft,
        ] {
            let ctx = SpinContext::new();
            let mut reel = reel(direction, features_all());
            reel.set_strip_data(strip_data());
            reel.start_rolling(&ctx, Easing::Smooth).unwrap();
            roll_to_cruise(&mut reel, &ctx);
            let completion = reel.spin_stop(false).unwrap();
            run_until_complete(&mut reel, &ctx, &completion);
            assert_eq!(
                reel.visible_symbols(),
                vec![SymbolId(4), SymbolId(1), SymbolId(5)],
                "direction {direction:?}"
            );
        }
    }

    #[test]
    fn changes_remaining_counts_down_to_zero() {
        let ctx = SpinContext::new();
        let mut reel = reel(ReelDirection::TopToBottom, features_all());
        reel.set_strip_data(strip_data());
        reel.start_rolling(&ctx, Easing::Smooth).unwrap();
        roll_to_cruise(&mut reel, &ctx);

        let completion = reel.spin_stop(false).unwrap();
        let mut prev = reel.motion().changes_remaining;
        assert!(prev > 0);
        while !completion.is_complete() {
            reel.advance(DEFAULT_TICK_DT, &ctx);
            let cur = reel.motion().changes_remaining;
            assert!(
                cur == prev || cur + 1 == prev,
                "countdown jumped from {prev} to {cur}"
            );
            prev = cur;
        }
        assert_eq!(prev, 0);
    }

    #[test]
    fn stop_multiplier_scales_total_changes() {
        for mult in 1..=3u32 {
            let ctx = SpinContext::new();
            let mut reel = reel(
                ReelDirection::TopToBottom,
                ReelFeatures {
                    start_swing: false,
                    ..features_all()
                },
            );
            reel.set_strip_data(strip_data());
            reel.set_stop_multiplier(mult);
            reel.start_rolling(&ctx, Easing::Smooth).unwrap();
            // One small tick: no slot crosses, so the plan sees a rested ring.
            reel.advance(DEFAULT_TICK_DT, &ctx);

            let completion = reel.spin_stop(false).unwrap();
            let n = reel.slots().len();
            assert_eq!(reel.motion().base_changes, n);
            assert_eq!(
                reel.motion().total_changes,
                n + (mult as usize - 1) * n,
                "mult {mult}"
            );
            run_until_complete(&mut reel, &ctx, &completion);
        }
    }

    #[test]
    fn reset_is_idempotent() {
        let mut reel = reel(ReelDirection::TopToBottom, features_all());
        reel.set_strip_data(strip_data());
        reel.set_stop_multiplier(3);
        reel.reset();
        let first = reel.motion().clone();
        reel.reset();
        assert_eq!(*reel.motion(), first);
        assert_eq!(reel.phase_kind(), PhaseKind::Idle);
    }

    #[test]
    fn out_of_range_rng_freezes_the_reel() {
        let ctx = SpinContext::new();
        let mut reel = reel(ReelDirection::TopToBottom, features_all());
        let mut data = strip_data();
        data.rng = data.strip.len();
        reel.set_strip_data(data);

        reel.start_rolling(&ctx, Easing::Smooth).unwrap();
        roll_to_cruise(&mut reel, &ctx);

        let before: Vec<SymbolId> = reel.slots().iter().map(|s| s.symbol).collect();
        let err = reel.spin_stop(false).unwrap_err();
        assert_eq!(err, ReelError::RngOutOfRange { rng: 8, len: 8 });
        assert_eq!(reel.phase_kind(), PhaseKind::Faulted);

        // Frozen: no settling, no further motion, no mutated symbols.
        let positions: Vec<_> = reel.slots().iter().map(|s| s.pos).collect();
        for _ in 0..10 {
            reel.advance(DEFAULT_TICK_DT, &ctx);
        }
        let after: Vec<SymbolId> = reel.slots().iter().map(|s| s.symbol).collect();
        assert_eq!(before, after);
        let later: Vec<_> = reel.slots().iter().map(|s| s.pos).collect();
        assert_eq!(positions, later);
    }

    #[test]
    fn turbo_flag_latches_at_start() {
        let mut reel = reel(ReelDirection::TopToBottom, features_all());
        reel.set_strip_data(strip_data());
        let turbo = SpinContext::new().with_turbo(true);
        reel.start_rolling(&turbo, Easing::Smooth).unwrap();
        // The context may flip later; the latched flag holds for the spin.
        reel.advance(DEFAULT_TICK_DT, &SpinContext::new());
        assert!(reel.motion().turbo);
    }

    #[test]
    fn rolling_errors_are_synchronous() {
        let mut unconfigured = Reel::new(ReelProfile::default());
        assert_eq!(
            unconfigured
                .start_rolling(&SpinContext::new(), Easing::Smooth)
                .unwrap_err(),
            ReelError::NotConfigured
        );

        let mut disabled = reel(
            ReelDirection::TopToBottom,
            ReelFeatures {
                normal_rolling: false,
                ..features_all()
            },
        );
        assert_eq!(
            disabled
                .start_rolling(&SpinContext::new(), Easing::Smooth)
                .unwrap_err(),
            ReelError::RollingDisabled
        );

        let mut rolling = reel(ReelDirection::TopToBottom, features_all());
        rolling.set_strip_data(strip_data());
        rolling.start_rolling(&SpinContext::new(), Easing::Smooth).unwrap();
        assert!(matches!(
            rolling
                .start_rolling(&SpinContext::new(), Easing::Smooth)
                .unwrap_err(),
            ReelError::WrongPhase(_)
        ));
    }

    #[test]
    fn reconfigure_with_other_geometry_fails() {
        let mut reel = reel(ReelDirection::TopToBottom, features_all());
        // Same geometry: fine.
        reel.configure(
            ReelConfig::default(),
            SymbolConfig::default(),
        )
        .unwrap();
        // Different gap: fatal.
        let other = ReelConfig {
            symbol_gap: 12.0,
            ..ReelConfig::default()
        };
        assert_eq!(
            reel.configure(other, SymbolConfig::default()).unwrap_err(),
            ReelError::GeometryMismatch
        );
    }

    #[test]
    fn drop_out_in_orders_events_and_completion() {
        let ctx = SpinContext::new();
        let mut reel = reel(ReelDirection::TopToBottom, features_all());
        reel.set_strip_data(strip_data());

        let completion = reel
            .start_drop(DropConfig {
                drop_type: DropType::OutIn,
                ..DropConfig::default()
            })
            .unwrap();
        assert!(!completion.is_complete());
        run_until_complete(&mut reel, &ctx, &completion);

        let events: Vec<_> = reel.drain_events().collect();
        let out_pos = events
            .iter()
            .position(|e| matches!(e, ReelEvent::DropOutEnded { .. }))
            .expect("no drop-out end");
        let in_pos = events
            .iter()
            .position(|e| matches!(e, ReelEvent::DropInEnded { .. }))
            .expect("no drop-in end");
        assert!(out_pos < in_pos, "out must end before in");

        // One per-slot event per leg over the three covered rows.
        let per_symbol = events
            .iter()
            .filter(|e| matches!(e, ReelEvent::SymbolDropEnded { .. }))
            .count();
        assert_eq!(per_symbol, 6);

        // Drop-in assigned the exact window, no filler phase.
        assert_eq!(
            reel.visible_symbols(),
            vec![SymbolId(4), SymbolId(1), SymbolId(5)]
        );
        assert_eq!(reel.phase_kind(), PhaseKind::Idle);
    }

    #[test]
    fn drop_requires_the_feature_switch() {
        let mut reel = reel(
            ReelDirection::TopToBottom,
            ReelFeatures {
                drop_rolling: false,
                ..features_all()
            },
        );
        reel.set_strip_data(strip_data());
        assert_eq!(
            reel.start_drop(DropConfig::default()).unwrap_err(),
            ReelError::DropDisabled
        );
    }

    #[test]
    fn drop_in_requires_strips() {
        let mut reel = reel(ReelDirection::TopToBottom, features_all());
        // No strip data set and none supplied in the config.
        assert_eq!(
            reel.start_drop(DropConfig::default()).unwrap_err(),
            ReelError::MissingDropStrips
        );
    }

    #[test]
    fn staggered_drop_with_symbol_bounce_settles() {
        let ctx = SpinContext::new();
        let mut reel = reel(
            ReelDirection::TopToBottom,
            ReelFeatures {
                drop_bounce: true,
                ..features_all()
            },
        );
        reel.set_strip_data(strip_data());
        let completion = reel
            .start_drop(DropConfig {
                drop_type: DropType::OutIn,
                stagger_in: true,
                stagger_out: true,
                bounce: true,
                bounce_slots: vec![2],
                bounce_type: DropBounceType::Symbol,
                ..DropConfig::default()
            })
            .unwrap();
        run_until_complete(&mut reel, &ctx, &completion);
        for slot in reel.slots() {
            assert_eq!(slot.pos, slot.home);
        }
    }

    #[test]
    fn fast_forward_shortens_the_stop() {
        let plain_ctx = SpinContext::new();
        let mut plain = reel(ReelDirection::TopToBottom, features_all());
        plain.set_strip_data(strip_data());
        plain.start_rolling(&plain_ctx, Easing::Smooth).unwrap();
        roll_to_cruise(&mut plain, &plain_ctx);
        let completion = plain.spin_stop(false).unwrap();
        let plain_ticks = run_until_complete(&mut plain, &plain_ctx, &completion);

        let pass_ctx = SpinContext::new().with_fast_forward(true);
        let mut pass = reel(ReelDirection::TopToBottom, features_all());
        pass.set_strip_data(strip_data());
        pass.start_rolling(&pass_ctx, Easing::Smooth).unwrap();
        roll_to_cruise(&mut pass, &pass_ctx);
        let completion = pass.spin_stop(false).unwrap();
        let pass_ticks = run_until_complete(&mut pass, &pass_ctx, &completion);

        assert!(
            pass_ticks < plain_ticks,
            "pass {pass_ticks} vs plain {plain_ticks}"
        );
        assert_eq!(
            pass.visible_symbols(),
            vec![SymbolId(4), SymbolId(1), SymbolId(5)]
        );
    }
}
