// motion/drop.rs
//
// Drop Engine — the alternate presentation where symbols fall out of and
// back into the window instead of scrolling. A small sequence of typed
// phases (out, in, reel bounce), each a list of per-slot delay/tween
// records; no continuation chains.

use glam::Vec2;

use crate::api::context::SpinContext;
use crate::api::types::{Completion, DropBounceType, DropType, ReelEvent, SymbolId};
use crate::config::{ReelDirection, ReelFeatures};
use crate::core::physics::ReelPhysics;
use crate::core::ring::SlotRing;

use super::easing::Easing;
use super::phase::BounceState;
use super::tween::ScalarTween;

/// Per-spin drop request.
#[derive(Debug, Clone)]
pub struct DropConfig {
    pub drop_type: DropType,
    /// Per-ring-row symbols assigned on drop-in. Falls back to the reel's
    /// current strip data when `None`.
    pub symbols: Option<Vec<SymbolId>>,
    pub pays: Option<Vec<u32>>,
    /// Stagger drop-in by row; without it every slot falls concurrently.
    pub stagger_in: bool,
    pub stagger_out: bool,
    /// Scale the stagger delays by the stop multiplier.
    pub need_slow: bool,
    /// Request a landing bounce (still gated by the reel's drop-bounce
    /// feature switch).
    pub bounce: bool,
    /// Ring indices bounced when `bounce_type` is `Symbol`.
    pub bounce_slots: Vec<usize>,
    pub bounce_type: DropBounceType,
    pub easing: Easing,
    pub bounce_easing: Easing,
}

impl Default for DropConfig {
    fn default() -> Self {
        Self {
            drop_type: DropType::OutIn,
            symbols: None,
            pays: None,
            stagger_in: false,
            stagger_out: false,
            need_slow: false,
            bounce: true,
            bounce_slots: Vec::new(),
            bounce_type: DropBounceType::Symbol,
            easing: Easing::Smooth,
            bounce_easing: Easing::Smooth,
        }
    }
}

#[derive(Debug, Clone)]
enum DropLeg {
    Waiting,
    Falling(ScalarTween),
    BounceOut {
        tween: ScalarTween,
        distance: f32,
        time: f32,
        easing: Easing,
    },
    BounceBack {
        tween: ScalarTween,
        distance: f32,
    },
    Done,
}

/// One slot's journey through the active drop leg.
#[derive(Debug, Clone)]
struct DropSlot {
    index: usize,
    delay: f32,
    start: Vec2,
    target: Vec2,
    leg: DropLeg,
}

impl DropSlot {
    fn is_done(&self) -> bool {
        matches!(self.leg, DropLeg::Done)
    }
}

#[derive(Debug, Clone)]
enum DropPhase {
    Out { slots: Vec<DropSlot> },
    In { slots: Vec<DropSlot> },
    ReelBounce(BounceState),
    Done,
}

/// State machine for one drop presentation. Owned by the reel's `Dropping`
/// phase and advanced once per fixed tick.
#[derive(Debug, Clone)]
pub struct DropSpin {
    cfg: DropConfig,
    symbols: Vec<SymbolId>,
    pays: Vec<u32>,
    stop_mult: u32,
    reel_index: usize,
    phase: DropPhase,
    completion: Completion,
}

impl DropSpin {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        cfg: DropConfig,
        symbols: Vec<SymbolId>,
        pays: Vec<u32>,
        stop_mult: u32,
        reel_index: usize,
        completion: Completion,
        ring: &mut SlotRing,
        physics: &ReelPhysics,
    ) -> Self {
        let mut spin = Self {
            cfg,
            symbols,
            pays,
            stop_mult,
            reel_index,
            phase: DropPhase::Done,
            completion,
        };
        spin.phase = match spin.cfg.drop_type {
            DropType::In => DropPhase::In {
                slots: spin.build_in(ring, physics),
            },
            DropType::Out | DropType::OutIn => DropPhase::Out {
                slots: spin.build_out(ring, physics),
            },
        };
        spin
    }

    /// Advance the active phase by one tick. Returns true once the whole
    /// sequence has settled and the completion resolved.
    pub fn advance(
        &mut self,
        dt: f32,
        ring: &mut SlotRing,
        physics: &ReelPhysics,
        ctx: &SpinContext,
        features: &ReelFeatures,
        events: &mut Vec<ReelEvent>,
    ) -> bool {
        let dt = if ctx.fast_forward {
            dt * physics.speed.pass_rate
        } else {
            dt
        };
        match &mut self.phase {
            DropPhase::Out { slots } => {
                let fall = FallParams {
                    kind: DropType::Out,
                    duration: physics.drop.drop_out_time,
                    easing: self.cfg.easing,
                    bounce: None,
                    reel_index: self.reel_index,
                };
                for s in slots.iter_mut() {
                    step_fall(s, dt, &fall, ring, events);
                }
                if slots.iter().all(DropSlot::is_done) {
                    events.push(ReelEvent::DropOutEnded {
                        reel: self.reel_index,
                    });
                    if self.cfg.drop_type == DropType::OutIn {
                        self.phase = DropPhase::In {
                            slots: self.build_in(ring, physics),
                        };
                    } else {
                        self.completion.resolve();
                        self.phase = DropPhase::Done;
                    }
                }
            }
            DropPhase::In { slots } => {
                let fall = FallParams {
                    kind: DropType::In,
                    duration: physics.drop.drop_in_time,
                    easing: self.cfg.easing,
                    bounce: symbol_bounce(&self.cfg, features, physics),
                    reel_index: self.reel_index,
                };
                for s in slots.iter_mut() {
                    step_fall(s, dt, &fall, ring, events);
                }
                if slots.iter().all(DropSlot::is_done) {
                    if features.drop_bounce
                        && self.cfg.bounce
                        && self.cfg.bounce_type == DropBounceType::Reel
                    {
                        self.phase = DropPhase::ReelBounce(BounceState::new(
                            physics.drop.bounce_distance,
                            physics.drop.bounce_time,
                            physics.drop.bounce_time,
                            self.cfg.bounce_easing,
                        ));
                    } else {
                        self.finish_in(events);
                    }
                }
            }
            DropPhase::ReelBounce(bounce) => {
                let delta = bounce.advance(dt);
                let sign = -ring.direction().roll_sign();
                ring.translate_all(delta * sign);
                if bounce.is_complete() {
                    ring.snap_all_home();
                    self.finish_in(events);
                }
            }
            DropPhase::Done => {}
        }
        matches!(self.phase, DropPhase::Done)
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.phase, DropPhase::Done)
    }

    fn finish_in(&mut self, events: &mut Vec<ReelEvent>) {
        events.push(ReelEvent::DropInEnded {
            reel: self.reel_index,
        });
        self.completion.resolve();
        self.phase = DropPhase::Done;
    }

    /// Iteration endpoints over the inter-buffer range: `start` is the slot
    /// nearest the trailing edge (row offset 0), `end` the farthest.
    fn covered_range(&self, ring: &SlotRing) -> (usize, usize) {
        let eb = ring.extra_buffer();
        let last = ring.len() - 1 - eb;
        if ring.direction().is_in_order() {
            (last, eb)
        } else {
            (eb, last)
        }
    }

    fn stagger_delay(&self, base: f32, row_offset: usize) -> f32 {
        let slow = if self.cfg.need_slow {
            self.stop_mult as f32
        } else {
            1.0
        };
        base * row_offset as f32 * slow
    }

    /// Every covered slot translates off-screen past the trailing edge by
    /// the same distance, far enough that the farthest slot fully exits.
    fn build_out(&self, ring: &SlotRing, physics: &ReelPhysics) -> Vec<DropSlot> {
        let (start, end) = self.covered_range(ring);
        let direction = ring.direction();
        let far_home = axis_component(direction, ring.slot(end).home);
        let distance = (far_home - ring.trailing_bound()).abs() + ring.pitch();

        covered_indices(start, end)
            .into_iter()
            .enumerate()
            .map(|(row_offset, i)| {
                let home = ring.slot(i).home;
                let delay = if self.cfg.stagger_out {
                    self.stagger_delay(physics.drop.drop_out_symbol_delay, row_offset)
                } else {
                    0.0
                };
                DropSlot {
                    index: i,
                    delay,
                    start: home,
                    target: offset_along_axis(direction, home, direction.roll_sign() * distance),
                    leg: DropLeg::Waiting,
                }
            })
            .collect()
    }

    /// Slots stack one pitch apart past the leading edge, take their exact
    /// target symbol immediately, then fall to their home positions.
    fn build_in(&self, ring: &mut SlotRing, physics: &ReelPhysics) -> Vec<DropSlot> {
        let (start, end) = self.covered_range(ring);
        let direction = ring.direction();
        let lead_sign = -direction.roll_sign();
        let pitch = ring.pitch();
        let leading = ring.leading_bound();

        covered_indices(start, end)
            .into_iter()
            .enumerate()
            .map(|(row_offset, i)| {
                let symbol = self.symbols.get(i).copied().unwrap_or_default();
                let pay = self.pays.get(i).copied().unwrap_or(0);
                let home = ring.slot(i).home;
                let spawn_axis = leading + lead_sign * row_offset as f32 * pitch;
                let spawn = with_axis(direction, home, spawn_axis);
                {
                    let slot = ring.slot_mut(i);
                    slot.set_symbol(symbol, pay);
                    slot.pos = spawn;
                }
                let delay = if self.cfg.stagger_in {
                    self.stagger_delay(physics.drop.drop_in_symbol_delay, row_offset)
                } else {
                    0.0
                };
                DropSlot {
                    index: i,
                    delay,
                    start: spawn,
                    target: home,
                    leg: DropLeg::Waiting,
                }
            })
            .collect()
    }
}

struct BounceParams {
    distance: f32,
    time: f32,
    easing: Easing,
    slots: Vec<usize>,
}

/// Bounce parameters for per-symbol landings, when enabled.
fn symbol_bounce(
    cfg: &DropConfig,
    features: &ReelFeatures,
    physics: &ReelPhysics,
) -> Option<BounceParams> {
    if features.drop_bounce && cfg.bounce && cfg.bounce_type == DropBounceType::Symbol {
        Some(BounceParams {
            distance: physics.drop.bounce_distance,
            time: physics.drop.bounce_time,
            easing: cfg.bounce_easing,
            slots: cfg.bounce_slots.clone(),
        })
    } else {
        None
    }
}

struct FallParams {
    kind: DropType,
    duration: f32,
    easing: Easing,
    bounce: Option<BounceParams>,
    reel_index: usize,
}

fn step_fall(
    s: &mut DropSlot,
    dt: f32,
    fall: &FallParams,
    ring: &mut SlotRing,
    events: &mut Vec<ReelEvent>,
) {
    let direction = ring.direction();
    match &mut s.leg {
        DropLeg::Waiting => {
            s.delay -= dt;
            if s.delay <= 0.0 {
                let leftover = -s.delay;
                let mut tween = ScalarTween::new(0.0, 1.0, fall.duration, fall.easing);
                let t = if leftover > 0.0 {
                    tween.advance(leftover)
                } else {
                    tween.value()
                };
                ring.slot_mut(s.index).pos = s.start.lerp(s.target, t);
                s.leg = if tween.is_complete() {
                    landed(s.index, s.target, fall, ring, events)
                } else {
                    DropLeg::Falling(tween)
                };
            }
        }
        DropLeg::Falling(tween) => {
            let t = tween.advance(dt);
            ring.slot_mut(s.index).pos = s.start.lerp(s.target, t);
            if tween.is_complete() {
                s.leg = landed(s.index, s.target, fall, ring, events);
            }
        }
        DropLeg::BounceOut {
            tween,
            distance,
            time,
            easing,
        } => {
            let (distance, time, easing) = (*distance, *time, *easing);
            let v = tween.advance(dt);
            let sign = -direction.roll_sign();
            ring.slot_mut(s.index).pos = offset_along_axis(direction, s.target, sign * v);
            if tween.is_complete() {
                s.leg = DropLeg::BounceBack {
                    tween: ScalarTween::new(0.0, distance, time, easing),
                    distance,
                };
            }
        }
        DropLeg::BounceBack { tween, distance } => {
            let distance = *distance;
            let v = tween.advance(dt);
            let sign = -direction.roll_sign();
            ring.slot_mut(s.index).pos =
                offset_along_axis(direction, s.target, sign * (distance - v));
            if tween.is_complete() {
                ring.slot_mut(s.index).pos = s.target;
                s.leg = DropLeg::Done;
            }
        }
        DropLeg::Done => {}
    }
}

/// Slot reached its fall target: snap, notify, and start a bounce when this
/// slot is listed for one.
fn landed(
    index: usize,
    target: Vec2,
    fall: &FallParams,
    ring: &mut SlotRing,
    events: &mut Vec<ReelEvent>,
) -> DropLeg {
    ring.slot_mut(index).pos = target;
    events.push(ReelEvent::SymbolDropEnded {
        reel: fall.reel_index,
        slot: index,
        drop: fall.kind,
    });
    match &fall.bounce {
        Some(b) if b.slots.contains(&index) => DropLeg::BounceOut {
            tween: ScalarTween::new(0.0, b.distance, b.time, b.easing),
            distance: b.distance,
            time: b.time,
            easing: b.easing,
        },
        _ => DropLeg::Done,
    }
}

fn covered_indices(start: usize, end: usize) -> Vec<usize> {
    if start <= end {
        (start..=end).collect()
    } else {
        (end..=start).rev().collect()
    }
}

fn axis_component(direction: ReelDirection, v: Vec2) -> f32 {
    if direction.is_vertical() {
        v.y
    } else {
        v.x
    }
}

fn offset_along_axis(direction: ReelDirection, base: Vec2, offset: f32) -> Vec2 {
    if direction.is_vertical() {
        Vec2::new(base.x, base.y + offset)
    } else {
        Vec2::new(base.x + offset, base.y)
    }
}

fn with_axis(direction: ReelDirection, base: Vec2, value: f32) -> Vec2 {
    if direction.is_vertical() {
        Vec2::new(base.x, value)
    } else {
        Vec2::new(value, base.y)
    }
}
