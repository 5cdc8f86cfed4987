// bank.rs
//
// ReelBank — owns a machine's reels and drives them as one unit. Only
// non-idle reels are advanced each frame; idle reels have nothing to do.

use crate::api::context::SpinContext;
use crate::api::types::ReelEvent;
use crate::motion::phase::PhaseKind;
use crate::reel::Reel;

/// Flat container for a machine's reels, advanced together once per frame.
#[derive(Default)]
pub struct ReelBank {
    reels: Vec<Reel>,
}

impl ReelBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a reel; returns its index in the bank.
    pub fn add(&mut self, reel: Reel) -> usize {
        self.reels.push(reel);
        self.reels.len() - 1
    }

    pub fn len(&self) -> usize {
        self.reels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Reel> {
        self.reels.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Reel> {
        self.reels.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Reel> {
        self.reels.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Reel> {
        self.reels.iter_mut()
    }

    /// Advance every active reel. Idle and faulted reels are skipped; they
    /// would not move anyway.
    pub fn advance_all(&mut self, frame_dt: f32, ctx: &SpinContext) {
        for reel in &mut self.reels {
            match reel.phase_kind() {
                PhaseKind::Idle | PhaseKind::Faulted => {}
                _ => reel.advance(frame_dt, ctx),
            }
        }
    }

    /// Collect queued notifications from every reel, in reel order.
    pub fn drain_events(&mut self) -> Vec<ReelEvent> {
        let mut events = Vec::new();
        for reel in &mut self.reels {
            events.extend(reel.drain_events());
        }
        events
    }

    /// Whether every reel is back at rest.
    pub fn all_settled(&self) -> bool {
        self.reels.iter().all(Reel::is_settled)
    }

    pub fn is_spinning(&self) -> bool {
        !self.all_settled()
    }

    pub fn reset_all(&mut self) {
        for reel in &mut self.reels {
            reel.reset();
        }
    }
}
