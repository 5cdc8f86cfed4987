// motion/mod.rs
//
// Motion building blocks: easing curves, the scalar tween primitive, the
// phase state machine vocabulary, stop synchronization, and the drop
// engine.

pub mod drop;
pub mod easing;
pub mod phase;
pub mod stop;
pub mod tween;

pub use drop::{DropConfig, DropSpin};
pub use easing::{ease, lerp, Easing};
pub use phase::{BounceState, MotionPhase, MotionState, PhaseKind, SwingState};
pub use stop::{plan_stop, FillerPicker, StopPlan};
pub use tween::ScalarTween;
