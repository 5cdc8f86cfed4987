pub mod api;
pub mod bank;
pub mod config;
pub mod core;
pub mod error;
pub mod motion;
pub mod reel;

// Re-export key types at crate root for convenience
pub use api::context::SpinContext;
pub use api::types::{Completion, DropBounceType, DropType, ReelEvent, SymbolId};
pub use bank::ReelBank;
pub use config::{
    FillerTable, ReelConfig, ReelDirection, ReelFeatures, ReelProfile, SymbolConfig, SymbolLean,
};
pub use core::physics::{DropTuning, ReelPhysics, ReelTuning, SpeedTuning, SwingTuning};
pub use core::ring::{Slot, SlotRing};
pub use core::time::{FixedTicker, DEFAULT_TICK_DT};
pub use error::ReelError;
pub use motion::drop::{DropConfig, DropSpin};
pub use motion::easing::{ease, lerp, Easing};
pub use motion::phase::{MotionPhase, MotionState, PhaseKind};
pub use motion::stop::{plan_stop, FillerPicker, StopPlan};
pub use motion::tween::ScalarTween;
pub use reel::{Reel, StripData};
