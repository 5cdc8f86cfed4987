use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Logical symbol value on a reel strip.
/// The engine never interprets the value; it only moves it between slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SymbolId(pub u32);

/// Which legs a drop presentation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropType {
    /// Fall-in only: slots arrive from off-screen.
    In,
    /// Fall-out only: slots leave toward the trailing edge.
    Out,
    /// Fall-out, then fall-in.
    OutIn,
}

/// Whether a drop bounce is applied per settled symbol or to the reel as one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DropBounceType {
    #[default]
    Symbol,
    Reel,
}

/// Notifications emitted by a reel, queued on the reel and drained by the
/// spin controller once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReelEvent {
    /// The rolling phase sequence fully settled (after bounce, if any).
    RollingEnded { reel: usize },
    /// Every drop-out slot has left the window.
    DropOutEnded { reel: usize },
    /// Every drop-in slot has landed (after bounce, if any).
    DropInEnded { reel: usize },
    /// One slot finished its drop leg.
    SymbolDropEnded { reel: usize, slot: usize, drop: DropType },
}

/// Poll-style handle for an in-flight spin or drop sequence.
///
/// The engine resolves it when the full phase sequence (including bounce)
/// finishes; the caller polls `is_complete` once per frame. Cloning yields
/// another handle to the same operation.
#[derive(Debug, Clone, Default)]
pub struct Completion {
    done: Rc<Cell<bool>>,
}

impl Completion {
    pub(crate) fn pending() -> Self {
        Self::default()
    }

    pub(crate) fn resolve(&self) {
        self.done.set(true);
    }

    /// Whether the operation this handle tracks has fully settled.
    pub fn is_complete(&self) -> bool {
        self.done.get()
    }
}
