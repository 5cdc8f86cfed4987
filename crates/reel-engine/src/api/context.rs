/// Externally owned rate flags, sampled by the engine once per tick.
///
/// The spin controller owns this state (turbo toggle, pass/skip button, win
/// anticipation); reels only read it. Passing it into `advance` keeps the
/// engine free of process-wide lookups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpinContext {
    /// Turbo mode: cruise displacement uses the turbo distance multiple.
    /// Latched per reel at `start_rolling`.
    pub turbo_enabled: bool,
    /// Pass/skip: fast-forward deceleration and drop legs.
    pub fast_forward: bool,
    /// A server result is available; required for the anticipation
    /// slow-motion window to engage.
    pub result_ready: bool,
}

impl SpinContext {
    pub fn new() -> Self {
        Self::default()
    }

    // -- Builder pattern --

    pub fn with_turbo(mut self, turbo: bool) -> Self {
        self.turbo_enabled = turbo;
        self
    }

    pub fn with_fast_forward(mut self, fast_forward: bool) -> Self {
        self.fast_forward = fast_forward;
        self
    }

    pub fn with_result_ready(mut self, ready: bool) -> Self {
        self.result_ready = ready;
        self
    }
}
