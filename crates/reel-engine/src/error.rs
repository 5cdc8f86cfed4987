use thiserror::Error;

use crate::motion::phase::PhaseKind;

/// Failures surfaced to the spin controller.
///
/// Configuration errors are programmer errors and fail the offending call;
/// `RngOutOfRange` is a data error meaning the server and client strips have
/// desynchronized — the reel freezes rather than settling on wrong values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReelError {
    #[error("reel is not configured")]
    NotConfigured,

    #[error("visible window is empty ({visible} visible rows, {engine} engine rows)")]
    EmptyWindow { visible: usize, engine: usize },

    #[error("symbol size along the scroll axis must be positive")]
    BadSymbolSize,

    #[error("reel already configured with different geometry")]
    GeometryMismatch,

    #[error("normal rolling is disabled for this reel")]
    RollingDisabled,

    #[error("drop rolling is disabled for this reel")]
    DropDisabled,

    #[error("drop-in requires symbol and pay strips")]
    MissingDropStrips,

    #[error("operation not valid while the reel is {0:?}")]
    WrongPhase(PhaseKind),

    #[error("rng offset {rng} is outside the strip (length {len})")]
    RngOutOfRange { rng: usize, len: usize },
}
