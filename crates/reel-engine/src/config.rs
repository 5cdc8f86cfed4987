// config.rs
//
// Reel configuration: geometry, feature switches, tuning profile.
// Everything here is set once before a spin and immutable while one runs.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::types::SymbolId;
use crate::core::physics::ReelTuning;

/// Scroll direction of a reel. Motion is 1D along one axis; the other axis
/// never changes while rolling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReelDirection {
    #[default]
    TopToBottom,
    BottomToTop,
    LeftToRight,
    RightToLeft,
}

impl ReelDirection {
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::TopToBottom | Self::BottomToTop)
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::LeftToRight | Self::RightToLeft)
    }

    /// Whether slots move toward the positive axis direction (+Y up, +X right).
    pub fn is_positive_roll(self) -> bool {
        matches!(self, Self::BottomToTop | Self::LeftToRight)
    }

    /// Whether ring order follows data order (row 0 is the first visible row
    /// in reading direction). Reversed directions recycle through the ring
    /// the other way.
    pub fn is_in_order(self) -> bool {
        matches!(self, Self::TopToBottom | Self::LeftToRight)
    }

    /// Sign of the per-tick displacement along the scroll axis.
    pub fn roll_sign(self) -> f32 {
        if self.is_positive_roll() {
            1.0
        } else {
            -1.0
        }
    }
}

/// When a reel shows fewer rows than the engine-wide row count, which end of
/// the axis the visible rows lean toward. The leftover rows are masked on
/// the opposite end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SymbolLean {
    /// Lean toward the positive axis end (up, or right).
    Positive,
    /// Lean toward the negative axis end (down, or left).
    #[default]
    Negative,
}

/// Per-reel geometry. Immutable once `Reel::configure` has built the ring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReelConfig {
    /// Index of this reel within the machine; carried on emitted events.
    pub reel_index: usize,
    pub direction: ReelDirection,
    /// Gap between adjacent symbols along the scroll axis.
    pub symbol_gap: f32,
    /// Rows this reel shows. Clamped to `engine_rows`.
    pub visible_rows: usize,
    /// Hidden buffer slots added at each end of the ring.
    pub extra_buffer: usize,
    /// Engine-wide row count, injected by the spin controller.
    pub engine_rows: usize,
    pub lean: SymbolLean,
}

impl Default for ReelConfig {
    fn default() -> Self {
        Self {
            reel_index: 0,
            direction: ReelDirection::TopToBottom,
            symbol_gap: 0.0,
            visible_rows: 3,
            extra_buffer: 1,
            engine_rows: 3,
            lean: SymbolLean::Negative,
        }
    }
}

/// Symbol display metrics shared by every slot of a reel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolConfig {
    /// Base symbol size in world units; the scroll-axis component sets the
    /// ring pitch together with `symbol_gap`.
    pub symbol_size: Vec2,
}

impl Default for SymbolConfig {
    fn default() -> Self {
        Self {
            symbol_size: Vec2::new(100.0, 100.0),
        }
    }
}

/// Feature switches for one reel, the counterpart of the scene-editor
/// toggles a designer flips per reel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReelFeatures {
    /// Cosmetic backward swing before the main loop starts.
    pub start_swing: bool,
    /// Forward-then-back overshoot before settling.
    pub end_bounce: bool,
    /// Continuous rolling is available on this reel.
    pub normal_rolling: bool,
    /// Drop/cascade presentation is available on this reel.
    pub drop_rolling: bool,
    /// Drop legs may end in a bounce.
    pub drop_bounce: bool,
}

impl Default for ReelFeatures {
    fn default() -> Self {
        Self {
            start_swing: true,
            end_bounce: true,
            normal_rolling: true,
            drop_rolling: false,
            drop_bounce: false,
        }
    }
}

/// One weighted filler class: parallel symbol/weight arrays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FillerTable {
    pub symbols: Vec<SymbolId>,
    pub weights: Vec<u32>,
}

impl FillerTable {
    /// Sum of the weights covering both arrays; zero disables the table.
    pub fn total_weight(&self) -> u32 {
        self.symbols
            .iter()
            .zip(&self.weights)
            .map(|(_, w)| *w)
            .sum()
    }
}

/// Full per-reel profile: tuning numbers, feature switches, filler tables.
/// Loadable from JSON so designers can ship profiles next to other assets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReelProfile {
    #[serde(default)]
    pub tuning: ReelTuning,
    #[serde(default)]
    pub features: ReelFeatures,
    /// Weighted filler classes, keyed by the previous filler's class.
    /// Empty means filler symbols come straight from the strip walk.
    #[serde(default)]
    pub filler_tables: Vec<FillerTable>,
}

impl ReelProfile {
    /// Parse a profile from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_axis_classification() {
        assert!(ReelDirection::TopToBottom.is_vertical());
        assert!(ReelDirection::RightToLeft.is_horizontal());
        assert!(!ReelDirection::LeftToRight.is_vertical());
    }

    #[test]
    fn roll_sign_matches_positive_dirs() {
        assert_eq!(ReelDirection::BottomToTop.roll_sign(), 1.0);
        assert_eq!(ReelDirection::LeftToRight.roll_sign(), 1.0);
        assert_eq!(ReelDirection::TopToBottom.roll_sign(), -1.0);
        assert_eq!(ReelDirection::RightToLeft.roll_sign(), -1.0);
    }

    #[test]
    fn parse_minimal_profile() {
        let json = r#"{
            "features": { "start_swing": false, "end_bounce": false,
                          "normal_rolling": true, "drop_rolling": true,
                          "drop_bounce": false }
        }"#;
        let profile = ReelProfile::from_json(json).unwrap();
        assert!(!profile.features.start_swing);
        assert!(profile.features.drop_rolling);
        // Omitted sections fall back to defaults.
        assert!(profile.filler_tables.is_empty());
    }

    #[test]
    fn parse_profile_with_filler_tables() {
        let json = r#"{
            "filler_tables": [
                { "symbols": [2, 3, 4], "weights": [10, 5, 1] }
            ]
        }"#;
        let profile = ReelProfile::from_json(json).unwrap();
        assert_eq!(profile.filler_tables.len(), 1);
        assert_eq!(profile.filler_tables[0].total_weight(), 16);
    }
}
