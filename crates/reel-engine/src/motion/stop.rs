// motion/stop.rs
//
// Stop Synchronizer — turns a requested stop into a change countdown, and
// supplies cosmetic filler symbols until the exact target window begins.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::api::types::SymbolId;
use crate::config::FillerTable;
use crate::core::ring::SlotRing;

/// The stop plan computed when `spin_stop` arrives: how many boundary
/// crossings remain before the reel may settle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopPlan {
    /// Crossings needed from the current visual state to align the target
    /// window; the final `base_changes` crossings use exact target values.
    pub base_changes: usize,
    /// `base_changes` plus the extra full rotations the stop multiplier
    /// requested.
    pub changes_remaining: usize,
}

/// Compute the stop plan from the ring's current visual state.
///
/// The key slot is the one that must align with the last visible row; its
/// rank along the scroll axis (exit end last) tells how many crossings pass
/// before it exits, and the ring distance from the key to the far end in
/// exit direction covers every visible row after it.
pub fn plan_stop(ring: &SlotRing, stop_mult: u32) -> StopPlan {
    let n = ring.len();
    let key = ring.key_slot();
    let cur_index = ring.exit_order_rank(key);
    let extra = n - (cur_index + 1);
    let key_rank = if ring.direction().is_in_order() {
        key
    } else {
        n - 1 - key
    };
    let base_changes = extra + key_rank + 1;
    let mult = stop_mult.max(1) as usize;
    StopPlan {
        base_changes,
        changes_remaining: base_changes + (mult - 1) * n,
    }
}

/// Cosmetic symbol source for boundary crossings outside the exact window.
///
/// Walks the strip from a cursor so the scroll looks like the real reel
/// band, with an optional weighted override keyed by the previous pick's
/// class. Never consulted for settled values.
#[derive(Debug, Clone)]
pub struct FillerPicker {
    cursor: usize,
    prev_class: usize,
    rng: Pcg32,
}

impl FillerPicker {
    pub fn new(seed: u64) -> Self {
        Self {
            cursor: 0,
            prev_class: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Rewind the cursor relative to the last spin's stop offset so the
    /// next spin appears to continue the same band.
    pub fn rewind(&mut self, rng_offset: usize, strip_len: usize) {
        if strip_len == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = (rng_offset as isize - 2).rem_euclid(strip_len as isize) as usize;
    }

    /// Produce the next filler symbol. The cursor steps through the strip
    /// against ring order; a configured weighted table may override the raw
    /// strip value.
    pub fn next(&mut self, strip: &[SymbolId], tables: &[FillerTable], in_order: bool) -> SymbolId {
        if strip.is_empty() {
            return SymbolId::default();
        }
        let len = strip.len();
        self.cursor = if in_order {
            (self.cursor + len - 1) % len
        } else {
            (self.cursor + 1) % len
        };
        let mut symbol = strip[self.cursor];
        if !tables.is_empty() {
            let table = &tables[self.prev_class % tables.len()];
            if let Some(pick) = weighted_pick(table, &mut self.rng) {
                symbol = pick;
            }
            self.prev_class = symbol.0 as usize;
        }
        symbol
    }

    #[cfg(test)]
    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }
}

fn weighted_pick(table: &FillerTable, rng: &mut Pcg32) -> Option<SymbolId> {
    let total = table.total_weight();
    if total == 0 {
        return None;
    }
    let mut roll = rng.random_range(0..total);
    for (symbol, weight) in table.symbols.iter().zip(&table.weights) {
        if roll < *weight {
            return Some(*symbol);
        }
        roll -= weight;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ReelConfig, ReelDirection, SymbolConfig};

    fn ring(direction: ReelDirection) -> SlotRing {
        let config = ReelConfig {
            direction,
            ..ReelConfig::default()
        };
        SlotRing::build(&config, &SymbolConfig::default()).unwrap()
    }

    #[test]
    fn plan_at_rest_is_one_full_rotation() {
        for direction in [
            ReelDirection::TopToBottom,
            ReelDirection::BottomToTop,
            ReelDirection::LeftToRight,
            ReelDirection::RightToLeft,
        ] {
            let r = ring(direction);
            let plan = plan_stop(&r, 1);
            assert_eq!(plan.base_changes, r.len(), "{direction:?}");
            assert_eq!(plan.changes_remaining, r.len());
        }
    }

    #[test]
    fn stop_multiplier_adds_full_rotations() {
        let r = ring(ReelDirection::TopToBottom);
        for mult in 1..=3 {
            let plan = plan_stop(&r, mult);
            assert_eq!(
                plan.changes_remaining,
                plan.base_changes + (mult as usize - 1) * r.len()
            );
        }
    }

    #[test]
    fn plan_tracks_ring_rotation() {
        // Rotate the ring by one recycle: the bottom slot (4) moves above
        // the top slot, as the rolling loop would leave it.
        let mut r = ring(ReelDirection::TopToBottom);
        let lead_axis = r.axis_of(0);
        r.set_axis(4, lead_axis + r.pitch());
        let plan = plan_stop(&r, 1);
        // The key slot (3) is now one rank closer to the exit.
        assert_eq!(plan.base_changes, r.len() - 1);
    }

    #[test]
    fn zero_multiplier_clamps_to_one() {
        let r = ring(ReelDirection::TopToBottom);
        assert_eq!(plan_stop(&r, 0), plan_stop(&r, 1));
    }

    #[test]
    fn filler_walks_strip_against_ring_order() {
        let strip: Vec<SymbolId> = [3, 1, 4, 1, 5].iter().map(|&v| SymbolId(v)).collect();
        let mut picker = FillerPicker::new(7);
        picker.rewind(0, strip.len());
        // in-order reels walk the cursor backward through the strip.
        let a = picker.next(&strip, &[], true);
        let b = picker.next(&strip, &[], true);
        assert_eq!(a, strip[2]);
        assert_eq!(b, strip[1]);
    }

    #[test]
    fn rewind_wraps_small_offsets() {
        let mut picker = FillerPicker::new(1);
        picker.rewind(1, 8);
        assert_eq!(picker.cursor(), 7);
        picker.rewind(0, 8);
        assert_eq!(picker.cursor(), 6);
    }

    #[test]
    fn weighted_table_overrides_strip_value() {
        let strip: Vec<SymbolId> = [9, 9, 9].iter().map(|&v| SymbolId(v)).collect();
        let tables = vec![FillerTable {
            symbols: vec![SymbolId(2)],
            weights: vec![5],
        }];
        let mut picker = FillerPicker::new(42);
        for _ in 0..10 {
            assert_eq!(picker.next(&strip, &tables, true), SymbolId(2));
        }
    }

    #[test]
    fn empty_strip_yields_default_symbol() {
        let mut picker = FillerPicker::new(0);
        assert_eq!(picker.next(&[], &[], true), SymbolId::default());
    }
}
