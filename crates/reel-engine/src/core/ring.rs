// core/ring.rs
//
// Slot Ring — the fixed-size circular window of symbol slots one reel
// scrolls. Owns slot geometry, wraparound indexing, and the masked/visible
// classification; it knows nothing about motion phases.

use glam::Vec2;

use crate::api::types::SymbolId;
use crate::config::{ReelConfig, ReelDirection, SymbolConfig, SymbolLean};
use crate::error::ReelError;

/// One display position in the ring.
#[derive(Debug, Clone)]
pub struct Slot {
    /// Fixed index in the ring; never changes after construction.
    pub ring_index: usize,
    /// Resting offset this slot returns to when the reel is idle.
    pub home: Vec2,
    /// Current render offset. Mutated every tick while rolling.
    pub pos: Vec2,
    pub symbol: SymbolId,
    pub pay: u32,
    /// Buffer or lean-remainder slot; hidden whenever the reel is at rest.
    pub masked: bool,
    pub hidden: bool,
}

impl Slot {
    /// Assign the rendered symbol and pay value.
    pub fn set_symbol(&mut self, symbol: SymbolId, pay: u32) {
        self.symbol = symbol;
        self.pay = pay;
    }
}

/// Circular sequence of slots plus the axis geometry they scroll along.
#[derive(Debug, Clone)]
pub struct SlotRing {
    slots: Vec<Slot>,
    masked: Vec<usize>,
    visible: Vec<usize>,
    direction: ReelDirection,
    extra_buffer: usize,
    pitch: f32,
    trailing_bound: f32,
    leading_bound: f32,
}

impl SlotRing {
    /// Build the ring: `engine_rows + 2 × extra_buffer` slots with home
    /// positions spaced one pitch apart along the configured axis.
    pub fn build(config: &ReelConfig, symbols: &SymbolConfig) -> Result<Self, ReelError> {
        let visible_rows = config.visible_rows.min(config.engine_rows);
        if visible_rows == 0 {
            return Err(ReelError::EmptyWindow {
                visible: config.visible_rows,
                engine: config.engine_rows,
            });
        }
        let axis_size = if config.direction.is_vertical() {
            symbols.symbol_size.y
        } else {
            symbols.symbol_size.x
        };
        if axis_size <= 0.0 {
            return Err(ReelError::BadSymbolSize);
        }

        let count = config.engine_rows + 2 * config.extra_buffer;
        let pitch = axis_size + config.symbol_gap;
        let half_span = (count - 1) as f32 * pitch * 0.5;

        let mut slots = Vec::with_capacity(count);
        for i in 0..count {
            // Vertical rings run top-down with index, horizontal left-right.
            let home = if config.direction.is_vertical() {
                Vec2::new(0.0, half_span - i as f32 * pitch)
            } else {
                Vec2::new(-half_span + i as f32 * pitch, 0.0)
            };
            slots.push(Slot {
                ring_index: i,
                home,
                pos: home,
                symbol: SymbolId::default(),
                pay: 0,
                masked: false,
                hidden: false,
            });
        }

        let (masked, visible) = classify(config, count, visible_rows);
        for &i in &masked {
            slots[i].masked = true;
            slots[i].hidden = true;
        }

        let trailing_bound = config.direction.roll_sign() * (half_span + pitch);
        Ok(Self {
            slots,
            masked,
            visible,
            direction: config.direction,
            extra_buffer: config.extra_buffer,
            pitch,
            trailing_bound,
            leading_bound: -trailing_bound,
        })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Wraparound successor index.
    pub fn next_index(&self, i: usize) -> usize {
        (i + 1) % self.slots.len()
    }

    /// Wraparound predecessor index.
    pub fn prev_index(&self, i: usize) -> usize {
        (i + self.slots.len() - 1) % self.slots.len()
    }

    pub fn direction(&self) -> ReelDirection {
        self.direction
    }

    /// Hidden buffer slots at each end of the ring.
    pub fn extra_buffer(&self) -> usize {
        self.extra_buffer
    }

    /// Home-position spacing along the scroll axis (symbol size + gap).
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Axis coordinate past which a slot recycles to the leading edge.
    pub fn trailing_bound(&self) -> f32 {
        self.trailing_bound
    }

    /// Axis coordinate where drop-in slots spawn, one pitch past the lead.
    pub fn leading_bound(&self) -> f32 {
        self.leading_bound
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, i: usize) -> &Slot {
        &self.slots[i]
    }

    pub fn slot_mut(&mut self, i: usize) -> &mut Slot {
        &mut self.slots[i]
    }

    /// Masked ring indices, ascending.
    pub fn masked(&self) -> &[usize] {
        &self.masked
    }

    /// Meaningful (non-masked) ring indices, ascending.
    pub fn visible(&self) -> &[usize] {
        &self.visible
    }

    /// The trailing slot when every slot rests at home.
    pub fn initial_last_slot(&self) -> usize {
        if self.direction.is_in_order() {
            self.slots.len() - 1
        } else {
            0
        }
    }

    /// Ring index of the slot that must align with the last visible row at
    /// rest — the stop synchronizer's reference slot.
    pub fn key_slot(&self) -> usize {
        if self.direction.is_in_order() {
            *self.visible.last().unwrap_or(&0)
        } else {
            *self.visible.first().unwrap_or(&0)
        }
    }

    /// Show or hide the masked subset. Shown while rolling so recycled slots
    /// do not pop in at the edges; hidden again at settle.
    pub fn set_masked_visible(&mut self, visible: bool) {
        for &i in &self.masked {
            self.slots[i].hidden = !visible;
        }
    }

    /// Current position of slot `i` along the scroll axis.
    pub fn axis_of(&self, i: usize) -> f32 {
        axis_value(self.direction, &self.slots[i])
    }

    pub fn set_axis(&mut self, i: usize, value: f32) {
        let slot = &mut self.slots[i];
        if self.direction.is_vertical() {
            slot.pos.y = value;
        } else {
            slot.pos.x = value;
        }
    }

    pub fn translate_slot(&mut self, i: usize, delta: f32) {
        let v = self.axis_of(i) + delta;
        self.set_axis(i, v);
    }

    /// Shift every slot by `delta` along the scroll axis.
    pub fn translate_all(&mut self, delta: f32) {
        for i in 0..self.slots.len() {
            self.translate_slot(i, delta);
        }
    }

    /// Whether an axis coordinate lies past the trailing bound.
    pub fn crossed_trailing(&self, value: f32) -> bool {
        if self.direction.roll_sign() > 0.0 {
            value >= self.trailing_bound
        } else {
            value <= self.trailing_bound
        }
    }

    /// Rank of slot `i` with slots ordered along the scroll axis so the next
    /// slot to cross the trailing bound ranks last. Ties break by ring index
    /// to keep the order total.
    pub fn exit_order_rank(&self, i: usize) -> usize {
        let sign = self.direction.roll_sign();
        let mine = sign * axis_value(self.direction, &self.slots[i]);
        self.slots
            .iter()
            .enumerate()
            .filter(|(j, s)| {
                let theirs = sign * axis_value(self.direction, s);
                theirs < mine || (theirs == mine && *j < i)
            })
            .count()
    }

    /// Snap every slot back to its home position.
    pub fn snap_all_home(&mut self) {
        for slot in &mut self.slots {
            slot.pos = slot.home;
        }
    }
}

fn axis_value(direction: ReelDirection, slot: &Slot) -> f32 {
    if direction.is_vertical() {
        slot.pos.y
    } else {
        slot.pos.x
    }
}

/// Split ring indices into masked and visible sets: both buffer ends are
/// masked, plus the rows the engine has but this reel does not show, taken
/// from the axis end opposite the lean.
fn classify(config: &ReelConfig, count: usize, visible_rows: usize) -> (Vec<usize>, Vec<usize>) {
    let eb = config.extra_buffer;
    let mut masked: Vec<usize> = (0..eb).chain(count - eb..count).collect();
    let mut middle: Vec<usize> = (eb..count - eb).collect();

    let remainder = config.engine_rows - visible_rows;
    if remainder > 0 {
        // Index-to-axis mapping flips between vertical (descending) and
        // horizontal (ascending) rings.
        let mask_low_indices = match (config.direction.is_vertical(), config.lean) {
            (true, SymbolLean::Positive) => false,
            (true, SymbolLean::Negative) => true,
            (false, SymbolLean::Positive) => true,
            (false, SymbolLean::Negative) => false,
        };
        let taken: Vec<usize> = if mask_low_indices {
            middle.drain(..remainder).collect()
        } else {
            middle.drain(middle.len() - remainder..).collect()
        };
        masked.extend(taken);
    }

    masked.sort_unstable();
    (masked, middle)
}
