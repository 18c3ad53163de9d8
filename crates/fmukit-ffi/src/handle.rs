//! Slot+generation handle table behind the opaque `fmi2Component`.
//!
//! Prevents use-after-free across the C boundary: freed components
//! leave a stale generation behind, so a dangling or double-freed
//! pointer resolves to `None` instead of touching another instance's
//! memory. Generations start at 1, so an encoded handle is never zero
//! and a live component pointer is never null.

/// Handle encoding: upper 16 bits = slot index, lower 16 = generation.
fn encode(slot: u16, generation: u16) -> u32 {
    ((slot as u32) << 16) | (generation as u32)
}

fn decode(handle: u32) -> (u16, u16) {
    ((handle >> 16) as u16, handle as u16)
}

struct Slot<T> {
    generation: u16,
    data: Option<T>,
}

/// A slot+generation handle table mapping `u32` handles to owned values.
///
/// Reuses slots via a free list. Generation counters increment on
/// removal, making stale handles detectable without UB. The 16-bit
/// layout keeps the encoded handle inside a 32-bit pointer.
pub(crate) struct HandleTable<T> {
    slots: Vec<Slot<T>>,
    free_list: Vec<u16>,
}

impl<T> HandleTable<T> {
    /// Create an empty handle table.
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Insert a value and return its handle.
    ///
    /// Returns `None` once all 65536 slots are live or retired.
    pub fn insert(&mut self, value: T) -> Option<u32> {
        if let Some(slot_idx) = self.free_list.pop() {
            let slot = &mut self.slots[slot_idx as usize];
            slot.data = Some(value);
            Some(encode(slot_idx, slot.generation))
        } else {
            let slot_idx = u16::try_from(self.slots.len()).ok()?;
            self.slots.push(Slot {
                generation: 1,
                data: Some(value),
            });
            Some(encode(slot_idx, 1))
        }
    }

    /// Get a mutable reference to the value behind a handle.
    ///
    /// Returns `None` if the handle is stale (wrong generation) or was
    /// never valid.
    pub fn get_mut(&mut self, handle: u32) -> Option<&mut T> {
        let (slot_idx, generation) = decode(handle);
        let slot = self.slots.get_mut(slot_idx as usize)?;
        if slot.generation != generation {
            return None;
        }
        slot.data.as_mut()
    }

    /// Remove the value behind a handle, returning it.
    ///
    /// Increments the generation counter and adds the slot to the free
    /// list. A generation that wraps to 0 permanently retires the slot,
    /// preventing ABA handle resurrection (and keeping 0 unreachable so
    /// no live handle ever encodes to a null pointer).
    /// Returns `None` if the handle is stale (double-remove is safe).
    pub fn remove(&mut self, handle: u32) -> Option<T> {
        let (slot_idx, generation) = decode(handle);
        let slot = self.slots.get_mut(slot_idx as usize)?;
        if slot.generation != generation {
            return None;
        }
        let value = slot.data.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        if slot.generation != 0 {
            self.free_list.push(slot_idx);
        }
        Some(value)
    }
}
