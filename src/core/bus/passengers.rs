//=========================================================================
// Passengers
//=========================================================================
//
// Head count on board. Direct boarding/alighting is bounded to
// `[0, capacity]`; inspection bookkeeping bypasses both bounds.
//
//=========================================================================

//=== Passengers ==========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Passengers {
    count: i32,
    capacity: i32,
}

impl Passengers {
    pub fn new(capacity: i32) -> Self {
        Self { count: 0, capacity }
    }

    /// Adds one passenger. Returns `false` (no change) when full.
    pub fn board(&mut self) -> bool {
        if self.count >= self.capacity {
            return false;
        }
        self.count += 1;
        true
    }

    /// Removes one passenger. Returns `false` (no change) when empty.
    pub fn alight(&mut self) -> bool {
        if self.count <= 0 {
            return false;
        }
        self.count -= 1;
        true
    }

    /// The inspector gets on; not subject to the capacity limit.
    pub fn admit_inspector(&mut self) {
        self.count += 1;
    }

    /// Removes `removed` heads with no floor, so the count can go negative.
    pub fn remove_unchecked(&mut self, removed: i32) {
        self.count -= removed;
    }

    pub fn count(&self) -> i32 {
        self.count
    }

    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.count >= self.capacity
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
