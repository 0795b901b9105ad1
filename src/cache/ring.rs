//! Ring Buffer Module
//!
//! Fixed-size circular array remembering the last N inserted values.

// == Ring ==
/// Tracks the most recent insertions for FIFO eviction.
///
/// Slots are overwritten in insertion order:
/// - `cursor` = next slot to overwrite (the oldest value once full)
/// - insertion `i` (0-based) lands in slot `i % capacity`
///
/// The ring holds values only, never keys. Each occupied slot is an owning
/// reference that keeps its value alive until the cursor comes back around.
/// Slots are allocated on first use, so `capacity` only bounds memory.
#[derive(Debug)]
pub struct Ring<T> {
    /// Occupied slots; grows with `push` until it reaches `capacity`
    slots: Vec<T>,
    capacity: usize,
    /// Next slot to overwrite, always in `[0, capacity)`
    cursor: usize,
}

impl<T> Ring<T> {
    // == Constructor ==
    /// Creates an empty ring with `capacity` slots.
    ///
    /// # Panics
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "ring capacity must be non-zero");
        Self {
            slots: Vec::new(),
            capacity,
            cursor: 0,
        }
    }

    // == Push ==
    /// Overwrites the slot under the cursor and advances it.
    pub fn push(&mut self, value: T) {
        if self.slots.len() < self.capacity {
            // Still filling: the cursor sits one past the last occupied slot.
            self.slots.push(value);
        } else {
            self.slots[self.cursor] = value;
        }
        self.cursor = (self.cursor + 1) % self.capacity;
    }

    // == Clear ==
    /// Empties every slot and rewinds the cursor.
    pub fn clear(&mut self) {
        self.slots = Vec::new();
        self.cursor = 0;
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns the value held in `slot`, if any.
    pub fn get(&self, slot: usize) -> Option<&T> {
        self.slots.get(slot)
    }

    /// Returns the number of occupied slots.
    pub fn occupied(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterates over held values from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        // While filling, the cursor equals `slots.len()` and `older` is empty.
        let (newer, older) = self.slots.split_at(self.cursor);
        older.iter().chain(newer.iter())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_new() {
        let ring: Ring<u32> = Ring::new(3);
        assert!(ring.is_empty());
        assert_eq!(ring.capacity(), 3);
        assert_eq!(ring.cursor(), 0);
        assert_eq!(ring.occupied(), 0);
    }

    #[test]
    #[should_panic(expected = "ring capacity must be non-zero")]
    fn test_ring_zero_capacity_panics() {
        let _ = Ring::<u32>::new(0);
    }

    #[test]
    fn test_ring_push_advances_cursor() {
        let mut ring = Ring::new(3);
        ring.push("a");
        ring.push("b");

        assert_eq!(ring.cursor(), 2);
        assert_eq!(ring.occupied(), 2);
        assert_eq!(ring.get(0), Some(&"a"));
        assert_eq!(ring.get(1), Some(&"b"));
        assert_eq!(ring.get(2), None);
    }

    #[test]
    fn test_ring_wraps_and_overwrites_oldest() {
        let mut ring = Ring::new(3);
        for v in ["a", "b", "c", "d"] {
            ring.push(v);
        }

        assert_eq!(ring.cursor(), 1);
        assert_eq!(ring.get(0), Some(&"d"));
        assert_eq!(ring.iter().copied().collect::<Vec<_>>(), vec!["b", "c", "d"]);
    }

    #[test]
    fn test_ring_capacity_one() {
        let mut ring = Ring::new(1);
        ring.push(1);
        ring.push(2);
        ring.push(3);

        assert_eq!(ring.cursor(), 0);
        assert_eq!(ring.iter().copied().collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_ring_iter_partial_fill() {
        let mut ring = Ring::new(4);
        ring.push(10);
        ring.push(20);

        assert_eq!(ring.iter().copied().collect::<Vec<_>>(), vec![10, 20]);
    }

    #[test]
    fn test_ring_clear() {
        let mut ring = Ring::new(2);
        ring.push(1);
        ring.push(2);
        ring.push(3);
        ring.clear();

        assert!(ring.is_empty());
        assert_eq!(ring.cursor(), 0);
        assert_eq!(ring.get(0), None);

        ring.push(4);
        assert_eq!(ring.get(0), Some(&4));
    }

    #[test]
    fn test_ring_huge_capacity_allocates_lazily() {
        let mut ring = Ring::new(usize::MAX);
        ring.push("a");
        ring.push("b");

        assert_eq!(ring.capacity(), usize::MAX);
        assert_eq!(ring.cursor(), 2);
        assert_eq!(ring.occupied(), 2);
        assert_eq!(ring.iter().copied().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_ring_refills_after_clear() {
        let mut ring = Ring::new(2);
        for v in 1..=5 {
            ring.push(v);
        }
        ring.clear();
        ring.push(6);
        ring.push(7);
        ring.push(8);

        assert_eq!(ring.cursor(), 1);
        assert_eq!(ring.occupied(), 2);
        assert_eq!(ring.iter().copied().collect::<Vec<_>>(), vec![7, 8]);
    }

    #[test]
    fn test_ring_overwrite_releases_value() {
        use std::rc::Rc;

        let first = Rc::new(1);
        let mut ring = Ring::new(1);
        ring.push(Rc::clone(&first));
        assert_eq!(Rc::strong_count(&first), 2);

        ring.push(Rc::new(2));
        assert_eq!(Rc::strong_count(&first), 1);
    }
}
