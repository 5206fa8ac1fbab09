//! Fixed-capacity circular storage with overwrite-on-full.
//!
//! [`Ring`] is the unsynchronized core of [`BoundedQueue`](crate::BoundedQueue):
//! a single boxed slice of slots reused through wrapping `head`/`tail`
//! indices. It never reallocates after construction.
//!
//! ```text
//!          head                tail
//!           │                   │
//!   ┌───┬───▼───┬───────┬───────▼───┬───┐
//!   │   │ old   │  ...  │ new   │   │   │
//!   └───┴───────┴───────┴───────┴───┴───┘
//!           └──── len occupied ────┘
//! ```
//!
//! When full, [`push_overwrite`](Ring::push_overwrite) advances `head` by one
//! slot before writing, so exactly one element (the oldest) is lost per
//! push-while-full and the retained elements keep their FIFO order.
//!
//! # Example
//!
//! ```
//! use std::num::NonZeroUsize;
//! use ringmon::Ring;
//!
//! let mut ring = Ring::with_capacity(NonZeroUsize::new(2).unwrap());
//!
//! assert_eq!(ring.push_overwrite(1), None);
//! assert_eq!(ring.push_overwrite(2), None);
//! assert_eq!(ring.push_overwrite(3), Some(1)); // evicts the oldest
//!
//! assert_eq!(ring.pop(), Some(2));
//! assert_eq!(ring.pop(), Some(3));
//! assert_eq!(ring.pop(), None);
//! ```

use core::fmt;
use std::iter;
use std::num::NonZeroUsize;

/// A fixed-capacity ring buffer that overwrites its oldest element when full.
///
/// Slots hold `Option<T>` so dequeue transfers ownership out of the buffer
/// without requiring `T: Copy`.
pub struct Ring<T> {
    slots: Box<[Option<T>]>,
    /// Oldest occupied slot (next to pop).
    head: usize,
    /// Next free slot (next to push).
    tail: usize,
    len: usize,
}

impl<T> Ring<T> {
    /// Creates an empty ring with exactly `capacity` slots.
    ///
    /// The capacity is used as given (no power-of-two rounding), so indices
    /// wrap with a comparison rather than a mask.
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        let slots = iter::repeat_with(|| None).take(capacity.get()).collect();
        Self {
            slots,
            head: 0,
            tail: 0,
            len: 0,
        }
    }

    /// Appends `value`, evicting and returning the oldest element if full.
    pub fn push_overwrite(&mut self, value: T) -> Option<T> {
        let evicted = if self.is_full() {
            let old = self.slots[self.head].take();
            self.head = self.wrap_next(self.head);
            self.len -= 1;
            old
        } else {
            None
        };

        debug_assert!(self.slots[self.tail].is_none(), "tail slot occupied");
        self.slots[self.tail] = Some(value);
        self.tail = self.wrap_next(self.tail);
        self.len += 1;

        evicted
    }

    /// Removes and returns the oldest element.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        let value = self.slots[self.head].take();
        debug_assert!(value.is_some(), "head slot empty while len > 0");
        self.head = self.wrap_next(self.head);
        self.len -= 1;
        value
    }

    /// Number of occupied slots.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Total number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if no slots are occupied.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if every slot is occupied.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    /// Drops every element and resets the indices. Returns how many were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.len;
        while self.pop().is_some() {}
        self.head = 0;
        self.tail = 0;
        dropped
    }

    /// Iterates from oldest to newest without removing anything.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.len)
            .map(move |offset| self.index_from_head(offset))
            .filter_map(move |index| self.slots[index].as_ref())
    }

    /// Removes elements oldest-first as the iterator is advanced.
    ///
    /// Elements not yielded stay in the ring.
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        iter::from_fn(move || self.pop())
    }

    #[inline]
    fn wrap_next(&self, index: usize) -> usize {
        let next = index + 1;
        if next == self.slots.len() { 0 } else { next }
    }

    #[inline]
    fn index_from_head(&self, offset: usize) -> usize {
        let cap = self.slots.len();
        let index = self.head + offset;
        if index >= cap { index - cap } else { index }
    }
}

impl<T: fmt::Debug> fmt::Debug for Ring<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ring")
            .field("capacity", &self.capacity())
            .field("len", &self.len)
            .field("head", &self.head)
            .field("tail", &self.tail)
            .field("items", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring<T>(capacity: usize) -> Ring<T> {
        Ring::with_capacity(NonZeroUsize::new(capacity).unwrap())
    }

    /// Checks the index bookkeeping shared by every mutation.
    fn assert_consistent<T>(r: &Ring<T>) {
        assert!(r.head < r.capacity());
        assert!(r.tail < r.capacity());
        assert!(r.len <= r.capacity());
        assert_eq!(r.tail, (r.head + r.len) % r.capacity());
        let occupied = r.slots.iter().filter(|s| s.is_some()).count();
        assert_eq!(occupied, r.len);
    }

    // ============================================================================
    // Basic Operations
    // ============================================================================

    #[test]
    fn push_pop_fifo() {
        let mut r = ring(3);

        assert_eq!(r.push_overwrite(1), None);
        assert_eq!(r.push_overwrite(2), None);
        assert_eq!(r.push_overwrite(3), None);
        assert_eq!(r.len(), 3);
        assert!(r.is_full());

        assert_eq!(r.pop(), Some(1));
        assert_eq!(r.pop(), Some(2));
        assert_eq!(r.pop(), Some(3));
        assert_eq!(r.pop(), None);
        assert!(r.is_empty());
        assert_consistent(&r);
    }

    // ============================================================================
    // Overwrite Policy
    // ============================================================================

    #[test]
    fn full_push_evicts_oldest() {
        let mut r = ring(3);
        for i in 1..=3 {
            r.push_overwrite(i);
        }

        assert_eq!(r.push_overwrite(4), Some(1));
        assert_eq!(r.len(), 3);
        assert_consistent(&r);

        assert_eq!(r.pop(), Some(2));
        assert_eq!(r.pop(), Some(3));
        assert_eq!(r.pop(), Some(4));
        assert_eq!(r.len(), 0);
    }

    #[test]
    fn retains_last_capacity_values() {
        let mut r = ring(4);
        let mut evicted = Vec::new();

        for i in 0..10 {
            if let Some(old) = r.push_overwrite(i) {
                evicted.push(old);
            }
            assert!(r.len() <= 4);
            assert_consistent(&r);
        }

        assert_eq!(evicted, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(r.drain().collect::<Vec<_>>(), vec![6, 7, 8, 9]);
    }

    #[test]
    fn capacity_one_always_holds_latest() {
        let mut r = ring(1);
        assert_eq!(r.push_overwrite('a'), None);
        assert_eq!(r.push_overwrite('b'), Some('a'));
        assert_eq!(r.push_overwrite('c'), Some('b'));
        assert_eq!(r.pop(), Some('c'));
        assert_eq!(r.pop(), None);
        assert_consistent(&r);
    }

    // ============================================================================
    // Wraparound
    // ============================================================================

    #[test]
    fn interleaved_many_laps() {
        let mut r = ring(3);
        for i in 0..1000 {
            r.push_overwrite(i);
            if i % 2 == 0 {
                r.push_overwrite(i + 10_000);
                assert_eq!(r.pop(), Some(i));
            }
            assert_consistent(&r);
            r.pop();
        }
        assert!(r.is_empty());
    }

    #[test]
    fn iter_follows_wrapped_order() {
        let mut r = ring(3);
        for i in 0..5 {
            r.push_overwrite(i);
        }
        // head has wrapped past the end of the slice
        assert_eq!(r.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
        assert_eq!(r.len(), 3);
    }

    // ============================================================================
    // Clear / Drain
    // ============================================================================

    #[test]
    fn clear_reports_dropped_count() {
        let mut r = ring(4);
        r.push_overwrite(1);
        r.push_overwrite(2);

        assert_eq!(r.clear(), 2);
        assert!(r.is_empty());
        assert_consistent(&r);

        r.push_overwrite(3);
        assert_eq!(r.pop(), Some(3));
    }

    #[test]
    fn partial_drain_leaves_rest() {
        let mut r = ring(4);
        for i in 0..4 {
            r.push_overwrite(i);
        }

        let first_two: Vec<_> = r.drain().take(2).collect();
        assert_eq!(first_two, vec![0, 1]);
        assert_eq!(r.len(), 2);
        assert_eq!(r.pop(), Some(2));
    }

    // ============================================================================
    // Drop Behavior
    // ============================================================================

    #[test]
    fn evicted_and_remaining_values_are_dropped() {
        use std::rc::Rc;

        let tracker = Rc::new(());
        {
            let mut r = ring(2);
            for _ in 0..5 {
                // evicted clones are dropped here, at the call site
                drop(r.push_overwrite(Rc::clone(&tracker)));
            }
            assert_eq!(Rc::strong_count(&tracker), 3);
        }
        assert_eq!(Rc::strong_count(&tracker), 1);
    }

    #[test]
    fn owned_payloads() {
        let mut r = ring(2);
        r.push_overwrite(String::from("a"));
        r.push_overwrite(String::from("b"));
        assert_eq!(r.push_overwrite(String::from("c")).as_deref(), Some("a"));
        assert_eq!(r.pop().as_deref(), Some("b"));
    }
}
