//! Blocking, overwrite-on-full monitor queue.
//!
//! [`BoundedQueue`] combines a [`Ring`] with a mutex and a condition
//! variable. Every state change (ring contents, indices, shutdown flag)
//! happens inside the same critical section; there is no lock-free path for
//! mutation.
//!
//! # Protocol
//!
//! ```text
//! Producer                               Consumer
//! ─────────────────────                  ─────────────────────
//! lock()                                 lock()
//! if full: evict oldest                  while !(len > 0 || stopping):
//! write at tail                              wait(not_empty)   // releases lock
//! notify_one(not_empty)                  if len == 0: tombstone / Closed
//! unlock()                               else: take at head
//!                                        unlock()
//! ```
//!
//! Producers never wait for space. A push into a full queue discards the
//! single oldest element (newest wins).
//!
//! # Shutdown
//!
//! [`shutdown`](BoundedQueue::shutdown) sets the stopping flag and wakes
//! every waiter. Data already buffered stays poppable; once the queue is
//! stopped *and* empty, the `pop` family returns `T::default()` (the
//! tombstone) and the `recv` family returns [`Closed`]. Pushes after
//! shutdown are refused and handed back to the caller.
//!
//! Dropping the queue performs the same transition.
//!
//! # Count snapshots
//!
//! [`count`](BoundedQueue::count) reads a cache-padded atomic mirror of the
//! ring length that is only written while the lock is held. It never blocks
//! and reflects a value that was true at some instant during the call.

use core::fmt;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use crossbeam_utils::CachePadded;
use parking_lot::{Condvar, Mutex, MutexGuard};

use crate::error::{Closed, InvalidCapacity, RecvTimeoutError, Timeout, TryPopError};
use crate::ring::Ring;

/// State guarded by the queue's mutex.
struct State<T> {
    ring: Ring<T>,
    stopping: bool,
}

impl<T> State<T> {
    /// The wake predicate: data is available or no more will ever arrive.
    #[inline]
    const fn is_ready(&self) -> bool {
        !self.ring.is_empty() || self.stopping
    }
}

/// Result of [`BoundedQueue::push`].
///
/// Eviction and refusal carry their value in distinct variants, so equal
/// payloads never make the two indistinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome<T> {
    /// The value was enqueued and nothing was lost.
    Stored,

    /// The value was enqueued; the queue was full and this, its oldest
    /// element, was discarded.
    Evicted(T),

    /// The queue is shut down; the value was not enqueued and is returned.
    Refused(T),
}

impl<T> PushOutcome<T> {
    /// Returns `true` if the value was enqueued (with or without eviction).
    pub const fn is_enqueued(&self) -> bool {
        !matches!(self, Self::Refused(_))
    }

    /// Returns `true` if an older element was overwritten.
    pub const fn is_evicted(&self) -> bool {
        matches!(self, Self::Evicted(_))
    }

    /// Returns `true` if the queue refused the value after shutdown.
    pub const fn is_refused(&self) -> bool {
        matches!(self, Self::Refused(_))
    }

    /// Returns the evicted element, if any.
    pub fn evicted(self) -> Option<T> {
        match self {
            Self::Evicted(v) => Some(v),
            Self::Stored | Self::Refused(_) => None,
        }
    }

    /// Returns the refused value, if any.
    pub fn refused(self) -> Option<T> {
        match self {
            Self::Refused(v) => Some(v),
            Self::Stored | Self::Evicted(_) => None,
        }
    }
}

/// A fixed-capacity, thread-safe ring queue that overwrites its oldest
/// element when full.
///
/// Share it between threads by reference (e.g. with [`std::thread::scope`])
/// or through an [`Arc`](std::sync::Arc). The queue is deliberately not
/// `Clone`: it is a single synchronization object with a fixed identity.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
/// use ringmon::BoundedQueue;
///
/// let queue = Arc::new(BoundedQueue::<u64>::new(3).unwrap());
///
/// let consumer = {
///     let queue = Arc::clone(&queue);
///     thread::spawn(move || queue.pop())
/// };
///
/// queue.push(42);
/// assert_eq!(consumer.join().unwrap(), 42);
/// ```
pub struct BoundedQueue<T> {
    state: Mutex<State<T>>,
    not_empty: Condvar,
    /// Mirror of `state.ring.len()`, written under the lock.
    len: CachePadded<AtomicUsize>,
    /// Mirror of `state.stopping`, written under the lock.
    stopped: AtomicBool,
    capacity: usize,
}

impl<T> BoundedQueue<T> {
    /// Creates an empty queue holding at most `capacity` elements.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCapacity`] if `capacity` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use ringmon::{BoundedQueue, InvalidCapacity};
    ///
    /// let queue = BoundedQueue::<i32>::new(3).unwrap();
    /// assert_eq!(queue.capacity(), 3);
    ///
    /// assert_eq!(BoundedQueue::<i32>::new(0).unwrap_err(), InvalidCapacity);
    /// ```
    pub fn new(capacity: usize) -> Result<Self, InvalidCapacity> {
        NonZeroUsize::new(capacity)
            .map(Self::with_capacity)
            .ok_or(InvalidCapacity)
    }

    /// Creates an empty queue from a capacity that is known to be positive.
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            state: Mutex::new(State {
                ring: Ring::with_capacity(capacity),
                stopping: false,
            }),
            not_empty: Condvar::new(),
            len: CachePadded::new(AtomicUsize::new(0)),
            stopped: AtomicBool::new(false),
            capacity: capacity.get(),
        }
    }

    /// Appends a value, discarding the oldest element if the queue is full.
    ///
    /// Never waits for space. Wakes at most one blocked consumer.
    ///
    /// The returned [`PushOutcome`] says what happened:
    /// - [`Stored`](PushOutcome::Stored) if nothing was lost,
    /// - [`Evicted(oldest)`](PushOutcome::Evicted) if the queue was full and
    ///   `oldest` made room for `value`,
    /// - [`Refused(value)`](PushOutcome::Refused) if the queue has been shut
    ///   down; `value` was not enqueued.
    ///
    /// Callers that accept overwrite loss can simply ignore the result.
    ///
    /// # Example
    ///
    /// ```
    /// use ringmon::{BoundedQueue, PushOutcome};
    ///
    /// let queue = BoundedQueue::new(2).unwrap();
    /// assert_eq!(queue.push(1), PushOutcome::Stored);
    /// assert_eq!(queue.push(2), PushOutcome::Stored);
    /// assert_eq!(queue.push(3), PushOutcome::Evicted(1));
    ///
    /// queue.shutdown();
    /// assert_eq!(queue.push(4), PushOutcome::Refused(4));
    ///
    /// assert_eq!(queue.pop(), 2);
    /// assert_eq!(queue.pop(), 3);
    /// ```
    pub fn push(&self, value: T) -> PushOutcome<T> {
        let mut state = self.state.lock();
        if state.stopping {
            return PushOutcome::Refused(value);
        }

        let evicted = state.ring.push_overwrite(value);
        self.len.store(state.ring.len(), Ordering::Release);
        self.not_empty.notify_one();

        match evicted {
            Some(oldest) => PushOutcome::Evicted(oldest),
            None => PushOutcome::Stored,
        }
    }

    /// Receives the oldest element, blocking until one is available.
    ///
    /// # Errors
    ///
    /// Returns [`Closed`] once the queue has been shut down and drained.
    /// Unlike [`pop`](Self::pop), this never confuses a legitimate
    /// `T::default()` payload with shutdown.
    ///
    /// # Example
    ///
    /// ```
    /// use ringmon::{BoundedQueue, Closed};
    ///
    /// let queue = BoundedQueue::new(4).unwrap();
    /// queue.push(0);
    /// queue.shutdown();
    ///
    /// assert_eq!(queue.recv(), Ok(0)); // buffered data survives shutdown
    /// assert_eq!(queue.recv(), Err(Closed));
    /// ```
    pub fn recv(&self) -> Result<T, Closed> {
        let state = self.wait_ready();
        self.take(state)
    }

    /// Receives the oldest element, blocking for at most `timeout`.
    ///
    /// A timeout too large to represent as a deadline waits indefinitely.
    ///
    /// # Errors
    ///
    /// - [`RecvTimeoutError::Timeout`] if nothing arrived in time and the
    ///   queue is still active. The queue is left unchanged.
    /// - [`RecvTimeoutError::Closed`] if the queue is shut down and drained.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<T, RecvTimeoutError> {
        let state = match Instant::now().checked_add(timeout) {
            Some(deadline) => self.wait_ready_until(deadline)?,
            None => self.wait_ready(),
        };
        Ok(self.take(state)?)
    }

    /// Attempts to receive the oldest element without blocking.
    ///
    /// # Errors
    ///
    /// - [`TryPopError::Empty`] if the queue is active but empty.
    /// - [`TryPopError::Closed`] if the queue is shut down and drained.
    pub fn try_pop(&self) -> Result<T, TryPopError> {
        let state = self.state.lock();
        if state.ring.is_empty() {
            return Err(if state.stopping {
                TryPopError::Closed
            } else {
                TryPopError::Empty
            });
        }
        Ok(self.take(state)?)
    }

    /// Signals that no more data will arrive and wakes every waiter.
    ///
    /// Idempotent. Buffered elements remain poppable; subsequent pushes are
    /// refused.
    pub fn shutdown(&self) {
        let mut state = self.state.lock();
        state.stopping = true;
        self.stopped.store(true, Ordering::Release);
        self.not_empty.notify_all();
    }

    /// Returns `true` once [`shutdown`](Self::shutdown) has been called.
    #[inline]
    pub fn is_shutdown(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    /// Number of buffered elements.
    ///
    /// Lock-free snapshot; advisory under concurrent mutation.
    #[inline]
    pub fn count(&self) -> usize {
        self.len.load(Ordering::Acquire)
    }

    /// Alias for [`count`](Self::count).
    #[inline]
    pub fn len(&self) -> usize {
        self.count()
    }

    /// Returns `true` if no elements are buffered (snapshot).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Returns `true` if the next push would evict an element (snapshot).
    #[inline]
    pub fn is_full(&self) -> bool {
        self.count() == self.capacity
    }

    /// The fixed capacity chosen at construction.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Removes every buffered element, oldest first.
    ///
    /// Works in either state; does not wake anyone.
    pub fn drain(&self) -> Vec<T> {
        let mut state = self.state.lock();
        let drained: Vec<T> = state.ring.drain().collect();
        self.len.store(0, Ordering::Release);
        drained
    }

    /// Discards every buffered element and returns how many were discarded.
    pub fn clear(&self) -> usize {
        let mut state = self.state.lock();
        let dropped = state.ring.clear();
        self.len.store(0, Ordering::Release);
        dropped
    }

    /// Blocks until the wake predicate holds.
    fn wait_ready(&self) -> MutexGuard<'_, State<T>> {
        let mut state = self.state.lock();
        while !state.is_ready() {
            self.not_empty.wait(&mut state);
        }
        state
    }

    /// Blocks until the wake predicate holds or `deadline` passes.
    ///
    /// A timed-out wake re-checks the predicate once before reporting
    /// [`Timeout`], so data that raced the deadline is still delivered.
    fn wait_ready_until(&self, deadline: Instant) -> Result<MutexGuard<'_, State<T>>, Timeout> {
        let mut state = self.state.lock();
        while !state.is_ready() {
            if self.not_empty.wait_until(&mut state, deadline).timed_out() {
                if state.is_ready() {
                    break;
                }
                return Err(Timeout);
            }
        }
        Ok(state)
    }

    /// Dequeues under an already-held lock whose predicate holds.
    ///
    /// An empty ring here means the queue is stopped.
    fn take(&self, mut state: MutexGuard<'_, State<T>>) -> Result<T, Closed> {
        match state.ring.pop() {
            Some(value) => {
                self.len.store(state.ring.len(), Ordering::Release);
                Ok(value)
            }
            None => Err(Closed),
        }
    }
}

impl<T: Default> BoundedQueue<T> {
    /// Removes the oldest element, blocking until one is available.
    ///
    /// If the queue is shut down while empty (including while this call is
    /// blocked), returns `T::default()` as a tombstone. Use
    /// [`recv`](Self::recv) when the default value is also a legitimate
    /// payload.
    ///
    /// # Example
    ///
    /// ```
    /// use std::thread;
    /// use std::time::Duration;
    /// use ringmon::BoundedQueue;
    ///
    /// let queue = BoundedQueue::<i32>::new(3).unwrap();
    ///
    /// thread::scope(|s| {
    ///     let waiter = s.spawn(|| queue.pop());
    ///     thread::sleep(Duration::from_millis(20));
    ///     queue.shutdown();
    ///     assert_eq!(waiter.join().unwrap(), 0); // tombstone
    /// });
    /// ```
    pub fn pop(&self) -> T {
        self.recv().unwrap_or_default()
    }

    /// Removes the oldest element, blocking for at most `timeout`.
    ///
    /// Shutdown while empty yields the `T::default()` tombstone, as with
    /// [`pop`](Self::pop).
    ///
    /// # Errors
    ///
    /// Returns [`Timeout`] if nothing arrived in time and the queue is still
    /// active. The queue is left unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    /// use ringmon::{BoundedQueue, Timeout};
    ///
    /// let queue = BoundedQueue::<i32>::new(3).unwrap();
    /// assert_eq!(queue.pop_timeout(Duration::from_millis(10)), Err(Timeout));
    ///
    /// queue.push(10);
    /// assert_eq!(queue.pop_timeout(Duration::from_millis(10)), Ok(10));
    /// ```
    pub fn pop_timeout(&self, timeout: Duration) -> Result<T, Timeout> {
        match self.recv_timeout(timeout) {
            Ok(value) => Ok(value),
            Err(RecvTimeoutError::Closed) => Ok(T::default()),
            Err(RecvTimeoutError::Timeout) => Err(Timeout),
        }
    }

    /// [`pop_timeout`](Self::pop_timeout) with the timeout in milliseconds.
    ///
    /// # Errors
    ///
    /// Returns [`Timeout`] under the same conditions as `pop_timeout`.
    #[inline]
    pub fn pop_timeout_ms(&self, millis: u64) -> Result<T, Timeout> {
        self.pop_timeout(Duration::from_millis(millis))
    }
}

impl<T> Drop for BoundedQueue<T> {
    fn drop(&mut self) {
        // Exclusive access: nobody can be waiting, only the flags change.
        self.state.get_mut().stopping = true;
        *self.stopped.get_mut() = true;
    }
}

impl<T> fmt::Debug for BoundedQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedQueue")
            .field("capacity", &self.capacity)
            .field("count", &self.count())
            .field("shutdown", &self.is_shutdown())
            .finish_non_exhaustive()
    }
}
