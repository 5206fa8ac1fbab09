//! # ringmon
//!
//! A fixed-capacity, thread-safe ring queue that overwrites its oldest
//! element when full, with blocking and timed consumers.
//!
//! ## Features
//!
//! - **Overwrite-on-full**: producers never block; a push into a full queue
//!   evicts exactly one element, the oldest, and hands it back as
//!   [`PushOutcome::Evicted`]
//! - **Blocking consumers**: [`pop`](BoundedQueue::pop) and
//!   [`recv`](BoundedQueue::recv) suspend on a condition variable, no polling
//! - **Timed consumers**: [`pop_timeout`](BoundedQueue::pop_timeout) and
//!   [`recv_timeout`](BoundedQueue::recv_timeout)
//! - **Shutdown**: wakes every waiter; `pop` yields a `T::default()`
//!   tombstone, `recv` yields [`Closed`]
//! - Any number of producers and consumers; FIFO order of data
//!
//! ## Design
//!
//! The queue is a monitor. One `parking_lot::Mutex` guards the ring storage
//! and the shutdown flag; one `parking_lot::Condvar` carries "data or
//! shutdown" wakeups. Storage is a single allocation made at construction.
//!
//! ```text
//! ┌──────────────────────── BoundedQueue<T> ────────────────────────┐
//! │ Mutex<State>                                                    │
//! │   ├── Ring<T>   slots: [Option<T>; capacity], head, tail, len   │
//! │   └── stopping: bool                                            │
//! │ Condvar not_empty      (notify_one on push, notify_all on stop) │
//! │ CachePadded<AtomicUsize> len   (lock-free count snapshots)      │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use std::thread;
//! use std::time::Duration;
//! use ringmon::{BoundedQueue, Timeout};
//!
//! let queue = BoundedQueue::<i32>::new(3).unwrap();
//!
//! // Overwrite-on-full: 1 is evicted
//! for i in 1..=4 {
//!     queue.push(i);
//! }
//! assert_eq!(queue.count(), 3);
//! assert_eq!(queue.pop(), 2);
//! assert_eq!(queue.pop(), 3);
//! assert_eq!(queue.pop(), 4);
//!
//! // Bounded wait on an empty queue
//! assert_eq!(queue.pop_timeout(Duration::from_millis(10)), Err(Timeout));
//!
//! // Blocking consumer woken by a producer thread
//! thread::scope(|s| {
//!     s.spawn(|| queue.push(10));
//!     assert_eq!(queue.pop(), 10);
//! });
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod queue;
pub mod ring;

pub use error::{Closed, InvalidCapacity, RecvTimeoutError, Timeout, TryPopError};
pub use queue::{BoundedQueue, PushOutcome};
pub use ring::Ring;
