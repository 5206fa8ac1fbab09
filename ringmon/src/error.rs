//! Error types returned by [`BoundedQueue`](crate::BoundedQueue).

use core::fmt;

/// Error returned when a queue is constructed with a capacity of zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidCapacity;

impl fmt::Display for InvalidCapacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "queue capacity must be positive")
    }
}

impl std::error::Error for InvalidCapacity {}

/// Error returned when a timed pop expires before data or shutdown arrives.
///
/// Recoverable: the queue is unchanged and the call may be retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeout;

impl fmt::Display for Timeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timed out waiting for data")
    }
}

impl std::error::Error for Timeout {}

/// Error returned when the queue has been shut down and holds no more data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Closed;

impl fmt::Display for Closed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "queue shut down")
    }
}

impl std::error::Error for Closed {}

/// Error returned by [`BoundedQueue::try_pop`](crate::BoundedQueue::try_pop).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TryPopError {
    /// The queue is empty but still active.
    ///
    /// Data may arrive later.
    Empty,

    /// The queue has been shut down and drained.
    Closed,
}

impl TryPopError {
    /// Returns `true` if this error is the `Empty` variant.
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns `true` if this error is the `Closed` variant.
    pub const fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl From<Closed> for TryPopError {
    fn from(_: Closed) -> Self {
        Self::Closed
    }
}

impl fmt::Display for TryPopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "queue empty"),
            Self::Closed => write!(f, "queue shut down"),
        }
    }
}

impl std::error::Error for TryPopError {}

/// Error returned by [`BoundedQueue::recv_timeout`](crate::BoundedQueue::recv_timeout).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecvTimeoutError {
    /// No data arrived before the deadline and the queue is still active.
    Timeout,

    /// The queue has been shut down and drained.
    Closed,
}

impl RecvTimeoutError {
    /// Returns `true` if this error is the `Timeout` variant.
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this error is the `Closed` variant.
    pub const fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl From<Timeout> for RecvTimeoutError {
    fn from(_: Timeout) -> Self {
        Self::Timeout
    }
}

impl From<Closed> for RecvTimeoutError {
    fn from(_: Closed) -> Self {
        Self::Closed
    }
}

impl fmt::Display for RecvTimeoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "timed out waiting for data"),
            Self::Closed => write!(f, "queue shut down"),
        }
    }
}

impl std::error::Error for RecvTimeoutError {}
