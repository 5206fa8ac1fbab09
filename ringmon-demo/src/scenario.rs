//! Demonstration scenarios driving `BoundedQueue` from ordinary threads.

use core::fmt;
use std::io;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use clap::ValueEnum;
use ringmon::{BoundedQueue, Closed, InvalidCapacity, PushOutcome, Timeout};
use tracing::{debug, info, warn};

/// Which scenario(s) to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    /// Fill a capacity-3 queue and pop it empty.
    PushPop,
    /// Time out on an empty queue, then receive a pushed value.
    Timeout,
    /// One producer, one slower consumer.
    Threaded,
    /// Shut down a queue while a consumer is blocked on it.
    Shutdown,
    /// Every scenario in order.
    All,
}

/// Failure of a demo scenario.
#[derive(Debug)]
pub enum DemoError {
    /// The configured capacity was rejected by the queue.
    Capacity(InvalidCapacity),
    /// A worker thread could not be spawned.
    Spawn(io::Error),
    /// A worker thread panicked.
    Panicked(&'static str),
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Capacity(err) => write!(f, "{err}"),
            Self::Spawn(err) => write!(f, "failed to spawn thread: {err}"),
            Self::Panicked(name) => write!(f, "{name} thread panicked"),
        }
    }
}

impl std::error::Error for DemoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Capacity(err) => Some(err),
            Self::Spawn(err) => Some(err),
            Self::Panicked(_) => None,
        }
    }
}

impl From<InvalidCapacity> for DemoError {
    fn from(err: InvalidCapacity) -> Self {
        Self::Capacity(err)
    }
}

impl From<io::Error> for DemoError {
    fn from(err: io::Error) -> Self {
        Self::Spawn(err)
    }
}

/// Tunables shared by the threaded scenarios.
#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub capacity: usize,
    pub items: u32,
    pub producer_delay: Duration,
    pub consumer_delay: Duration,
    pub timeout: Duration,
}

/// Runs `scenario` (or all of them) with `settings`.
///
/// # Errors
///
/// Returns [`DemoError`] if the capacity is zero or a worker thread fails.
pub fn run(scenario: Scenario, settings: &Settings) -> Result<(), DemoError> {
    match scenario {
        Scenario::PushPop => push_pop(),
        Scenario::Timeout => timeout(settings.timeout),
        Scenario::Threaded => threaded(settings),
        Scenario::Shutdown => shutdown(settings.producer_delay),
        Scenario::All => {
            push_pop()?;
            timeout(settings.timeout)?;
            threaded(settings)?;
            shutdown(settings.producer_delay)
        }
    }
}

fn push_pop() -> Result<(), DemoError> {
    info!("testing push and pop");
    let queue = BoundedQueue::<i32>::new(3)?;

    for value in 1..=3 {
        queue.push(value);
    }
    info!(count = queue.count(), "queue filled");

    for _ in 0..3 {
        info!(value = queue.pop(), "popped");
    }
    info!(count = queue.count(), "queue count after pops");

    Ok(())
}

fn timeout(wait: Duration) -> Result<(), DemoError> {
    info!("testing pop with timeout");
    let queue = BoundedQueue::<i32>::new(3)?;

    info!(?wait, "attempting pop with timeout on empty queue");
    match queue.pop_timeout(wait) {
        Ok(value) => warn!(value, "unexpected value from empty queue"),
        Err(err @ Timeout) => info!(%err, "pop timed out"),
    }

    queue.push(10);
    match queue.pop_timeout(wait) {
        Ok(value) => info!(value, "popped after push"),
        Err(err) => warn!(%err, "pushed value not received"),
    }

    Ok(())
}

fn threaded(settings: &Settings) -> Result<(), DemoError> {
    info!(
        capacity = settings.capacity,
        items = settings.items,
        "testing multithreaded push and pop"
    );
    let queue = Arc::new(BoundedQueue::<u32>::new(settings.capacity)?);

    let producer = {
        let queue = Arc::clone(&queue);
        let (items, delay) = (settings.items, settings.producer_delay);
        thread::Builder::new()
            .name("producer".into())
            .spawn(move || {
                for i in 0..items {
                    match queue.push(i) {
                        PushOutcome::Stored => info!(value = i, "pushed"),
                        PushOutcome::Evicted(lost) => {
                            warn!(value = i, overwritten = lost, "pushed into full queue");
                        }
                        PushOutcome::Refused(_) => {
                            warn!(value = i, "queue shut down, push refused");
                            break;
                        }
                    }
                    thread::sleep(delay);
                }
                info!("producer done, shutting queue down");
                queue.shutdown();
            })?
    };

    let consumer = {
        let queue = Arc::clone(&queue);
        let delay = settings.consumer_delay;
        thread::Builder::new()
            .name("consumer".into())
            .spawn(move || {
                let mut received = 0u32;
                while let Ok(value) = queue.recv() {
                    received += 1;
                    info!(value, remaining = queue.count(), "popped");
                    thread::sleep(delay);
                }
                debug!("queue closed");
                received
            })?
    };

    producer.join().map_err(|_| DemoError::Panicked("producer"))?;
    let received = consumer.join().map_err(|_| DemoError::Panicked("consumer"))?;
    info!(
        received,
        lost = settings.items - received,
        "multithreaded run complete"
    );

    Ok(())
}

fn shutdown(delay: Duration) -> Result<(), DemoError> {
    info!("testing shutdown while a consumer is blocked");
    let queue = BoundedQueue::<u32>::new(1)?;

    thread::scope(|s| {
        let waiter = thread::Builder::new()
            .name("waiter".into())
            .spawn_scoped(s, || {
                debug!("blocking on empty queue");
                (queue.recv(), queue.pop())
            })?;

        thread::sleep(delay);
        queue.shutdown();
        info!("queue shut down");

        let (recv, tombstone) = waiter.join().map_err(|_| DemoError::Panicked("waiter"))?;
        match recv {
            Err(Closed) => info!(tombstone, "waiter observed shutdown"),
            Ok(value) => warn!(value, "waiter received data instead of shutdown"),
        }
        Ok(())
    })
}
