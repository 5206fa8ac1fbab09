//! ringmon-demo — producer/consumer walkthrough of `BoundedQueue`.
//!
//! # Usage
//!
//! ```bash
//! ringmon-demo                                  # all scenarios
//! ringmon-demo --scenario threaded --capacity 2 --consumer-delay-ms 300
//! RUST_LOG=debug ringmon-demo --scenario shutdown
//! ```

mod scenario;
mod trace;

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::error;

use scenario::{Scenario, Settings};

/// Default delay between pushes in the threaded scenario (milliseconds).
const PRODUCER_DELAY_MS_DEFAULT: u64 = 500;

/// Default delay between pops in the threaded scenario (milliseconds).
const CONSUMER_DELAY_MS_DEFAULT: u64 = 700;

/// Drive a bounded overwrite-on-full queue from producer and consumer threads.
#[derive(Parser, Debug)]
#[command(name = "ringmon-demo")]
#[command(about = "Producer/consumer demonstration of ringmon::BoundedQueue")]
struct Cli {
    /// Scenario to run.
    #[arg(long, value_enum, default_value_t = Scenario::All)]
    scenario: Scenario,

    /// Queue capacity for the threaded scenario.
    #[arg(long, default_value_t = 5)]
    capacity: usize,

    /// Number of values the producer pushes.
    #[arg(long, default_value_t = 10)]
    items: u32,

    /// Delay after each push (milliseconds).
    #[arg(long, default_value_t = PRODUCER_DELAY_MS_DEFAULT)]
    producer_delay_ms: u64,

    /// Delay after each pop (milliseconds).
    ///
    /// A consumer slower than the producer makes the queue overwrite.
    #[arg(long, default_value_t = CONSUMER_DELAY_MS_DEFAULT)]
    consumer_delay_ms: u64,

    /// Timeout for the timed-pop scenario (milliseconds).
    #[arg(long, default_value_t = 1000)]
    timeout_ms: u64,

    /// Tracing filter directive; overrides `RUST_LOG`.
    #[arg(long)]
    log_filter: Option<String>,
}

impl Cli {
    fn settings(&self) -> Settings {
        Settings {
            capacity: self.capacity,
            items: self.items,
            producer_delay: Duration::from_millis(self.producer_delay_ms),
            consumer_delay: Duration::from_millis(self.consumer_delay_ms),
            timeout: Duration::from_millis(self.timeout_ms),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    trace::init_tracing(cli.log_filter.as_deref());

    match scenario::run(cli.scenario, &cli.settings()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "scenario failed");
            ExitCode::FAILURE
        }
    }
}
