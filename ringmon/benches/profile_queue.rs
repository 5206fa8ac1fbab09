//! Ping-pong wake latency for `BoundedQueue` versus crossbeam-channel.
//!
//! Both sides block (condvar / channel park) rather than spin, so this
//! measures the full wake path: push -> notify -> waiter reacquires lock.
//!
//! Run: cargo bench --bench profile_queue
//! Pinned: sudo taskset -c 0,2 ./target/release/deps/profile_queue-*

use std::sync::Arc;
use std::thread;
use std::time::Instant;

use hdrhistogram::Histogram;
use ringmon::BoundedQueue;

const WARMUP: u64 = 10_000;
const SAMPLES: u64 = 100_000;
const CAPACITY: usize = 64;

fn bench_ringmon() -> Histogram<u64> {
    let fwd = Arc::new(BoundedQueue::<u64>::new(CAPACITY).unwrap());
    let ret = Arc::new(BoundedQueue::<u64>::new(CAPACITY).unwrap());

    let echo = {
        let fwd = Arc::clone(&fwd);
        let ret = Arc::clone(&ret);
        thread::spawn(move || {
            while let Ok(v) = fwd.recv() {
                ret.push(v);
            }
        })
    };

    let mut hist = Histogram::<u64>::new_with_max(10_000_000, 3).unwrap();

    for i in 0..WARMUP + SAMPLES {
        let start = Instant::now();
        fwd.push(i);
        let echoed = ret.pop();
        let elapsed = start.elapsed().as_nanos() as u64 / 2;

        debug_assert_eq!(echoed, i);
        if i >= WARMUP {
            let _ = hist.record(elapsed.min(10_000_000));
        }
    }

    fwd.shutdown();
    echo.join().unwrap();
    hist
}

fn bench_crossbeam_channel() -> Histogram<u64> {
    let (fwd_tx, fwd_rx) = crossbeam_channel::bounded::<u64>(CAPACITY);
    let (ret_tx, ret_rx) = crossbeam_channel::bounded::<u64>(CAPACITY);

    let echo = thread::spawn(move || {
        for v in fwd_rx {
            ret_tx.send(v).unwrap();
        }
    });

    let mut hist = Histogram::<u64>::new_with_max(10_000_000, 3).unwrap();

    for i in 0..WARMUP + SAMPLES {
        let start = Instant::now();
        fwd_tx.send(i).unwrap();
        let echoed = ret_rx.recv().unwrap();
        let elapsed = start.elapsed().as_nanos() as u64 / 2;

        debug_assert_eq!(echoed, i);
        if i >= WARMUP {
            let _ = hist.record(elapsed.min(10_000_000));
        }
    }

    drop(fwd_tx);
    echo.join().unwrap();
    hist
}

fn print_histogram(name: &str, hist: &Histogram<u64>) {
    println!("{}:", name);
    println!("    min:   {:>8} ns", hist.min());
    println!("    p50:   {:>8} ns", hist.value_at_quantile(0.50));
    println!("    p99:   {:>8} ns", hist.value_at_quantile(0.99));
    println!("    p999:  {:>8} ns", hist.value_at_quantile(0.999));
    println!("    max:   {:>8} ns", hist.max());
    println!();
}

fn main() {
    println!("ringmon ping-pong latency (RTT/2)");
    println!("=================================");
    println!("Warmup:  {}", WARMUP);
    println!("Samples: {}", SAMPLES);
    println!();

    let ringmon_hist = bench_ringmon();
    print_histogram("ringmon BoundedQueue", &ringmon_hist);

    let channel_hist = bench_crossbeam_channel();
    print_histogram("crossbeam-channel bounded", &channel_hist);

    println!(
        "p50 ratio (ringmon / crossbeam): {:.2}x",
        ringmon_hist.value_at_quantile(0.50) as f64
            / channel_hist.value_at_quantile(0.50).max(1) as f64
    );
}
