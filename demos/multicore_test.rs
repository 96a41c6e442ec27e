//! Multi-Core Stress Test
//!
//! Writers keep replacing every channel's message while readers hammer the
//! same channels through their own handles. Each message is filled with a
//! byte equal to its own length, so a reader can tell if it ever received
//! bytes from two different writes.

use chardev_channels::{ChannelAccess, ChannelConfig, DEFAULT_MAX_MESSAGE_LEN};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Instant;

const READS_PER_READER: u64 = 200_000;

struct ReaderStats {
    reads: AtomicU64,
    bytes: AtomicU64,
    empty: AtomicU64,
    torn: AtomicU64,
}

impl ReaderStats {
    fn new() -> Self {
        Self {
            reads: AtomicU64::new(0),
            bytes: AtomicU64::new(0),
            empty: AtomicU64::new(0),
            torn: AtomicU64::new(0),
        }
    }

    fn record(&self, message: &[u8]) {
        self.reads.fetch_add(1, Ordering::Relaxed);
        self.bytes.fetch_add(message.len() as u64, Ordering::Relaxed);
        if message.is_empty() {
            self.empty.fetch_add(1, Ordering::Relaxed);
        } else if !message.iter().all(|&b| b as usize == message.len()) {
            self.torn.fetch_add(1, Ordering::Relaxed);
        }
    }
}

fn run_test(channel_count: usize, readers_per_channel: usize) {
    println!("\n═══════════════════════════════════════════════════════════════");
    println!(
        "Testing: {} channels, {} readers each",
        channel_count, readers_per_channel
    );
    println!("═══════════════════════════════════════════════════════════════");

    let access = match ChannelAccess::with_config(&ChannelConfig {
        channel_count,
        max_message_len: DEFAULT_MAX_MESSAGE_LEN,
    }) {
        Ok(a) => Arc::new(a),
        Err(e) => {
            eprintln!("Failed to create channels: {}", e);
            return;
        }
    };

    let stats: Vec<Arc<ReaderStats>> = (0..channel_count)
        .map(|_| Arc::new(ReaderStats::new()))
        .collect();
    let start_barrier = Arc::new(Barrier::new(channel_count * (readers_per_channel + 1) + 1));
    let stop_flag = Arc::new(AtomicBool::new(false));

    // One writer per channel
    let mut writers = Vec::new();
    for channel in 0..channel_count {
        let access = Arc::clone(&access);
        let start_barrier = Arc::clone(&start_barrier);
        let stop_flag = Arc::clone(&stop_flag);

        writers.push(thread::spawn(move || {
            let h = access.open(channel).expect("open writer handle");
            start_barrier.wait();

            let mut writes = 0u64;
            while !stop_flag.load(Ordering::Relaxed) {
                let len = 1 + (writes as usize * 31) % DEFAULT_MAX_MESSAGE_LEN;
                access.write(h, &vec![len as u8; len]).expect("write");
                writes += 1;
            }
            access.close(h).expect("close writer handle");
            writes
        }));
    }

    // Readers always ask for a whole message, so their cursors stay at 0
    let mut readers = Vec::new();
    for channel in 0..channel_count {
        for _ in 0..readers_per_channel {
            let access = Arc::clone(&access);
            let start_barrier = Arc::clone(&start_barrier);
            let stats = Arc::clone(&stats[channel]);

            readers.push(thread::spawn(move || {
                let h = access.open(channel).expect("open reader handle");
                let mut buf = [0u8; DEFAULT_MAX_MESSAGE_LEN];
                start_barrier.wait();

                for _ in 0..READS_PER_READER {
                    let n = access.read(h, &mut buf).expect("read");
                    stats.record(&buf[..n]);
                }
                access.close(h).expect("close reader handle");
            }));
        }
    }

    let test_start = Instant::now();
    start_barrier.wait();

    for reader in readers {
        reader.join().unwrap();
    }
    let test_duration = test_start.elapsed();

    stop_flag.store(true, Ordering::SeqCst);
    let writes: Vec<u64> = writers.into_iter().map(|w| w.join().unwrap()).collect();

    println!("\n┌─────────┬───────────┬───────────┬────────┬────────┐");
    println!("│ Channel │   Writes  │   Reads   │ Empty  │  Torn  │");
    println!("├─────────┼───────────┼───────────┼────────┼────────┤");

    let mut total_reads = 0u64;
    let mut total_bytes = 0u64;
    let mut total_torn = 0u64;
    for (i, stat) in stats.iter().enumerate() {
        let reads = stat.reads.load(Ordering::Relaxed);
        let empty = stat.empty.load(Ordering::Relaxed);
        let torn = stat.torn.load(Ordering::Relaxed);
        println!(
            "│  {:>3}    │ {:>9} │ {:>9} │ {:>6} │ {:>6} │",
            i, writes[i], reads, empty, torn
        );
        total_reads += reads;
        total_bytes += stat.bytes.load(Ordering::Relaxed);
        total_torn += torn;
    }
    println!("└─────────┴───────────┴───────────┴────────┴────────┘");

    let secs = test_duration.as_secs_f64();
    println!("\n📊 AGGREGATE RESULTS:");
    println!("   Test duration:    {:.2} seconds", secs);
    println!("   Reads:            {:.0} reads/s", total_reads as f64 / secs);
    println!("   Bandwidth:        {:.2} MB/s", total_bytes as f64 / secs / 1_000_000.0);
    println!("   Open handles:     {}", access.open_handles());

    if total_torn == 0 {
        println!("   ✅ No torn reads");
    } else {
        println!("   ❌ {} torn reads", total_torn);
        std::process::exit(1);
    }
}

fn main() {
    env_logger::init();

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              Channel Multi-Core Stress Test                   ║");
    println!(
        "║         Available CPUs: {:<38}║",
        std::thread::available_parallelism().map(|p| p.get()).unwrap_or(1)
    );
    println!("╚═══════════════════════════════════════════════════════════════╝");

    for (channels, readers) in [(1, 4), (5, 2), (5, 8)] {
        run_test(channels, readers);
    }

    println!("\n╔═══════════════════════════════════════════════════════════════╗");
    println!("║                    Test Complete!                             ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
}
