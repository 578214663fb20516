//! levelkv Benchmark Binary
//!
//! Times a batch of shuffled inserts followed by a batch of random lookups
//! and prints the parameters and timings as one CSV line.

use std::time::Instant;

use clap::Parser;
use levelkv::{workload, CompactionPolicy, Store};
use rand::Rng;
use tracing_subscriber::{fmt, EnvFilter};

const BENCH_VALUE: &str = "This is text";

/// levelkv benchmark
#[derive(Parser, Debug)]
#[command(name = "levelkv-bench")]
#[command(about = "Insert and lookup timings for a levelkv store")]
#[command(version)]
struct Args {
    /// Compaction policy: leveling or tiering
    mode: CompactionPolicy,

    /// Memory level capacity (records)
    size: usize,

    /// Capacity ratio between adjacent levels
    ratio: usize,

    /// Bloom filter bits per level
    bits: u64,

    /// Bloom filter hash functions
    hashes: u32,

    /// Number of keys to insert
    inserts: usize,

    /// Number of lookups to perform
    searches: usize,

    /// Data directory
    #[arg(short, long, default_value = "./levelkv_data")]
    data_dir: String,
}

fn main() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,levelkv=info"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        tracing::error!("Benchmark failed: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> levelkv::Result<()> {
    let mut store = Store::new(
        args.mode,
        args.size,
        args.ratio,
        args.bits,
        args.hashes,
        &args.data_dir,
    )?;

    let mut rng = rand::thread_rng();
    let keys = workload::shuffled_even_keys(args.inserts, &mut rng)?;

    let start = Instant::now();
    for &key in &keys {
        store.put(key, BENCH_VALUE)?;
    }
    let insert_secs = start.elapsed().as_secs_f64();

    let upper = levelkv::Key::try_from(args.inserts.max(1)).unwrap_or(levelkv::Key::MAX);
    let start = Instant::now();
    for _ in 0..args.searches {
        store.contains(rng.gen_range(0..upper))?;
    }
    let search_secs = start.elapsed().as_secs_f64();

    tracing::info!("Inserted {} records into {} levels", store.count(), store.level_count());

    println!(
        "{},{},{},{},{},{},{},{:.6},{:.6}",
        args.mode,
        args.size,
        args.ratio,
        args.bits,
        args.hashes,
        args.inserts,
        args.searches,
        insert_secs,
        search_secs
    );
    Ok(())
}
