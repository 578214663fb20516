//! levelkv Check Binary
//!
//! Correctness smoke test: membership of shuffled even keys, absence of
//! odd keys, and last-write-wins on a repeatedly updated key, under both
//! compaction policies.

use clap::Parser;
use levelkv::{workload, CompactionPolicy, Config, Store};
use rand::Rng;
use tracing_subscriber::{fmt, EnvFilter};

/// levelkv correctness check
#[derive(Parser, Debug)]
#[command(name = "levelkv-check")]
#[command(about = "Correctness checks for a levelkv store")]
#[command(version)]
struct Args {
    /// Number of keys to insert in the membership check
    n: usize,

    /// Print the full tree after each check
    #[arg(long)]
    debug: bool,

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
        tracing::error!("Check failed: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> levelkv::Result<()> {
    for policy in [CompactionPolicy::Tiering, CompactionPolicy::Leveling] {
        let config = Config::builder()
            .data_dir(&args.data_dir)
            .policy(policy)
            .top_level_size(1024)
            .size_ratio(3)
            .bloom_bits(1024 * 1024)
            .bloom_hashes(4)
            .build();
        let mut store = Store::open(config)?;
        let passed = check_membership(&mut store, args.n)?;
        report(&format!("{} membership", policy), passed);
        if args.debug {
            println!("{}", store.dump(false)?);
        }
    }

    for policy in [CompactionPolicy::Tiering, CompactionPolicy::Leveling] {
        let mut store = Store::new(policy, 5, 2, 1024, 4, &args.data_dir)?;
        let passed = check_updates(&mut store)?;
        report(&format!("{} updates", policy), passed);
        if args.debug {
            println!("{}", store.dump(true)?);
        }
    }

    Ok(())
}

/// Insert `n` shuffled even keys, then probe random keys in `[0, 2n)`:
/// even ones must be found, odd ones must not.
fn check_membership(store: &mut Store, n: usize) -> levelkv::Result<bool> {
    let mut rng = rand::thread_rng();
    for key in workload::shuffled_even_keys(n, &mut rng)? {
        store.put(key, &key.to_string())?;
    }

    let upper = levelkv::Key::try_from(2 * n.max(1)).unwrap_or(levelkv::Key::MAX);
    let mut mismatches = 0;
    for _ in 0..n / 100 {
        let key = rng.gen_range(0..upper);
        let expected = key % 2 == 0;
        if store.contains(key)? != expected {
            tracing::warn!("Key {} expected present={}", key, expected);
            mismatches += 1;
        }
    }
    Ok(mismatches == 0)
}

/// Overwrite key 1 with "1" through "7" across several flushes
fn check_updates(store: &mut Store) -> levelkv::Result<bool> {
    for i in 1..=7 {
        store.put(1, &i.to_string())?;
    }
    Ok(store.get(1)?.as_deref() == Some("7") && store.count() == 7)
}

fn report(name: &str, passed: bool) {
    if passed {
        println!("Success: {}", name);
    } else {
        println!("Failure: {}", name);
    }
}
