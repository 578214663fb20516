//! Tests for Store
//!
//! These tests verify:
//! - Opening validates the config and creates the data directory
//! - Put/get/contains with value conversion, length limits and NUL rejection
//! - Count and level growth as data is inserted
//! - Config parsing and builder defaults

use std::path::PathBuf;

use levelkv::{CompactionPolicy, Config, LsmError, Store, VALUE_LEN};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_store(policy: CompactionPolicy, size: usize, ratio: usize) -> (TempDir, Store) {
    let temp_dir = TempDir::new().unwrap();
    let store = Store::new(policy, size, ratio, 4096, 4, temp_dir.path()).unwrap();
    (temp_dir, store)
}

const POLICIES: [CompactionPolicy; 2] = [CompactionPolicy::Leveling, CompactionPolicy::Tiering];

// =============================================================================
// Open Tests
// =============================================================================

#[test]
fn test_open_creates_directory() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("store");

    assert!(!path.exists());

    let config = Config::builder().data_dir(&path).build();
    let _store = Store::open(config).unwrap();

    assert!(path.is_dir());
}

#[test]
fn test_open_rejects_invalid_config() {
    let temp_dir = TempDir::new().unwrap();

    let bad = [
        Config::builder().top_level_size(0),
        Config::builder().size_ratio(0),
        Config::builder().size_ratio(1),
        Config::builder().bloom_bits(0),
        Config::builder().bloom_hashes(0),
    ];

    for builder in bad {
        let config = builder.data_dir(temp_dir.path()).build();
        assert!(matches!(Store::open(config), Err(LsmError::Config(_))));
    }
}

#[test]
fn test_new_store_is_empty() {
    let (_temp, store) = setup_store(CompactionPolicy::Leveling, 4, 2);

    assert_eq!(store.count(), 0);
    assert_eq!(store.level_count(), 1);
    assert_eq!(store.get(1).unwrap(), None);
    assert!(!store.contains(1).unwrap());
}

#[test]
fn test_config_is_kept() {
    let (temp, store) = setup_store(CompactionPolicy::Tiering, 8, 3);

    assert_eq!(store.config().policy, CompactionPolicy::Tiering);
    assert_eq!(store.config().top_level_size, 8);
    assert_eq!(store.config().size_ratio, 3);
    assert_eq!(store.config().data_dir, PathBuf::from(temp.path()));
}

// =============================================================================
// Put / Get Tests
// =============================================================================

#[test]
fn test_put_and_get() {
    for policy in POLICIES {
        let (_temp, mut store) = setup_store(policy, 4, 2);

        store.put(7, "seven").unwrap();
        store.put(-3, "minus three").unwrap();

        assert_eq!(store.get(7).unwrap(), Some("seven".to_string()));
        assert_eq!(store.get(-3).unwrap(), Some("minus three".to_string()));
        assert!(store.contains(7).unwrap());
        assert!(!store.contains(8).unwrap());
    }
}

#[test]
fn test_empty_value() {
    let (_temp, mut store) = setup_store(CompactionPolicy::Leveling, 4, 2);

    store.put(1, "").unwrap();

    assert_eq!(store.get(1).unwrap(), Some(String::new()));
    assert!(store.contains(1).unwrap());
}

#[test]
fn test_longest_value_fits() {
    let (_temp, mut store) = setup_store(CompactionPolicy::Leveling, 2, 2);
    let longest = "x".repeat(VALUE_LEN - 1);

    store.put(1, &longest).unwrap();
    store.put(2, "a").unwrap();
    store.put(3, "b").unwrap();

    assert_eq!(store.get(1).unwrap(), Some(longest));
}

#[test]
fn test_value_too_long_is_rejected() {
    let (_temp, mut store) = setup_store(CompactionPolicy::Tiering, 4, 2);
    let too_long = "x".repeat(VALUE_LEN);

    let result = store.put(1, &too_long);

    assert!(matches!(
        result,
        Err(LsmError::ValueTooLong { len, max }) if len == VALUE_LEN && max == VALUE_LEN - 1
    ));
    assert_eq!(store.count(), 0);
    assert!(!store.contains(1).unwrap());
}

#[test]
fn test_value_with_nul_is_rejected() {
    let (_temp, mut store) = setup_store(CompactionPolicy::Leveling, 4, 2);

    let result = store.put(1, "ab\0cd");

    assert!(matches!(result, Err(LsmError::ValueContainsNul { position: 2 })));
    assert!(matches!(
        "\0".parse::<levelkv::Value>(),
        Err(LsmError::ValueContainsNul { position: 0 })
    ));
    assert_eq!(store.count(), 0);
    assert!(!store.contains(1).unwrap());
}

#[test]
fn test_overwrite_returns_latest() {
    for policy in POLICIES {
        let (_temp, mut store) = setup_store(policy, 3, 2);

        for i in 0..20 {
            store.put(5, &format!("v{}", i)).unwrap();
            store.put(100 + i, "filler").unwrap();
        }

        assert_eq!(store.get(5).unwrap(), Some("v19".to_string()), "{}", policy);
        assert_eq!(store.count(), 40);
    }
}

// =============================================================================
// Growth Tests
// =============================================================================

#[test]
fn test_levels_created_lazily() {
    let (_temp, mut store) = setup_store(CompactionPolicy::Leveling, 2, 2);

    store.put(1, "a").unwrap();
    store.put(2, "b").unwrap();
    assert_eq!(store.level_count(), 1);

    // Flushes: 2 records to level 1 (capacity 4)
    store.put(3, "c").unwrap();
    assert_eq!(store.level_count(), 2);

    // Level 1 fills at 4 and overflows into level 2 (capacity 8)
    for key in 4..=7 {
        store.put(key, "d").unwrap();
    }
    assert_eq!(store.level_count(), 3);
    assert_eq!(store.count(), 7);
}

#[test]
fn test_memory_level_accessor() {
    let (_temp, mut store) = setup_store(CompactionPolicy::Tiering, 4, 2);

    for key in 0..6 {
        store.put(key, "v").unwrap();
    }

    let memory = store.memory_level();
    assert_eq!(memory.len(), 2);
    assert_eq!(memory.next().unwrap().len(), 4);
}

#[test]
fn test_dump_lists_every_level() {
    let (_temp, mut store) = setup_store(CompactionPolicy::Leveling, 2, 2);

    for key in 0..7 {
        store.put(key, "v").unwrap();
    }

    let dump = store.dump(false).unwrap();
    let headers: Vec<&str> = dump.lines().collect();
    assert_eq!(
        headers,
        vec![
            "MemoryLevel 0 leveling capacity: 2 ratio: 2 count: 1 total: 7",
            "DiskLevel 1 leveling capacity: 4 ratio: 2 count: 2 total: 6",
            "DiskLevel 2 leveling capacity: 8 ratio: 2 count: 4 total: 4",
        ]
    );
}

// =============================================================================
// Config Tests
// =============================================================================

#[test]
fn test_policy_parse_and_display() {
    assert_eq!("leveling".parse::<CompactionPolicy>().unwrap(), CompactionPolicy::Leveling);
    assert_eq!("Tiering".parse::<CompactionPolicy>().unwrap(), CompactionPolicy::Tiering);
    assert!(matches!(
        "sorted".parse::<CompactionPolicy>(),
        Err(LsmError::Config(_))
    ));

    assert_eq!(CompactionPolicy::Leveling.to_string(), "leveling");
    assert_eq!(CompactionPolicy::Tiering.to_string(), "tiering");
}

#[test]
fn test_config_defaults() {
    let config = Config::default();

    assert_eq!(config.policy, CompactionPolicy::Leveling);
    assert_eq!(config.top_level_size, 1024);
    assert_eq!(config.size_ratio, 4);
    assert_eq!(config.bloom_bits, 131_072);
    assert_eq!(config.bloom_hashes, 4);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_new_keeps_parameters() {
    let config = Config::new(CompactionPolicy::Tiering, 16, 3, 2048, 2);

    assert_eq!(config.policy, CompactionPolicy::Tiering);
    assert_eq!(config.top_level_size, 16);
    assert_eq!(config.size_ratio, 3);
    assert_eq!(config.bloom_bits, 2048);
    assert_eq!(config.bloom_hashes, 2);
}
