//! # Configuration Tests
//!
//! Tests for configuration defaults, policy name parsing, JSON
//! deserialization, and geometry validation.

use cachesim_core::common::{CacheError, PolicyKind};
use cachesim_core::config::*;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn test_cache_config_defaults() {
    let config = CacheConfig::default();
    assert_eq!(config.num_sets, 64);
    assert_eq!(config.set_size, 4);
    assert_eq!(config.block_size, 64);
    assert_eq!(config.replacement_policy, ReplacementPolicy::Lru);
    assert_eq!(config.write_policy, WritePolicy::WriteBack);
    assert_eq!(config.seed, None);
    assert_eq!(config.capacity_bytes(), 16 * 1024);
}

#[test]
fn test_default_config_is_valid() {
    assert!(CacheConfig::default().validate().is_ok());
}

// ══════════════════════════════════════════════════════════
// Policy names
// ══════════════════════════════════════════════════════════

#[rstest]
#[case("FIFO", ReplacementPolicy::Fifo)]
#[case("fifo", ReplacementPolicy::Fifo)]
#[case("LRU", ReplacementPolicy::Lru)]
#[case(" lru ", ReplacementPolicy::Lru)]
#[case("Random", ReplacementPolicy::Random)]
#[case("RANDOM", ReplacementPolicy::Random)]
#[case("rand", ReplacementPolicy::Random)]
fn test_replacement_policy_names(#[case] name: &str, #[case] expected: ReplacementPolicy) {
    assert_eq!(name.parse::<ReplacementPolicy>(), Ok(expected));
}

#[rstest]
#[case("write-back", WritePolicy::WriteBack)]
#[case("WriteBack", WritePolicy::WriteBack)]
#[case("wb", WritePolicy::WriteBack)]
#[case("write_through", WritePolicy::WriteThrough)]
#[case("write-through", WritePolicy::WriteThrough)]
#[case("WT", WritePolicy::WriteThrough)]
fn test_write_policy_names(#[case] name: &str, #[case] expected: WritePolicy) {
    assert_eq!(name.parse::<WritePolicy>(), Ok(expected));
}

#[test]
fn test_unknown_replacement_policy() {
    let err = "PLRU".parse::<ReplacementPolicy>().unwrap_err();
    assert_eq!(
        err,
        CacheError::UnknownPolicy {
            kind: PolicyKind::Replacement,
            name: "PLRU".to_string(),
        }
    );
    assert_eq!(err.to_string(), "unknown replacement policy `PLRU`");
}

#[test]
fn test_unknown_write_policy() {
    let err = "write-around".parse::<WritePolicy>().unwrap_err();
    assert!(matches!(
        err,
        CacheError::UnknownPolicy {
            kind: PolicyKind::Write,
            ..
        }
    ));
}

#[test]
fn test_policy_display_names() {
    assert_eq!(ReplacementPolicy::Fifo.to_string(), "FIFO");
    assert_eq!(ReplacementPolicy::Lru.to_string(), "LRU");
    assert_eq!(ReplacementPolicy::Random.to_string(), "Random");
    assert_eq!(WritePolicy::WriteBack.to_string(), "write-back");
    assert_eq!(WritePolicy::WriteThrough.to_string(), "write-through");
}

// ══════════════════════════════════════════════════════════
// from_names
// ══════════════════════════════════════════════════════════

#[test]
fn test_from_names_builds_config() {
    let config = CacheConfig::from_names(8, 2, 32, "fifo", "write-through").unwrap();
    assert_eq!(config.num_sets, 8);
    assert_eq!(config.set_size, 2);
    assert_eq!(config.block_size, 32);
    assert_eq!(config.replacement_policy, ReplacementPolicy::Fifo);
    assert_eq!(config.write_policy, WritePolicy::WriteThrough);
}

#[test]
fn test_from_names_rejects_unknown_policy() {
    let err = CacheConfig::from_names(8, 2, 32, "clock", "write-back").unwrap_err();
    assert!(matches!(err, CacheError::UnknownPolicy { .. }));
}

#[rstest]
#[case(0, 2, 32)]
#[case(8, 0, 32)]
#[case(8, 2, 0)]
fn test_from_names_rejects_zero_geometry(
    #[case] num_sets: usize,
    #[case] set_size: usize,
    #[case] block_size: usize,
) {
    let err = CacheConfig::from_names(num_sets, set_size, block_size, "LRU", "write-back")
        .unwrap_err();
    assert_eq!(
        err,
        CacheError::InvalidGeometry {
            num_sets,
            set_size,
            block_size,
        }
    );
}

#[test]
fn test_with_seed() {
    let config = CacheConfig::default().with_seed(42);
    assert_eq!(config.seed, Some(42));
}

// ══════════════════════════════════════════════════════════
// JSON
// ══════════════════════════════════════════════════════════

#[test]
fn test_json_full_document() {
    let json = r#"{
        "num_sets": 2,
        "set_size": 8,
        "block_size": 16,
        "replacement_policy": "random",
        "write_policy": "write_through",
        "seed": 9
    }"#;
    let config = CacheConfig::from_json(json).unwrap();
    assert_eq!(
        config,
        CacheConfig {
            num_sets: 2,
            set_size: 8,
            block_size: 16,
            replacement_policy: ReplacementPolicy::Random,
            write_policy: WritePolicy::WriteThrough,
            seed: Some(9),
        }
    );
}

#[test]
fn test_json_missing_fields_use_defaults() {
    let config = CacheConfig::from_json(r#"{ "set_size": 1 }"#).unwrap();
    assert_eq!(config.set_size, 1);
    assert_eq!(config.num_sets, 64);
    assert_eq!(config.block_size, 64);
    assert_eq!(config.replacement_policy, ReplacementPolicy::Lru);
}

#[test]
fn test_json_unknown_policy_is_error() {
    let err = CacheConfig::from_json(r#"{ "replacement_policy": "MRU" }"#).unwrap_err();
    assert!(err.to_string().contains("unknown replacement policy"));
}

#[test]
fn test_json_zero_geometry_parses_but_fails_validation() {
    let config = CacheConfig::from_json(r#"{ "num_sets": 0 }"#).unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn test_json_serialize_uses_canonical_names() {
    let config = CacheConfig::default().with_seed(3);
    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains(r#""replacement_policy":"LRU""#));
    assert!(json.contains(r#""write_policy":"write-back""#));

    let back = CacheConfig::from_json(&json).unwrap();
    assert_eq!(back, config);
}

// ══════════════════════════════════════════════════════════
// Capacity overflow
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(4, 4, usize::MAX / 2)]
#[case(usize::MAX, 2, 1)]
#[case(usize::MAX / 4, 2, 4)]
fn test_overflowing_geometry_is_rejected(
    #[case] num_sets: usize,
    #[case] set_size: usize,
    #[case] block_size: usize,
) {
    let config = CacheConfig {
        num_sets,
        set_size,
        block_size,
        ..CacheConfig::default()
    };
    assert_eq!(
        config.validate(),
        Err(CacheError::InvalidGeometry {
            num_sets,
            set_size,
            block_size,
        })
    );
    assert!(cachesim_core::Cache::<u64>::new(&config).is_err());
}

#[test]
fn test_capacity_bytes_saturates_instead_of_panicking() {
    let config = CacheConfig {
        num_sets: 4,
        set_size: 4,
        block_size: usize::MAX / 2,
        ..CacheConfig::default()
    };
    assert_eq!(config.capacity_bytes(), usize::MAX);
}

#[test]
fn test_largest_fitting_geometry_is_accepted() {
    let config = CacheConfig {
        num_sets: 1,
        set_size: 1,
        block_size: usize::MAX,
        ..CacheConfig::default()
    };
    assert!(config.validate().is_ok());
    assert_eq!(config.capacity_bytes(), usize::MAX);
}
