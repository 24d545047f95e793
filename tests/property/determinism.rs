//! Property-based tests for determinism guarantees

use cachekey::content::{ContentHasher, ContentHashing, MerkleNode};
use cachekey::hashers::WarningFilter;
use proptest::prelude::*;
use std::collections::HashMap;

proptest! {
    /// Framing keeps different string lists apart, even when their
    /// concatenations are equal.
    #[test]
    fn prop_string_list_framing_is_injective(
        left in prop::collection::vec(".{0,6}", 0..5),
        right in prop::collection::vec(".{0,6}", 0..5),
    ) {
        let hasher = ContentHasher::new();
        prop_assume!(left != right);
        prop_assert_ne!(hasher.hash_strings(&left), hasher.hash_strings(&right));
    }

    /// Map hashing depends on contents only, never on insertion order.
    #[test]
    fn prop_map_hash_ignores_insertion_order(
        entries in prop::collection::vec(("[A-Z_]{1,8}", ".{0,8}"), 0..12),
    ) {
        let hasher = ContentHasher::new();
        let forward: HashMap<String, String> = entries.into_iter().collect();
        let mut pairs: Vec<(String, String)> = forward.clone().into_iter().collect();
        pairs.reverse();
        let backward: HashMap<String, String> = pairs.into_iter().collect();
        prop_assert_eq!(hasher.hash_map(&forward), hasher.hash_map(&backward));
    }

    /// Identical trees built twice hash identically, and renaming a leaf
    /// changes the root.
    #[test]
    fn prop_merkle_root_is_deterministic(
        leaves in prop::collection::btree_map("[a-z]{1,6}", ".{0,12}", 1..8),
    ) {
        let hasher = ContentHasher::new();
        let build = |suffix: &str| {
            MerkleNode::branch(
                "root",
                leaves
                    .iter()
                    .map(|(id, value)| MerkleNode::leaf(format!("{id}{suffix}"), hasher.hash_str(value)))
                    .collect(),
            )
        };
        prop_assert_eq!(build("").hash, build("").hash);
        prop_assert_ne!(build("").hash, build("_renamed").hash);
    }

    /// No warning flag survives filtering, and every other token keeps its order.
    #[test]
    fn prop_filter_flags_drops_only_warnings(
        tokens in prop::collection::vec(
            prop_oneof![
                Just("-Wall".to_string()),
                Just("-Wno-unused".to_string()),
                Just("-w".to_string()),
                Just("-Xcc".to_string()),
                Just("-Wl,-ObjC".to_string()),
                Just("-DDEBUG".to_string()),
                Just("-Onone".to_string()),
            ],
            0..12,
        ),
    ) {
        let filter = WarningFilter::new();
        let kept = filter.filter_flags(tokens.clone());
        prop_assert!(kept.iter().all(|token| !WarningFilter::is_warning_flag(token)));

        let expected_other: Vec<&String> = tokens
            .iter()
            .filter(|token| !WarningFilter::is_warning_flag(token) && token.as_str() != "-Xcc")
            .collect();
        let kept_other: Vec<&String> = kept.iter().filter(|token| token.as_str() != "-Xcc").collect();
        prop_assert_eq!(expected_other, kept_other);
    }
}
