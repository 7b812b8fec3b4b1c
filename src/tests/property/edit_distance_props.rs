//! Property-based tests for the bounded edit distance

use proptest::prelude::*;

use crate::core::lexicon::{edit_distance, DISTANCE_SENTINEL};

fn arb_word() -> impl Strategy<Value = String> {
    "[a-z]{0,12}"
}

proptest! {
    #[test]
    fn prop_identity_is_zero(word in arb_word()) {
        prop_assert_eq!(edit_distance(&word, &word), 0);
    }

    #[test]
    fn prop_symmetric(a in arb_word(), b in arb_word()) {
        prop_assert_eq!(edit_distance(&a, &b), edit_distance(&b, &a));
    }

    #[test]
    fn prop_large_length_gap_is_sentinel(a in arb_word(), extra in "[a-z]{3,8}") {
        let longer = format!("{a}{extra}");
        prop_assert_eq!(edit_distance(&a, &longer), DISTANCE_SENTINEL);
    }

    #[test]
    fn prop_bounded_by_longer_length(a in "[a-z]{3,8}", b in "[a-z]{3,8}") {
        prop_assume!(a.len().abs_diff(b.len()) <= 2);
        let distance = edit_distance(&a, &b);
        prop_assert!(distance <= a.len().max(b.len()));
        prop_assert!(distance >= a.len().abs_diff(b.len()));
    }

    #[test]
    fn prop_single_substitution_is_one(word in "[a-y]{1,10}", pos in 0usize..10) {
        let pos = pos % word.len();
        let mut changed: Vec<char> = word.chars().collect();
        changed[pos] = 'z';
        let changed: String = changed.into_iter().collect();
        prop_assert_eq!(edit_distance(&word, &changed), 1);
    }
}
