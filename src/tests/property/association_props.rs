//! Property-based tests for merged association lists

use std::collections::HashSet;

use proptest::prelude::*;

use crate::config::AssociationConfig;
use crate::core::association::{merge, AssociatedWord, RelationFilter, RelationType};
use crate::tests::common::create_test_lexicon;

/// Short lowercase words, some sharing roots, with duplicates allowed.
fn arb_words() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop_oneof![
            "[a-e]{1,6}",
            "(at|ex|con)tract(or|s)?",
            "(in|re)spect(ion)?",
        ],
        1..40,
    )
}

fn arb_filter() -> impl Strategy<Value = RelationFilter> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(root, semantic, spelling)| {
        RelationFilter {
            root,
            semantic,
            spelling,
        }
    })
}

proptest! {
    #[test]
    fn prop_merge_has_no_duplicates_and_excludes_selected(
        words in arb_words(),
        selected_idx in any::<prop::sample::Index>(),
        semantic_picks in prop::collection::vec((any::<prop::sample::Index>(), 0.0f64..1.0), 0..15),
        filter in arb_filter(),
    ) {
        let refs: Vec<&str> = words.iter().map(String::as_str).collect();
        let lexicon = create_test_lexicon(&refs);
        let nodes = lexicon.nodes();
        let selected = &nodes[selected_idx.index(nodes.len())];
        let semantic: Vec<AssociatedWord> = semantic_picks
            .iter()
            .map(|(idx, score)| AssociatedWord::semantic(nodes[idx.index(nodes.len())].clone(), *score))
            .collect();
        let config = AssociationConfig::default();

        let result = merge(selected, &lexicon, filter, &semantic, &config);

        let mut seen = HashSet::new();
        for assoc in &result {
            prop_assert!(assoc.word.word != selected.word);
            prop_assert!(seen.insert(assoc.word.word.clone()), "duplicate {}", assoc.word.word);
            prop_assert!(filter.enabled(assoc.relation));
        }
        let spelling = result.iter().filter(|a| a.relation == RelationType::Spelling).count();
        prop_assert!(spelling <= config.spelling_limit);
    }

    #[test]
    fn prop_relations_are_grouped_in_priority_order(
        words in arb_words(),
        selected_idx in any::<prop::sample::Index>(),
    ) {
        let refs: Vec<&str> = words.iter().map(String::as_str).collect();
        let lexicon = create_test_lexicon(&refs);
        let nodes = lexicon.nodes();
        let selected = &nodes[selected_idx.index(nodes.len())];
        let semantic: Vec<AssociatedWord> = nodes
            .iter()
            .take(5)
            .map(|n| AssociatedWord::semantic(n.clone(), 0.5))
            .collect();

        let result = merge(selected, &lexicon, RelationFilter::ALL, &semantic, &AssociationConfig::default());

        let rank = |r: RelationType| match r {
            RelationType::Root => 0,
            RelationType::Semantic => 1,
            RelationType::Spelling => 2,
        };
        let ranks: Vec<u8> = result.iter().map(|a| rank(a.relation)).collect();
        prop_assert!(ranks.windows(2).all(|w| w[0] <= w[1]));
    }
}
