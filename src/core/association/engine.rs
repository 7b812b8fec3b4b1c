use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use super::{AssociatedWord, RelationFilter, RelationType};
use crate::config::AssociationConfig;
use crate::core::lexicon::{edit_distance, Lexicon, WordNode};
use crate::core::similarity::{SimilarWord, SimilarityLoader};

/// Monotonic tag of a selection. Only results tagged with the latest
/// generation are ever merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SelectionGeneration(u64);

pub struct AssociationEngine {
    similarity: SimilarityLoader,
    config: AssociationConfig,
    generation: AtomicU64,
}

impl AssociationEngine {
    pub fn new(similarity: SimilarityLoader, config: AssociationConfig) -> Self {
        Self {
            similarity,
            config,
            generation: AtomicU64::new(0),
        }
    }

    /// Record a selection change. Every earlier generation becomes stale.
    pub fn select(&self) -> SelectionGeneration {
        SelectionGeneration(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn current_generation(&self) -> SelectionGeneration {
        SelectionGeneration(self.generation.load(Ordering::SeqCst))
    }

    pub fn is_current(&self, generation: SelectionGeneration) -> bool {
        self.current_generation() == generation
    }

    /// Root and spelling neighbours, available without waiting.
    pub fn immediate(
        &self,
        selected: &WordNode,
        lexicon: &Lexicon,
        filter: RelationFilter,
    ) -> Vec<AssociatedWord> {
        merge(selected, lexicon, filter, &[], &self.config)
    }

    /// Debounced semantic lookup for the selection tagged `generation`.
    ///
    /// Returns `None` if another selection happened before the delay
    /// elapsed or before the lookup finished.
    pub async fn semantic(
        &self,
        generation: SelectionGeneration,
        selected: &WordNode,
        lexicon: &Lexicon,
    ) -> Option<Vec<AssociatedWord>> {
        tokio::time::sleep(self.config.debounce()).await;
        if !self.is_current(generation) {
            debug!(word = %selected.word, "Semantic lookup abandoned before start");
            return None;
        }

        let similar = self
            .similarity
            .get_similar_words_for_word(&selected.word, lexicon.word_set())
            .await;

        if !self.is_current(generation) {
            debug!(word = %selected.word, "Discarding stale semantic result");
            return None;
        }
        Some(semantic_neighbours(&similar, lexicon, self.config.semantic_limit))
    }

    /// Full association for a new selection.
    ///
    /// `None` means a newer selection superseded this one while the semantic
    /// lookup was pending.
    pub async fn associate(
        &self,
        selected: &WordNode,
        lexicon: &Lexicon,
        filter: RelationFilter,
    ) -> Option<Vec<AssociatedWord>> {
        let generation = self.select();
        let semantic = if filter.semantic {
            self.semantic(generation, selected, lexicon).await?
        } else {
            Vec::new()
        };
        Some(merge(selected, lexicon, filter, &semantic, &self.config))
    }
}

/// Map table neighbours onto lexicon nodes, keeping the best `limit`.
fn semantic_neighbours(similar: &[SimilarWord], lexicon: &Lexicon, limit: usize) -> Vec<AssociatedWord> {
    similar
        .iter()
        .take(limit)
        .filter_map(|s| {
            lexicon
                .get(&s.word)
                .map(|node| AssociatedWord::semantic(node.clone(), s.similarity))
        })
        .collect()
}

fn is_spelling_neighbour(selected: &WordNode, candidate: &WordNode, config: &AssociationConfig) -> bool {
    let candidate_len = candidate.char_len();
    candidate_len >= config.min_spelling_length
        && selected.char_len().abs_diff(candidate_len) <= config.max_length_difference
        && edit_distance(&selected.word, &candidate.word) <= config.max_spelling_distance
}

/// Combine the relations in priority order root, semantic, spelling.
///
/// `semantic` is whatever semantic result is currently known for this
/// selection (possibly none yet).
pub fn merge(
    selected: &WordNode,
    lexicon: &Lexicon,
    filter: RelationFilter,
    semantic: &[AssociatedWord],
    config: &AssociationConfig,
) -> Vec<AssociatedWord> {
    let mut associations = Vec::new();
    let mut added: HashSet<&str> = HashSet::from([selected.word.as_str()]);

    if filter.root {
        if let Some(root) = selected.root {
            for node in lexicon.nodes() {
                if node.root == Some(root) && added.insert(node.word.as_str()) {
                    associations.push(AssociatedWord::new(node.clone(), RelationType::Root));
                }
            }
        }
    }

    if filter.semantic {
        for assoc in semantic {
            if !added.contains(assoc.word.word.as_str()) {
                associations.push(assoc.clone());
                added.insert(assoc.word.word.as_str());
            }
        }
    }

    if filter.spelling {
        let mut found = 0;
        for node in lexicon.nodes() {
            if found == config.spelling_limit {
                break;
            }
            if !added.contains(node.word.as_str()) && is_spelling_neighbour(selected, node, config) {
                added.insert(node.word.as_str());
                associations.push(AssociatedWord::new(node.clone(), RelationType::Spelling));
                found += 1;
            }
        }
    }

    associations
}
