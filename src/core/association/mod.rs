//! Association Engine
//!
//! Merges the three relations of a selected word into one ranked list:
//!
//! 1. **root** - lexicon words sharing the selected word's root, lexicon order
//! 2. **semantic** - precomputed neighbours from the similarity table, best first
//! 3. **spelling** - close edit distance and length, lexicon order
//!
//! A word appears at most once, under the first relation that found it, and
//! the selected word itself never appears.
//!
//! Root and spelling neighbours are computed synchronously. The semantic
//! lookup is debounced and tagged with the selection generation that asked
//! for it; a result whose generation has been superseded is dropped.

pub mod engine;

use serde::{Deserialize, Serialize};

use crate::core::lexicon::WordNode;

pub use engine::{merge, AssociationEngine, SelectionGeneration};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationType {
    Root,
    Semantic,
    Spelling,
}

impl RelationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationType::Root => "root",
            RelationType::Semantic => "semantic",
            RelationType::Spelling => "spelling",
        }
    }
}

impl std::fmt::Display for RelationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which relations are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationFilter {
    pub root: bool,
    pub semantic: bool,
    pub spelling: bool,
}

impl RelationFilter {
    pub const ALL: RelationFilter = RelationFilter {
        root: true,
        semantic: true,
        spelling: true,
    };

    pub const NONE: RelationFilter = RelationFilter {
        root: false,
        semantic: false,
        spelling: false,
    };

    pub fn only(relation: RelationType) -> Self {
        Self::NONE.with(relation, true)
    }

    pub fn with(mut self, relation: RelationType, enabled: bool) -> Self {
        match relation {
            RelationType::Root => self.root = enabled,
            RelationType::Semantic => self.semantic = enabled,
            RelationType::Spelling => self.spelling = enabled,
        }
        self
    }

    pub fn enabled(&self, relation: RelationType) -> bool {
        match relation {
            RelationType::Root => self.root,
            RelationType::Semantic => self.semantic,
            RelationType::Spelling => self.spelling,
        }
    }
}

impl Default for RelationFilter {
    fn default() -> Self {
        Self::ALL
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssociatedWord {
    pub word: WordNode,
    pub relation: RelationType,
    /// Only set for semantic neighbours.
    pub similarity: Option<f64>,
}

impl AssociatedWord {
    pub fn new(word: WordNode, relation: RelationType) -> Self {
        Self {
            word,
            relation,
            similarity: None,
        }
    }

    pub fn semantic(word: WordNode, similarity: f64) -> Self {
        Self {
            word,
            relation: RelationType::Semantic,
            similarity: Some(similarity),
        }
    }
}
