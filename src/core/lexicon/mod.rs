//! Lexicon model
//!
//! Raw dictionary entries as shipped in the JSON word lists, and the derived
//! [`WordNode`] projection the association engine works on.

pub mod dictionary;
pub mod edit_distance;
pub mod roots;

use std::collections::{HashMap, HashSet};

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};

pub use dictionary::{DictionaryError, DictionaryLoader, DictionaryResult, DICTIONARY_NAMES};
pub use edit_distance::{edit_distance, DISTANCE_SENTINEL};
pub use roots::{detect_root, RootEntry, RootTable, DEFAULT_WORD_COLOR};

/// Shown when an entry carries no translations.
pub const UNKNOWN_MEANING: &str = "未知";

/// Default number of words returned by [`Lexicon::search`].
pub const DEFAULT_SEARCH_LIMIT: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub translation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phrase {
    pub phrase: String,
    pub translation: String,
}

/// One word of a dictionary file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub word: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub translations: Vec<Translation>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub phrases: Vec<Phrase>,
}

/// Some word lists write `null` instead of an empty list.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl LexiconEntry {
    /// All translations joined with `/`, or [`UNKNOWN_MEANING`].
    pub fn meaning_summary(&self) -> String {
        if self.translations.is_empty() {
            return UNKNOWN_MEANING.to_string();
        }
        self.translations
            .iter()
            .map(|t| t.translation.as_str())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Read-only projection of a [`LexiconEntry`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordNode {
    /// Trimmed headword.
    pub word: String,
    pub meaning: String,
    pub root: Option<&'static str>,
    pub color: &'static str,
}

impl WordNode {
    pub fn from_entry(entry: &LexiconEntry, roots: &RootTable) -> Self {
        let word = entry.word.trim().to_string();
        let root = roots.detect(&word);
        Self {
            meaning: entry.meaning_summary(),
            color: roots.color_for(root),
            root,
            word,
        }
    }

    pub fn char_len(&self) -> usize {
        self.word.chars().count()
    }
}

/// A loaded word list, projected to [`WordNode`]s with lowercase lookups.
///
/// Built once per dictionary load; replaced wholesale when the dictionary
/// changes.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    nodes: Vec<WordNode>,
    by_lower: HashMap<String, usize>,
    word_set: HashSet<String>,
}

impl Lexicon {
    pub fn new(entries: &[LexiconEntry], roots: &RootTable) -> Self {
        let nodes: Vec<WordNode> = entries
            .iter()
            .map(|entry| WordNode::from_entry(entry, roots))
            .collect();

        let mut by_lower = HashMap::with_capacity(nodes.len());
        for (idx, node) in nodes.iter().enumerate() {
            // Later duplicates win, as with a Map built from the list.
            by_lower.insert(node.word.to_lowercase(), idx);
        }
        let word_set = by_lower.keys().cloned().collect();

        Self {
            nodes,
            by_lower,
            word_set,
        }
    }

    /// Build against the built-in root table.
    pub fn from_entries(entries: &[LexiconEntry]) -> Self {
        Self::new(entries, RootTable::builtin())
    }

    pub fn nodes(&self) -> &[WordNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Lowercased headwords, used to restrict semantic neighbours.
    pub fn word_set(&self) -> &HashSet<String> {
        &self.word_set
    }

    /// Case-insensitive lookup.
    pub fn get(&self, word: &str) -> Option<&WordNode> {
        self.by_lower
            .get(&word.trim().to_lowercase())
            .map(|&idx| &self.nodes[idx])
    }

    /// Words whose headword contains `term` (case-insensitive) or whose
    /// meaning contains it, in lexicon order. A blank term lists the first
    /// `limit` words.
    pub fn search(&self, term: &str, limit: usize) -> Vec<&WordNode> {
        let term = term.trim();
        if term.is_empty() {
            return self.nodes.iter().take(limit).collect();
        }

        let term_lower = term.to_lowercase();
        self.nodes
            .iter()
            .filter(|n| n.word.to_lowercase().contains(&term_lower) || n.meaning.contains(&term_lower))
            .take(limit)
            .collect()
    }

    pub fn random_word<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&WordNode> {
        if self.nodes.is_empty() {
            return None;
        }
        Some(&self.nodes[rng.gen_range(0..self.nodes.len())])
    }
}
