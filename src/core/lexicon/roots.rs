//! Morphological root table and longest-match root detection.
//!
//! Matching is a plain substring test, longest root first. A short root can
//! therefore be found inside an unrelated word ("ag" in "garbage"); this
//! imprecision is kept for compatibility with existing word lists.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::Serialize;

/// Colour used for words without a detected root.
pub const DEFAULT_WORD_COLOR: &str = "#94a3b8";

/// One entry of the root table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RootEntry {
    pub root: &'static str,
    pub meaning: &'static str,
    pub color: &'static str,
}

const fn root(root: &'static str, meaning: &'static str, color: &'static str) -> RootEntry {
    RootEntry { root, meaning, color }
}

static ROOT_ENTRIES: &[RootEntry] = &[
    root("tract", "拉/引", "#f59e0b"),
    root("spect", "看", "#3b82f6"),
    root("port", "拿/运", "#ef4444"),
    root("form", "形状", "#10b981"),
    root("miss", "送/投", "#8b5cf6"),
    root("mit", "送/投", "#8b5cf6"),
    root("fer", "拿/带", "#ec4899"),
    root("fact", "做", "#06b6d4"),
    root("fect", "做", "#06b6d4"),
    root("flu", "流", "#6366f1"),
    root("logy", "学科", "#84cc16"),
    root("graph", "写/画", "#f97316"),
    root("gram", "写/文字", "#f97316"),
    root("scribe", "写", "#f97316"),
    root("script", "写", "#f97316"),
    root("struct", "建造", "#14b8a6"),
    root("dict", "说", "#a855f7"),
    root("duct", "引导", "#06b6d4"),
    root("duce", "引导", "#06b6d4"),
    root("vert", "转", "#ec4899"),
    root("vers", "转", "#ec4899"),
    root("ceed", "走", "#10b981"),
    root("cess", "走", "#10b981"),
    root("ced", "走", "#10b981"),
    root("cept", "拿/取", "#3b82f6"),
    root("cap", "拿/取", "#3b82f6"),
    root("ceive", "拿/取", "#3b82f6"),
    root("press", "压", "#ef4444"),
    root("pose", "放置", "#f59e0b"),
    root("pos", "放置", "#f59e0b"),
    root("sist", "站立", "#8b5cf6"),
    root("stand", "站立", "#8b5cf6"),
    root("sta", "站立", "#8b5cf6"),
    root("vis", "看", "#3b82f6"),
    root("vid", "看", "#3b82f6"),
    root("voc", "声音/叫", "#a855f7"),
    root("vok", "声音/叫", "#a855f7"),
    root("pend", "悬挂", "#ec4899"),
    root("pens", "悬挂", "#ec4899"),
    root("sent", "感觉", "#6366f1"),
    root("sens", "感觉", "#6366f1"),
    root("tain", "保持", "#06b6d4"),
    root("ten", "保持", "#06b6d4"),
    root("tend", "伸展", "#10b981"),
    root("tens", "伸展", "#10b981"),
    root("tent", "伸展", "#10b981"),
    root("act", "做/行动", "#f59e0b"),
    root("ag", "做/行动", "#f59e0b"),
    root("lect", "选择/收集", "#3b82f6"),
    root("leg", "选择/收集", "#3b82f6"),
    root("lig", "选择/收集", "#3b82f6"),
    root("mov", "移动", "#ec4899"),
    root("mob", "移动", "#ec4899"),
    root("mot", "移动", "#ec4899"),
    root("spec", "看", "#3b82f6"),
    root("spic", "看", "#3b82f6"),
];

static BUILTIN: OnceLock<RootTable> = OnceLock::new();

/// Root lookup table with candidates pre-sorted for longest-match detection.
#[derive(Debug, Clone)]
pub struct RootTable {
    by_root: HashMap<&'static str, RootEntry>,
    /// Longest first; ties keep table order.
    candidates: Vec<RootEntry>,
}

impl RootTable {
    pub fn new(entries: &[RootEntry]) -> Self {
        let mut candidates = entries.to_vec();
        candidates.sort_by(|a, b| b.root.chars().count().cmp(&a.root.chars().count()));
        let by_root = entries.iter().map(|e| (e.root, e.clone())).collect();
        Self { by_root, candidates }
    }

    /// The process-wide built-in table.
    pub fn builtin() -> &'static RootTable {
        BUILTIN.get_or_init(|| RootTable::new(ROOT_ENTRIES))
    }

    pub fn get(&self, root: &str) -> Option<&RootEntry> {
        self.by_root.get(root)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Find the root of `word`, preferring longer roots.
    ///
    /// A word that *is* a root only counts when it is longer than three
    /// chars; otherwise any containing word matches.
    pub fn detect(&self, word: &str) -> Option<&'static str> {
        let word_lower = word.to_lowercase();
        let word_len = word.chars().count();

        self.candidates.iter().find_map(|entry| {
            let root_lower = entry.root.to_lowercase();
            if !word_lower.contains(&root_lower) {
                return None;
            }
            if word_lower == root_lower {
                (word_len > 3).then_some(entry.root)
            } else {
                Some(entry.root)
            }
        })
    }

    /// Display colour for a word with the given root.
    pub fn color_for(&self, root: Option<&str>) -> &'static str {
        root.and_then(|r| self.get(r))
            .map(|e| e.color)
            .unwrap_or(DEFAULT_WORD_COLOR)
    }
}

/// Detect a root against the built-in table.
pub fn detect_root(word: &str) -> Option<&'static str> {
    RootTable::builtin().detect(word)
}
