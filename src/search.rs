use std::cmp::Ordering;
use std::sync::Arc;

use crate::indexer::SearchEntry;

/// Queries shorter than this (in characters, untrimmed) return no results.
pub const MIN_QUERY_LEN: usize = 2;

pub const DEFAULT_LIMIT: usize = 10;

/// How closely a display name matches the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum MatchTier {
    Exact,
    Prefix,
    Contains,
}

fn match_tier(name_lower: &str, query_lower: &str) -> Option<MatchTier> {
    if name_lower == query_lower {
        Some(MatchTier::Exact)
    } else if name_lower.starts_with(query_lower) {
        Some(MatchTier::Prefix)
    } else if name_lower.contains(query_lower) {
        Some(MatchTier::Contains)
    } else {
        None
    }
}

/// Collation for display names: case-folded order first, then the raw
/// names so that names differing only in case still order deterministically.
pub fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Filter `entries` by case-insensitive substring match on the display
/// name, rank them, and keep the first `limit`.
///
/// Ranking: exact match, then prefix match, then other matches, each tier
/// ordered by [`collate`]. Entries with identical names keep index order.
pub fn search(entries: &[SearchEntry], query: &str, limit: usize) -> Vec<SearchEntry> {
    if query.chars().count() < MIN_QUERY_LEN {
        return Vec::new();
    }

    let query_lower = query.to_lowercase();

    let mut matches: Vec<(MatchTier, &SearchEntry)> = entries
        .iter()
        .filter_map(|entry| {
            match_tier(&entry.display_name.to_lowercase(), &query_lower).map(|tier| (tier, entry))
        })
        .collect();

    matches.sort_by(|(tier_a, a), (tier_b, b)| {
        tier_a
            .cmp(tier_b)
            .then_with(|| collate(&a.display_name, &b.display_name))
    });

    matches
        .into_iter()
        .take(limit)
        .map(|(_, entry)| entry.clone())
        .collect()
}

/// Search over an index built once and shared between callers.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    entries: Arc<[SearchEntry]>,
}

impl SearchEngine {
    pub fn new(entries: Vec<SearchEntry>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    pub fn search(&self, query: &str, limit: usize) -> Vec<SearchEntry> {
        search(&self.entries, query, limit)
    }

    pub fn entries(&self) -> &[SearchEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
