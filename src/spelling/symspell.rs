//! Symmetric Delete Candidate Index
//!
//! Precomputes every string reachable from a dictionary term by deleting up to
//! `max_edit_distance` characters. At lookup time the same deletes are generated
//! for the input, and any shared variant links the input to a candidate term.
//! Lookup cost depends on the input length, not on the dictionary size.
//!
//! Inputs longer than the longest term plus the edit distance cannot match
//! anything and are rejected before any variants are generated.
//!
//! Candidates are unverified: the caller must confirm the real edit distance.

use std::collections::{HashMap, HashSet};

pub type TermId = usize;

#[derive(Debug, Clone, Default)]
pub struct DeleteIndex {
    /// Delete variant (including the term itself) -> terms it was derived from.
    deletes: HashMap<String, Vec<TermId>>,
    max_edit_distance: usize,
    /// Length in chars of the longest indexed term.
    max_term_len: usize,
}

impl DeleteIndex {
    pub fn new(max_edit_distance: usize) -> Self {
        Self {
            deletes: HashMap::new(),
            max_edit_distance,
            max_term_len: 0,
        }
    }

    pub fn max_edit_distance(&self) -> usize {
        self.max_edit_distance
    }

    pub fn max_term_len(&self) -> usize {
        self.max_term_len
    }

    pub fn add_term(&mut self, term: &str, term_id: TermId) {
        self.max_term_len = self.max_term_len.max(term.chars().count());
        for variant in delete_variants(term, self.max_edit_distance) {
            let ids = self.deletes.entry(variant).or_default();
            if !ids.contains(&term_id) {
                ids.push(term_id);
            }
        }
    }

    /// Terms that share at least one delete variant with `input` at distance
    /// `max_distance` or less (capped at the index's own distance).
    pub fn candidates(&self, input: &str, max_distance: usize) -> HashSet<TermId> {
        let distance = max_distance.min(self.max_edit_distance);
        let mut found = HashSet::new();
        if input.chars().count() > self.max_term_len + distance {
            return found;
        }

        for variant in delete_variants(input, distance) {
            if let Some(ids) = self.deletes.get(&variant) {
                found.extend(ids.iter().copied());
            }
        }
        found
    }

    pub fn variant_count(&self) -> usize {
        self.deletes.len()
    }
}

/// All strings obtained from `word` by removing 0..=`max_deletes` characters.
/// Works on chars, so multi-byte input is safe.
pub fn delete_variants(word: &str, max_deletes: usize) -> HashSet<String> {
    let mut variants = HashSet::new();
    variants.insert(word.to_string());

    let mut frontier = vec![word.to_string()];
    for _ in 0..max_deletes {
        let mut next = Vec::new();
        for edit in &frontier {
            let chars: Vec<char> = edit.chars().collect();
            for skip in 0..chars.len() {
                let variant: String = chars
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != skip)
                    .map(|(_, c)| *c)
                    .collect();
                if variants.insert(variant.clone()) {
                    next.push(variant);
                }
            }
        }
        if next.is_empty() {
            break;
        }
        frontier = next;
    }

    variants
}
