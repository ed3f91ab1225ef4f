//! Correction Dictionary
//!
//! Static unigram and bigram frequency tables, loaded once before serving and
//! read-only afterwards. Files use the plain frequency-dictionary format:
//!
//! ```text
//! mathematics 48213        # unigram: term count
//! mathematics tutor 312    # bigram:  term1 term2 count
//! ```
//!
//! Blank lines and lines whose count does not parse are skipped. Terms are
//! lowercased and repeated entries add up.

use super::symspell::{DeleteIndex, TermId};
use super::types::TermSuggestion;
use crate::error::{QueryError, QueryResult};

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Dictionary {
    terms: Vec<String>,
    unigrams: HashMap<String, (TermId, u64)>,
    bigrams: HashMap<String, u64>,
    deletes: DeleteIndex,
}

impl Dictionary {
    /// Empty dictionary able to match words within `max_edit_distance`.
    pub fn new(max_edit_distance: usize) -> Self {
        Self {
            terms: Vec::new(),
            unigrams: HashMap::new(),
            bigrams: HashMap::new(),
            deletes: DeleteIndex::new(max_edit_distance),
        }
    }

    /// Loads the unigram table and, when given, the bigram table.
    pub fn from_files(
        unigram_path: &Path,
        bigram_path: Option<&Path>,
        max_edit_distance: usize,
    ) -> QueryResult<Self> {
        let mut dictionary = Self::new(max_edit_distance);

        let loaded = dictionary.load_unigrams(open(unigram_path)?)?;
        tracing::info!("Loaded {} unigrams from {}", loaded, unigram_path.display());

        if let Some(path) = bigram_path {
            let loaded = dictionary.load_bigrams(open(path)?)?;
            tracing::info!("Loaded {} bigrams from {}", loaded, path.display());
        }

        Ok(dictionary)
    }

    pub fn add_unigram(&mut self, term: &str, count: u64) {
        let term = term.to_lowercase();
        if term.is_empty() {
            return;
        }

        if let Some((_, existing)) = self.unigrams.get_mut(&term) {
            *existing = existing.saturating_add(count);
            return;
        }

        let term_id = self.terms.len();
        self.deletes.add_term(&term, term_id);
        self.unigrams.insert(term.clone(), (term_id, count));
        self.terms.push(term);
    }

    pub fn add_bigram(&mut self, first: &str, second: &str, count: u64) {
        let key = bigram_key(&first.to_lowercase(), &second.to_lowercase());
        let entry = self.bigrams.entry(key).or_insert(0);
        *entry = entry.saturating_add(count);
    }

    /// Reads `term count` lines. Returns the number of accepted lines.
    pub fn load_unigrams<R: BufRead>(&mut self, reader: R) -> QueryResult<usize> {
        let mut accepted = 0;
        for line in reader.lines() {
            let line = line.map_err(|e| QueryError::Dictionary(e.to_string()))?;
            let mut parts = line.split_whitespace();
            let (Some(term), Some(count)) = (parts.next(), parts.next()) else {
                continue;
            };
            let Ok(count) = count.parse::<u64>() else {
                tracing::trace!("Skipping unigram line {:?}", line);
                continue;
            };
            self.add_unigram(term, count);
            accepted += 1;
        }
        Ok(accepted)
    }

    /// Reads `term1 term2 count` lines. Returns the number of accepted lines.
    pub fn load_bigrams<R: BufRead>(&mut self, reader: R) -> QueryResult<usize> {
        let mut accepted = 0;
        for line in reader.lines() {
            let line = line.map_err(|e| QueryError::Dictionary(e.to_string()))?;
            let mut parts = line.split_whitespace();
            let (Some(first), Some(second), Some(count)) = (parts.next(), parts.next(), parts.next())
            else {
                continue;
            };
            let Ok(count) = count.parse::<u64>() else {
                tracing::trace!("Skipping bigram line {:?}", line);
                continue;
            };
            self.add_bigram(first, second, count);
            accepted += 1;
        }
        Ok(accepted)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.unigrams.contains_key(term)
    }

    pub fn unigram_count(&self, term: &str) -> u64 {
        self.unigrams.get(term).map(|(_, count)| *count).unwrap_or(0)
    }

    pub fn bigram_count(&self, first: &str, second: &str) -> u64 {
        self.bigrams.get(&bigram_key(first, second)).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn bigram_len(&self) -> usize {
        self.bigrams.len()
    }

    pub fn max_edit_distance(&self) -> usize {
        self.deletes.max_edit_distance()
    }

    /// Length in chars of the longest unigram.
    pub fn max_term_len(&self) -> usize {
        self.deletes.max_term_len()
    }

    /// Dictionary terms within `max_distance` edits of `word`, closest first,
    /// then most frequent, then alphabetical.
    pub fn lookup(&self, word: &str, max_distance: usize) -> Vec<TermSuggestion> {
        let mut suggestions: Vec<TermSuggestion> = self
            .deletes
            .candidates(word, max_distance)
            .into_iter()
            .filter_map(|term_id| {
                let term = &self.terms[term_id];
                let distance = strsim::levenshtein(word, term);
                (distance <= max_distance).then(|| TermSuggestion {
                    term: term.clone(),
                    distance,
                    count: self.unigram_count(term),
                })
            })
            .collect();

        suggestions.sort_by(|a, b| {
            a.distance
                .cmp(&b.distance)
                .then_with(|| b.count.cmp(&a.count))
                .then_with(|| a.term.cmp(&b.term))
        });
        suggestions
    }
}

fn bigram_key(first: &str, second: &str) -> String {
    format!("{} {}", first, second)
}

fn open(path: &Path) -> QueryResult<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| QueryError::Dictionary(format!("{}: {}", path.display(), e)))
}
