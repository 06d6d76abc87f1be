use std::collections::{HashMap, HashSet};

use fedsearch_core::Hit;

use crate::tokenize::tokenize;

/// In-memory inverted index over the node's own documents.
///
/// Scoring is term overlap: a document's score for a query is the number
/// of distinct query tokens that appear in it. Ties keep insertion
/// order. The ranking algorithm is deliberately simple; the resolution
/// core only depends on hits and their order.
#[derive(Debug, Default)]
pub struct CorpusIndex {
    documents: Vec<Hit>,
    terms: HashMap<String, HashSet<usize>>,
}

impl CorpusIndex {
    /// Creates an empty corpus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of indexed documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// True when no documents are indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Indexes one document under the tokens of its textual fields.
    pub fn insert(&mut self, hit: Hit) {
        let position = self.documents.len();

        let mut text = String::new();
        for field in [&hit.title, &hit.description, &hit.url] {
            if let Some(value) = field {
                text.push_str(value);
                text.push(' ');
            }
        }

        for token in tokenize(&text) {
            self.terms.entry(token).or_default().insert(position);
        }

        self.documents.push(hit);
    }

    /// Returns documents overlapping the query, best match first.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<Hit> {
        let mut scores: HashMap<usize, usize> = HashMap::new();
        for token in tokenize(query) {
            if let Some(positions) = self.terms.get(&token) {
                for &position in positions {
                    *scores.entry(position).or_insert(0) += 1;
                }
            }
        }

        let mut ranked: Vec<(usize, usize)> = scores.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        ranked
            .into_iter()
            .map(|(position, _)| self.documents[position].clone())
            .collect()
    }
}
