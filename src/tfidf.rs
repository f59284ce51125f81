//! TF-IDF lexical similarity over a per-batch vocabulary.
//!
//! The vocabulary is a property of the current candidate batch, not a
//! trained model: callers rebuild it before every scoring pass that
//! includes new documents and pass it explicitly through each call.
//! A single-document corpus yields `ln(1/1) = 0` for every term, so
//! text similarity carries no signal there; the feed pipeline always
//! builds over viewer plus candidates, keeping the corpus at two or
//! more documents whenever there is anything to score.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::similarity::cosine_similarity;

/// Common English function words dropped during tokenization
const STOP_WORDS: &[&str] = &[
    "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "is", "are",
    "was", "were", "be", "been", "have", "has", "had", "do", "does", "did", "will", "would",
    "could", "should", "may", "might", "can", "this", "that", "these", "those", "a", "an", "as",
    "if", "then",
];

/// One unit of free text entering the vocabulary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub text: String,
}

/// Batch-scoped term statistics backing TF-IDF weights
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vocabulary {
    terms: HashMap<String, usize>,
    document_frequency: HashMap<String, u32>,
    total_documents: usize,
}

impl Vocabulary {
    /// Build term statistics from a batch of documents.
    pub fn build(documents: &[Document]) -> Self {
        let mut document_frequency: HashMap<String, u32> = HashMap::new();
        let mut terms: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let unique_tokens: HashSet<String> = tokenize(&doc.text).into_iter().collect();
            for token in unique_tokens {
                *document_frequency.entry(token.clone()).or_insert(0) += 1;
                let next_index = terms.len();
                terms.entry(token).or_insert(next_index);
            }
        }

        Self {
            terms,
            document_frequency,
            total_documents: documents.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains_key(term)
    }

    fn idf(&self, term: &str) -> f64 {
        let df = self.document_frequency.get(term).copied().unwrap_or(1);
        (self.total_documents as f64 / df as f64).ln()
    }
}

/// Lowercase, map non-word characters to whitespace, split, and drop
/// short tokens and stop words.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .filter(|token| token.chars().count() > 2)
        .filter(|token| !STOP_WORDS.contains(token))
        .map(|token| token.to_string())
        .collect()
}

/// Sparse TF-IDF weight vector for one text against a vocabulary.
///
/// Tokens absent from the vocabulary contribute nothing; term frequency
/// is normalized by the full surviving token count of the text.
pub fn vectorize(text: &str, vocabulary: &Vocabulary) -> HashMap<String, f64> {
    let tokens = tokenize(text);
    if tokens.is_empty() {
        return HashMap::new();
    }

    let mut term_frequency: HashMap<&str, u32> = HashMap::new();
    for token in &tokens {
        if vocabulary.contains(token) {
            *term_frequency.entry(token.as_str()).or_insert(0) += 1;
        }
    }

    let token_count = tokens.len() as f64;
    term_frequency
        .into_iter()
        .map(|(term, count)| {
            let tf = count as f64 / token_count;
            (term.to_string(), tf * vocabulary.idf(term))
        })
        .collect()
}

/// Cosine similarity of the TF-IDF vectors of two texts, in [0, 1].
pub fn text_similarity(text_a: &str, text_b: &str, vocabulary: &Vocabulary) -> f64 {
    let vector_a = vectorize(text_a, vocabulary);
    let vector_b = vectorize(text_b, vocabulary);
    cosine_similarity(&vector_a, &vector_b)
}
