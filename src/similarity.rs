//! Set and vector similarity primitives.

use std::collections::{HashMap, HashSet};

/// Jaccard similarity between two skill lists, case-insensitive.
///
/// Both empty is defined as identical (1.0); exactly one empty is 0.0.
/// Symmetric and bounded in [0, 1].
pub fn jaccard_similarity(set_a: &[String], set_b: &[String]) -> f64 {
    if set_a.is_empty() && set_b.is_empty() {
        return 1.0;
    }
    if set_a.is_empty() || set_b.is_empty() {
        return 0.0;
    }

    let normalized_a: HashSet<String> = set_a.iter().map(|s| normalize(s)).collect();
    let normalized_b: HashSet<String> = set_b.iter().map(|s| normalize(s)).collect();

    let intersection = normalized_a.intersection(&normalized_b).count();
    let union = normalized_a.union(&normalized_b).count();

    intersection as f64 / union as f64
}

fn normalize(skill: &str) -> String {
    skill.trim().to_lowercase()
}

/// Cosine similarity between two sparse term-weight vectors.
///
/// Only shared dimensions contribute to the dot product; a zero norm on
/// either side yields 0.0.
pub fn cosine_similarity(vec_a: &HashMap<String, f64>, vec_b: &HashMap<String, f64>) -> f64 {
    let mut dot_product = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;

    for (term, weight_a) in vec_a {
        if let Some(weight_b) = vec_b.get(term) {
            dot_product += weight_a * weight_b;
        }
        norm_a += weight_a * weight_a;
    }

    for weight_b in vec_b.values() {
        norm_b += weight_b * weight_b;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a.sqrt() * norm_b.sqrt())
}
