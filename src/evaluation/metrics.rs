//! Ranking-quality metrics over item names.
//!
//! `recall_at_k` divides hits by the size of the relevant set regardless of
//! `k`. That is closer to coverage than textbook Recall@K; it is kept as-is
//! so numbers stay comparable with previously published evaluations.

use std::collections::BTreeSet;

use crate::catalog::AssessmentItem;

fn is_relevant(relevant: &BTreeSet<String>, item: &AssessmentItem) -> bool {
    relevant.contains(&item.name)
}

/// Hits in the top `k` over `|relevant|`; 1.0 when nothing is relevant.
pub fn recall_at_k(relevant: &BTreeSet<String>, recommended: &[AssessmentItem], k: usize) -> f64 {
    if relevant.is_empty() {
        return 1.0;
    }
    let hits = recommended
        .iter()
        .take(k)
        .filter(|item| is_relevant(relevant, item))
        .count();
    hits as f64 / relevant.len() as f64
}

/// Hits over `min(k, len(recommended))`; 0.0 when that window is empty.
pub fn precision_at_k(relevant: &BTreeSet<String>, recommended: &[AssessmentItem], k: usize) -> f64 {
    let window = k.min(recommended.len());
    if window == 0 {
        return 0.0;
    }
    let hits = recommended[..window]
        .iter()
        .filter(|item| is_relevant(relevant, item))
        .count();
    hits as f64 / window as f64
}

/// Mean of precision@i at each relevant position i in the top `k`, divided
/// by `min(|relevant|, k)`.
pub fn average_precision_at_k(
    relevant: &BTreeSet<String>,
    recommended: &[AssessmentItem],
    k: usize,
) -> f64 {
    if relevant.is_empty() {
        return 1.0;
    }

    let mut hits = 0usize;
    let mut sum = 0.0;
    for (i, item) in recommended.iter().take(k).enumerate() {
        if is_relevant(relevant, item) {
            hits += 1;
            sum += hits as f64 / (i + 1) as f64;
        }
    }

    if hits == 0 {
        return 0.0;
    }
    sum / relevant.len().min(k) as f64
}
