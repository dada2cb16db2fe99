//! Similarity ranking over a store snapshot

use askdoc_core::{ChunkRecord, RetrievedChunk};

/// Cosine similarity: dot product divided by the product of Euclidean norms.
///
/// A length mismatch or a zero-norm vector yields 0.0 instead of dividing
/// by zero.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

/// Rank a snapshot against a query embedding.
///
/// Keeps records whose `metadata.source` exactly equals the trimmed filter
/// (when one is given), scores every survivor, sorts descending with load
/// order preserved for equal scores, takes the first `top_k`, and drops any
/// record with non-positive similarity. `top_k` is clamped by the caller,
/// not here.
pub fn rank(
    records: Vec<ChunkRecord>,
    query: &[f32],
    top_k: usize,
    source_filter: Option<&str>,
) -> Vec<RetrievedChunk> {
    let filter = source_filter.map(str::trim).filter(|f| !f.is_empty());

    let mut scored: Vec<RetrievedChunk> = records
        .into_iter()
        .filter(|record| filter.is_none_or(|f| record.metadata.source == f))
        .map(|record| RetrievedChunk {
            score: cosine_similarity(query, &record.embedding),
            text: record.text,
            metadata: record.metadata,
        })
        .collect();

    // Vec::sort_by is stable, which gives the tie-break on load order.
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    scored.truncate(top_k);
    scored.retain(|chunk| chunk.score > 0.0);
    scored
}
