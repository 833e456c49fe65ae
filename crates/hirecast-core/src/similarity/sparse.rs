use std::cmp::Ordering;

/// Sparse vector as `(index, weight)` pairs, sorted by index with no duplicates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(u32, f64)>,
}

impl SparseVector {
    /// Builds a vector from unordered pairs; weights at repeated indices are summed
    /// and explicit zeros are dropped.
    pub fn from_pairs(mut pairs: Vec<(u32, f64)>) -> Self {
        pairs.sort_by_key(|(i, _)| *i);

        let mut entries: Vec<(u32, f64)> = Vec::with_capacity(pairs.len());
        for (index, weight) in pairs {
            match entries.last_mut() {
                Some((last, w)) if *last == index => *w += weight,
                _ => entries.push((index, weight)),
            }
        }
        entries.retain(|(_, w)| *w != 0.0);

        Self { entries }
    }

    pub fn entries(&self) -> &[(u32, f64)] {
        &self.entries
    }

    /// Number of stored (non-zero) entries.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;

        while i < self.entries.len() && j < other.entries.len() {
            let (ai, aw) = self.entries[i];
            let (bi, bw) = other.entries[j];
            match ai.cmp(&bi) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    sum += aw * bw;
                    i += 1;
                    j += 1;
                }
            }
        }

        sum
    }

    pub fn l2_norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    pub(crate) fn divide(&mut self, divisor: f64) {
        for (_, w) in &mut self.entries {
            *w /= divisor;
        }
    }
}

/// Cosine similarity of two sparse vectors.
///
/// Returns `0.0` when either vector has zero norm. The result is not clamped, so
/// vectors with negative weights can score below zero.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let norm_a = a.l2_norm();
    let norm_b = b.l2_norm();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        a.dot(b) / (norm_a * norm_b)
    }
}
