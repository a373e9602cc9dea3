/// Euclidean length of `v`.
pub fn l2_norm(v: &[f32]) -> f32 {
    norm_f64(v) as f32
}

/// Euclidean length accumulated in f64, so squares of very small or very
/// large components neither underflow nor overflow.
pub(crate) fn norm_f64(v: &[f32]) -> f64 {
    v.iter().map(|&x| f64::from(x) * f64::from(x)).sum::<f64>().sqrt()
}

/// `dot(a, b) / (|a| * |b|)`, or `0` when either vector has zero norm.
///
/// Callers guarantee equal lengths; extra components of the longer slice
/// are ignored.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    cosine_with_norm(a, norm_f64(a), b)
}

/// Cosine similarity with the first vector's norm precomputed.
pub(crate) fn cosine_with_norm(a: &[f32], a_norm: f64, b: &[f32]) -> f32 {
    let b_norm = norm_f64(b);
    if a_norm == 0.0 || b_norm == 0.0 {
        return 0.0;
    }
    let dot: f64 = a.iter().zip(b).map(|(&x, &y)| f64::from(x) * f64::from(y)).sum();
    // Rounding can push |sim| a hair past 1; `+ 0.0` folds -0.0 into 0.0.
    ((dot / (a_norm * b_norm)).clamp(-1.0, 1.0) as f32) + 0.0
}
