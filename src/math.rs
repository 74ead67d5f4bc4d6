//! Log-space helpers for implementations of the capability traits.

/// `ln(exp(a) + exp(b))` without overflow.
#[inline]
pub fn logaddexp(a: f64, b: f64) -> f64 {
    let (hi, lo) = if a >= b { (a, b) } else { (b, a) };
    if lo == f64::NEG_INFINITY {
        return hi;
    }
    if hi == lo {
        return hi + std::f64::consts::LN_2;
    }
    // NaN in either argument propagates through the subtraction
    hi + (lo - hi).exp().ln_1p()
}

/// `ln(sum(exp(values)))`, computed relative to the largest entry.
///
/// Returns negative infinity for an empty slice.
pub fn logsumexp(values: &[f64]) -> f64 {
    let max = match values.iter().copied().reduce(f64::max) {
        None => return f64::NEG_INFINITY,
        Some(max) if max == f64::NEG_INFINITY || max == f64::INFINITY => return max,
        Some(max) => max,
    };
    let sum: f64 = values.iter().map(|&v| (v - max).exp()).sum();
    max + sum.ln()
}

/// Normalize log weights in place into probabilities, returning their log normalizer.
pub fn normalize_log_weights(log_weights: &mut [f64]) -> f64 {
    let norm = logsumexp(log_weights);
    log_weights
        .iter_mut()
        .for_each(|value| *value = (*value - norm).exp());
    norm
}

/// Draw an index from unnormalized probabilities with a single uniform variate.
pub fn sample_discrete<R: rand::Rng + ?Sized>(rng: &mut R, probs: &[f64]) -> usize {
    let total: f64 = probs.iter().sum();
    let mut u = rng.random::<f64>() * total;
    for (idx, &p) in probs.iter().enumerate() {
        if u < p {
            return idx;
        }
        u -= p;
    }
    // rounding can leave a tiny remainder; fall back to the last non-zero entry
    probs
        .iter()
        .rposition(|&p| p > 0.)
        .unwrap_or(probs.len().saturating_sub(1))
}
