//! Discrete weighted sampling.
//!
//! Draws an index from a vector of non-negative weights by searching the
//! cumulative distribution. Kept separate from the colony so that the
//! rounding behavior at the top of the distribution is explicit:
//!
//! - entries with zero weight are never chosen;
//! - a draw that overshoots the total through floating-point error resolves
//!   to the last entry with positive weight.

use rand::Rng;

/// Returns the index selected by a uniform draw `u ∈ [0, 1)`.
///
/// Returns `None` if `weights` is empty or carries no positive mass.
///
/// # Examples
///
/// ```
/// use u_aco::sampling::sample_index;
///
/// let weights = [1.0, 0.0, 3.0];
/// assert_eq!(sample_index(&weights, 0.0), Some(0));
/// assert_eq!(sample_index(&weights, 0.24), Some(0));
/// assert_eq!(sample_index(&weights, 0.25), Some(2));
/// assert_eq!(sample_index(&weights, 0.99), Some(2));
/// ```
pub fn sample_index(weights: &[f64], u: f64) -> Option<usize> {
    let cumulative = cumulative(weights);
    let total = *cumulative.last()?;
    if !(total > 0.0 && total.is_finite()) {
        return None;
    }

    let target = u * total;
    // First index whose cumulative mass strictly exceeds the target.
    let idx = cumulative.partition_point(|&c| c <= target);
    if idx < weights.len() {
        return Some(idx);
    }
    weights.iter().rposition(|&w| w > 0.0)
}

/// Draws an index proportionally to `weights`.
pub fn sample<R: Rng>(weights: &[f64], rng: &mut R) -> Option<usize> {
    sample_index(weights, rng.random::<f64>())
}

/// Scales `weights` so that they sum to one.
///
/// Returns `None` if the weights carry no positive finite mass.
pub fn normalize(weights: &[f64]) -> Option<Vec<f64>> {
    let total: f64 = weights.iter().sum();
    if !(total > 0.0 && total.is_finite()) {
        return None;
    }
    Some(weights.iter().map(|w| w / total).collect())
}

fn cumulative(weights: &[f64]) -> Vec<f64> {
    weights
        .iter()
        .scan(0.0, |acc, &w| {
            *acc += w;
            Some(*acc)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_empty_weights() {
        assert_eq!(sample_index(&[], 0.5), None);
        assert_eq!(normalize(&[]), None);
    }

    #[test]
    fn test_all_zero_weights() {
        assert_eq!(sample_index(&[0.0, 0.0], 0.3), None);
        assert_eq!(normalize(&[0.0, 0.0]), None);
    }

    #[test]
    fn test_single_weight_always_selected() {
        for u in [0.0, 0.5, 0.999_999] {
            assert_eq!(sample_index(&[2.5], u), Some(0));
        }
    }

    #[test]
    fn test_zero_weight_never_selected() {
        let weights = [0.0, 1.0, 0.0, 1.0, 0.0];
        for i in 0..1000 {
            let u = i as f64 / 1000.0;
            let idx = sample_index(&weights, u).unwrap();
            assert!(idx == 1 || idx == 3, "picked zero-weight index {idx}");
        }
    }

    #[test]
    fn test_overshoot_resolves_to_last_positive() {
        let weights = [1.0, 1.0, 0.0];
        assert_eq!(sample_index(&weights, 1.0), Some(1));
    }

    #[test]
    fn test_boundaries() {
        let weights = [1.0, 1.0];
        assert_eq!(sample_index(&weights, 0.0), Some(0));
        assert_eq!(sample_index(&weights, 0.499), Some(0));
        assert_eq!(sample_index(&weights, 0.5), Some(1));
    }

    #[test]
    fn test_normalize_sums_to_one() {
        let probs = normalize(&[1.0, 2.0, 5.0]).unwrap();
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!((probs[2] - 0.625).abs() < 1e-12);
    }

    #[test]
    fn test_sample_frequencies_follow_weights() {
        let weights = [1.0, 3.0];
        let mut rng = StdRng::seed_from_u64(42);
        let trials = 20_000;
        let hits = (0..trials)
            .filter(|_| sample(&weights, &mut rng) == Some(1))
            .count();
        let freq = hits as f64 / trials as f64;
        assert!((freq - 0.75).abs() < 0.02, "frequency {freq}");
    }
}
