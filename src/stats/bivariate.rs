use statrs::distribution::{ContinuousCDF, StudentsT};

use super::descriptive::sample_variance;
use super::finite;

// ---------------------------------------------------------------------------
// Two-column statistics
// ---------------------------------------------------------------------------

/// Pearson product-moment correlation.
///
/// `None` when the lengths differ, when there are fewer than two values, or
/// when either side is constant. The result is clamped to `[-1, 1]`.
pub fn correlation(a: &[f64], b: &[f64]) -> Option<f64> {
    if a.len() != b.len() || a.len() < 2 {
        return None;
    }
    let n = a.len() as f64;
    let mean_a = a.iter().sum::<f64>() / n;
    let mean_b = b.iter().sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (&x, &y) in a.iter().zip(b) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return None;
    }
    // The product keeps exact results for well-scaled data; split the roots
    // when it would overflow or underflow.
    let product = sxx * syy;
    let denom = if product.is_normal() {
        product.sqrt()
    } else {
        sxx.sqrt() * syy.sqrt()
    };
    finite(sxy / denom).map(|r| r.clamp(-1.0, 1.0))
}

/// Two-tailed p-value for `H0: rho = 0` given a correlation `r` over `n` pairs.
///
/// Uses `t = r * sqrt(n - 2) / sqrt(1 - r^2)` with `n - 2` degrees of
/// freedom. `None` for `n < 3` and for `|r| >= 1`, where `t` is unbounded.
pub fn p_value(r: f64, n: usize) -> Option<f64> {
    if n < 3 || !r.is_finite() {
        return None;
    }
    let r2 = r * r;
    if r2 >= 1.0 {
        return None;
    }
    let df = (n - 2) as f64;
    let t = r * df.sqrt() / (1.0 - r2).sqrt();

    let dist = StudentsT::new(0.0, 1.0, df).ok()?;
    let p = 2.0 * (1.0 - dist.cdf(t.abs()));
    finite(p).map(|p| p.clamp(0.0, 1.0))
}

/// Ratio of the sample variance of `a` to that of `b`.
///
/// No ordering is imposed, so the result can be below one. `None` when either
/// side has fewer than two values or `b` has zero variance.
pub fn f_value(a: &[f64], b: &[f64]) -> Option<f64> {
    let var_a = sample_variance(a)?;
    let var_b = sample_variance(b)?;
    if var_b == 0.0 {
        return None;
    }
    finite(var_a / var_b)
}

// ---------------------------------------------------------------------------
// Summary record
// ---------------------------------------------------------------------------

/// Correlation, its significance and the variance ratio for two columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BivariateSummary {
    /// Numeric length of the second column.
    pub len_b: usize,
    pub correlation: Option<f64>,
    pub p_value: Option<f64>,
    pub f_value: Option<f64>,
}

impl BivariateSummary {
    pub fn from_values(a: &[f64], b: &[f64]) -> Self {
        let r = correlation(a, b);
        BivariateSummary {
            len_b: b.len(),
            correlation: r,
            // `correlation` only succeeds for equal lengths.
            p_value: r.and_then(|r| p_value(r, a.len())),
            f_value: f_value(a, b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn correlation_requires_matching_lengths() {
        assert_eq!(correlation(&[1.0, 2.0], &[1.0, 2.0, 3.0]), None);
        assert_eq!(correlation(&[1.0], &[2.0]), None);
        assert_eq!(correlation(&[], &[]), None);
    }

    #[test]
    fn correlation_with_itself_is_one() {
        let v = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
        assert!(close(correlation(&v, &v).unwrap(), 1.0, 1e-12));
    }

    #[test]
    fn perfect_linear_relationships() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [2.0, 4.0, 6.0, 8.0];
        assert_eq!(correlation(&a, &b), Some(1.0));
        let c = [8.0, 6.0, 4.0, 2.0];
        assert_eq!(correlation(&a, &c), Some(-1.0));
    }

    #[test]
    fn correlation_survives_extreme_magnitudes() {
        let big = [1e100, 2e100, 3e100];
        assert!(close(correlation(&big, &big).unwrap(), 1.0, 1e-12));
        let tiny = [1e-100, 2e-100, 3e-100];
        assert!(close(correlation(&tiny, &tiny).unwrap(), 1.0, 1e-12));
        let flipped = [3e-100, 2e-100, 1e-100];
        assert!(close(correlation(&tiny, &flipped).unwrap(), -1.0, 1e-12));
    }

    #[test]
    fn correlation_of_constant_is_unavailable() {
        assert_eq!(correlation(&[1.0, 2.0, 3.0], &[5.0, 5.0, 5.0]), None);
    }

    #[test]
    fn correlation_known_value() {
        // Hand-computed: sxy = 8, sxx = 10, syy = 10.
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let b = [2.0, 1.0, 4.0, 3.0, 5.0];
        assert!(close(correlation(&a, &b).unwrap(), 0.8, 1e-12));
    }

    #[test]
    fn p_value_needs_three_pairs() {
        assert_eq!(p_value(0.5, 0), None);
        assert_eq!(p_value(0.5, 2), None);
        assert!(p_value(0.5, 3).is_some());
    }

    #[test]
    fn p_value_of_zero_correlation_is_one() {
        assert!(close(p_value(0.0, 10).unwrap(), 1.0, 1e-9));
    }

    #[test]
    fn p_value_undefined_for_perfect_correlation() {
        assert_eq!(p_value(1.0, 4), None);
        assert_eq!(p_value(-1.0, 50), None);
        assert_eq!(p_value(f64::NAN, 50), None);
    }

    #[test]
    fn p_value_matches_reference() {
        // r = 0.8, n = 5: t = 0.8 * sqrt(3) / 0.6 ~= 2.3094, df = 3,
        // two-tailed p ~= 0.1041.
        let p = p_value(0.8, 5).unwrap();
        assert!(close(p, 0.1041, 1e-3), "p = {p}");
    }

    #[test]
    fn p_value_shrinks_with_sample_size() {
        let small = p_value(0.5, 10).unwrap();
        let large = p_value(0.5, 100).unwrap();
        assert!(large < small);
    }

    #[test]
    fn f_value_is_raw_variance_ratio() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [2.0, 4.0, 6.0, 8.0];
        assert!(close(f_value(&a, &b).unwrap(), 0.25, 1e-12));
        assert!(close(f_value(&b, &a).unwrap(), 4.0, 1e-12));
    }

    #[test]
    fn f_value_with_itself_is_one() {
        let v = [0.3, 1.7, 2.2, 9.1];
        assert_eq!(f_value(&v, &v), Some(1.0));
    }

    #[test]
    fn f_value_needs_two_values_each() {
        assert_eq!(f_value(&[1.0], &[1.0, 2.0]), None);
        assert_eq!(f_value(&[1.0, 2.0], &[1.0]), None);
        assert_eq!(f_value(&[1.0, 2.0], &[3.0, 3.0]), None);
    }

    #[test]
    fn f_value_allows_unequal_lengths() {
        assert!(f_value(&[1.0, 2.0, 3.0], &[1.0, 5.0]).is_some());
    }

    #[test]
    fn summary_links_correlation_and_p_value() {
        let s = BivariateSummary::from_values(&[1.0, 2.0, 3.0, 4.0], &[2.0, 4.0, 6.0, 8.0]);
        assert_eq!(s.correlation, Some(1.0));
        assert_eq!(s.p_value, None);
        assert!(close(s.f_value.unwrap(), 0.25, 1e-12));

        let mismatched = BivariateSummary::from_values(&[1.0, 2.0, 3.0], &[1.0, 2.0]);
        assert_eq!(mismatched.correlation, None);
        assert_eq!(mismatched.p_value, None);
        assert!(mismatched.f_value.is_some());
    }
}
