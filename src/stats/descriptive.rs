use statrs::statistics::Statistics;

use super::finite;

// ---------------------------------------------------------------------------
// Single-column statistics
// ---------------------------------------------------------------------------

/// Arithmetic mean (sum / count). `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    finite(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample variance with Bessel's correction. `None` below two values.
///
/// A constant column is exactly zero; the running update in `statrs` can
/// leave rounding noise there.
pub(crate) fn sample_variance(values: &[f64]) -> Option<f64> {
    let (first, rest) = values.split_first()?;
    if rest.is_empty() {
        return None;
    }
    if rest.iter().all(|v| v == first) {
        return Some(0.0);
    }
    finite(values.iter().variance())
}

/// Sample standard deviation (n − 1 denominator). `None` below two values.
pub fn std_dev(values: &[f64]) -> Option<f64> {
    sample_variance(values).map(f64::sqrt)
}

/// Standard error of the mean, `std_dev / sqrt(n)`. Requires `n > 1`.
pub fn std_error(values: &[f64]) -> Option<f64> {
    let sd = std_dev(values)?;
    finite(sd / (values.len() as f64).sqrt())
}

/// Standard deviation as a percentage of the mean.
///
/// Only an exactly-zero mean is treated as unavailable; a mean close to zero
/// produces a (possibly huge) value.
pub fn coefficient_of_variation(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    if m == 0.0 {
        return None;
    }
    let sd = std_dev(values)?;
    finite(sd / m * 100.0)
}

// ---------------------------------------------------------------------------
// Summary record
// ---------------------------------------------------------------------------

/// All single-column statistics for one numeric column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DescriptiveSummary {
    /// Number of numeric values the statistics were computed from.
    pub count: usize,
    pub mean: Option<f64>,
    pub std_dev: Option<f64>,
    pub std_error: Option<f64>,
    /// Coefficient of variation, in percent.
    pub cv: Option<f64>,
}

impl DescriptiveSummary {
    pub fn from_values(values: &[f64]) -> Self {
        DescriptiveSummary {
            count: values.len(),
            mean: mean(values),
            std_dev: std_dev(values),
            std_error: std_error(values),
            cv: coefficient_of_variation(values),
        }
    }
}
