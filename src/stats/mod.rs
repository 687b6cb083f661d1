/// Numeric core: descriptive and bivariate statistics over plain `f64`
/// slices.
///
/// Every function is pure. "Unavailable" results (too few values, division
/// by zero) are reported as `None` and never as NaN or infinity, so callers
/// can hide them without further checks.

pub mod bivariate;
pub mod descriptive;

pub use bivariate::BivariateSummary;
pub use descriptive::DescriptiveSummary;

/// Turn a computed value into `None` unless it is finite.
pub(crate) fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}
