use crate::data::column::{extract, ExtractOptions};
use crate::data::model::Table;
use crate::stats::{BivariateSummary, DescriptiveSummary};

// ---------------------------------------------------------------------------
// Analysis – one immutable result per selection
// ---------------------------------------------------------------------------

/// Statistics for the currently selected column(s).
///
/// Rebuilt from scratch whenever the table, the selection or the extraction
/// options change; never updated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub primary: String,
    pub descriptive: DescriptiveSummary,
    /// Second column and the pairwise statistics, when one is selected.
    pub secondary: Option<(String, BivariateSummary)>,
}

impl Analysis {
    pub fn compute(
        table: &Table,
        primary: &str,
        secondary: Option<&str>,
        options: ExtractOptions,
    ) -> Self {
        let a = extract(table, primary, options);
        let descriptive = DescriptiveSummary::from_values(&a);

        let secondary = secondary.map(|name| {
            let b = extract(table, name, options);
            (name.to_string(), BivariateSummary::from_values(&a, &b))
        });

        log::debug!(
            "Analysis of {primary:?} ({} values), second column {:?}",
            a.len(),
            secondary.as_ref().map(|(name, _)| name)
        );

        Analysis {
            primary: primary.to_string(),
            descriptive,
            secondary,
        }
    }

    /// Labelled, formatted lines for display. Unavailable statistics are
    /// left out.
    pub fn lines(&self, summary_decimals: usize, test_decimals: usize) -> Vec<(String, String)> {
        let col = &self.primary;
        let d = &self.descriptive;
        let mut out = Vec::new();

        let mut push = |label: String, value: Option<String>| {
            if let Some(value) = value {
                out.push((label, value));
            }
        };

        push(
            format!("Mean (Average) for '{col}'"),
            format_fixed(d.mean, summary_decimals),
        );
        push(
            format!("Standard Deviation for '{col}'"),
            format_fixed(d.std_dev, summary_decimals),
        );
        push(
            format!("Standard Error for '{col}'"),
            format_fixed(d.std_error, summary_decimals),
        );
        push(
            format!("Coefficient of Variation (CV) for '{col}'"),
            format_fixed(d.cv, summary_decimals).map(|v| format!("{v}%")),
        );

        if let Some((other, b)) = &self.secondary {
            push(
                format!("Pearson Correlation between '{col}' and '{other}'"),
                format_fixed(b.correlation, summary_decimals),
            );
            push(
                "P-Value for the correlation".to_string(),
                format_fixed(b.p_value, test_decimals),
            );
            push(
                format!("F Value between '{col}' and '{other}'"),
                format_fixed(b.f_value, test_decimals),
            );
        }
        out
    }
}

/// Fixed-precision rendering; `None` stays `None`.
pub fn format_fixed(value: Option<f64>, decimals: usize) -> Option<String> {
    value.map(|v| format!("{v:.decimals$}"))
}
