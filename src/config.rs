// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Compile-time defaults for the window and for how results are shown.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub title: String,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    /// Height of the scrollable data table.
    pub table_max_height: f32,
    /// Decimals for mean, standard deviation, standard error, CV and
    /// correlation.
    pub summary_decimals: usize,
    /// Decimals for the p-value and the F value.
    pub test_decimals: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "QCS Statistics Dashboard".to_string(),
            window_size: [1200.0, 800.0],
            min_window_size: [600.0, 400.0],
            table_max_height: 320.0,
            summary_decimals: 2,
            test_decimals: 4,
        }
    }
}
