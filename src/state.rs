use std::path::PathBuf;

use crate::analysis::Analysis;
use crate::data::column::{selectable_columns, ExtractOptions};
use crate::data::loader::ImportError;
use crate::data::model::Table;
use crate::import::ImportOutcome;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// File picked in the dialog but not imported yet.
    pub chosen_file: Option<PathBuf>,

    /// Loaded table (None until the first successful import).
    pub table: Option<Table>,

    /// Columns offered in the selectors (cached per table).
    pub selectable: Vec<String>,

    /// Column for the single-column statistics.
    pub primary: Option<String>,

    /// Column to correlate with `primary`.
    pub secondary: Option<String>,

    /// How cells are turned into numbers.
    pub options: ExtractOptions,

    /// Statistics for the current selection.
    pub analysis: Option<Analysis>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl AppState {
    /// Remember the file to import and clear any previous message.
    pub fn choose_file(&mut self, path: PathBuf) {
        self.chosen_file = Some(path);
        self.status_message = None;
    }

    /// Check that an import can start; returns the file to load.
    pub fn begin_import(&self) -> Result<PathBuf, ImportError> {
        self.chosen_file.clone().ok_or(ImportError::NoFileSelected)
    }

    /// Show a validation error from the import boundary.
    pub fn reject_import(&mut self, err: ImportError) {
        log::warn!("Import rejected: {err}");
        self.status_message = Some(err.to_string());
    }

    /// Apply a finished import. Failures keep the previous table.
    pub fn finish_import(&mut self, outcome: ImportOutcome) {
        self.loading = false;
        match outcome.result {
            Ok(table) => {
                log::info!(
                    "Loaded {} rows with columns {:?} from {}",
                    table.len(),
                    table.headers,
                    outcome.path.display()
                );
                self.set_table(table);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", outcome.path.display());
                self.status_message = Some(match e.downcast_ref::<ImportError>() {
                    Some(known) => known.to_string(),
                    None => format!("Error: {e:#}"),
                });
            }
        }
    }

    /// Ingest a newly loaded table and reset the selection.
    pub fn set_table(&mut self, table: Table) {
        self.selectable = selectable_columns(&table);
        self.table = Some(table);
        self.primary = None;
        self.secondary = None;
        self.analysis = None;
        self.status_message = None;
    }

    /// Select (or clear) the analysed column.
    pub fn set_primary(&mut self, column: Option<String>) {
        self.primary = column;
        if self.primary.is_none() {
            self.secondary = None;
        }
        self.reanalyze();
    }

    /// Select (or clear) the column to correlate with.
    pub fn set_secondary(&mut self, column: Option<String>) {
        self.secondary = column;
        self.reanalyze();
    }

    /// Toggle date exclusion for the statistics.
    pub fn set_exclude_dates(&mut self, exclude: bool) {
        self.options.exclude_dates = exclude;
        self.reanalyze();
    }

    /// Recompute `analysis` from the table and the current selection.
    pub fn reanalyze(&mut self) {
        self.analysis = match (&self.table, &self.primary) {
            (Some(table), Some(primary)) => Some(Analysis::compute(
                table,
                primary,
                self.secondary.as_deref(),
                self.options,
            )),
            _ => None,
        };
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use anyhow::anyhow;

    use super::*;
    use crate::data::loader::parse_csv_text;

    fn outcome(result: anyhow::Result<Table>) -> ImportOutcome {
        ImportOutcome {
            token: 1,
            path: PathBuf::from("data.csv"),
            result,
        }
    }

    fn loaded() -> AppState {
        let mut state = AppState::default();
        state.finish_import(outcome(parse_csv_text("a,b\n1,2\n2,4\n3,6\n4,8\n")));
        state
    }

    #[test]
    fn import_without_file_is_rejected() {
        let mut state = AppState::default();
        let err = state.begin_import().unwrap_err();
        state.reject_import(err);
        assert_eq!(state.status_message.as_deref(), Some("Please select a file."));
    }

    #[test]
    fn chosen_file_is_returned() {
        let mut state = AppState::default();
        state.status_message = Some("old".into());
        state.choose_file(PathBuf::from("x.csv"));
        assert_eq!(state.status_message, None);
        assert_eq!(state.begin_import().unwrap(), Path::new("x.csv"));
    }

    #[test]
    fn successful_import_replaces_table() {
        let state = loaded();
        assert_eq!(state.table.as_ref().unwrap().len(), 4);
        assert_eq!(state.selectable, vec!["a", "b"]);
        assert!(state.analysis.is_none());
    }

    #[test]
    fn failed_import_keeps_previous_table() {
        let mut state = loaded();
        state.set_primary(Some("a".into()));
        state.finish_import(outcome(Err(anyhow!("boom"))));
        assert_eq!(state.table.as_ref().unwrap().len(), 4);
        assert!(state.analysis.is_some());
        assert_eq!(state.status_message.as_deref(), Some("Error: boom"));
    }

    #[test]
    fn rejected_format_keeps_loaded_table() {
        let mut state = loaded();
        state.set_primary(Some("a".into()));
        state.set_secondary(Some("b".into()));
        let before = state.analysis.clone();

        state.choose_file(PathBuf::from("notes.txt"));
        state.reject_import(ImportError::UnsupportedFormat);

        assert_eq!(
            state.status_message.as_deref(),
            Some("Unsupported file format. Please select a .csv, .xlsx, or .xls file.")
        );
        let table = state.table.as_ref().unwrap();
        assert_eq!(table.headers, vec!["a", "b"]);
        assert_eq!(table.len(), 4);
        assert_eq!(state.selectable, vec!["a", "b"]);
        assert_eq!(state.primary.as_deref(), Some("a"));
        assert_eq!(state.secondary.as_deref(), Some("b"));
        assert!(before.is_some());
        assert_eq!(state.analysis, before);
    }

    #[test]
    fn known_import_errors_are_shown_verbatim() {
        let mut state = AppState::default();
        state.finish_import(outcome(Err(ImportError::UnsupportedFormat.into())));
        assert_eq!(
            state.status_message.as_deref(),
            Some("Unsupported file format. Please select a .csv, .xlsx, or .xls file.")
        );
        assert!(state.table.is_none());
    }

    #[test]
    fn selection_drives_analysis() {
        let mut state = loaded();
        state.set_primary(Some("a".into()));
        let analysis = state.analysis.clone().unwrap();
        assert_eq!(analysis.descriptive.mean, Some(2.5));
        assert!(analysis.secondary.is_none());

        state.set_secondary(Some("b".into()));
        let (_, b) = state.analysis.clone().unwrap().secondary.unwrap();
        assert_eq!(b.correlation, Some(1.0));

        state.set_primary(None);
        assert!(state.analysis.is_none());
        assert!(state.secondary.is_none());
    }

    #[test]
    fn new_table_resets_selection() {
        let mut state = loaded();
        state.set_primary(Some("a".into()));
        state.set_secondary(Some("b".into()));
        state.finish_import(outcome(parse_csv_text("c\n5\n")));
        assert_eq!(state.primary, None);
        assert_eq!(state.secondary, None);
        assert!(state.analysis.is_none());
        assert_eq!(state.selectable, vec!["c"]);
    }
}
