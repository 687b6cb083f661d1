use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use anyhow::Result;
use eframe::egui;

use crate::data::loader::{self, ImportError, SourceFormat};
use crate::data::model::Table;

// ---------------------------------------------------------------------------
// Single-flight background import
// ---------------------------------------------------------------------------

/// A finished import, tagged with the request it answers.
pub struct ImportOutcome {
    pub token: u64,
    pub path: PathBuf,
    pub result: Result<Table>,
}

/// Runs file imports off the UI thread.
///
/// Every request gets a fresh token; only the outcome carrying the latest
/// token is ever handed back, so a slow earlier import can never overwrite a
/// newer one.
pub struct Importer {
    tx: Sender<ImportOutcome>,
    rx: Receiver<ImportOutcome>,
    latest: u64,
    delivered: u64,
}

impl Default for Importer {
    fn default() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            tx,
            rx,
            latest: 0,
            delivered: 0,
        }
    }
}

impl Importer {
    /// Validate `path` and start loading it in the background.
    ///
    /// Unsupported extensions are rejected here, before anything is read and
    /// without superseding an import already in flight.
    pub fn start(&mut self, path: &Path, ctx: &egui::Context) -> Result<u64, ImportError> {
        SourceFormat::from_path(path)?;

        let token = self.next_token();
        let tx = self.tx.clone();
        let ctx = ctx.clone();
        let path = path.to_path_buf();

        log::info!("Importing {} (request {token})", path.display());
        thread::spawn(move || {
            let result = loader::load_file(&path);
            // The receiver only disappears when the app is shutting down.
            let _ = tx.send(ImportOutcome {
                token,
                path,
                result,
            });
            ctx.request_repaint();
        });
        Ok(token)
    }

    /// Whether the most recent request is still running.
    pub fn is_busy(&self) -> bool {
        self.latest != self.delivered
    }

    /// Return the outcome of the latest request if it has arrived. Outcomes
    /// of superseded requests are discarded.
    pub fn poll(&mut self) -> Option<ImportOutcome> {
        let mut current = None;
        while let Ok(outcome) = self.rx.try_recv() {
            if outcome.token == self.latest {
                self.delivered = outcome.token;
                current = Some(outcome);
            } else {
                log::debug!(
                    "Dropping stale import of {} (request {}, latest {})",
                    outcome.path.display(),
                    outcome.token,
                    self.latest
                );
            }
        }
        current
    }

    fn next_token(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(token: u64, name: &str) -> ImportOutcome {
        ImportOutcome {
            token,
            path: PathBuf::from(name),
            result: Ok(Table::default()),
        }
    }

    #[test]
    fn tokens_increase() {
        let mut importer = Importer::default();
        assert_eq!(importer.next_token(), 1);
        assert_eq!(importer.next_token(), 2);
    }

    #[test]
    fn stale_outcomes_are_dropped() {
        let mut importer = Importer::default();
        let first = importer.next_token();
        let second = importer.next_token();

        // The newer request finishes first, then the older one trails in.
        importer.tx.send(outcome(second, "new.csv")).unwrap();
        importer.tx.send(outcome(first, "old.csv")).unwrap();

        let got = importer.poll().expect("latest outcome");
        assert_eq!(got.token, second);
        assert_eq!(got.path, PathBuf::from("new.csv"));
        assert!(importer.poll().is_none());
    }

    #[test]
    fn only_stale_outcome_yields_nothing() {
        let mut importer = Importer::default();
        let first = importer.next_token();
        let _second = importer.next_token();
        importer.tx.send(outcome(first, "old.csv")).unwrap();
        assert!(importer.poll().is_none());
    }

    #[test]
    fn busy_until_latest_delivered() {
        let mut importer = Importer::default();
        assert!(!importer.is_busy());
        let token = importer.next_token();
        assert!(importer.is_busy());
        importer.tx.send(outcome(token, "a.csv")).unwrap();
        assert!(importer.poll().is_some());
        assert!(!importer.is_busy());
    }

    #[test]
    fn unsupported_extension_is_rejected_before_reading() {
        let mut importer = Importer::default();
        let ctx = egui::Context::default();
        let err = importer.start(Path::new("report.txt"), &ctx).unwrap_err();
        assert_eq!(err, ImportError::UnsupportedFormat);
        assert_eq!(importer.latest, 0);
    }

    #[test]
    fn background_import_delivers_table() {
        use std::io::Write;
        use std::time::{Duration, Instant};

        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write!(file, "a,b\n1,2\n3,4\n").unwrap();

        let mut importer = Importer::default();
        let ctx = egui::Context::default();
        let token = importer.start(file.path(), &ctx).unwrap();

        let deadline = Instant::now() + Duration::from_secs(10);
        let outcome = loop {
            if let Some(outcome) = importer.poll() {
                break outcome;
            }
            assert!(Instant::now() < deadline, "import timed out");
            std::thread::sleep(Duration::from_millis(5));
        };
        assert_eq!(outcome.token, token);
        assert_eq!(outcome.result.unwrap().len(), 2);
    }
}
