use crate::app_dirs::AppDirs;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

/// One finished practice session, appended to the history log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PracticeRecord {
    pub date: DateTime<Local>,
    pub reference: String,
    pub words: usize,
    pub rounds: usize,
    pub hints: usize,
}

/// Append-only CSV log of practice sessions under the state directory.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    pub fn new() -> Option<Self> {
        AppDirs::history_path().map(|path| Self { path })
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    /// Appends one record, emitting the header row only when the file is new.
    pub fn append(&self, record: &PracticeRecord) -> csv::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let needs_header = !self.path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        writer.serialize(record)?;
        writer.flush()?;
        Ok(())
    }

    pub fn read_all(&self) -> csv::Result<Vec<PracticeRecord>> {
        let mut reader = csv::Reader::from_path(&self.path)?;
        reader.deserialize().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record(reference: &str, rounds: usize) -> PracticeRecord {
        PracticeRecord {
            date: Local::now(),
            reference: reference.to_string(),
            words: 10,
            rounds,
            hints: 1,
        }
    }

    #[test]
    fn append_then_read_back() {
        let dir = tempdir().unwrap();
        let log = HistoryLog::with_path(dir.path().join("history.csv"));

        log.append(&record("John 3:16", 4)).unwrap();
        log.append(&record("Proverbs 3:5-6", 6)).unwrap();

        let records = log.read_all().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].reference, "John 3:16");
        assert_eq!(records[0].rounds, 4);
        assert_eq!(records[1].reference, "Proverbs 3:5-6");
    }

    #[test]
    fn header_is_written_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("history.csv");
        let log = HistoryLog::with_path(&path);

        log.append(&record("John 11:35", 1)).unwrap();
        log.append(&record("John 11:35", 2)).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.matches("date,reference").count(), 1);
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempdir().unwrap();
        let log = HistoryLog::with_path(dir.path().join("nested").join("history.csv"));

        log.append(&record("Romans 8:28", 3)).unwrap();
        assert_eq!(log.read_all().unwrap().len(), 1);
    }
}
