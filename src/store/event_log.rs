//! Append-only JSONL log
//!
//! The durable backing for the counter and session stores. Records are
//! appended one JSON object per line and fsynced so an accepted write
//! survives a crash. State is rebuilt by loading the log in order.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::StoreResult;

/// Append-only log of serialized records at a fixed path.
pub struct EventLog {
    path: PathBuf,
}

impl EventLog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a record to the log.
    ///
    /// The line is written and synced to disk before returning, so a record
    /// reported as appended is durable.
    pub fn append<T: Serialize>(&self, record: &T) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let line = serde_json::to_string(record)?;
        writeln!(file, "{}", line)?;
        file.sync_all()?;

        Ok(())
    }

    /// Load all records from the log in append order.
    ///
    /// A missing file is an empty log. Unparsable lines are skipped with a
    /// warning so one corrupt line does not take the whole store down.
    pub fn load<T: DeserializeOwned>(&self) -> StoreResult<Vec<T>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut records = Vec::new();

        for (line_num, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str(&line) {
                Ok(record) => records.push(record),
                Err(e) => {
                    log::warn!(
                        "skipping unparsable record at {}:{}: {}",
                        self.path.display(),
                        line_num + 1,
                        e
                    );
                }
            }
        }

        Ok(records)
    }
}
