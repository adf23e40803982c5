//! Saved calculation history
//!
//! A JSON file of dated, newest-first records, each holding the original
//! request and a snapshot of its report. Only the CLI uses this; the engine
//! itself never reads or writes history.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use crate::error::YieldResult;
use crate::yields::{YieldReport, YieldRequest};

/// Default history file in the working directory
pub const DEFAULT_HISTORY_PATH: &str = "yield_history.json";

/// One saved calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Millisecond timestamp of when the record was saved, unique per store
    pub id: u64,
    pub saved_at: NaiveDateTime,
    pub request: YieldRequest,
    pub report: YieldReport,
}

/// File-backed list of history records
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
    records: Vec<HistoryRecord>,
}

impl HistoryStore {
    /// Open the store at `path`; a missing file is an empty history
    pub fn open<P: AsRef<Path>>(path: P) -> YieldResult<Self> {
        let path = path.as_ref().to_path_buf();
        let records: Vec<HistoryRecord> = if path.exists() {
            let reader = BufReader::new(File::open(&path)?);
            serde_json::from_reader(reader)?
        } else {
            Vec::new()
        };

        log::debug!("Opened history {} with {} records", path.display(), records.len());
        Ok(Self { path, records })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records, newest first
    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn get(&self, id: u64) -> Option<&HistoryRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Save a calculation stamped with the current local time
    pub fn append(&mut self, request: YieldRequest, report: YieldReport) -> YieldResult<&HistoryRecord> {
        self.append_at(request, report, Local::now().naive_local())
    }

    /// Save a calculation with an explicit timestamp
    pub fn append_at(
        &mut self,
        request: YieldRequest,
        report: YieldReport,
        saved_at: NaiveDateTime,
    ) -> YieldResult<&HistoryRecord> {
        let stamp = saved_at.and_utc().timestamp_millis().max(0) as u64;
        let next_free = self.records.iter().map(|r| r.id + 1).max().unwrap_or(0);
        let id = stamp.max(next_free);

        self.records.insert(
            0,
            HistoryRecord {
                id,
                saved_at,
                request,
                report,
            },
        );
        self.save()?;
        Ok(&self.records[0])
    }

    /// Remove one record; returns whether it existed
    pub fn delete(&mut self, id: u64) -> YieldResult<bool> {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        let removed = self.records.len() != before;
        if removed {
            self.save()?;
        }
        Ok(removed)
    }

    /// Drop every record and the backing file
    pub fn clear(&mut self) -> YieldResult<()> {
        self.records.clear();
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    fn save(&self) -> YieldResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(writer, &self.records)?;
        Ok(())
    }
}
