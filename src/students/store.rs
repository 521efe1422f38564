use std::fs;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, WriterBuilder};
use itertools::Itertools;
use tracing::{info, warn};

use super::error::StoreError;
use super::record::{format_percentage, round2, StudentRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Student records backed by a flat file: a count line, then one
/// `code,name,c1,c2,c3,exam` row per student. Every mutation is written
/// through immediately.
#[derive(Debug)]
pub struct StudentStore {
    path: PathBuf,
    records: Vec<StudentRecord>,
}

impl StudentStore {
    /// A missing file is an empty store, not an error.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let records = if path.exists() {
            read_records(&path)?
        } else {
            info!(path = %path.display(), "no student file yet, starting empty");
            Vec::new()
        };

        Ok(Self { path, records })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find(&self, code: u32) -> Result<&StudentRecord, StoreError> {
        self.records
            .iter()
            .find(|r| r.code == code)
            .ok_or(StoreError::NotFound(code))
    }

    /// First record with the best percentage
    pub fn highest(&self) -> Option<&StudentRecord> {
        self.records
            .iter()
            .rev()
            .max_by(|a, b| a.overall_percentage().total_cmp(&b.overall_percentage()))
    }

    /// First record with the worst percentage
    pub fn lowest(&self) -> Option<&StudentRecord> {
        self.records
            .iter()
            .min_by(|a, b| a.overall_percentage().total_cmp(&b.overall_percentage()))
    }

    pub fn class_average(&self) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        let total: f64 = self.records.iter().map(|r| r.overall_percentage()).sum();
        round2(total / self.records.len() as f64)
    }

    /// Every record followed by the class average
    pub fn report(&self) -> String {
        format!(
            "{}\nClass Average: {}%",
            self.records.iter().map(ToString::to_string).join(""),
            format_percentage(self.class_average())
        )
    }

    pub fn add(&mut self, record: StudentRecord) -> Result<(), StoreError> {
        if self.find(record.code).is_ok() {
            return Err(StoreError::DuplicateCode(record.code));
        }
        let code = record.code;
        let mut next = self.records.clone();
        next.push(record);
        self.commit(next)?;
        info!(code, "added student");
        Ok(())
    }

    pub fn delete(&mut self, code: u32) -> Result<StudentRecord, StoreError> {
        let idx = self.position(code)?;
        let mut next = self.records.clone();
        let removed = next.remove(idx);
        self.commit(next)?;
        info!(code, "deleted student");
        Ok(removed)
    }

    /// Replaces name and marks; the student code never changes.
    pub fn update(&mut self, code: u32, replacement: StudentRecord) -> Result<(), StoreError> {
        let idx = self.position(code)?;
        let mut next = self.records.clone();
        next[idx] = StudentRecord {
            code,
            ..replacement
        };
        self.commit(next)?;
        info!(code, "updated student");
        Ok(())
    }

    pub fn sort(&mut self, order: SortOrder) -> Result<(), StoreError> {
        let mut next = self.records.clone();
        next.sort_by(|a, b| {
            let cmp = a.overall_percentage().total_cmp(&b.overall_percentage());
            match order {
                SortOrder::Ascending => cmp,
                SortOrder::Descending => cmp.reverse(),
            }
        });
        self.commit(next)?;
        info!(%order, "sorted students");
        Ok(())
    }

    pub fn save(&self) -> Result<(), StoreError> {
        write_records(&self.path, &self.records)
    }

    // Memory only changes once the new list is on disk.
    fn commit(&mut self, next: Vec<StudentRecord>) -> Result<(), StoreError> {
        if let Err(err) = write_records(&self.path, &next) {
            warn!(path = %self.path.display(), %err, "save failed, keeping previous records");
            return Err(err);
        }
        self.records = next;
        Ok(())
    }

    fn position(&self, code: u32) -> Result<usize, StoreError> {
        self.records
            .iter()
            .position(|r| r.code == code)
            .ok_or(StoreError::NotFound(code))
    }
}

fn write_records(path: &Path, records: &[StudentRecord]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    writer.write_record([records.len().to_string()])?;
    for r in records {
        writer.write_record([
            r.code.to_string(),
            r.name.clone(),
            r.c1.to_string(),
            r.c2.to_string(),
            r.c3.to_string(),
            r.exam.to_string(),
        ])?;
    }
    writer.flush()?;

    Ok(())
}

fn read_records(path: &Path) -> Result<Vec<StudentRecord>, StoreError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = reader.records();
    let declared = match rows.next() {
        Some(row) => row?.get(0).and_then(|count| count.trim().parse::<usize>().ok()),
        None => return Ok(Vec::new()),
    };

    let mut records = Vec::new();
    for row in rows {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or_default();
        let record = StudentRecord::from_fields(row.iter()).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            line,
            source,
        })?;
        records.push(record);
    }

    if declared != Some(records.len()) {
        warn!(
            path = %path.display(),
            ?declared,
            actual = records.len(),
            "student count line does not match rows"
        );
    }
    info!(path = %path.display(), count = records.len(), "students loaded");

    Ok(records)
}
