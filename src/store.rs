//! Line-delimited JSON record store.
//!
//! One record per line, no surrounding array. Loading is tolerant: blank lines
//! are skipped and lines that do not parse are logged and dropped. Saving
//! truncates the file and rewrites the whole collection in memory order.
//!
//! The store does no locking. Callers that can race (several processes
//! mutating the same file) must serialize the load-mutate-save cycle
//! themselves; see [`crate::lock`].

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::Record;

/// Read every record from `path`.
///
/// A missing file yields an empty collection. With `auto_id`, an object that
/// has no `id` field gets its 0-based line index as id.
pub fn load<T: Record>(path: &Path, auto_id: bool) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut records = Vec::new();

    for (index, raw) in reader.split(b'\n').enumerate() {
        let raw = raw?;
        let line = match String::from_utf8(raw) {
            Ok(line) => line,
            Err(err) => {
                tracing::warn!(path = %path.display(), line = index + 1, error = %err, "skipping non-UTF-8 record");
                continue;
            }
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let mut value: serde_json::Value = match serde_json::from_str(trimmed) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(path = %path.display(), line = index + 1, error = %err, "skipping malformed record");
                continue;
            }
        };

        if auto_id {
            if let Some(object) = value.as_object_mut() {
                if !object.contains_key("id") {
                    object.insert("id".to_string(), serde_json::Value::from(index as u64));
                }
            }
        }

        match serde_json::from_value::<T>(value) {
            Ok(record) => records.push(record),
            Err(err) => {
                tracing::warn!(path = %path.display(), line = index + 1, error = %err, "skipping malformed {} record", T::KIND.as_str());
            }
        }
    }

    tracing::debug!(path = %path.display(), count = records.len(), "loaded records");
    Ok(records)
}

/// Overwrite `path` with one serialized record per line.
pub fn save<T: Serialize>(records: &[T], path: &Path) -> Result<()> {
    let mut content = String::new();
    for record in records {
        content.push_str(&serde_json::to_string(record)?);
        content.push('\n');
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| persistence(path, source))?;
        }
    }

    let mut file = File::create(path).map_err(|source| persistence(path, source))?;
    file.write_all(content.as_bytes())
        .map_err(|source| persistence(path, source))?;
    file.sync_all().map_err(|source| persistence(path, source))?;

    tracing::debug!(path = %path.display(), count = records.len(), "saved records");
    Ok(())
}

/// Id for the next new record: one past the largest id, or 1 when empty.
pub fn next_id<T: Record>(records: &[T]) -> u64 {
    records.iter().map(Record::id).max().map_or(1, |max| max + 1)
}

fn persistence(path: &Path, source: io::Error) -> Error {
    Error::Persistence {
        path: path.to_path_buf(),
        source,
    }
}

/// An in-memory collection bound to its backing file.
///
/// Every mutation rewrites the file. If the rewrite fails the in-memory
/// collection is put back the way it was and the error is returned.
#[derive(Debug, Clone)]
pub struct RecordStore<T: Record> {
    path: PathBuf,
    records: Vec<T>,
}

impl<T: Record> RecordStore<T> {
    /// Load the collection stored at `path`.
    pub fn open(path: impl Into<PathBuf>, auto_id: bool) -> Result<Self> {
        let path = path.into();
        let records = load(&path, auto_id)?;
        Ok(Self { path, records })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn all(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn next_id(&self) -> u64 {
        next_id(&self.records)
    }

    pub fn get(&self, id: u64) -> Result<&T> {
        self.records
            .iter()
            .find(|record| record.id() == id)
            .ok_or(Error::NotFound { kind: T::KIND, id })
    }

    /// Append `record` under a fresh id and persist.
    pub fn insert(&mut self, mut record: T) -> Result<T> {
        record.set_id(self.next_id());
        self.records.push(record.clone());
        if let Err(err) = self.save() {
            self.records.pop();
            return Err(err);
        }
        Ok(record)
    }

    /// Apply `mutate` to the record with `id` and persist. The id is kept.
    pub fn update<F>(&mut self, id: u64, mutate: F) -> Result<T>
    where
        F: FnOnce(&mut T),
    {
        let position = self.position(id)?;
        let previous = self.records[position].clone();
        let record = &mut self.records[position];
        mutate(record);
        record.set_id(id);
        let updated = record.clone();

        if let Err(err) = self.save() {
            self.records[position] = previous;
            return Err(err);
        }
        Ok(updated)
    }

    /// Remove the record with `id` and persist.
    pub fn remove(&mut self, id: u64) -> Result<T> {
        let position = self.position(id)?;
        let removed = self.records.remove(position);
        if let Err(err) = self.save() {
            self.records.insert(position, removed);
            return Err(err);
        }
        Ok(removed)
    }

    /// Rewrite the backing file from memory.
    pub fn save(&self) -> Result<()> {
        save(&self.records, &self.path)
    }

    fn position(&self, id: u64) -> Result<usize> {
        self.records
            .iter()
            .position(|record| record.id() == id)
            .ok_or(Error::NotFound { kind: T::KIND, id })
    }
}
