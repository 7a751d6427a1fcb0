//! Flat-file persistence for tally: one task per line, addressed by the
//! same 1-based position as the in-memory sequence.

/// Record codec for the task file.
pub mod record;

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use tally_core::Task;

/// Errors from task-file operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying file could not be created, read, or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A line operation was keyed outside the file's current line count.
    #[error("line {0} is out of range of the task file")]
    LineOutOfRange(usize),

    /// A record could not be decoded into a task.
    #[error("unreadable record: {0}")]
    BadRecord(String),
}

/// The durable, line-per-task mirror of the in-memory sequence.
///
/// Line `n` of the file holds the serialized form of the task at position
/// `n`; every operation here is keyed by that 1-based position. The file
/// and its parent directory are created on first access.
#[derive(Debug)]
pub struct TaskFile {
    path: PathBuf,
}

impl TaskFile {
    /// Create a handle for the task file at `path`.
    ///
    /// Nothing is touched on disk until the first operation.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path this mirror reads and writes.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every task recorded in the file, creating it first if absent.
    ///
    /// Records that fail to decode (unknown type tag, missing fields, an
    /// unreadable date) are skipped so one corrupt line cannot block
    /// startup; each skip is logged.
    ///
    /// # Errors
    /// Returns an error when the file cannot be created or read.
    pub fn load_all(&self) -> Result<Vec<Task>, StoreError> {
        self.ensure_exists()?;
        let contents = fs::read_to_string(&self.path)?;

        let mut tasks = Vec::new();
        for (number, line) in contents.lines().enumerate() {
            if line.is_empty() {
                continue;
            }
            match record::decode(line) {
                Ok(Some(task)) => tasks.push(task),
                Ok(None) => debug!(line = number + 1, "skipping record with unknown task type"),
                Err(err) => debug!(line = number + 1, %err, "skipping unreadable record"),
            }
        }

        info!(count = tasks.len(), path = %self.path.display(), "loaded task file");
        Ok(tasks)
    }

    /// Append `task` as a new record at end-of-file.
    ///
    /// # Errors
    /// Returns an error when the file cannot be created or written.
    pub fn append(&self, task: &Task) -> Result<(), StoreError> {
        self.ensure_exists()?;
        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        writeln!(file, "{}", record::encode(task))?;
        Ok(())
    }

    /// Replace the record at `position` (1-based) with `task`.
    ///
    /// # Errors
    /// [`StoreError::LineOutOfRange`] when the file has no such line, or an
    /// I/O error when rewriting fails.
    pub fn overwrite_line(&self, position: usize, task: &Task) -> Result<(), StoreError> {
        self.splice(position, Some(record::encode(task)))
    }

    /// Remove the record at `position` (1-based), shifting later lines up.
    ///
    /// # Errors
    /// [`StoreError::LineOutOfRange`] when the file has no such line, or an
    /// I/O error when rewriting fails.
    pub fn delete_line(&self, position: usize) -> Result<(), StoreError> {
        self.splice(position, None)
    }

    /// Rewrite the file with line `position` replaced or removed.
    fn splice(&self, position: usize, replacement: Option<String>) -> Result<(), StoreError> {
        self.ensure_exists()?;
        let contents = fs::read_to_string(&self.path)?;
        let mut lines: Vec<String> = contents.lines().map(str::to_owned).collect();

        if position == 0 || position > lines.len() {
            return Err(StoreError::LineOutOfRange(position));
        }
        match replacement {
            Some(line) => lines[position - 1] = line,
            None => {
                lines.remove(position - 1);
            }
        }

        let mut out = lines.join("\n");
        if !out.is_empty() {
            out.push('\n');
        }
        fs::write(&self.path, out)?;
        Ok(())
    }

    fn ensure_exists(&self) -> Result<(), StoreError> {
        if self.path.exists() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::File::create(&self.path)?;
        Ok(())
    }
}
