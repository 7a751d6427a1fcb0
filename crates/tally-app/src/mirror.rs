//! Storage seam between the in-memory sequence and its durable mirror.

use anyhow::Error;
use tally_core::Task;
use tally_store::TaskFile;

/// Minimal mirror abstraction required by [`TaskBook`](crate::TaskBook).
///
/// Implementations keep one record per task, addressed by the same 1-based
/// position as the in-memory sequence: record `n` must always equal the
/// serialized task at position `n`.
pub trait TaskMirror {
    /// Error type bubbled up from the backing mirror.
    type Error: Into<Error>;

    /// Load every recorded task, in order.
    ///
    /// # Errors
    /// Returns a mirror-specific error when the records cannot be read.
    fn load_all(&self) -> Result<Vec<Task>, Self::Error>;

    /// Append `task` after the last record.
    ///
    /// # Errors
    /// Returns a mirror-specific error when the record cannot be written.
    fn append(&self, task: &Task) -> Result<(), Self::Error>;

    /// Replace the record at `position` (1-based) with `task`.
    ///
    /// # Errors
    /// Returns a mirror-specific error when the record cannot be rewritten.
    fn overwrite_line(&self, position: usize, task: &Task) -> Result<(), Self::Error>;

    /// Remove the record at `position` (1-based).
    ///
    /// # Errors
    /// Returns a mirror-specific error when the record cannot be removed.
    fn delete_line(&self, position: usize) -> Result<(), Self::Error>;
}

impl TaskMirror for TaskFile {
    type Error = tally_store::StoreError;

    fn load_all(&self) -> Result<Vec<Task>, Self::Error> {
        Self::load_all(self)
    }

    fn append(&self, task: &Task) -> Result<(), Self::Error> {
        Self::append(self, task)
    }

    fn overwrite_line(&self, position: usize, task: &Task) -> Result<(), Self::Error> {
        Self::overwrite_line(self, position, task)
    }

    fn delete_line(&self, position: usize) -> Result<(), Self::Error> {
        Self::delete_line(self, position)
    }
}
