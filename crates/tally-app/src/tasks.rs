//! The ordered task sequence and its mirror-synchronized mutations.

use tracing::warn;

use tally_core::error::{CommandError, Result};
use tally_core::task::{Task, TaskType};

use crate::mirror::TaskMirror;

/// Owner of the ordered task sequence.
///
/// A position is the 1-based index of a task in the sequence at the moment
/// of an operation. Positions are recomputed per call and never stable
/// across mutations: deleting position `k` shifts every later task down by
/// one.
///
/// Every mutation writes the matching line operation to the mirror before
/// it reports success. A mirror write that fails is logged and the
/// in-memory change stands, so a transient I/O problem degrades
/// persistence instead of destroying the session.
#[derive(Debug)]
pub struct TaskBook<M> {
    tasks: Vec<Task>,
    mirror: M,
}

impl<M: TaskMirror> TaskBook<M> {
    /// Create a book over `mirror`, hydrating the sequence from it.
    ///
    /// A mirror that cannot be read yields an empty starting sequence; the
    /// failure is logged, not fatal.
    pub fn load(mirror: M) -> Self {
        let tasks = match mirror.load_all() {
            Ok(tasks) => tasks,
            Err(err) => {
                let err: anyhow::Error = err.into();
                warn!(%err, "could not read the task mirror; starting with no tasks");
                Vec::new()
            }
        };
        Self { tasks, mirror }
    }

    /// Add a task of `task_type` built from the add command's argument text.
    ///
    /// `original_command` is the verbatim command line, recorded on the
    /// task so a later delete can be undone by replaying it. The new task
    /// is appended at the end of the sequence and mirrored.
    ///
    /// # Errors
    /// Whatever [`Task::parse_add`] rejects; the sequence and mirror are
    /// unchanged on error.
    pub fn create(&mut self, task_type: TaskType, argument_text: &str, original_command: &str) -> Result<Task> {
        let task = Task::parse_add(task_type, argument_text, original_command)?;
        if let Err(err) = self.mirror.append(&task) {
            warn_diverged(&err.into());
        }
        self.tasks.push(task.clone());
        Ok(task)
    }

    /// Mark the task at `position` as done.
    ///
    /// # Errors
    /// [`CommandError::IndexOutOfRange`] when `position` is outside
    /// `1..=count()`.
    pub fn mark(&mut self, position: usize) -> Result<Task> {
        self.set_done(position, true)
    }

    /// Mark the task at `position` as not done.
    ///
    /// # Errors
    /// [`CommandError::IndexOutOfRange`] when `position` is outside
    /// `1..=count()`.
    pub fn unmark(&mut self, position: usize) -> Result<Task> {
        self.set_done(position, false)
    }

    fn set_done(&mut self, position: usize, done: bool) -> Result<Task> {
        let index = self.index_of(position)?;
        self.tasks[index].set_done(done);
        let snapshot = self.tasks[index].clone();
        if let Err(err) = self.mirror.overwrite_line(position, &snapshot) {
            warn_diverged(&err.into());
        }
        Ok(snapshot)
    }

    /// Remove and return the task at `position`.
    ///
    /// Later tasks shift down by one; the caller may need the returned
    /// task's original command to build an undo.
    ///
    /// # Errors
    /// [`CommandError::IndexOutOfRange`] when `position` is outside
    /// `1..=count()`.
    pub fn delete(&mut self, position: usize) -> Result<Task> {
        let index = self.index_of(position)?;
        if let Err(err) = self.mirror.delete_line(position) {
            warn_diverged(&err.into());
        }
        Ok(self.tasks.remove(index))
    }

    /// Tasks whose description contains `keyword`, in sequence order.
    ///
    /// The match is a case-sensitive substring check against the
    /// description only; no normalization. May be empty.
    #[must_use]
    pub fn find(&self, keyword: &str) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|task| task.description().contains(keyword))
            .cloned()
            .collect()
    }

    /// All tasks in sequence order.
    #[must_use]
    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    /// Current length of the sequence.
    #[must_use]
    pub fn count(&self) -> usize {
        self.tasks.len()
    }

    fn index_of(&self, position: usize) -> Result<usize> {
        if (1..=self.tasks.len()).contains(&position) {
            Ok(position - 1)
        } else {
            Err(CommandError::IndexOutOfRange)
        }
    }
}

fn warn_diverged(err: &anyhow::Error) {
    warn!(%err, "task mirror write failed; keeping the in-memory change");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mirror::testing::MemoryMirror;

    fn book() -> TaskBook<MemoryMirror> {
        TaskBook::load(MemoryMirror::default())
    }

    #[test]
    fn create_appends_to_sequence_and_mirror() -> Result<()> {
        let mut book = book();
        let task = book.create(TaskType::ToDo, "buy milk", "todo buy milk")?;

        assert_eq!(book.count(), 1);
        assert_eq!(book.list(), &[task.clone()]);
        assert_eq!(book.mirror.records(), vec![task]);
        Ok(())
    }

    #[test]
    fn failed_create_leaves_everything_untouched() {
        let mut book = book();
        let result = book.create(
            TaskType::Deadline,
            "report with no delimiter",
            "deadline report with no delimiter",
        );

        assert_eq!(result, Err(CommandError::InsufficientInfo));
        assert_eq!(book.count(), 0);
        assert!(book.mirror.records().is_empty());
    }

    #[test]
    fn mark_and_unmark_flip_the_flag_in_both_places() -> Result<()> {
        let mut book = book();
        book.create(TaskType::ToDo, "buy milk", "todo buy milk")?;

        let marked = book.mark(1)?;
        assert!(marked.is_done());
        assert!(book.mirror.records()[0].is_done());

        let unmarked = book.unmark(1)?;
        assert!(!unmarked.is_done());
        assert!(!book.mirror.records()[0].is_done());
        Ok(())
    }

    #[test]
    fn positions_outside_the_sequence_are_rejected_without_effect() -> Result<()> {
        let mut book = book();
        book.create(TaskType::ToDo, "buy milk", "todo buy milk")?;

        assert_eq!(book.mark(0), Err(CommandError::IndexOutOfRange));
        assert_eq!(book.unmark(2), Err(CommandError::IndexOutOfRange));
        assert_eq!(book.delete(99), Err(CommandError::IndexOutOfRange));
        assert_eq!(book.count(), 1);
        assert!(!book.list()[0].is_done());
        Ok(())
    }

    #[test]
    fn delete_shifts_later_positions_down() -> Result<()> {
        let mut book = book();
        book.create(TaskType::ToDo, "one", "todo one")?;
        book.create(TaskType::ToDo, "two", "todo two")?;
        book.create(TaskType::ToDo, "three", "todo three")?;

        let removed = book.delete(2)?;
        assert_eq!(removed.description(), "two");
        assert_eq!(book.count(), 2);
        assert_eq!(book.list()[1].description(), "three");
        assert_eq!(book.mirror.records().len(), 2);
        Ok(())
    }

    #[test]
    fn find_is_a_case_sensitive_substring_match() -> Result<()> {
        let mut book = book();
        book.create(TaskType::ToDo, "buy milk", "todo buy milk")?;
        book.create(TaskType::ToDo, "buy Milk powder", "todo buy Milk powder")?;
        book.create(TaskType::ToDo, "call mum", "todo call mum")?;

        let hits = book.find("milk");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].description(), "buy milk");

        assert!(book.find("nosuchword").is_empty());
        Ok(())
    }

    mod broken_mirror {
        use super::*;

        /// Mirror whose writes always fail, for the degraded-persistence path.
        #[derive(Debug, Default)]
        struct BrokenMirror;

        fn io_err() -> std::io::Error {
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only")
        }

        impl TaskMirror for BrokenMirror {
            type Error = std::io::Error;

            fn load_all(&self) -> std::result::Result<Vec<Task>, Self::Error> {
                Err(io_err())
            }

            fn append(&self, _task: &Task) -> std::result::Result<(), Self::Error> {
                Err(io_err())
            }

            fn overwrite_line(&self, _position: usize, _task: &Task) -> std::result::Result<(), Self::Error> {
                Err(io_err())
            }

            fn delete_line(&self, _position: usize) -> std::result::Result<(), Self::Error> {
                Err(io_err())
            }
        }

        #[test]
        fn unreadable_mirror_hydrates_an_empty_sequence() {
            let book = TaskBook::load(BrokenMirror);
            assert_eq!(book.count(), 0);
        }

        #[test]
        fn failed_writes_keep_the_in_memory_change() -> Result<()> {
            let mut book = TaskBook::load(BrokenMirror);
            book.create(TaskType::ToDo, "buy milk", "todo buy milk")?;
            assert_eq!(book.count(), 1);

            let marked = book.mark(1)?;
            assert!(marked.is_done());

            let removed = book.delete(1)?;
            assert_eq!(removed.description(), "buy milk");
            assert_eq!(book.count(), 0);
            Ok(())
        }
    }
}
