//! One-line command dispatch: parse, validate, mutate, report.

use tally_core::error::{CommandError, Result};
use tally_core::task::{Task, TaskType};

use crate::mirror::TaskMirror;
use crate::tasks::TaskBook;
use crate::undo::UndoSlot;

/// Structured result of a successfully routed command.
///
/// This is the whole surface a front end needs: a task, a task sequence,
/// and where it matters the running count. Rendering is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A task was added; carries the task and the new sequence length.
    Added(Task, usize),
    /// A task was marked done.
    Marked(Task),
    /// A task was marked not done.
    Unmarked(Task),
    /// A task was removed; carries the task and the remaining length.
    Deleted(Task, usize),
    /// The full sequence, in order.
    Listed(Vec<Task>),
    /// The tasks whose descriptions matched a find keyword.
    Found(Vec<Task>),
    /// The recorded reversal was replayed; carries the replay's outcome.
    Undone(Box<Outcome>),
}

/// Dispatches raw command lines against a [`TaskBook`].
///
/// The router holds no state beyond the book and the undo slot; each call
/// parses one line, validates it, applies the mutation, and records the
/// command that would reverse it.
#[derive(Debug)]
pub struct CommandRouter<M> {
    book: TaskBook<M>,
    undo: UndoSlot,
}

impl<M: TaskMirror> CommandRouter<M> {
    /// Create a router over `book` with an empty undo slot.
    #[must_use]
    pub fn new(book: TaskBook<M>) -> Self {
        Self {
            book,
            undo: UndoSlot::default(),
        }
    }

    /// Read access to the underlying book, for rendering and tests.
    #[must_use]
    pub const fn book(&self) -> &TaskBook<M> {
        &self.book
    }

    /// Run one raw command line and report its structured outcome.
    ///
    /// The first whitespace-delimited token selects the command; anything
    /// that is neither a built-in nor a task type is [`CommandError::UnknownCommand`].
    ///
    /// # Errors
    /// Any [`CommandError`]; the sequence and its mirror are unchanged when
    /// an error comes back.
    pub fn run(&mut self, line: &str) -> Result<Outcome> {
        self.dispatch(line, false)
    }

    /// `replaying` is true while an undo re-enters the dispatch, which
    /// suppresses reversal recording so an undo cannot be undone.
    fn dispatch(&mut self, line: &str, replaying: bool) -> Result<Outcome> {
        let trimmed = line.trim();
        let (keyword, argument) = trimmed
            .split_once(char::is_whitespace)
            .unwrap_or((trimmed, ""));

        match keyword {
            "list" => Ok(Outcome::Listed(self.book.list().to_vec())),
            "mark" => self.mark(argument, replaying),
            "unmark" => self.unmark(argument, replaying),
            "delete" => self.delete(argument, replaying),
            "find" => self.find(argument),
            "undo" => self.replay_undo(),
            _ => self.add(keyword, argument, trimmed, replaying),
        }
    }

    fn mark(&mut self, argument: &str, replaying: bool) -> Result<Outcome> {
        let position = parse_position(argument);
        let task = self.book.mark(position)?;
        self.record_reversal(replaying, format!("unmark {position}"));
        Ok(Outcome::Marked(task))
    }

    fn unmark(&mut self, argument: &str, replaying: bool) -> Result<Outcome> {
        let position = parse_position(argument);
        let task = self.book.unmark(position)?;
        self.record_reversal(replaying, format!("mark {position}"));
        Ok(Outcome::Unmarked(task))
    }

    fn delete(&mut self, argument: &str, replaying: bool) -> Result<Outcome> {
        let position = parse_position(argument);
        let task = self.book.delete(position)?;
        // Replaying the original add restores the task as a fresh append at
        // the end of the sequence, not at its old position.
        self.record_reversal(replaying, task.original_command().to_owned());
        Ok(Outcome::Deleted(task, self.book.count()))
    }

    fn find(&self, argument: &str) -> Result<Outcome> {
        let keyword = argument.trim();
        if keyword.is_empty() {
            return Err(CommandError::EmptyDescription);
        }
        Ok(Outcome::Found(self.book.find(keyword)))
    }

    fn add(&mut self, keyword: &str, argument: &str, original: &str, replaying: bool) -> Result<Outcome> {
        let Some(task_type) = TaskType::from_keyword(keyword) else {
            return Err(CommandError::UnknownCommand);
        };
        if argument.trim().is_empty() {
            return Err(CommandError::EmptyDescription);
        }

        let task = self.book.create(task_type, argument, original)?;
        let count = self.book.count();
        self.record_reversal(replaying, format!("delete {count}"));
        Ok(Outcome::Added(task, count))
    }

    fn replay_undo(&mut self) -> Result<Outcome> {
        // Taking first means the slot is cleared even when the replay fails.
        let Some(reversal) = self.undo.take() else {
            return Err(CommandError::NothingToUndo);
        };
        let outcome = self.dispatch(&reversal, true)?;
        Ok(Outcome::Undone(Box::new(outcome)))
    }

    fn record_reversal(&mut self, replaying: bool, command: String) {
        if !replaying {
            self.undo.record(command);
        }
    }
}

/// Position arguments that are missing or fail to parse collapse to `0`,
/// which can never be a valid 1-based position, so malformed input
/// surfaces uniformly as [`CommandError::IndexOutOfRange`].
fn parse_position(argument: &str) -> usize {
    argument.trim().parse().unwrap_or(0)
}
