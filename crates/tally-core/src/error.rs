//! Recoverable, user-facing command failures.

use thiserror::Error;

/// Result type for operations that fail with [`CommandError`].
pub type Result<T> = std::result::Result<T, CommandError>;

/// Everything a command can report back instead of an outcome.
///
/// Every variant is recoverable: the triggering command leaves the task
/// sequence and its file mirror untouched, and the session carries on. The
/// `#[error]` text is the explanation shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The first word matches neither a built-in command nor a task type.
    #[error(
        "that is not a command I know; try todo, deadline, event, list, mark, unmark, delete, find, or undo"
    )]
    UnknownCommand,

    /// An add or find command came with no argument text.
    #[error("this command needs some text after the keyword")]
    EmptyDescription,

    /// A deadline or event add is missing a required delimiter.
    #[error("missing date information: deadlines need /by, events need /from and /to")]
    InsufficientInfo,

    /// A date/time argument matched none of the accepted formats.
    #[error("could not read that date/time; try a format like 25/02/2025 1600")]
    InvalidDateTime,

    /// An event's start is not strictly before its end.
    #[error("the start date/time must come before the end date/time")]
    DatesOutOfOrder,

    /// A mark/unmark/delete position is outside the current list.
    #[error("there is no task at that position")]
    IndexOutOfRange,

    /// Undo was requested while nothing was recorded to undo.
    #[error("there is nothing to undo right now")]
    NothingToUndo,
}
