//! The task model: a tagged union over todo, deadline, and event items.

use std::fmt;

use time::PrimitiveDateTime;

use crate::datetime;
use crate::error::{CommandError, Result};

/// Task type selected by the first word of an add command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskType {
    /// Plain task with no dates attached.
    ToDo,
    /// Task due at a single instant.
    Deadline,
    /// Task spanning a start and an end instant.
    Event,
}

impl TaskType {
    /// Map an add-command keyword to its task type, if the keyword is known.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "todo" => Some(Self::ToDo),
            "deadline" => Some(Self::Deadline),
            "event" => Some(Self::Event),
            _ => None,
        }
    }
}

/// Type-specific payload of a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskKind {
    /// No dates attached.
    ToDo,
    /// Due at a single instant.
    Deadline {
        /// When the task is due.
        due: PrimitiveDateTime,
    },
    /// Spans two instants, start strictly before end.
    Event {
        /// When the event begins.
        start: PrimitiveDateTime,
        /// When the event ends.
        end: PrimitiveDateTime,
    },
}

impl TaskKind {
    /// Tag identifying this variant in a persisted record.
    ///
    /// The tag is an explicit field of the variant, not derived from any
    /// type name, so renaming the Rust types never changes the file format.
    #[must_use]
    pub const fn type_tag(&self) -> &'static str {
        match self {
            Self::ToDo => "ToDo",
            Self::Deadline { .. } => "Deadline",
            Self::Event { .. } => "Event",
        }
    }
}

/// One tracked item.
///
/// The description and the originating command are fixed at construction;
/// only the done flag mutates afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    description: String,
    done: bool,
    original_command: String,
    kind: TaskKind,
}

impl Task {
    /// Build a task of `task_type` from the argument text of an add command.
    ///
    /// `argument_text` is everything after the type keyword. Deadlines split
    /// it on `/by`; events split it on `/from` and then `/to`, in that
    /// order. `original_command` is the full command line, retained verbatim
    /// so a later delete can be reversed by replaying it.
    ///
    /// # Errors
    /// [`CommandError::InsufficientInfo`] when a required delimiter is
    /// absent, [`CommandError::InvalidDateTime`] when a date field does not
    /// parse, [`CommandError::DatesOutOfOrder`] when an event starts at or
    /// after its end, and [`CommandError::EmptyDescription`] when the
    /// description trims to nothing.
    pub fn parse_add(task_type: TaskType, argument_text: &str, original_command: &str) -> Result<Self> {
        match task_type {
            TaskType::ToDo => Self::build(TaskKind::ToDo, argument_text, original_command),
            TaskType::Deadline => {
                let (description, due) = argument_text
                    .split_once("/by")
                    .ok_or(CommandError::InsufficientInfo)?;
                let due = datetime::parse(due)?;
                Self::build(TaskKind::Deadline { due }, description, original_command)
            }
            TaskType::Event => {
                let (description, dates) = argument_text
                    .split_once("/from")
                    .ok_or(CommandError::InsufficientInfo)?;
                let (start, end) = dates.split_once("/to").ok_or(CommandError::InsufficientInfo)?;
                let start = datetime::parse(start)?;
                let end = datetime::parse(end)?;
                Self::build(TaskKind::Event { start, end }, description, original_command)
            }
        }
    }

    /// Reassemble a task from its persisted fields.
    ///
    /// Applies the same construction invariants as a fresh add, so a
    /// hand-edited record with an empty description or out-of-order event
    /// dates is rejected rather than resurrected.
    ///
    /// # Errors
    /// Same as [`Task::parse_add`], minus the delimiter checks.
    pub fn restore(kind: TaskKind, description: &str, done: bool, original_command: &str) -> Result<Self> {
        let mut task = Self::build(kind, description, original_command)?;
        task.done = done;
        Ok(task)
    }

    fn build(kind: TaskKind, description: &str, original_command: &str) -> Result<Self> {
        let description = description.trim();
        if description.is_empty() {
            return Err(CommandError::EmptyDescription);
        }
        if let TaskKind::Event { start, end } = &kind
            && start >= end
        {
            return Err(CommandError::DatesOutOfOrder);
        }
        Ok(Self {
            description: description.to_owned(),
            done: false,
            original_command: original_command.to_owned(),
            kind,
        })
    }

    /// The trimmed description text.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether the task is currently marked done.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.done
    }

    /// Set or clear the done flag.
    pub const fn set_done(&mut self, done: bool) {
        self.done = done;
    }

    /// The verbatim command line that created this task.
    #[must_use]
    pub fn original_command(&self) -> &str {
        &self.original_command
    }

    /// The type-specific payload.
    #[must_use]
    pub const fn kind(&self) -> &TaskKind {
        &self.kind
    }

    /// Status marker as persisted and displayed: `[X]` done, `[ ]` open.
    #[must_use]
    pub const fn status_marker(&self) -> &'static str {
        if self.done { "[X]" } else { "[ ]" }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = self.status_marker();
        match &self.kind {
            TaskKind::ToDo => write!(f, "[T]{status} {}", self.description),
            TaskKind::Deadline { due } => write!(
                f,
                "[D]{status} {} (by: {})",
                self.description,
                datetime::format_display(*due)
            ),
            TaskKind::Event { start, end } => write!(
                f,
                "[E]{status} {} (from: {} to: {})",
                self.description,
                datetime::format_display(*start),
                datetime::format_display(*end)
            ),
        }
    }
}
