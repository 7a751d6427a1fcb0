//! Pipe-delimited record codec for the task file.
//!
//! One record per line: type tag, status marker, description, the
//! type-specific date field(s) in storage spelling, and the original add
//! command as the trailing field.

use tally_core::datetime;
use tally_core::task::{Task, TaskKind};

use crate::StoreError;

/// Marker persisted for a completed task.
pub const DONE_MARKER: &str = "[X]";

/// Encode a task as one line of the task file.
#[must_use]
pub fn encode(task: &Task) -> String {
    let tag = task.kind().type_tag();
    let status = task.status_marker();
    let description = task.description();
    let original = task.original_command();
    match task.kind() {
        TaskKind::ToDo => format!("{tag}|{status}|{description}|{original}"),
        TaskKind::Deadline { due } => format!(
            "{tag}|{status}|{description}|{}|{original}",
            datetime::format_storage(*due)
        ),
        TaskKind::Event { start, end } => format!(
            "{tag}|{status}|{description}|{}|{}|{original}",
            datetime::format_storage(*start),
            datetime::format_storage(*end)
        ),
    }
}

/// Decode one line of the task file.
///
/// Returns `Ok(None)` for a line whose type tag is unknown; the loader
/// skips those rather than failing the whole load. Structurally broken
/// lines (missing fields, unreadable dates) are errors the loader also
/// downgrades to skips.
///
/// # Errors
/// Returns [`StoreError::BadRecord`] when the line has too few fields for
/// its type tag or a date field does not parse.
pub fn decode(line: &str) -> Result<Option<Task>, StoreError> {
    let Some((tag, rest)) = line.split_once('|') else {
        return Err(StoreError::BadRecord("no field delimiter".to_owned()));
    };

    // The field count is fixed per type, so the split limit keeps any `|`
    // inside the trailing original-command field intact.
    let task = match tag {
        "ToDo" => {
            let [status, description, original] = split_fields(rest)?;
            Task::restore(TaskKind::ToDo, description, status == DONE_MARKER, original)
        }
        "Deadline" => {
            let [status, description, due, original] = split_fields(rest)?;
            let due = datetime::parse(due).map_err(bad_date)?;
            Task::restore(
                TaskKind::Deadline { due },
                description,
                status == DONE_MARKER,
                original,
            )
        }
        "Event" => {
            let [status, description, start, end, original] = split_fields(rest)?;
            let start = datetime::parse(start).map_err(bad_date)?;
            let end = datetime::parse(end).map_err(bad_date)?;
            Task::restore(
                TaskKind::Event { start, end },
                description,
                status == DONE_MARKER,
                original,
            )
        }
        _ => return Ok(None),
    };

    task.map(Some)
        .map_err(|err| StoreError::BadRecord(err.to_string()))
}

fn split_fields<const N: usize>(rest: &str) -> Result<[&str; N], StoreError> {
    let fields: Vec<&str> = rest.splitn(N, '|').collect();
    fields
        .try_into()
        .map_err(|_| StoreError::BadRecord("missing fields".to_owned()))
}

fn bad_date(err: tally_core::CommandError) -> StoreError {
    StoreError::BadRecord(err.to_string())
}
