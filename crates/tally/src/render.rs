//! User-facing text for command outcomes and errors.
//!
//! Every function builds a fresh string from the structured outcome; no
//! templates are shared or mutated between calls.

use tally_app::Outcome;
use tally_core::{CommandError, Task};

/// Greeting printed when an interactive session starts.
pub const GREETING: &str = "Hello! tally here, keeping your tasks in a line.\nWhat can I do for you?";

/// Farewell printed when the session ends.
pub const FAREWELL: &str = "See you next time!";

/// Render a successful outcome as user-facing text.
#[must_use]
pub fn outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Added(task, count) => {
            format!("Added: {task}\nYou are now tracking {}.", count_phrase(*count))
        }
        Outcome::Marked(task) => format!("Nice, marked as done:\n  {task}"),
        Outcome::Unmarked(task) => format!("Okay, back on the list:\n  {task}"),
        Outcome::Deleted(task, count) => {
            format!("Removed: {task}\n{} left.", count_phrase(*count))
        }
        Outcome::Listed(tasks) => {
            if tasks.is_empty() {
                "No tasks yet. Add one with todo, deadline, or event.".to_owned()
            } else {
                format!("Here is everything on the list:\n{}", numbered(tasks))
            }
        }
        Outcome::Found(tasks) => {
            if tasks.is_empty() {
                "Nothing on the list matches that keyword.".to_owned()
            } else {
                format!("Tasks matching your keyword:\n{}", numbered(tasks))
            }
        }
        Outcome::Undone(inner) => format!("Undo complete. {}", self::outcome(inner)),
    }
}

/// Render a command failure as user-facing text.
#[must_use]
pub fn error(err: &CommandError) -> String {
    format!("Sorry, {err}.")
}

fn numbered(tasks: &[Task]) -> String {
    tasks
        .iter()
        .enumerate()
        .map(|(index, task)| format!("{}. {task}", index + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

fn count_phrase(count: usize) -> String {
    if count == 1 {
        "1 task".to_owned()
    } else {
        format!("{count} tasks")
    }
}
