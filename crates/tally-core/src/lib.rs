//! Domain types for tally: the task model, its date/time codec, and the
//! recoverable command errors.

/// Date/time parsing and rendering.
pub mod datetime;
/// Command error taxonomy.
pub mod error;
/// Task model.
pub mod task;

pub use error::{CommandError, Result};
pub use task::{Task, TaskKind, TaskType};
