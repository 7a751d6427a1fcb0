//! Application layer for tally: the ordered task sequence, one-line command
//! dispatch, and single-slot undo.

pub mod mirror;
pub mod router;
pub mod tasks;
pub mod undo;

pub use mirror::TaskMirror;
pub use router::{CommandRouter, Outcome};
pub use tasks::TaskBook;
pub use undo::UndoSlot;
