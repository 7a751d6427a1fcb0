//! Single-slot bookkeeping for reversing the most recent mutation.

/// Holds at most one command line that reverses the last mutating command.
///
/// The slot starts empty, is overwritten after every successful mutating
/// command, and is taken (emptied) by an undo whether or not the replay
/// succeeds. Undo is therefore single-level by construction.
#[derive(Debug, Default)]
pub struct UndoSlot {
    reversal: Option<String>,
}

impl UndoSlot {
    /// Record `command` as the pending reversal, replacing any previous one.
    pub fn record(&mut self, command: String) {
        self.reversal = Some(command);
    }

    /// Take the pending reversal, leaving the slot empty.
    pub fn take(&mut self) -> Option<String> {
        self.reversal.take()
    }

    /// Whether no reversal is currently recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.reversal.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_overwrite_and_take_empties() {
        let mut slot = UndoSlot::default();
        assert!(slot.is_empty());

        slot.record("unmark 2".to_owned());
        slot.record("delete 3".to_owned());
        assert!(!slot.is_empty());

        assert_eq!(slot.take(), Some("delete 3".to_owned()));
        assert!(slot.is_empty());
        assert_eq!(slot.take(), None);
    }
}
