use crate::callback::Callback;

/// One registered callback.
#[derive(Debug, Clone)]
pub(crate) struct CallbackEntry {
    pub callback: Callback,
    pub priority: i32,
    /// Soft-delete mark; set while the owning phase is dispatching.
    pub removed: bool,
}

/// A priority-ordered callback list for one bucket.
///
/// Entries are kept sorted ascending by priority with ties in insertion
/// order. While a dispatch pass iterates the list by index, removals are
/// soft marks; [`compact`](Self::compact) drops marked entries afterwards so
/// indices stay valid for the whole pass.
#[derive(Debug, Default)]
pub(crate) struct CallbackList {
    entries: Vec<CallbackEntry>,
    /// Number of entries with `removed == true`.
    removed_count: usize,
}

impl CallbackList {
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Number of entries not marked as removed.
    pub fn live_len(&self) -> usize {
        self.entries.len() - self.removed_count
    }

    pub fn get(&self, index: usize) -> Option<&CallbackEntry> {
        self.entries.get(index)
    }

    pub fn position(&self, callback: &Callback) -> Option<usize> {
        self.entries.iter().position(|e| e.callback.same(callback))
    }

    /// Inserts after every entry with priority <= `priority`.
    ///
    /// Returns `false` (and does nothing) if the callback is already present.
    pub fn insert(&mut self, callback: Callback, priority: i32) -> bool {
        if self.position(&callback).is_some() {
            return false;
        }
        let index = self.entries.partition_point(|e| e.priority <= priority);
        self.entries.insert(
            index,
            CallbackEntry {
                callback,
                priority,
                removed: false,
            },
        );
        true
    }

    /// Removes the entry immediately. Only valid while not dispatching.
    pub fn remove(&mut self, callback: &Callback) -> bool {
        match self.position(callback) {
            Some(index) => {
                if self.entries.remove(index).removed {
                    self.removed_count -= 1;
                }
                true
            }
            None => false,
        }
    }

    /// Marks the entry as removed. Returns `true` if a live entry was marked.
    pub fn mark_removed(&mut self, callback: &Callback) -> bool {
        match self.position(callback) {
            Some(index) if !self.entries[index].removed => {
                self.entries[index].removed = true;
                self.removed_count += 1;
                true
            }
            _ => false,
        }
    }

    /// Clears the removal mark. Returns `true` if a marked entry was revived.
    pub fn unmark_removed(&mut self, callback: &Callback) -> bool {
        match self.position(callback) {
            Some(index) if self.entries[index].removed => {
                self.entries[index].removed = false;
                self.removed_count -= 1;
                true
            }
            _ => false,
        }
    }

    /// Returns `true` if the callback is present and not marked.
    pub fn contains_live(&self, callback: &Callback) -> bool {
        self.position(callback)
            .is_some_and(|index| !self.entries[index].removed)
    }

    pub fn has_removed(&self) -> bool {
        self.removed_count > 0
    }

    /// Drops every marked entry, preserving the order of the rest.
    pub fn compact(&mut self) {
        if self.removed_count == 0 {
            return;
        }
        self.entries.retain(|e| !e.removed);
        self.removed_count = 0;
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &CallbackEntry> {
        self.entries.iter()
    }
}
