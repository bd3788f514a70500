//! Linear snapshot history.
//!
//! Snapshots are serialized surfaces stored oldest first with a cursor on
//! the current one. Writing after an undo truncates the redo tail before
//! appending. The cursor is `None` only before [`History::initialize`].

#[derive(Debug, Clone, Default)]
pub struct History {
    snapshots: Vec<String>,
    cursor: Option<usize>,
    limit: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// History that keeps at most `limit` snapshots, dropping the oldest.
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit: limit.filter(|l| *l > 0),
            ..Self::default()
        }
    }

    /// Resets the history to a single snapshot.
    pub fn initialize(&mut self, snapshot: String) {
        self.snapshots = vec![snapshot];
        self.cursor = Some(0);
    }

    pub fn is_initialized(&self) -> bool {
        self.cursor.is_some()
    }

    /// Drops everything after the cursor, appends `snapshot` and moves the
    /// cursor onto it. Returns the new length.
    pub fn checkpoint(&mut self, snapshot: String) -> usize {
        if let Some(cursor) = self.cursor {
            self.snapshots.truncate(cursor + 1);
        } else {
            self.snapshots.clear();
        }
        self.snapshots.push(snapshot);

        if let Some(limit) = self.limit {
            if self.snapshots.len() > limit {
                let excess = self.snapshots.len() - limit;
                self.snapshots.drain(..excess);
            }
        }

        self.cursor = Some(self.snapshots.len() - 1);
        self.snapshots.len()
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.snapshots.len())
    }

    /// Steps back and returns the snapshot to restore.
    pub fn undo(&mut self) -> Option<&str> {
        let cursor = self.cursor.filter(|c| *c > 0)? - 1;
        self.cursor = Some(cursor);
        self.snapshots.get(cursor).map(String::as_str)
    }

    /// Steps forward and returns the snapshot to restore.
    pub fn redo(&mut self) -> Option<&str> {
        let cursor = self.cursor? + 1;
        let snapshot = self.snapshots.get(cursor)?;
        self.cursor = Some(cursor);
        Some(snapshot.as_str())
    }

    pub fn current(&self) -> Option<&str> {
        self.cursor
            .and_then(|c| self.snapshots.get(c))
            .map(String::as_str)
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}
