//! Cancellable delayed-task queue
//!
//! Screens that used to lean on raw timers own a [`TaskQueue`] instead: a
//! queue of (due-time, task) entries drained against whatever clock the
//! screen is driven by. Tests drain it on a virtual clock; a real host drains
//! it from its event loop tick.
//!
//! Dropping or clearing the queue discards every pending task, which is what
//! gives screens their scoped-timer guarantee: nothing fires after teardown.

use mingle_core::time::EpochMs;
use uuid::Uuid;

/// Opaque handle for cancelling a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(Uuid);

impl TaskHandle {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

#[derive(Debug, Clone)]
struct Entry<T> {
    due_ms: EpochMs,
    handle: TaskHandle,
    seq: u64,
    task: T,
}

/// A queue of delayed tasks ordered by due time.
///
/// Tasks scheduled for the same instant pop in scheduling order.
#[derive(Debug, Clone)]
pub struct TaskQueue<T> {
    entries: Vec<Entry<T>>,
    next_seq: u64,
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TaskQueue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_seq: 0,
        }
    }

    /// Schedule `task` to become due at `now_ms + delay_ms`.
    pub fn schedule(&mut self, now_ms: EpochMs, delay_ms: u64, task: T) -> TaskHandle {
        let handle = TaskHandle::new();
        self.entries.push(Entry {
            due_ms: now_ms.saturating_add(delay_ms),
            handle,
            seq: self.next_seq,
            task,
        });
        self.next_seq += 1;
        handle
    }

    /// Cancel a pending task. Returns `true` if it was still pending.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        self.entries.len() != before
    }

    /// Drop all pending tasks. Called on screen teardown.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of pending tasks.
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Remove and return every task due at or before `now_ms`, in due order.
    pub fn pop_due(&mut self, now_ms: EpochMs) -> Vec<T> {
        let mut due: Vec<Entry<T>> = Vec::new();
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].due_ms <= now_ms {
                due.push(self.entries.swap_remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by_key(|e| (e.due_ms, e.seq));
        due.into_iter().map(|e| e.task).collect()
    }

    /// The due time of the earliest pending task, if any.
    pub fn next_due(&self) -> Option<EpochMs> {
        self.entries.iter().map(|e| e.due_ms).min()
    }
}
