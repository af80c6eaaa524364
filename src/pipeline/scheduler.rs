//! Scheduler - timers and frame callbacks on a virtual clock.
//!
//! Replaces `setTimeout` / `requestAnimationFrame` with typed [`Task`]s.
//! Every scheduled task gets a [`TaskHandle`] the creating component owns
//! and can cancel; a component's outstanding tasks are dropped when it is
//! torn down.
//!
//! Time only moves when the page is advanced. Tasks due at the same
//! instant run in the order they were scheduled. Frame callbacks land on
//! the next 16ms frame boundary strictly after "now".

use std::collections::{BTreeMap, HashMap};

use crate::types::ElementId;

/// Frame cadence assumed by frame callbacks (≈60fps).
pub const FRAME_INTERVAL_MS: u64 = 16;

/// Who receives a task when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Owner {
    /// The page itself (viewport smooth scrolling).
    Page,
    /// A registered component, by registration slot.
    Component(usize),
}

/// Work a component asked to run later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Remove a ripple element.
    RemoveRipple(ElementId),
    /// Begin a counter animation on a value element.
    StartCounter(ElementId),
    /// Next frame of a running counter animation.
    CounterFrame(ElementId),
    /// Type the next character of a heading.
    TypeNext(ElementId),
    /// Next frame of a smooth scroll.
    ScrollStep,
}

/// Cancellable reference to a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskHandle(u64);

/// A task that came due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueTask {
    pub handle: TaskHandle,
    pub owner: Owner,
    pub task: Task,
    pub due_ms: u64,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    owner: Owner,
    task: Task,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    now_ms: u64,
    next_seq: u64,
    /// Ordered by (due time, scheduling sequence).
    queue: BTreeMap<(u64, u64), Entry>,
    /// handle → due time, for cancellation.
    index: HashMap<u64, u64>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.now_ms
    }

    /// Schedule `task` to run `delay_ms` from now.
    pub fn set_timeout(&mut self, owner: Owner, delay_ms: u64, task: Task) -> TaskHandle {
        self.insert(self.now_ms + delay_ms, owner, task)
    }

    /// Schedule `task` for the next frame boundary.
    pub fn request_frame(&mut self, owner: Owner, task: Task) -> TaskHandle {
        let next_frame = (self.now_ms / FRAME_INTERVAL_MS + 1) * FRAME_INTERVAL_MS;
        self.insert(next_frame, owner, task)
    }

    fn insert(&mut self, due_ms: u64, owner: Owner, task: Task) -> TaskHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.insert((due_ms, seq), Entry { owner, task });
        self.index.insert(seq, due_ms);
        TaskHandle(seq)
    }

    /// Cancel a pending task. Returns false if it already ran or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        match self.index.remove(&handle.0) {
            Some(due) => self.queue.remove(&(due, handle.0)).is_some(),
            None => false,
        }
    }

    /// Cancel every pending task of `owner`. Returns how many were dropped.
    pub fn cancel_owner(&mut self, owner: Owner) -> usize {
        let doomed: Vec<(u64, u64)> = self
            .queue
            .iter()
            .filter(|(_, entry)| entry.owner == owner)
            .map(|(key, _)| *key)
            .collect();

        for key in &doomed {
            self.queue.remove(key);
            self.index.remove(&key.1);
        }
        doomed.len()
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.index.contains_key(&handle.0)
    }

    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// Pop the earliest task due at or before `until_ms`, moving the clock
    /// to its due time.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<DueTask> {
        let (&(due_ms, seq), _) = self.queue.iter().next()?;
        if due_ms > until_ms {
            return None;
        }

        let entry = self.queue.remove(&(due_ms, seq))?;
        self.index.remove(&seq);
        self.now_ms = self.now_ms.max(due_ms);

        Some(DueTask {
            handle: TaskHandle(seq),
            owner: entry.owner,
            task: entry.task,
            due_ms,
        })
    }

    /// Move the clock forward without running anything.
    pub fn advance_clock(&mut self, to_ms: u64) {
        self.now_ms = self.now_ms.max(to_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: Owner = Owner::Component(0);

    #[test]
    fn test_timeouts_run_in_due_order() {
        let mut s = Scheduler::new();
        s.set_timeout(OWNER, 600, Task::RemoveRipple(ElementId(1)));
        s.set_timeout(OWNER, 300, Task::StartCounter(ElementId(2)));

        assert_eq!(s.pop_due(1000).unwrap().task, Task::StartCounter(ElementId(2)));
        assert_eq!(s.now(), 300);
        assert_eq!(s.pop_due(1000).unwrap().task, Task::RemoveRipple(ElementId(1)));
        assert_eq!(s.now(), 600);
        assert!(s.pop_due(1000).is_none());
    }

    #[test]
    fn test_same_instant_keeps_scheduling_order() {
        let mut s = Scheduler::new();
        s.set_timeout(OWNER, 100, Task::TypeNext(ElementId(1)));
        s.set_timeout(OWNER, 100, Task::TypeNext(ElementId(2)));

        assert_eq!(s.pop_due(100).unwrap().task, Task::TypeNext(ElementId(1)));
        assert_eq!(s.pop_due(100).unwrap().task, Task::TypeNext(ElementId(2)));
    }

    #[test]
    fn test_not_due_yet() {
        let mut s = Scheduler::new();
        s.set_timeout(OWNER, 600, Task::RemoveRipple(ElementId(1)));

        assert!(s.pop_due(599).is_none());
        assert_eq!(s.now(), 0);
        assert!(s.pop_due(600).is_some());
    }

    #[test]
    fn test_frame_boundaries() {
        let mut s = Scheduler::new();
        s.request_frame(OWNER, Task::ScrollStep);
        assert_eq!(s.pop_due(100).unwrap().due_ms, 16);

        s.advance_clock(20);
        s.request_frame(OWNER, Task::ScrollStep);
        assert_eq!(s.pop_due(100).unwrap().due_ms, 32);

        // Exactly on a boundary: next one, never the current
        s.advance_clock(48);
        s.request_frame(OWNER, Task::ScrollStep);
        assert_eq!(s.pop_due(100).unwrap().due_ms, 64);
    }

    #[test]
    fn test_cancel() {
        let mut s = Scheduler::new();
        let handle = s.set_timeout(OWNER, 600, Task::RemoveRipple(ElementId(1)));

        assert!(s.is_pending(handle));
        assert!(s.cancel(handle));
        assert!(!s.is_pending(handle));
        assert!(!s.cancel(handle));
        assert!(s.pop_due(10_000).is_none());
    }

    #[test]
    fn test_cancel_after_run_is_noop() {
        let mut s = Scheduler::new();
        let handle = s.set_timeout(OWNER, 10, Task::ScrollStep);
        s.pop_due(10).unwrap();
        assert!(!s.cancel(handle));
    }

    #[test]
    fn test_cancel_owner() {
        let mut s = Scheduler::new();
        s.set_timeout(OWNER, 10, Task::ScrollStep);
        s.set_timeout(OWNER, 20, Task::ScrollStep);
        let other = s.set_timeout(Owner::Page, 30, Task::ScrollStep);

        assert_eq!(s.cancel_owner(OWNER), 2);
        assert_eq!(s.pending_count(), 1);
        assert!(s.is_pending(other));
    }
}
