#![forbid(unsafe_code)]

//! Deterministic deferred continuations.
//!
//! The page schedules a handful of short delays: re-checking carousel
//! affordances once a smooth scroll settles, opening the modal after the
//! details button's loading state, focusing the close button. Instead of
//! real timers, tasks are queued against a monotonic clock the host
//! advances explicitly, so every interleaving is reproducible in tests.

use core::cmp::Ordering;
use core::time::Duration;
use std::collections::BinaryHeap;

/// Deterministic monotonic clock controlled by the host.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Current monotonic time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Set current monotonic time. Moving backwards is ignored.
    pub fn set(&mut self, now: Duration) {
        if now > self.now {
            self.now = now;
        }
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }
}

#[derive(Debug)]
struct Entry<T> {
    deadline: Duration,
    seq: u64,
    task: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    // Reversed so the max-heap pops the earliest deadline, then the
    // earliest insertion.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Queue of tasks due at future instants of a [`DeterministicClock`].
#[derive(Debug)]
pub struct Scheduler<T> {
    clock: DeterministicClock,
    queue: BinaryHeap<Entry<T>>,
    next_seq: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            clock: DeterministicClock::new(),
            queue: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    #[must_use]
    pub const fn now(&self) -> Duration {
        self.clock.now()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Deadline of the earliest pending task.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.peek().map(|e| e.deadline)
    }

    /// Queue `task` to run `delay` after the current time.
    pub fn schedule(&mut self, delay: Duration, task: T) -> Duration {
        let deadline = self.clock.now().saturating_add(delay);
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.queue.push(Entry {
            deadline,
            seq,
            task,
        });
        deadline
    }

    /// Pop the earliest task due at or before `until`.
    ///
    /// The clock moves to the task's deadline, so tasks scheduled from
    /// inside a continuation are measured from when it fired.
    pub fn pop_due(&mut self, until: Duration) -> Option<T> {
        if self.queue.peek()?.deadline > until {
            return None;
        }
        let entry = self.queue.pop()?;
        self.clock.set(entry.deadline);
        Some(entry.task)
    }

    /// Move the clock to `until` once every due task has been popped.
    pub fn finish_at(&mut self, until: Duration) {
        self.clock.set(until);
    }

    /// Remove every task matching `predicate`.
    pub fn cancel(&mut self, mut predicate: impl FnMut(&T) -> bool) -> usize {
        let before = self.queue.len();
        self.queue.retain(|e| !predicate(&e.task));
        before - self.queue.len()
    }

    /// Drain tasks in firing order up to `until`, then move the clock there.
    ///
    /// Only usable when running a task never schedules another; callers
    /// that reschedule should loop on [`Self::pop_due`] instead.
    pub fn drain_until(&mut self, until: Duration) -> Vec<T> {
        let mut fired = Vec::new();
        while let Some(task) = self.pop_due(until) {
            fired.push(task);
        }
        self.finish_at(until);
        fired
    }
}
