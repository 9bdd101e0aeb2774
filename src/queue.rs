//! FIFO work queues.
//!
//! [`Queue`] is either unbounded or bounded with dropping semantics: once a
//! bounded queue is full, further offers are discarded. The table reader
//! leans on that to tolerate rows whose colspans add up past the table width.
//!
//! The queue is internally locked, so a single instance can be shared between
//! producer threads. Within this crate every queue is used from one thread.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A FIFO queue, optionally bounded.
#[derive(Debug)]
pub struct Queue<T> {
    items: Mutex<VecDeque<T>>,
    capacity: Option<usize>,
}

impl<T> Queue<T> {
    /// Create a queue with no size limit.
    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
            capacity: None,
        }
    }

    /// Create a queue holding at most `capacity` items; excess offers are dropped.
    #[must_use]
    pub fn dropping(capacity: usize) -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
            capacity: Some(capacity),
        }
    }

    /// Maximum number of items, `None` when unbounded.
    #[must_use]
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<T>> {
        // A panicking handler cannot leave the deque half-updated.
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Enqueue an item. Returns `false` when a full bounded queue dropped it.
    pub fn offer(&self, item: T) -> bool {
        let mut items = self.lock();
        if self.capacity.is_some_and(|capacity| items.len() >= capacity) {
            return false;
        }
        items.push_back(item);
        true
    }

    /// Enqueue every item in order. Returns how many were accepted.
    pub fn offer_all<I>(&self, items: I) -> usize
    where
        I: IntoIterator<Item = T>,
    {
        items.into_iter().filter_map(|item| self.offer(item).then_some(())).count()
    }

    /// Dequeue the oldest item, if any.
    pub fn poll(&self) -> Option<T> {
        self.lock().pop_front()
    }

    /// Dequeue the oldest item, or produce the fallback's error when empty.
    pub fn dequeue_or_else<E, F>(&self, or_else: F) -> Result<T, E>
    where
        F: FnOnce() -> E,
    {
        self.poll().ok_or_else(or_else)
    }

    /// Drain every item. An empty queue yields the fallback's error, so a
    /// successful result is never empty.
    pub fn take_all_non_empty_or_else<E, F>(&self, or_else: F) -> Result<Vec<T>, E>
    where
        F: FnOnce() -> E,
    {
        let drained: Vec<T> = self.lock().drain(..).collect();
        if drained.is_empty() {
            Err(or_else())
        } else {
            Ok(drained)
        }
    }

    /// Current number of queued items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the queue holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Pop items until the queue is empty, handing each to `handler`.
    ///
    /// The handler receives the queue and may enqueue more work; the size is
    /// checked again after every step. The first handler error stops the loop.
    pub fn iterate<E, F>(&self, mut handler: F) -> Result<(), E>
    where
        F: FnMut(T, &Self) -> Result<(), E>,
    {
        while let Some(item) = self.poll() {
            handler(item, self)?;
        }
        Ok(())
    }

    /// Like [`Queue::iterate`], threading an accumulator through each step.
    pub fn fold<O, E, F>(&self, initial: O, mut reducer: F) -> Result<O, E>
    where
        F: FnMut(O, T, &Self) -> Result<O, E>,
    {
        let mut acc = initial;
        while let Some(item) = self.poll() {
            acc = reducer(acc, item, self)?;
        }
        Ok(acc)
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::unbounded()
    }
}
