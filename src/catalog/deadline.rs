//! Request deadlines matched against host timer events.
//!
//! Zellij's `Timer` event does not say which `set_timeout` call it belongs to.
//! Every deadline we arm has the same duration, so timers fire in the order
//! they were armed and a FIFO queue is enough to pair them up.

use std::collections::VecDeque;

/// The in-flight work a timer was armed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deadline {
    /// A page load, by generation.
    Page(u64),
    /// A detail fetch, by sequence number.
    Detail(u64),
}

/// FIFO of armed deadlines.
#[derive(Debug, Clone, Default)]
pub struct DeadlineQueue {
    armed: VecDeque<Deadline>,
}

impl DeadlineQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a deadline; the caller arms the matching host timer.
    pub fn arm(&mut self, deadline: Deadline) {
        tracing::trace!(deadline = ?deadline, pending = self.armed.len(), "deadline armed");
        self.armed.push_back(deadline);
    }

    /// Pairs a fired timer with the oldest armed deadline.
    ///
    /// # Example
    ///
    /// ```
    /// use zpokedex::catalog::deadline::{Deadline, DeadlineQueue};
    ///
    /// let mut queue = DeadlineQueue::new();
    /// queue.arm(Deadline::Page(1));
    /// queue.arm(Deadline::Detail(1));
    /// assert_eq!(queue.fire(), Some(Deadline::Page(1)));
    /// assert_eq!(queue.fire(), Some(Deadline::Detail(1)));
    /// assert_eq!(queue.fire(), None);
    /// ```
    pub fn fire(&mut self) -> Option<Deadline> {
        self.armed.pop_front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.armed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.armed.is_empty()
    }
}
