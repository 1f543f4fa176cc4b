//! Deferred work for a single-threaded host loop
//!
//! Delegates defer two kinds of work: retrying cache deserialization until the
//! icon tables are installed, and strategy queries that must not run in the
//! middle of construction. The host drives the queue one turn at a time.
//!
//! A turn runs only the tasks that were queued before it started; anything a
//! task schedules runs on the following turn.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;
use tracing::trace;

type Task = Box<dyn FnOnce()>;

/// FIFO queue of deferred tasks. Clones share the same queue.
#[derive(Clone, Default)]
pub struct Scheduler {
    queue: Rc<RefCell<VecDeque<Task>>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` on a later turn
    pub fn defer(&self, task: impl FnOnce() + 'static) {
        self.queue.borrow_mut().push_back(Box::new(task));
    }

    /// Run every task queued before this call. Returns how many ran.
    pub fn turn(&self) -> usize {
        let batch = self.queue.borrow().len();
        for _ in 0..batch {
            // Pop under a short borrow so the task can schedule more work
            let task = self.queue.borrow_mut().pop_front();
            match task {
                Some(task) => task(),
                None => break,
            }
        }
        trace!("Scheduler turn ran {} task(s)", batch);
        batch
    }

    /// Run turns until the queue drains or `max_turns` is reached.
    /// Returns the number of turns that ran at least one task.
    pub fn run_until_idle(&self, max_turns: usize) -> usize {
        let mut turns = 0;
        while turns < max_turns && !self.is_idle() {
            self.turn();
            turns += 1;
        }
        turns
    }

    /// Drop every pending task without running it
    pub fn cancel_all(&self) {
        let tasks = std::mem::take(&mut *self.queue.borrow_mut());
        drop(tasks);
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("pending", &self.pending())
            .finish()
    }
}
