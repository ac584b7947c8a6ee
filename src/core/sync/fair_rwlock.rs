/*!
 * Fair Reentrant Read/Write Lock
 *
 * FIFO-ordered read/write lock built on parking_lot's Mutex + Condvar
 */

use super::context::ExecutionContext;
use crate::core::errors::{AccessorError, AccessorResult};
use crate::core::types::LockName;
use ahash::RandomState;
use parking_lot::{Condvar, Mutex, MutexGuard};
use std::collections::{HashMap, VecDeque};

/// Lock access mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockMode {
    Read,
    Write,
}

struct Waiter {
    ticket: u64,
    mode: LockMode,
}

#[derive(Default)]
struct LockState {
    writer: Option<ExecutionContext>,
    write_depth: usize,
    // Read holds per context, including reads taken while holding the write lock
    readers: HashMap<ExecutionContext, usize, RandomState>,
    queue: VecDeque<Waiter>,
    next_ticket: u64,
}

impl LockState {
    /// Whether `ticket` is at the front of the queue and its mode can be granted
    fn can_grant(&self, ticket: u64) -> bool {
        match self.queue.front() {
            Some(waiter) if waiter.ticket == ticket => {
                self.writer.is_none()
                    && (waiter.mode == LockMode::Read || self.readers.is_empty())
            }
            _ => false,
        }
    }
}

/// Fair, reentrant read/write lock
///
/// # Semantics
///
/// - Any number of readers, or exactly one writer
/// - New acquisitions are granted strictly in arrival order, so a waiting
///   writer is never starved by a stream of readers
/// - A context holding the write lock may take the write or read lock again
/// - A context holding a read lock may take it again without queueing
/// - Upgrading read to write is rejected, since it could never be granted
///
/// Acquisition blocks without timeout until granted.
pub struct FairRwLock {
    name: LockName,
    state: Mutex<LockState>,
    granted: Condvar,
}

impl FairRwLock {
    pub fn new(name: impl Into<LockName>) -> Self {
        Self {
            name: name.into(),
            state: Mutex::new(LockState::default()),
            granted: Condvar::new(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn acquire_read(&self, context: ExecutionContext) {
        let mut state = self.state.lock();

        let reentrant = state.writer == Some(context) || state.readers.contains_key(&context);
        if !reentrant {
            self.wait_turn(&mut state, LockMode::Read);
        }

        *state.readers.entry(context).or_insert(0) += 1;

        if !reentrant {
            // The next waiter may be a reader that can share the lock
            self.granted.notify_all();
        }
    }

    pub fn acquire_write(&self, context: ExecutionContext) -> AccessorResult<()> {
        let mut state = self.state.lock();

        if state.writer == Some(context) {
            state.write_depth += 1;
            return Ok(());
        }

        if state.readers.contains_key(&context) {
            return Err(AccessorError::LockUpgrade {
                name: self.name.clone(),
            });
        }

        self.wait_turn(&mut state, LockMode::Write);
        state.writer = Some(context);
        state.write_depth = 1;
        Ok(())
    }

    pub fn release_read(&self, context: ExecutionContext) -> AccessorResult<()> {
        let mut state = self.state.lock();

        let remaining = match state.readers.get_mut(&context) {
            Some(count) => {
                *count -= 1;
                *count
            }
            None => {
                return Err(AccessorError::LockNotHeld {
                    name: self.name.clone(),
                })
            }
        };

        if remaining == 0 {
            state.readers.remove(&context);
            if state.readers.is_empty() {
                self.granted.notify_all();
            }
        }

        Ok(())
    }

    pub fn release_write(&self, context: ExecutionContext) -> AccessorResult<()> {
        let mut state = self.state.lock();

        if state.writer != Some(context) {
            return Err(AccessorError::LockNotHeld {
                name: self.name.clone(),
            });
        }

        state.write_depth -= 1;
        if state.write_depth == 0 {
            state.writer = None;
            self.granted.notify_all();
        }

        Ok(())
    }

    /// Queue behind earlier arrivals until this request can be granted
    fn wait_turn(&self, state: &mut MutexGuard<'_, LockState>, mode: LockMode) {
        let ticket = state.next_ticket;
        state.next_ticket += 1;
        state.queue.push_back(Waiter { ticket, mode });

        while !state.can_grant(ticket) {
            self.granted.wait(state);
        }

        state.queue.pop_front();
    }

    pub fn is_write_locked(&self) -> bool {
        self.state.lock().writer.is_some()
    }

    /// Number of contexts currently holding a read lock
    pub fn reader_count(&self) -> usize {
        self.state.lock().readers.len()
    }

    /// Number of acquisitions waiting for their turn
    pub fn waiting(&self) -> usize {
        self.state.lock().queue.len()
    }

    /// Strongest mode `context` currently holds
    pub fn held_by(&self, context: ExecutionContext) -> Option<LockMode> {
        let state = self.state.lock();
        if state.writer == Some(context) {
            Some(LockMode::Write)
        } else if state.readers.contains_key(&context) {
            Some(LockMode::Read)
        } else {
            None
        }
    }
}

impl std::fmt::Debug for FairRwLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("FairRwLock")
            .field("name", &self.name)
            .field("writer", &state.writer)
            .field("readers", &state.readers.len())
            .field("waiting", &state.queue.len())
            .finish()
    }
}
