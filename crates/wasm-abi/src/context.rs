//! Per-call traversal state: a wall-clock deadline and a nesting depth.

use std::time::{Duration, Instant};

use crate::{CodecError, Result};

/// Deadline and recursion guard threaded through one decode, encode or
/// validation call.
#[derive(Debug)]
pub struct TraversalContext {
    /// `None` when `now + budget` is not representable.
    deadline: Option<Instant>,
    budget: Duration,
    depth: u32,
    max_depth: u32,
}

impl TraversalContext {
    pub fn new(budget: Duration, max_depth: u32) -> Self {
        Self {
            deadline: Instant::now().checked_add(budget),
            budget,
            depth: 0,
            max_depth,
        }
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Fail once the deadline has been reached.
    pub fn check_deadline(&self) -> Result<()> {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(CodecError::DeadlineExceeded {
                budget: self.budget,
            }),
            _ => Ok(()),
        }
    }

    /// Enter one nesting level.
    pub fn enter(&mut self) -> Result<()> {
        self.check_deadline()?;
        if self.depth >= self.max_depth {
            return Err(CodecError::RecursionLimitExceeded {
                limit: self.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    /// Leave one nesting level.
    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Run `f` one level deeper. The level is left again whether `f`
    /// succeeds or fails.
    pub fn descend<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.enter()?;
        let result = f(self);
        self.leave();
        result
    }
}
