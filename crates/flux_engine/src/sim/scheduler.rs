//! Pass scheduling state machine
//!
//! `calculate()` must never run two passes concurrently over the same
//! collections, but requests arriving mid-pass must not be lost either:
//! any number of them collapse into exactly one follow-up pass, so the
//! final flux values always reflect the latest input (trailing-edge
//! coalescing). The state machine is deliberately separate from the
//! engine so the guarantee is testable without a host loop.

use std::sync::Mutex;

use crate::foundation::sync::lock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PassState {
    Idle,
    Running { tick: u64 },
    RunningWithPendingRerun { tick: u64, pending: u64 },
}

/// Non-reentrant pass guard with trailing-edge coalescing
#[derive(Debug)]
pub struct PassScheduler {
    state: Mutex<PassState>,
}

impl Default for PassScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl PassScheduler {
    /// Create an idle scheduler
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(PassState::Idle),
        }
    }

    /// Try to start a pass for `tick`
    ///
    /// Returns true when the caller now owns the pass. When a pass is
    /// already in flight, a newer tick is recorded for the trailing
    /// re-run and false is returned; an older or equal tick is dropped.
    pub fn try_begin(&self, tick: u64) -> bool {
        let mut state = lock(&self.state);
        match *state {
            PassState::Idle => {
                *state = PassState::Running { tick };
                true
            }
            PassState::Running { tick: current } => {
                if tick > current {
                    *state = PassState::RunningWithPendingRerun {
                        tick: current,
                        pending: tick,
                    };
                }
                false
            }
            PassState::RunningWithPendingRerun { tick: current, pending } => {
                if tick > pending {
                    *state = PassState::RunningWithPendingRerun {
                        tick: current,
                        pending: tick,
                    };
                }
                false
            }
        }
    }

    /// Finish the pass the caller owns
    ///
    /// Returns the pending tick when a newer request arrived mid-pass;
    /// the caller must immediately run one more pass for it (the state
    /// stays `Running` for that tick). Returns `None` when the scheduler
    /// went idle.
    pub fn finish(&self) -> Option<u64> {
        let mut state = lock(&self.state);
        match *state {
            PassState::Idle | PassState::Running { .. } => {
                *state = PassState::Idle;
                None
            }
            PassState::RunningWithPendingRerun { pending, .. } => {
                *state = PassState::Running { tick: pending };
                Some(pending)
            }
        }
    }

    /// Whether no pass is in flight
    #[must_use]
    pub fn is_idle(&self) -> bool {
        *lock(&self.state) == PassState::Idle
    }
}
