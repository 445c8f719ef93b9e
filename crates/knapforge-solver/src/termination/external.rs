//! External termination via a shared flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::Termination;
use crate::scope::SolverScope;

/// Terminates when an external flag is set.
///
/// Clones share the same flag, so one clone can be handed to the solver and
/// another kept by whoever wants to stop it.
///
/// # Example
///
/// ```
/// use knapforge_solver::ExternalTermination;
///
/// let term = ExternalTermination::new();
/// let handle = term.clone();
///
/// // from another thread, later:
/// handle.terminate();
/// assert!(term.is_set());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExternalTermination {
    flag: Arc<AtomicBool>,
}

impl ExternalTermination {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing flag.
    pub fn from_flag(flag: Arc<AtomicBool>) -> Self {
        Self { flag }
    }

    /// Requests termination.
    pub fn terminate(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_set(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

impl Termination for ExternalTermination {
    fn is_terminated(&self, _solver_scope: &SolverScope) -> bool {
        self.is_set()
    }
}
