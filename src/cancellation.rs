//! # Cooperative cancellation
//!
//! Every top-level method on the parser and analyzer accepts a
//! [`CancellationToken`]. Implementations check it at every backend or
//! embedder call and between per-claim iterations of a set operation
//! (§5). The token is cheap to clone and safe to share across the rayon
//! fan-outs used for pairwise embedding and parallel claim-set parsing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{CoreError, Result};

#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Returns `Err(CoreError::Cancelled)` if cancellation has been requested.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(CoreError::Cancelled)
        } else {
            Ok(())
        }
    }
}
