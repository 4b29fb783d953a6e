use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::{FormworkError, Result};

/// Cooperative cancellation signal shared between the orchestration layer and the engine.
///
/// The engine only polls it at stage boundaries: before the meshes are forked, after they are
/// joined and before every placement stage.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Returns [`FormworkError::Cancelled`] if the token has been triggered.
    pub fn check(&self) -> Result<()> {
        match self.is_cancelled() {
            true => Err(FormworkError::Cancelled),
            false => Ok(()),
        }
    }
}
