//! Host registration: explicit provide/inject, no ambient globals
//!
//! A host application constructs a logger and hands it to its registration
//! API; components look it up through a [`LoggerRegistry`] chain instead of a
//! mutated global. Registries form a parent-linked tree mirroring the host's
//! component tree: a lookup walks upward until it finds a provided logger.

use crate::core::Logger;
use parking_lot::RwLock;
use std::sync::Arc;

/// One scope in the host's component tree that may provide a logger.
#[derive(Default)]
pub struct LoggerRegistry {
    logger: RwLock<Option<Arc<Logger>>>,
    parent: Option<Arc<LoggerRegistry>>,
}

impl LoggerRegistry {
    /// A root registry with nothing provided.
    pub fn new() -> Self {
        Self::default()
    }

    /// A child scope that falls back to `parent` on lookup misses.
    pub fn with_parent(parent: Arc<LoggerRegistry>) -> Self {
        Self {
            logger: RwLock::new(None),
            parent: Some(parent),
        }
    }

    /// Provide a logger at this scope, replacing any previous one.
    pub fn provide(&self, logger: Arc<Logger>) {
        *self.logger.write() = Some(logger);
    }

    /// Look up the nearest provided logger, walking parent scopes.
    pub fn lookup(&self) -> Option<Arc<Logger>> {
        if let Some(logger) = self.logger.read().as_ref() {
            return Some(Arc::clone(logger));
        }
        self.parent.as_ref().and_then(|parent| parent.lookup())
    }
}

/// Register a logger with a host scope.
pub fn install(registry: &LoggerRegistry, logger: Arc<Logger>) {
    registry.provide(logger);
}

/// Retrieve the logger provided at or above this scope.
///
/// Returns `None` with a low-severity diagnostic when nothing was provided;
/// calling code must null-check rather than assume presence.
pub fn use_logger(registry: &LoggerRegistry) -> Option<Arc<Logger>> {
    let logger = registry.lookup();
    if logger.is_none() {
        eprintln!("[LOGGER WARNING] use_logger: no logger provided in this scope or above");
    }
    logger
}
