//! Named logger registry
//!
//! Maps logger names to lazily-created logger instances. The name is the
//! identity of the destination: once a name is bound, later requests reuse
//! the existing instance and any destination arguments they carry are
//! ignored.
//!
//! The registry is an explicit object so tests can run against isolated
//! instances; the free convenience functions go through the process-wide
//! [`default_registry`].

use crate::core::{Logger, Result};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

pub struct Registry {
    loggers: Mutex<HashMap<String, Arc<Logger>>>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            loggers: Mutex::new(HashMap::new()),
        }
    }

    /// Look up a logger by name.
    pub fn get(&self, name: &str) -> Option<Arc<Logger>> {
        self.loggers.lock().get(name).cloned()
    }

    /// Insert a logger under its own name, replacing any previous binding.
    pub fn register(&self, logger: Arc<Logger>) {
        self.loggers
            .lock()
            .insert(logger.name().to_string(), logger);
    }

    /// Return the logger bound to `name`, creating it with `create` on first
    /// use.
    ///
    /// The map lock is held across creation, so concurrent first requests
    /// for the same name resolve to a single winner; losers reuse the
    /// winner's instance. If `create` fails no entry is left behind and a
    /// later call may retry.
    pub fn get_or_create<F>(&self, name: &str, create: F) -> Result<Arc<Logger>>
    where
        F: FnOnce() -> Result<Logger>,
    {
        let mut loggers = self.loggers.lock();
        if let Some(existing) = loggers.get(name) {
            return Ok(Arc::clone(existing));
        }
        let logger = Arc::new(create()?);
        loggers.insert(name.to_string(), Arc::clone(&logger));
        Ok(logger)
    }

    pub fn len(&self) -> usize {
        self.loggers.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.lock().is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide registry used by the free convenience functions.
/// Entries live until process exit.
pub fn default_registry() -> &'static Registry {
    static DEFAULT: OnceLock<Registry> = OnceLock::new();
    DEFAULT.get_or_init(Registry::new)
}
