//! Default-handler registry.
//!
//! The registry maps role names to the step used when a declaration enables
//! the role without supplying a callable. It is an explicit object owned by
//! the caller and handed to the builder; there is no process-wide table.
//! The `liftoff` crate ships a stock registry covering the standard
//! bootstrap roles.

use crate::handler::StepFn;
use std::collections::HashMap;

/// Table of default steps, keyed by role name.
#[derive(Default, Clone)]
pub struct HandlerRegistry {
    defaults: HashMap<String, StepFn>,
}

impl HandlerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the default step for a role, replacing any previous one.
    pub fn register(&mut self, role: impl Into<String>, step: StepFn) -> &mut Self {
        self.defaults.insert(role.into(), step);
        self
    }

    /// Returns the default step for a role, if one is registered.
    pub fn default_for(&self, role: &str) -> Option<&StepFn> {
        self.defaults.get(role)
    }

    /// Returns `true` if the role has a default.
    pub fn contains(&self, role: &str) -> bool {
        self.defaults.contains_key(role)
    }

    /// Returns the number of registered defaults.
    pub fn len(&self) -> usize {
        self.defaults.len()
    }

    /// Returns `true` if no defaults are registered.
    pub fn is_empty(&self) -> bool {
        self.defaults.is_empty()
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("roles", &self.defaults.keys().collect::<Vec<_>>())
            .finish()
    }
}
