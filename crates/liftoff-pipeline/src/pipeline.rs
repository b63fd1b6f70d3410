//! The ordered pipeline of named handler slots.
//!
//! A [`Pipeline`] is built incrementally by the application builder, one
//! declaration at a time, and is immutable once the Application exists.
//! Declaration order is caller-visible: a relative insert can only anchor on
//! a step that was registered earlier, and ties between inserts targeting
//! the same anchor resolve in processing order (stable list insertion at
//! the computed index, never a sort).
//!
//! Invariants maintained by every operation:
//!
//! - every name in the execution order has a slot, and vice versa;
//! - no duplicate names.

use crate::error::SetupError;
use crate::handler::StepFn;
use crate::registry::HandlerRegistry;
use std::collections::HashMap;

/// Which side of the anchor a relative insert lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Immediately before the anchor.
    Before,
    /// Immediately after the anchor.
    After,
}

/// Splits a declaration name into its relative-insert parts, if it carries
/// the `before_`/`after_` prefix.
pub(crate) fn parse_relative(name: &str) -> Option<(Position, &str)> {
    if let Some(target) = name.strip_prefix("before_") {
        Some((Position::Before, target))
    } else {
        name.strip_prefix("after_")
            .map(|target| (Position::After, target))
    }
}

/// Ordered collection of named steps.
#[derive(Default, Clone)]
pub struct Pipeline {
    slots: HashMap<String, StepFn>,
    order: Vec<String>,
}

impl Pipeline {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables a role: looks up the registry default and appends it at the
    /// end of the current order.
    ///
    /// # Errors
    ///
    /// `SetupError::NoDefault` if the registry has no default for the role.
    pub fn enable(&mut self, name: &str, registry: &HandlerRegistry) -> Result<(), SetupError> {
        let step = registry
            .default_for(name)
            .cloned()
            .ok_or_else(|| SetupError::NoDefault(name.to_string()))?;
        self.register(name, step);
        Ok(())
    }

    /// Registers a step under a name at the end of the current order. When
    /// the name already holds a step (an enabled default, typically), the
    /// slot is replaced in place and keeps its position.
    pub fn register(&mut self, name: &str, step: StepFn) {
        if self.slots.insert(name.to_string(), step).is_none() {
            self.order.push(name.to_string());
        }
    }

    /// Inserts a step relative to an already-registered anchor. The step is
    /// stored under its full prefixed name; the anchor keeps its own slot.
    ///
    /// # Errors
    ///
    /// `SetupError::UnknownAnchor` if the anchor is not in the order yet;
    /// `SetupError::DuplicateHandler` if the full name is already taken.
    pub fn insert_relative(
        &mut self,
        name: &str,
        target: &str,
        position: Position,
        step: StepFn,
    ) -> Result<(), SetupError> {
        if self.slots.contains_key(name) {
            return Err(SetupError::DuplicateHandler(name.to_string()));
        }
        let anchor = self
            .order
            .iter()
            .position(|n| n == target)
            .ok_or_else(|| SetupError::UnknownAnchor {
                name: name.to_string(),
                target: target.to_string(),
            })?;

        let index = match position {
            Position::Before => anchor,
            Position::After => anchor + 1,
        };
        self.order.insert(index, name.to_string());
        self.slots.insert(name.to_string(), step);
        Ok(())
    }

    /// Removes a name from the pipeline, if present. Used when a disable
    /// declaration follows an enable for the same role; removing an absent
    /// name is a no-op.
    pub fn remove(&mut self, name: &str) {
        if self.slots.remove(name).is_some() {
            self.order.retain(|n| n != name);
        }
    }

    /// Returns the step registered under a name.
    pub fn step(&self, name: &str) -> Option<&StepFn> {
        self.slots.get(name)
    }

    /// Returns the execution order.
    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// Returns `true` if a name is in the execution order.
    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// Returns the number of registered steps.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if no steps are registered.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline").field("order", &self.order).finish()
    }
}
