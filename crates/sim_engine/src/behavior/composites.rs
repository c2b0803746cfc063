//! Sequence and fallback composite nodes
//!
//! Composites hold no state between ticks; their status is derived fresh
//! each frame from their children, left to right, with short-circuiting.

use super::{BehaviorError, BehaviorNode, Status, TickContext};

/// Ticks children in order; the first non-Success status short-circuits.
///
/// Returns Success only when every child succeeded. Children after the
/// short-circuit point are not ticked this frame.
pub struct Sequence {
    children: Vec<Box<dyn BehaviorNode>>,
}

impl Sequence {
    /// Build a sequence from an ordered child list.
    ///
    /// # Errors
    /// `EmptyComposite` for an empty list; a sequence with no children has
    /// no defined status, so the shape is rejected at build time.
    pub fn new(children: Vec<Box<dyn BehaviorNode>>) -> Result<Self, BehaviorError> {
        if children.is_empty() {
            return Err(BehaviorError::EmptyComposite);
        }
        Ok(Self { children })
    }
}

impl BehaviorNode for Sequence {
    fn tick(&mut self, ctx: &mut TickContext<'_>) -> Result<Status, BehaviorError> {
        for child in &mut self.children {
            let status = child.tick(ctx)?;
            if status != Status::Success {
                return Ok(status);
            }
        }
        Ok(Status::Success)
    }
}

/// Ticks children in order; the first non-Failure status short-circuits.
///
/// Returns Failure only when every child failed.
pub struct Fallback {
    children: Vec<Box<dyn BehaviorNode>>,
}

impl Fallback {
    /// Build a fallback from an ordered child list.
    ///
    /// # Errors
    /// `EmptyComposite` for an empty list.
    pub fn new(children: Vec<Box<dyn BehaviorNode>>) -> Result<Self, BehaviorError> {
        if children.is_empty() {
            return Err(BehaviorError::EmptyComposite);
        }
        Ok(Self { children })
    }
}

impl BehaviorNode for Fallback {
    fn tick(&mut self, ctx: &mut TickContext<'_>) -> Result<Status, BehaviorError> {
        for child in &mut self.children {
            let status = child.tick(ctx)?;
            if status != Status::Failure {
                return Ok(status);
            }
        }
        Ok(Status::Failure)
    }
}
