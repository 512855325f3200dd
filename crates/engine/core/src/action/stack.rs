//! Per-unit action stack and secondary action list.
//!
//! The top of the stack is the unit's current behavior; everything below it
//! resumes when the top completes. Secondary actions run alongside the stack
//! (auras, passive regeneration) but only while the top action leaves the
//! unit controllable.
//!
//! # Invariants
//!
//! - only the top action receives primary updates
//! - a completed top action is popped the same tick it latches completion,
//!   and its completion follow-up (if any) is pushed before the next
//!   completion check
//! - pushes through [`push`](ActionStack::push) are rejected while the top
//!   action denies control; [`force_push`](ActionStack::force_push) bypasses
//!   the policy but never the capacity

use arrayvec::ArrayVec;

use crate::action::context::UpdateCtx;
use crate::action::error::{PushError, UpdateError};
use crate::action::Action;
use crate::config::EngineConfig;
use crate::graphics::GraphicType;

/// A unit's behavior state: the action stack, the secondary list, and the
/// animation cursor derived from the current top action.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionStack {
    actions: ArrayVec<Action, { EngineConfig::MAX_STACK_DEPTH }>,
    secondary: ArrayVec<Action, { EngineConfig::MAX_SECONDARY_ACTIONS }>,
    graphic: GraphicType,
    frame: f32,
}

impl Default for ActionStack {
    fn default() -> Self {
        Self {
            actions: ArrayVec::new(),
            secondary: ArrayVec::new(),
            graphic: GraphicType::Standing,
            frame: 0.0,
        }
    }
}

impl ActionStack {
    /// Pushes a new current action, subject to the top action's control
    /// policy.
    pub fn push(&mut self, action: Action) -> Result<(), PushError> {
        if let Some(top) = self.actions.last()
            && !top.allow_control()
        {
            return Err(PushError::Exclusive(top.name()));
        }
        self.force_push(action)
    }

    /// Pushes regardless of the control policy. Used by the engine for the
    /// death sequence and for completion follow-ups.
    pub fn force_push(&mut self, action: Action) -> Result<(), PushError> {
        let name = action.name();
        self.actions
            .try_push(action)
            .map_err(|_| PushError::StackFull)?;
        tracing::trace!(action = name, depth = self.actions.len(), "action pushed");
        Ok(())
    }

    /// Adds an action to the secondary list.
    pub fn add_secondary(&mut self, action: Action) -> Result<(), PushError> {
        self.secondary
            .try_push(action)
            .map_err(|_| PushError::StackFull)
    }

    pub fn top(&self) -> Option<&Action> {
        self.actions.last()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn secondaries(&self) -> &[Action] {
        &self.secondary
    }

    /// True while the unit is running its death sequence (or what is left
    /// of it).
    pub fn is_dying(&self) -> bool {
        self.top()
            .is_some_and(|a| matches!(a, Action::Dead(_) | Action::Decay(_)))
    }

    /// Graphic type selected by the current top action.
    pub fn current_graphic(&self) -> GraphicType {
        self.graphic
    }

    /// Animation cursor within the current graphic set.
    pub fn current_frame(&self) -> f32 {
        self.frame
    }

    /// Pops interruptible actions off the top, running their completion
    /// handlers. Returns how many actions were cancelled. A completion
    /// follow-up (a mandated continuation) is pushed and stops the cascade.
    pub fn interrupt(&mut self, ctx: &mut UpdateCtx) -> Result<usize, UpdateError> {
        let mut cancelled = 0;
        while self.actions.last().is_some_and(Action::allow_interrupt) {
            let Some(mut action) = self.actions.pop() else {
                break;
            };
            cancelled += 1;
            tracing::trace!(action = action.name(), "action interrupted");
            if let Some(next) = action.on_completion(ctx)? {
                if let Err(err) = self.force_push(next) {
                    tracing::debug!(%err, "interrupt follow-up rejected");
                }
                break;
            }
        }
        Ok(cancelled)
    }

    /// Drops every action without running completion handlers. Used when a
    /// unit is killed: its pending work simply stops.
    pub fn clear_without_completion(&mut self) {
        self.actions.clear();
        self.secondary.clear();
    }

    /// Runs one tick: update the top action, apply its follow-up push, pop
    /// every action that latched completion, then update secondaries and
    /// advance the animation cursor.
    pub fn update(&mut self, ctx: &mut UpdateCtx, elapsed: u32) -> Result<(), UpdateError> {
        if let Some(top) = self.actions.last_mut() {
            if let Some(next) = top.update(ctx, elapsed)? {
                // A follow-up from a live action (idle auto-task) goes
                // through the normal policy.
                if let Err(err) = self.push(next) {
                    tracing::debug!(%err, "follow-up push rejected");
                }
            }
        }

        while self.actions.last().is_some_and(Action::completed) {
            let Some(mut done) = self.actions.pop() else {
                break;
            };
            tracing::debug!(unit = %ctx.unit, action = done.name(), "action completed");
            if let Some(next) = done.on_completion(ctx)? {
                // Capacity is available: we just popped. The new action is
                // not updated again until the next tick.
                if let Err(err) = self.force_push(next) {
                    tracing::debug!(%err, "completion follow-up rejected");
                }
            }
        }

        if self.actions.last().is_none_or(Action::allow_control) {
            let mut index = 0;
            while index < self.secondary.len() {
                // Secondaries cannot push onto the stack; follow-ups from
                // them are dropped.
                self.secondary[index].update(ctx, elapsed)?;
                if self.secondary[index].completed() {
                    let mut done = self.secondary.remove(index);
                    done.on_completion(ctx)?;
                } else {
                    index += 1;
                }
            }
        }

        self.advance_animation(ctx, elapsed);
        Ok(())
    }

    /// Tracks the top action's graphic, resetting the cursor on changes.
    /// Best-effort: without a template oracle the cursor simply stays put.
    fn advance_animation(&mut self, ctx: &UpdateCtx, elapsed: u32) {
        let graphic = self
            .actions
            .last()
            .map_or(GraphicType::Standing, Action::graphic_type);
        if graphic != self.graphic {
            self.graphic = graphic;
            self.frame = 0.0;
        }
        if let Ok(template) = ctx.actor_template() {
            let set = template.graphic(graphic);
            if set.frame_count > 0 {
                self.frame =
                    (self.frame + set.frame_rate * elapsed as f32) % set.frame_count as f32;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::kinds::{DecayAction, FoundationAction, IdleAction, MoveAction};
    use crate::coord::Phys3;

    fn idle() -> Action {
        Action::Idle(IdleAction::new(25))
    }

    fn order() -> Action {
        Action::Move(MoveAction::to_point(Phys3::on_ground(1, 1)))
    }

    #[test]
    fn push_is_rejected_while_the_top_denies_control() {
        let mut stack = ActionStack::default();
        stack.push(idle()).unwrap();
        stack
            .force_push(Action::Foundation(FoundationAction::new(false)))
            .unwrap();

        assert_eq!(stack.push(order()), Err(PushError::Exclusive("foundation")));
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn force_push_bypasses_policy_but_not_capacity() {
        let mut stack = ActionStack::default();
        stack.force_push(Action::Decay(DecayAction::new())).unwrap();
        stack.force_push(order()).unwrap();

        for _ in stack.len()..EngineConfig::MAX_STACK_DEPTH {
            stack.force_push(order()).unwrap();
        }
        assert_eq!(stack.force_push(order()), Err(PushError::StackFull));
    }

    #[test]
    fn dying_covers_the_death_sequence_only() {
        let mut stack = ActionStack::default();
        stack.push(idle()).unwrap();
        assert!(!stack.is_dying());
        stack.force_push(Action::Decay(DecayAction::new())).unwrap();
        assert!(stack.is_dying());
    }
}
