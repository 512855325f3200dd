//! Shared approach/in-range machinery for target-bound actions.
//!
//! Gather, attack, heal, convert, build, repair and garrison all share the
//! same outer behavior: chase a target unit until within an action radius,
//! then do their own work. [`Pursuit`] holds that outer state explicitly and
//! reports each tick which phase the owning action is in. Target loss is
//! funnelled through one place: a handle that stops resolving (or a target
//! off the map) flips `end_action`, and the owning action completes on its
//! next check.

use crate::action::context::UpdateCtx;
use crate::action::error::UpdateError;
use crate::action::kinds::movement::travel_along;
use crate::coord::{Phys, Phys3};
use crate::env::Path;
use crate::graphics::DebugDraw;
use crate::state::{Unit, UnitId, UnitTypeId};

/// What the owning action should do this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PursuitStep {
    /// Still closing in; the pursuit moved the unit.
    Approaching,
    /// Within the action radius of a live target.
    InRange,
    /// The target is gone or unreachable; the action must end.
    Ended,
}

/// Approach sub-state of a target-bound action.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pursuit {
    target: UnitId,
    /// Type the target had when acquired; lets completion handlers reason
    /// about what they were working on after the unit itself is gone.
    target_type: Option<UnitTypeId>,
    radius: Phys,
    dist_to_target: Phys,
    path: Option<Path>,
    repath_count: u32,
    end_action: bool,
}

impl Pursuit {
    pub fn new(target: UnitId, radius: Phys) -> Self {
        Self {
            target,
            target_type: None,
            radius,
            dist_to_target: Phys::ZERO,
            path: None,
            repath_count: 0,
            end_action: false,
        }
    }

    pub fn target(&self) -> UnitId {
        self.target
    }

    /// Type id captured from the target on first contact.
    pub fn target_type(&self) -> Option<UnitTypeId> {
        self.target_type
    }

    pub fn radius(&self) -> Phys {
        self.radius
    }

    /// Distance recorded on the most recent update.
    pub fn dist_to_target(&self) -> Phys {
        self.dist_to_target
    }

    /// True once the pursuit has given up (target gone or unreachable).
    pub fn ended(&self) -> bool {
        self.end_action
    }

    /// Gives up on the current target; the owning action completes on its
    /// next check.
    pub fn abort(&mut self) {
        self.end_action = true;
    }

    /// Reassigns the target, dropping path state. An immediately invalid
    /// target ends the action on the next update.
    pub fn set_target(&mut self, target: UnitId, radius: Phys) {
        self.target = target;
        self.target_type = None;
        self.radius = radius;
        self.path = None;
        self.repath_count = 0;
    }

    /// Runs one tick of the approach phase.
    pub fn advance(
        &mut self,
        ctx: &mut UpdateCtx,
        elapsed: u32,
    ) -> Result<PursuitStep, UpdateError> {
        if self.end_action {
            return Ok(PursuitStep::Ended);
        }
        let Some(target_position) = self.live_target_position(ctx) else {
            self.end_action = true;
            return Ok(PursuitStep::Ended);
        };
        let actor = ctx.actor()?;
        let Some(position) = actor.position else {
            self.end_action = true;
            return Ok(PursuitStep::Ended);
        };
        self.dist_to_target = position.ground_distance(target_position);
        if self.dist_to_target <= self.radius {
            return Ok(PursuitStep::InRange);
        }

        // Out of range: close the distance along an oracle path.
        let Some(speed) = actor.attributes.speed else {
            // Immobile units cannot approach at all.
            self.end_action = true;
            return Ok(PursuitStep::Ended);
        };
        if elapsed == 0 {
            return Ok(PursuitStep::Approaching);
        }
        if self.needs_fresh_path(target_position) {
            match ctx
                .env
                .path()?
                .find_path(position, target_position, self.radius)
            {
                Some(path) => self.path = Some(path),
                None => {
                    self.repath_count += 1;
                    tracing::trace!(
                        unit = %ctx.unit,
                        target = %self.target,
                        attempts = self.repath_count,
                        "pursuit path request failed"
                    );
                    if self.repath_count >= ctx.config().repath_attempts {
                        self.end_action = true;
                        return Ok(PursuitStep::Ended);
                    }
                    return Ok(PursuitStep::Approaching);
                }
            }
        }
        if let Some(path) = self.path.as_mut() {
            let actor = ctx.actor_mut()?;
            travel_along(actor, path, speed, elapsed);
            if let Some(position) = actor.position {
                self.dist_to_target = position.ground_distance(target_position);
            }
            if self.dist_to_target <= self.radius {
                return Ok(PursuitStep::InRange);
            }
            if path.is_exhausted() {
                self.path = None;
                self.repath_count += 1;
                if self.repath_count >= ctx.config().repath_attempts {
                    self.end_action = true;
                    return Ok(PursuitStep::Ended);
                }
            }
        }
        Ok(PursuitStep::Approaching)
    }

    /// The target's position if it still resolves, is alive and on the map.
    /// Also captures the target's type id on first sight.
    fn live_target_position(&mut self, ctx: &UpdateCtx) -> Option<Phys3> {
        let target = ctx.state.units.get(self.target)?;
        if !target.is_alive() {
            return None;
        }
        self.target_type.get_or_insert(target.type_id);
        target.position
    }

    /// Goal drift (a moving target) forces a fresh path but does not count
    /// against the repath budget; only failed or dead-end paths do.
    fn needs_fresh_path(&self, target_position: Phys3) -> bool {
        match &self.path {
            None => true,
            Some(path) => match path.goal() {
                None => true,
                Some(goal) => goal.ground_distance(target_position) > self.radius,
            },
        }
    }

    pub fn draw_debug(&self, unit: &Unit, draw: &mut dyn DebugDraw) {
        let Some(mut from) = unit.position else {
            return;
        };
        if let Some(path) = &self.path {
            for &waypoint in path.remaining() {
                draw.segment(from, waypoint);
                from = waypoint;
            }
        }
        draw.circle(from, self.radius);
    }
}
