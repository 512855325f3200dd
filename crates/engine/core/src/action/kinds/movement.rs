//! Travelling to a point or towards another unit.

use crate::action::context::UpdateCtx;
use crate::action::error::UpdateError;
use crate::action::Action;
use crate::coord::{Phys, Phys3};
use crate::env::Path;
use crate::graphics::{DebugDraw, GraphicType};
use crate::state::{Unit, UnitId};

/// Where a move is headed.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveGoal {
    /// A fixed world position.
    Point(Phys3),
    /// Within the move's arrival radius of another (possibly moving) unit.
    Near(UnitId),
}

/// Moves the unit along oracle-provided paths until it arrives.
///
/// Arrival means coming within the goal radius; point moves then settle
/// exactly on the goal, since truncated partial steps can land fractionally
/// short. A moving target is chased by
/// refreshing the path whenever it strays from the path's goal. Path
/// requests that fail, and paths that run out short of the goal, count
/// against the bounded repath budget; exhausting it ends the action without
/// arrival.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    goal: MoveGoal,
    radius: Phys,
    path: Option<Path>,
    allow_repath: bool,
    repath_count: u32,
    arrived: bool,
    end_action: bool,
}

impl MoveAction {
    /// Move to a fixed position, re-pathing when blocked.
    pub fn to_point(target: Phys3) -> Self {
        Self::new(MoveGoal::Point(target), Phys::from_raw(Phys::ONE.0 / 8), true)
    }

    /// Move to within `range` of another unit.
    pub fn near_unit(target: UnitId, range: Phys) -> Self {
        Self::new(MoveGoal::Near(target), range, true)
    }

    /// Move to a fixed position without ever re-pathing.
    pub fn to_point_no_repath(target: Phys3) -> Self {
        Self::new(MoveGoal::Point(target), Phys::from_raw(Phys::ONE.0 / 8), false)
    }

    fn new(goal: MoveGoal, radius: Phys, allow_repath: bool) -> Self {
        Self {
            goal,
            radius,
            path: None,
            allow_repath,
            repath_count: 0,
            arrived: false,
            end_action: false,
        }
    }

    /// The waypoint currently steered towards, for animation and debugging.
    pub fn next_waypoint(&self) -> Option<Phys3> {
        self.path.as_ref()?.current()
    }

    /// Resolves the goal position right now; `None` when a unit goal is gone.
    fn goal_position(&self, ctx: &UpdateCtx) -> Option<Phys3> {
        match self.goal {
            MoveGoal::Point(position) => Some(position),
            MoveGoal::Near(target) => ctx.state.units.get(target)?.position,
        }
    }

    pub fn update(
        &mut self,
        ctx: &mut UpdateCtx,
        elapsed: u32,
    ) -> Result<Option<Action>, UpdateError> {
        if self.arrived || self.end_action {
            return Ok(None);
        }
        let Some(goal) = self.goal_position(ctx) else {
            // Unit goal vanished; nowhere left to go.
            self.end_action = true;
            return Ok(None);
        };
        let actor = ctx.actor()?;
        let Some(position) = actor.position else {
            self.end_action = true;
            return Ok(None);
        };
        if position.ground_distance(goal) <= self.radius {
            self.arrived = true;
            if matches!(self.goal, MoveGoal::Point(_)) {
                ctx.actor_mut()?.position = Some(goal);
            }
            return Ok(None);
        }
        // A zero-length tick must not touch position or path state.
        if elapsed == 0 {
            return Ok(None);
        }
        let Some(speed) = actor.attributes.speed else {
            self.end_action = true;
            return Ok(None);
        };

        if self.needs_fresh_path(position, goal) {
            match ctx.env.path()?.find_path(position, goal, self.radius) {
                Some(path) => self.path = Some(path),
                None => {
                    self.repath_count += 1;
                    tracing::trace!(
                        unit = %ctx.unit,
                        attempts = self.repath_count,
                        "path request failed"
                    );
                    if !self.allow_repath || self.repath_count >= ctx.config().repath_attempts {
                        self.end_action = true;
                    }
                    return Ok(None);
                }
            }
        }

        if let Some(path) = self.path.as_mut() {
            let actor = ctx.actor_mut()?;
            travel_along(actor, path, speed, elapsed);
            let position = actor.position.unwrap_or(goal);
            if position.ground_distance(goal) <= self.radius {
                self.arrived = true;
                if matches!(self.goal, MoveGoal::Point(_)) {
                    actor.position = Some(goal);
                }
            } else if path.is_exhausted() {
                // Path ran out short of the goal: treat like a failed
                // request and ask again next tick (bounded).
                self.path = None;
                self.repath_count += 1;
                if !self.allow_repath || self.repath_count >= ctx.config().repath_attempts {
                    self.end_action = true;
                }
            }
        }
        Ok(None)
    }

    /// True when there is no usable path, or a moving goal drifted away from
    /// the current path's endpoint. Goal drift does not count against the
    /// repath budget; only failures do.
    fn needs_fresh_path(&self, _position: Phys3, goal: Phys3) -> bool {
        match &self.path {
            None => true,
            Some(path) => match path.goal() {
                None => true,
                Some(path_goal) => path_goal.ground_distance(goal) > self.radius,
            },
        }
    }

    pub fn completed(&self) -> bool {
        self.arrived || self.end_action
    }

    /// True when the move gave up without reaching its goal.
    pub fn gave_up(&self) -> bool {
        self.end_action && !self.arrived
    }

    pub fn on_completion(
        &mut self,
        _ctx: &mut UpdateCtx,
    ) -> Result<Option<Action>, UpdateError> {
        Ok(None)
    }

    pub fn allow_interrupt(&self) -> bool {
        true
    }

    pub fn allow_control(&self) -> bool {
        true
    }

    pub fn graphic_type(&self) -> GraphicType {
        GraphicType::Moving
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

/// Advances `unit` along `path` by `speed * elapsed`, consuming waypoints as
/// they are reached and turning the unit towards its direction of travel.
///
/// Shared by [`MoveAction`] and the pursuit phase of target-seeking actions.
pub(crate) fn travel_along(unit: &mut Unit, path: &mut Path, speed: Phys, elapsed: u32) {
    let Some(mut position) = unit.position else {
        return;
    };
    let mut budget = speed * elapsed as i64;
    while budget > Phys::ZERO {
        let Some(waypoint) = path.current() else {
            break;
        };
        let dist = position.ground_distance(waypoint);
        if dist <= budget {
            position = waypoint;
            budget -= dist;
            path.advance();
        } else {
            let (dne, dse) = position.ground_delta(waypoint);
            let scale = budget.div_phys(dist);
            position.ne += dne.mul_phys(scale);
            position.se += dse.mul_phys(scale);
            budget = Phys::ZERO;
        }
        unit.face_towards(waypoint);
    }
    unit.position = Some(position);
}
