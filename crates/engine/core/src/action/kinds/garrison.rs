//! Entering and leaving garrisonable buildings.

use crate::action::context::UpdateCtx;
use crate::action::error::UpdateError;
use crate::action::kinds::movement::MoveAction;
use crate::action::pursuit::{Pursuit, PursuitStep};
use crate::action::Action;
use crate::coord::{Phys, Phys3};
use crate::graphics::{DebugDraw, GraphicType};
use crate::state::{Unit, UnitId};

/// Walks to a garrisonable unit and boards it.
///
/// Boarding takes the actor off the map (`position` becomes `None`); its
/// handle is recorded in the host's garrison bay. A full bay ends the action
/// at the door.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GarrisonAction {
    pursuit: Pursuit,
    garrisoned: bool,
}

impl GarrisonAction {
    pub fn new(target: UnitId, radius: Phys) -> Self {
        Self {
            pursuit: Pursuit::new(target, radius),
            garrisoned: false,
        }
    }

    pub fn target(&self) -> UnitId {
        self.pursuit.target()
    }

    pub fn update(
        &mut self,
        ctx: &mut UpdateCtx,
        elapsed: u32,
    ) -> Result<Option<Action>, UpdateError> {
        if self.garrisoned {
            return Ok(None);
        }
        if self.pursuit.advance(ctx, elapsed)? != PursuitStep::InRange {
            return Ok(None);
        }
        let me = ctx.unit;
        let boarded = match ctx.state.units.get_mut(self.pursuit.target()) {
            Some(host) if host.has_garrison_space() => host.garrisoned.try_push(me).is_ok(),
            _ => false,
        };
        if boarded {
            ctx.actor_mut()?.position = None;
            self.garrisoned = true;
            tracing::debug!(unit = %me, host = %self.pursuit.target(), "unit garrisoned");
        } else {
            self.pursuit.abort();
        }
        Ok(None)
    }

    pub fn completed(&self) -> bool {
        self.garrisoned || self.pursuit.ended()
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
        GraphicType::Standing
    }

    pub fn draw_debug(&self, unit: &Unit, draw: &mut dyn DebugDraw) {
        self.pursuit.draw_debug(unit, draw);
    }
}

/// Ejects every garrisoned unit and sends it to a rally point.
///
/// Occupants reappear at the host's position and receive a move order
/// towards `position` on their own stacks.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UngarrisonAction {
    position: Phys3,
    complete: bool,
}

impl UngarrisonAction {
    pub fn new(position: Phys3) -> Self {
        Self {
            position,
            complete: false,
        }
    }

    pub fn update(
        &mut self,
        ctx: &mut UpdateCtx,
        _elapsed: u32,
    ) -> Result<Option<Action>, UpdateError> {
        if self.complete {
            return Ok(None);
        }
        let actor = ctx.actor_mut()?;
        let Some(door) = actor.position else {
            // A host off the map cannot release anyone.
            self.complete = true;
            return Ok(None);
        };
        let occupants: Vec<UnitId> = actor.garrisoned.drain(..).collect();
        for id in occupants {
            let Some(unit) = ctx.state.units.get_mut(id) else {
                continue;
            };
            unit.position = Some(door);
            if let Err(err) = unit.stack.push(Action::Move(MoveAction::to_point(self.position))) {
                tracing::debug!(unit = %id, %err, "ejected unit refused move order");
            }
        }
        self.complete = true;
        Ok(None)
    }

    pub fn completed(&self) -> bool {
        self.complete
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
        GraphicType::Standing
    }
}
