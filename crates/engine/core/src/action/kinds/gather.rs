//! The harvest loop: node, payload, dropsite, and back.

use crate::action::context::UpdateCtx;
use crate::action::error::UpdateError;
use crate::action::pursuit::{Pursuit, PursuitStep};
use crate::action::Action;
use crate::coord::Phys;
use crate::graphics::{DebugDraw, GraphicType};
use crate::state::{Carrying, ResourceBundle, ResourceKind, Unit, UnitId};
use crate::timer::IntervalTimer;

/// Harvests a resource node stroke by stroke, walking the payload to the
/// nearest accepting dropsite whenever the gatherer fills up or the node
/// runs dry, then returning for more.
///
/// The action latches onto the resource kind it first touches; a retargeted
/// node of a different kind ends it. It completes when the node is exhausted
/// with nothing left to deliver, or when no dropsite exists.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GatherAction {
    pursuit: Pursuit,
    stroke: IntervalTimer,
    /// The node this gather loop keeps returning to.
    node: UnitId,
    node_radius: Phys,
    resource_class: Option<ResourceKind>,
    delivering: bool,
    loaded: bool,
    complete: bool,
}

impl GatherAction {
    /// The first stroke lands as soon as the gatherer reaches the node.
    pub fn new(target: UnitId, radius: Phys, rate: u32) -> Self {
        let mut stroke = IntervalTimer::new(rate.max(1));
        stroke.skip_to_trigger();
        Self {
            pursuit: Pursuit::new(target, radius),
            stroke,
            node: target,
            node_radius: radius,
            resource_class: None,
            delivering: false,
            loaded: false,
            complete: false,
        }
    }

    pub fn target(&self) -> UnitId {
        self.pursuit.target()
    }

    /// Resource kind this gatherer is locked onto, once known.
    pub fn resource_class(&self) -> Option<ResourceKind> {
        self.resource_class
    }

    pub fn update(
        &mut self,
        ctx: &mut UpdateCtx,
        elapsed: u32,
    ) -> Result<Option<Action>, UpdateError> {
        if self.complete {
            return Ok(None);
        }
        if self.pursuit.advance(ctx, elapsed)? != PursuitStep::InRange {
            return Ok(None);
        }
        if self.delivering {
            self.deliver(ctx)?;
        } else {
            self.harvest(ctx, elapsed)?;
        }
        Ok(None)
    }

    fn harvest(&mut self, ctx: &mut UpdateCtx, elapsed: u32) -> Result<(), UpdateError> {
        let Some(gather) = ctx.actor()?.attributes.gather else {
            self.complete = true;
            return Ok(());
        };
        let target = self.pursuit.target();
        let Some((deposit, node_position)) = ctx
            .state
            .units
            .get(target)
            .and_then(|u| Some((u.resource?, u.position)))
        else {
            // Not a resource node at all.
            self.complete = true;
            return Ok(());
        };
        let kind = *self.resource_class.get_or_insert(deposit.kind);
        if kind != deposit.kind {
            self.complete = true;
            return Ok(());
        }
        if let Some(position) = node_position {
            ctx.actor_mut()?.face_towards(position);
        }

        let mut available = deposit.amount;
        let mut harvested = false;
        if self.stroke.update(elapsed) && available > 0 {
            let actor = ctx.actor_mut()?;
            let payload = actor.carrying.get_or_insert(Carrying { kind, amount: 0 });
            if payload.kind != kind {
                // Switching resource drops the old payload.
                *payload = Carrying { kind, amount: 0 };
            }
            if payload.amount < gather.capacity {
                payload.amount += 1;
                available -= 1;
                harvested = true;
            }
        }
        if harvested {
            if let Some(node) = ctx.state.units.get_mut(target)
                && let Some(deposit) = node.resource.as_mut()
            {
                deposit.amount = available;
            }
            if available == 0 {
                tracing::debug!(unit = %ctx.unit, node = %target, "resource node exhausted");
                ctx.state.units.remove(target);
            }
        }

        let payload = ctx.actor()?.carrying;
        self.loaded = payload.is_some_and(|p| p.amount > 0);
        let full = payload.is_some_and(|p| p.kind == kind && p.amount >= gather.capacity);
        if full || available == 0 {
            if self.loaded {
                self.seek_dropsite(ctx, kind)?;
            } else {
                self.complete = true;
            }
        }
        Ok(())
    }

    fn seek_dropsite(&mut self, ctx: &UpdateCtx, kind: ResourceKind) -> Result<(), UpdateError> {
        let actor = ctx.actor()?;
        let Some(position) = actor.position else {
            self.complete = true;
            return Ok(());
        };
        let owner = actor.owner;
        let found = ctx.state.nearest_unit(position, |u| {
            u.owner == owner
                && u.is_alive()
                && u.attributes.accepts_dropoff(kind)
                && !u.stack.top().is_some_and(Action::is_foundation)
        });
        match found {
            Some((site, _)) => {
                self.delivering = true;
                self.pursuit.set_target(site, ctx.config().adjacent_range);
            }
            None => {
                tracing::debug!(unit = %ctx.unit, "no dropsite accepts {kind}");
                self.complete = true;
            }
        }
        Ok(())
    }

    fn deliver(&mut self, ctx: &mut UpdateCtx) -> Result<(), UpdateError> {
        let actor = ctx.actor_mut()?;
        let Some(payload) = actor.carrying.take() else {
            self.complete = true;
            return Ok(());
        };
        let owner = actor.owner;
        ctx.state
            .bank_mut(owner)
            .credit(&ResourceBundle::of(payload.kind, payload.amount));
        tracing::debug!(
            unit = %ctx.unit,
            kind = %payload.kind,
            amount = payload.amount,
            "payload delivered"
        );
        self.loaded = false;
        // Head back if the node still holds anything.
        let node_remains = ctx
            .state
            .units
            .get(self.node)
            .is_some_and(|u| u.resource.is_some_and(|r| r.amount > 0));
        if node_remains {
            self.delivering = false;
            self.pursuit.set_target(self.node, self.node_radius);
        } else {
            self.complete = true;
        }
        Ok(())
    }

    pub fn completed(&self) -> bool {
        self.complete || self.pursuit.ended()
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
        if self.loaded || self.delivering {
            GraphicType::Carrying
        } else {
            GraphicType::Working
        }
    }

    pub fn draw_debug(&self, unit: &Unit, draw: &mut dyn DebugDraw) {
        self.pursuit.draw_debug(unit, draw);
    }
}
