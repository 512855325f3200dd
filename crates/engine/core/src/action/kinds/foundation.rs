//! Construction: foundations, builders and repair crews.
//!
//! A foundation is a unit whose stack starts with [`FoundationAction`],
//! holding it uncontrollable until other units raise its `build_progress` to
//! completion. Builders run [`BuildAction`] against it; [`RepairAction`]
//! later restores damaged units for a fraction of their cost.

use strum::IntoEnumIterator;

use crate::action::context::UpdateCtx;
use crate::action::error::UpdateError;
use crate::action::kinds::idle::IdleAction;
use crate::action::pursuit::{Pursuit, PursuitStep};
use crate::action::Action;
use crate::coord::Phys;
use crate::graphics::{DebugDraw, GraphicType};
use crate::state::{ResourceBundle, ResourceKind, Unit, UnitId};
use crate::timer::IntervalTimer;

/// How far a builder looks for the next foundation after finishing one,
/// in tiles.
const NEXT_SITE_TILE_DISTANCE: i64 = 9;

/// Holds a building uncontrollable until its construction finishes.
///
/// The progress itself lives on the unit (`build_progress`) and is written
/// by builders; this action only watches for the threshold. Cancelling the
/// foundation (an interrupt before completion) destroys it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FoundationAction {
    /// Play the death sequence when the foundation is cancelled, instead of
    /// vanishing silently.
    add_destruct_effect: bool,
    built: bool,
}

impl FoundationAction {
    pub fn new(add_destruct_effect: bool) -> Self {
        Self {
            add_destruct_effect,
            built: false,
        }
    }

    pub fn update(
        &mut self,
        ctx: &mut UpdateCtx,
        _elapsed: u32,
    ) -> Result<Option<Action>, UpdateError> {
        let actor = ctx.actor_mut()?;
        if actor.build_progress >= 1.0 {
            actor.hp = actor.max_hp;
            self.built = true;
        }
        Ok(None)
    }

    pub fn completed(&self) -> bool {
        self.built
    }

    pub fn on_completion(
        &mut self,
        ctx: &mut UpdateCtx,
    ) -> Result<Option<Action>, UpdateError> {
        if self.built {
            tracing::debug!(unit = %ctx.unit, "construction finished");
            let interval = ctx.config().idle_scan_interval;
            return Ok(Some(Action::Idle(IdleAction::new(interval))));
        }
        // Cancelled before completion: the foundation is destroyed.
        tracing::debug!(unit = %ctx.unit, "foundation cancelled");
        if self.add_destruct_effect {
            ctx.actor_mut()?.hp = 0;
        } else {
            ctx.state.units.remove(ctx.unit);
        }
        Ok(None)
    }

    pub fn allow_interrupt(&self) -> bool {
        true
    }

    pub fn allow_control(&self) -> bool {
        false
    }

    pub fn graphic_type(&self) -> GraphicType {
        GraphicType::Construction
    }
}

/// Walks a builder to a foundation and raises its construction progress.
///
/// When one building finishes, the builder automatically moves on to the
/// nearest remaining foundation within a few tiles.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuildAction {
    pursuit: Pursuit,
    progress: f32,
}

impl BuildAction {
    pub fn new(target: UnitId, radius: Phys) -> Self {
        Self {
            pursuit: Pursuit::new(target, radius),
            progress: 0.0,
        }
    }

    pub fn target(&self) -> UnitId {
        self.pursuit.target()
    }

    /// Mirror of the site's construction progress, on a 0..=1 scale.
    pub fn get_progress(&self) -> f32 {
        self.progress
    }

    pub fn update(
        &mut self,
        ctx: &mut UpdateCtx,
        elapsed: u32,
    ) -> Result<Option<Action>, UpdateError> {
        if self.progress >= 1.0 {
            return Ok(None);
        }
        if self.pursuit.advance(ctx, elapsed)? != PursuitStep::InRange {
            return Ok(None);
        }
        let Some(rate) = ctx.actor()?.attributes.build_rate else {
            self.pursuit.abort();
            return Ok(None);
        };
        let mut site_position = None;
        if let Some(site) = ctx.state.units.get_mut(self.pursuit.target()) {
            site.build_progress = (site.build_progress + rate * elapsed as f32).min(1.0);
            self.progress = site.build_progress;
            site_position = site.position;
        }
        if let Some(position) = site_position {
            ctx.actor_mut()?.face_towards(position);
        }
        Ok(None)
    }

    pub fn completed(&self) -> bool {
        self.progress >= 1.0 || self.pursuit.ended()
    }

    /// After raising a building, look for another foundation close by.
    pub fn on_completion(
        &mut self,
        ctx: &mut UpdateCtx,
    ) -> Result<Option<Action>, UpdateError> {
        if self.progress < 1.0 {
            return Ok(None);
        }
        let actor = ctx.actor()?;
        let Some(position) = actor.position else {
            return Ok(None);
        };
        let owner = actor.owner;
        let finished = self.pursuit.target();
        let next = ctx
            .state
            .nearest_unit(position, |u| {
                u.id != finished
                    && u.owner == owner
                    && u.is_alive()
                    && u.build_progress < 1.0
                    && u.stack.top().is_some_and(Action::is_foundation)
            })
            .filter(|&(_, dist)| dist <= Phys::from_int(NEXT_SITE_TILE_DISTANCE))
            .map(|(site, _)| Action::Build(BuildAction::new(site, self.pursuit.radius())));
        Ok(next)
    }

    pub fn allow_interrupt(&self) -> bool {
        true
    }

    pub fn allow_control(&self) -> bool {
        true
    }

    pub fn graphic_type(&self) -> GraphicType {
        GraphicType::Working
    }

    pub fn draw_debug(&self, unit: &Unit, draw: &mut dyn DebugDraw) {
        self.pursuit.draw_debug(unit, draw);
    }
}

/// Restores a damaged unit one hit point per stroke, paying a per-point
/// resource cost derived from the target's template.
///
/// The stroke interval comes from the repairer's `repair_rate` attribute;
/// units without one cannot repair and the action ends. A stroke the owner
/// cannot afford freezes the timer; repair resumes when the stockpile
/// recovers.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RepairAction {
    pursuit: Pursuit,
    /// Started on first contact, from the repairer's attribute.
    stroke: Option<IntervalTimer>,
    /// Cost per restored hit point, resolved from the target's template on
    /// first contact.
    cost: Option<ResourceBundle>,
    repaired_to_full: bool,
}

impl RepairAction {
    pub fn new(target: UnitId, radius: Phys) -> Self {
        Self {
            pursuit: Pursuit::new(target, radius),
            stroke: None,
            cost: None,
            repaired_to_full: false,
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
        if self.repaired_to_full {
            return Ok(None);
        }
        if self.pursuit.advance(ctx, elapsed)? != PursuitStep::InRange {
            return Ok(None);
        }
        let Some(rate) = ctx.actor()?.attributes.repair_rate else {
            self.pursuit.abort();
            return Ok(None);
        };
        let target = self.pursuit.target();
        let Some((target_type, at_full)) = ctx
            .state
            .units
            .get(target)
            .map(|u| (u.type_id, u.at_full_health()))
        else {
            self.pursuit.abort();
            return Ok(None);
        };
        if at_full {
            self.repaired_to_full = true;
            return Ok(None);
        }
        let cost = match self.cost {
            Some(cost) => cost,
            None => {
                let template = ctx.env.template(target_type)?;
                let cost = per_hp_cost(&template.cost, template.max_hp);
                self.cost = Some(cost);
                cost
            }
        };
        let owner = ctx.actor()?.owner;
        // An unaffordable stroke freezes progress rather than skipping it.
        if !ctx.state.bank(owner).can_afford(&cost) {
            return Ok(None);
        }
        let stroke = self
            .stroke
            .get_or_insert_with(|| IntervalTimer::new(rate.max(1)));
        if stroke.update(elapsed) && ctx.state.bank_mut(owner).pay(&cost) {
            if let Some(unit) = ctx.state.units.get_mut(target) {
                unit.heal(1);
                if unit.at_full_health() {
                    self.repaired_to_full = true;
                }
            }
        }
        Ok(None)
    }

    pub fn completed(&self) -> bool {
        self.repaired_to_full || self.pursuit.ended()
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
        GraphicType::Working
    }

    pub fn draw_debug(&self, unit: &Unit, draw: &mut dyn DebugDraw) {
        self.pursuit.draw_debug(unit, draw);
    }
}

/// Full repair prices in at half the unit's cost, spread over its hit
/// points. Integer division, so cheap units may repair for free.
fn per_hp_cost(total: &ResourceBundle, max_hp: u32) -> ResourceBundle {
    let denom = (2 * max_hp).max(1);
    let mut cost = ResourceBundle::EMPTY;
    for kind in ResourceKind::iter() {
        cost[kind] = total[kind] / denom;
    }
    cost
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repair_cost_is_half_price_over_hit_points() {
        let mut total = ResourceBundle::of(ResourceKind::Wood, 200);
        total[ResourceKind::Stone] = 100;
        let cost = per_hp_cost(&total, 50);
        assert_eq!(cost[ResourceKind::Wood], 2);
        assert_eq!(cost[ResourceKind::Stone], 1);
        assert_eq!(cost[ResourceKind::Gold], 0);
    }

    #[test]
    fn cheap_units_repair_for_free() {
        let cost = per_hp_cost(&ResourceBundle::of(ResourceKind::Food, 10), 40);
        assert!(cost.is_empty());
    }
}
