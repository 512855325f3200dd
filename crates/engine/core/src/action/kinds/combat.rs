//! Attack, heal and convert: the target-bound strokes.

use crate::action::context::UpdateCtx;
use crate::action::error::UpdateError;
use crate::action::kinds::projectile::ProjectileAction;
use crate::action::pursuit::{Pursuit, PursuitStep};
use crate::action::Action;
use crate::config::EngineConfig;
use crate::coord::Phys;
use crate::graphics::{DebugDraw, GraphicType};
use crate::state::{SimState, Unit, UnitId, UnitTypeId};
use crate::timer::IntervalTimer;

/// Engagement radius of `unit`, falling back to touching distance for
/// melee attackers.
pub fn attack_range(unit: &Unit, config: &EngineConfig) -> Phys {
    unit.attributes
        .attack
        .and_then(|a| a.range)
        .unwrap_or(config.adjacent_range)
}

pub fn heal_range(unit: &Unit, config: &EngineConfig) -> Phys {
    unit.attributes
        .heal
        .and_then(|a| a.range)
        .unwrap_or(config.adjacent_range)
}

pub fn convert_range(unit: &Unit, config: &EngineConfig) -> Phys {
    unit.attributes
        .convert
        .as_ref()
        .and_then(|a| a.range)
        .unwrap_or(config.adjacent_range)
}

/// Removes hit points from `target`. Returns true when this blow killed it.
///
/// The victim's action stack is not touched here; the engine notices the
/// death on its next pass and replaces the stack with the death sequence.
pub fn apply_damage(state: &mut SimState, target: UnitId, damage: u32) -> bool {
    let Some(unit) = state.units.get_mut(target) else {
        return false;
    };
    if !unit.is_alive() {
        return false;
    }
    unit.hp = unit.hp.saturating_sub(damage);
    !unit.is_alive()
}

/// Chases a target and strikes it on a cooldown until it dies.
///
/// Melee attackers apply damage directly; ranged attackers spawn a
/// projectile unit per stroke and let its flight deliver the damage.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackAction {
    pursuit: Pursuit,
    strike: IntervalTimer,
    target_killed: bool,
}

impl AttackAction {
    /// The first stroke lands as soon as the attacker closes into range.
    pub fn new(target: UnitId, range: Phys, rate: u32) -> Self {
        let mut strike = IntervalTimer::new(rate.max(1));
        strike.skip_to_trigger();
        Self {
            pursuit: Pursuit::new(target, range),
            strike,
            target_killed: false,
        }
    }

    pub fn target(&self) -> UnitId {
        self.pursuit.target()
    }

    pub fn target_type(&self) -> Option<UnitTypeId> {
        self.pursuit.target_type()
    }

    pub fn update(
        &mut self,
        ctx: &mut UpdateCtx,
        elapsed: u32,
    ) -> Result<Option<Action>, UpdateError> {
        if self.target_killed {
            return Ok(None);
        }
        if self.pursuit.advance(ctx, elapsed)? != PursuitStep::InRange {
            return Ok(None);
        }
        let Some(attack) = ctx.actor()?.attributes.attack else {
            self.pursuit.abort();
            return Ok(None);
        };
        let target = self.pursuit.target();
        if let Some(position) = ctx.state.units.get(target).and_then(|u| u.position) {
            ctx.actor_mut()?.face_towards(position);
        }
        if self.strike.update(elapsed) {
            match attack.projectile {
                Some(projectile_type) => {
                    launch_projectile(ctx, attack.damage, projectile_type, target)?;
                }
                None => {
                    if apply_damage(ctx.state, target, attack.damage) {
                        tracing::debug!(unit = %ctx.unit, %target, "target killed");
                        self.target_killed = true;
                    }
                }
            }
        }
        Ok(None)
    }

    pub fn completed(&self) -> bool {
        self.target_killed || self.pursuit.ended()
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
        GraphicType::Attacking
    }

    pub fn draw_debug(&self, unit: &Unit, draw: &mut dyn DebugDraw) {
        self.pursuit.draw_debug(unit, draw);
    }
}

/// Spawns a projectile unit at the attacker's position, flying towards the
/// target's position at launch time.
fn launch_projectile(
    ctx: &mut UpdateCtx,
    damage: u32,
    projectile_type: UnitTypeId,
    target: UnitId,
) -> Result<(), UpdateError> {
    let template = ctx.env.template(projectile_type)?;
    let actor = ctx.actor()?;
    let Some(origin) = actor.position else {
        return Ok(());
    };
    let owner = actor.owner;
    let Some(impact) = ctx.state.units.get(target).and_then(|u| u.position) else {
        return Ok(());
    };
    let speed = template.attributes.speed.unwrap_or(Phys::ONE);
    let arrow = ctx.state.spawn_from_template(template, owner, origin);
    let flight = ProjectileAction::launch(target, origin, impact, damage, speed);
    if let Some(unit) = ctx.state.units.get_mut(arrow)
        && let Err(err) = unit.stack.force_push(Action::Projectile(flight))
    {
        tracing::warn!(%err, "could not arm freshly spawned projectile");
    }
    Ok(())
}

/// Chases a wounded ally and restores hit points on a cooldown.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealAction {
    pursuit: Pursuit,
    stroke: IntervalTimer,
    healed_to_full: bool,
}

impl HealAction {
    pub fn new(target: UnitId, range: Phys, rate: u32) -> Self {
        let mut stroke = IntervalTimer::new(rate.max(1));
        stroke.skip_to_trigger();
        Self {
            pursuit: Pursuit::new(target, range),
            stroke,
            healed_to_full: false,
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
        if self.healed_to_full {
            return Ok(None);
        }
        if self.pursuit.advance(ctx, elapsed)? != PursuitStep::InRange {
            return Ok(None);
        }
        let Some(heal) = ctx.actor()?.attributes.heal else {
            self.pursuit.abort();
            return Ok(None);
        };
        let fired = self.stroke.update(elapsed);
        if let Some(target) = ctx.state.units.get_mut(self.pursuit.target()) {
            if target.at_full_health() {
                self.healed_to_full = true;
            } else if fired {
                target.heal(heal.amount);
                if target.at_full_health() {
                    self.healed_to_full = true;
                }
            }
        }
        Ok(None)
    }

    pub fn completed(&self) -> bool {
        self.healed_to_full || self.pursuit.ended()
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
        GraphicType::Healing
    }

    pub fn draw_debug(&self, unit: &Unit, draw: &mut dyn DebugDraw) {
        self.pursuit.draw_debug(unit, draw);
    }
}

/// Accrues conversion progress against an enemy unit; at full progress the
/// target changes owner.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvertAction {
    pursuit: Pursuit,
    progress: f32,
    converted: bool,
}

impl ConvertAction {
    pub fn new(target: UnitId, range: Phys) -> Self {
        Self {
            pursuit: Pursuit::new(target, range),
            progress: 0.0,
            converted: false,
        }
    }

    pub fn target(&self) -> UnitId {
        self.pursuit.target()
    }

    /// Conversion progress on a 0..=1 scale.
    pub fn get_progress(&self) -> f32 {
        self.progress.min(1.0)
    }

    pub fn update(
        &mut self,
        ctx: &mut UpdateCtx,
        elapsed: u32,
    ) -> Result<Option<Action>, UpdateError> {
        if self.converted {
            return Ok(None);
        }
        if self.pursuit.advance(ctx, elapsed)? != PursuitStep::InRange {
            return Ok(None);
        }
        let Some(convert) = ctx.actor()?.attributes.convert.clone() else {
            self.pursuit.abort();
            return Ok(None);
        };
        self.progress += convert.rate * elapsed as f32;
        if self.progress >= 1.0 {
            let owner = ctx.actor()?.owner;
            if let Some(target) = ctx.state.units.get_mut(self.pursuit.target()) {
                tracing::debug!(
                    unit = %ctx.unit,
                    target = %target.id,
                    from = ?target.owner,
                    to = ?owner,
                    "unit converted"
                );
                target.owner = owner;
            }
            self.converted = true;
        }
        Ok(None)
    }

    pub fn completed(&self) -> bool {
        self.converted || self.pursuit.ended()
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
        GraphicType::Healing
    }

    pub fn draw_debug(&self, unit: &Unit, draw: &mut dyn DebugDraw) {
        self.pursuit.draw_debug(unit, draw);
    }
}
