//! Default bottom-of-stack action with periodic auto-tasking.

use crate::action::context::UpdateCtx;
use crate::action::error::UpdateError;
use crate::action::kinds::combat::{attack_range, heal_range, AttackAction, HealAction};
use crate::action::Action;
use crate::config::EngineConfig;
use crate::coord::Phys3;
use crate::graphics::GraphicType;
use crate::state::{Capabilities, PlayerId};
use crate::timer::IntervalTimer;

/// Sits at the bottom of every living unit's stack and never completes.
///
/// On a fixed scan interval it looks for work matching the unit's
/// capabilities: fighters engage the nearest enemy in scan radius, healers
/// tend the nearest wounded ally. The found task is returned as a follow-up
/// push, so an explicit order arriving the same tick still wins.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IdleAction {
    scan: IntervalTimer,
}

impl IdleAction {
    pub fn new(scan_interval: u32) -> Self {
        Self {
            scan: IntervalTimer::new(scan_interval.max(1)),
        }
    }

    pub fn update(
        &mut self,
        ctx: &mut UpdateCtx,
        elapsed: u32,
    ) -> Result<Option<Action>, UpdateError> {
        let Some(position) = ctx.actor()?.position else {
            // Garrisoned or otherwise off the map: nothing to scan for.
            return Ok(None);
        };
        if !self.scan.update(elapsed) {
            return Ok(None);
        }
        self.scan_for_task(ctx, position)
    }

    fn scan_for_task(
        &self,
        ctx: &UpdateCtx,
        position: Phys3,
    ) -> Result<Option<Action>, UpdateError> {
        let actor = ctx.actor()?;
        let owner = actor.owner;
        let me = actor.id;
        let radius = ctx.config().idle_scan_radius;

        if actor.attributes.can(Capabilities::ATTACK)
            && let Some(attack) = actor.attributes.attack
        {
            // Gaia units (trees, relics) are never auto-engaged.
            let found = ctx.state.nearest_unit(position, |u| {
                u.owner != owner && u.owner != PlayerId(0) && u.is_alive()
            });
            if let Some((enemy, dist)) = found
                && dist <= radius
            {
                tracing::trace!(unit = %me, target = %enemy, "idle unit engaging");
                return Ok(Some(Action::Attack(AttackAction::new(
                    enemy,
                    attack_range(actor, ctx.config()),
                    attack.rate,
                ))));
            }
        }

        if actor.attributes.can(Capabilities::HEAL)
            && let Some(heal) = actor.attributes.heal
        {
            let found = ctx.state.nearest_unit(position, |u| {
                u.owner == owner && u.id != me && u.is_alive() && !u.at_full_health()
            });
            if let Some((ally, dist)) = found
                && dist <= radius
            {
                tracing::trace!(unit = %me, target = %ally, "idle unit healing");
                return Ok(Some(Action::Heal(HealAction::new(
                    ally,
                    heal_range(actor, ctx.config()),
                    heal.rate,
                ))));
            }
        }

        Ok(None)
    }

    /// Idle never completes on its own; it is only ever covered or popped.
    pub fn completed(&self) -> bool {
        false
    }

    pub fn on_completion(
        &mut self,
        _ctx: &mut UpdateCtx,
    ) -> Result<Option<Action>, UpdateError> {
        Ok(None)
    }

    pub fn allow_interrupt(&self) -> bool {
        false
    }

    pub fn allow_control(&self) -> bool {
        true
    }

    pub fn graphic_type(&self) -> GraphicType {
        GraphicType::Standing
    }
}

impl Default for IdleAction {
    fn default() -> Self {
        Self::new(EngineConfig::DEFAULT_IDLE_SCAN_INTERVAL)
    }
}
