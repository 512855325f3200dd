//! Ballistic flight of a spawned projectile unit.

use crate::action::context::UpdateCtx;
use crate::action::error::UpdateError;
use crate::action::kinds::combat::apply_damage;
use crate::action::Action;
use crate::coord::{Phys, Phys3};
use crate::graphics::GraphicType;
use crate::state::UnitId;

/// Flies a projectile unit from its launch point to the impact point fixed
/// at launch time, on a parabolic arc, then applies damage once and removes
/// the projectile.
///
/// The target can dodge: damage only lands if it is still near the impact
/// point when the projectile arrives.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProjectileAction {
    target: UnitId,
    origin: Phys3,
    impact: Phys3,
    damage: u32,
    /// Total flight duration in ticks, fixed at launch.
    flight_time: u32,
    elapsed_total: u32,
    has_hit: bool,
}

impl ProjectileAction {
    pub fn launch(
        target: UnitId,
        origin: Phys3,
        impact: Phys3,
        damage: u32,
        speed: Phys,
    ) -> Self {
        let dist = origin.ground_distance(impact);
        // Whole ticks, rounded up; both operands are non-negative.
        let flight_time = if speed > Phys::ZERO {
            (((dist.0 + speed.0 - 1) / speed.0).max(1)) as u32
        } else {
            1
        };
        Self {
            target,
            origin,
            impact,
            damage,
            flight_time,
            elapsed_total: 0,
            has_hit: false,
        }
    }

    pub fn target(&self) -> UnitId {
        self.target
    }

    pub fn update(
        &mut self,
        ctx: &mut UpdateCtx,
        elapsed: u32,
    ) -> Result<Option<Action>, UpdateError> {
        if self.has_hit || elapsed == 0 {
            return Ok(None);
        }
        self.elapsed_total = (self.elapsed_total + elapsed).min(self.flight_time);
        let t = self.elapsed_total as i64;
        let total = self.flight_time as i64;

        let (dne, dse) = self.origin.ground_delta(self.impact);
        let gravity = ctx.config().projectile_gravity;
        let position = Phys3 {
            ne: self.origin.ne + dne * t / total,
            se: self.origin.se + dse * t / total,
            // Parabolic arc peaking at mid-flight.
            up: self.origin.up
                + (self.impact.up - self.origin.up) * t / total
                + gravity * (t * (total - t)) / 2,
        };
        let impact_point = self.impact;
        let actor = ctx.actor_mut()?;
        actor.position = Some(position);
        actor.face_towards(impact_point);

        if self.elapsed_total >= self.flight_time {
            self.has_hit = true;
            let blast = ctx.config().adjacent_range;
            let target_close = ctx
                .state
                .units
                .get(self.target)
                .and_then(|u| u.position)
                .is_some_and(|p| p.ground_distance(impact_point) <= blast);
            if target_close {
                apply_damage(ctx.state, self.target, self.damage);
            } else {
                tracing::trace!(unit = %ctx.unit, target = %self.target, "projectile missed");
            }
        }
        Ok(None)
    }

    pub fn completed(&self) -> bool {
        self.has_hit
    }

    /// Spent projectiles leave the simulation immediately.
    pub fn on_completion(
        &mut self,
        ctx: &mut UpdateCtx,
    ) -> Result<Option<Action>, UpdateError> {
        ctx.state.units.remove(ctx.unit);
        Ok(None)
    }

    pub fn allow_interrupt(&self) -> bool {
        false
    }

    pub fn allow_control(&self) -> bool {
        false
    }

    pub fn graphic_type(&self) -> GraphicType {
        GraphicType::Moving
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flight_time_rounds_up_to_whole_ticks() {
        let arrow = ProjectileAction::launch(
            UnitId::default(),
            Phys3::ORIGIN,
            Phys3::on_ground(5, 0),
            1,
            Phys::from_int(2),
        );
        assert_eq!(arrow.flight_time, 3);

        let point_blank = ProjectileAction::launch(
            UnitId::default(),
            Phys3::ORIGIN,
            Phys3::ORIGIN,
            1,
            Phys::from_int(2),
        );
        assert_eq!(point_blank.flight_time, 1);
    }
}
