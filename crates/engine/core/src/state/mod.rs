//! Authoritative simulation state.
//!
//! [`SimState`] owns every unit and every player's stockpile. Actions mutate
//! it exclusively through the engine's per-unit update, one unit at a time,
//! so no unit ever observes another's half-applied tick.

pub mod arena;
pub mod attributes;
pub mod resources;
pub mod unit;

pub use arena::{UnitArena, UnitId};
pub use attributes::{
    AttackAttribute, Attributes, Capabilities, ConvertAttribute, GatherAttribute, HealAttribute,
};
pub use resources::{ResourceBank, ResourceBundle, ResourceClasses, ResourceKind, TechId};
pub use unit::{Carrying, PlayerId, ResourceNode, Unit, UnitTypeId};

use crate::coord::{Phys, Phys3};
use crate::env::UnitTemplate;

/// Number of player slots, including gaia (player 0).
pub const MAX_PLAYERS: usize = 9;

/// Canonical snapshot of the deterministic simulation state.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimState {
    pub units: UnitArena,
    banks: [ResourceBank; MAX_PLAYERS],
    /// Total elapsed simulation time in ticks.
    pub clock: u64,
}

impl SimState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bank(&self, player: PlayerId) -> &ResourceBank {
        &self.banks[player.0 as usize % MAX_PLAYERS]
    }

    pub fn bank_mut(&mut self, player: PlayerId) -> &mut ResourceBank {
        &mut self.banks[player.0 as usize % MAX_PLAYERS]
    }

    /// Spawns a fresh unit of the template's type at `position`, with full
    /// hit points and the template's default attributes.
    pub fn spawn_from_template(
        &mut self,
        template: &UnitTemplate,
        owner: PlayerId,
        position: Phys3,
    ) -> UnitId {
        self.units.spawn(|id| {
            Unit::new(id, owner, template.type_id, position, template.max_hp)
                .with_attributes(template.attributes.clone())
        })
    }

    /// Nearest unit (by ground distance from `from`) satisfying `filter`,
    /// among units currently on the map.
    ///
    /// Ties break towards the lower slot index, keeping the choice identical
    /// on every peer.
    pub fn nearest_unit(
        &self,
        from: Phys3,
        filter: impl Fn(&Unit) -> bool,
    ) -> Option<(UnitId, Phys)> {
        let mut best: Option<(UnitId, Phys)> = None;
        for unit in self.units.iter() {
            let Some(position) = unit.position else {
                continue;
            };
            if !filter(unit) {
                continue;
            }
            let dist = from.ground_distance(position);
            if best.is_none_or(|(_, best_dist)| dist < best_dist) {
                best = Some((unit.id, dist));
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::Phys3;

    fn unit_at(arena: &mut UnitArena, ne: i64, se: i64) -> UnitId {
        arena.spawn(|id| Unit::new(id, PlayerId(1), UnitTypeId(1), Phys3::on_ground(ne, se), 10))
    }

    #[test]
    fn nearest_unit_prefers_lower_slot_on_ties() {
        let mut state = SimState::new();
        let a = unit_at(&mut state.units, 5, 0);
        let _b = unit_at(&mut state.units, 0, 5);

        let found = state.nearest_unit(Phys3::ORIGIN, |_| true);
        assert_eq!(found.map(|(id, _)| id), Some(a));
    }

    #[test]
    fn nearest_unit_skips_off_map_units() {
        let mut state = SimState::new();
        let a = unit_at(&mut state.units, 2, 0);
        state.units.get_mut(a).unwrap().position = None;
        let b = unit_at(&mut state.units, 7, 0);

        let found = state.nearest_unit(Phys3::ORIGIN, |_| true);
        assert_eq!(found.map(|(id, _)| id), Some(b));
    }
}
