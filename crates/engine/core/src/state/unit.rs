//! The simulated entity record.

use arrayvec::ArrayVec;

use crate::action::stack::ActionStack;
use crate::config::EngineConfig;
use crate::coord::{Facing, Phys, Phys3};
use crate::state::arena::UnitId;
use crate::state::attributes::Attributes;
use crate::state::resources::ResourceKind;

/// Identifier of a unit type template (resolved through the template oracle).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitTypeId(pub u32);

/// Owning player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerId(pub u8);

/// A harvestable deposit carried by resource units (trees, mines, corpses).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceNode {
    pub kind: ResourceKind,
    pub amount: u32,
}

/// A gatherer's payload on its way to a dropsite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Carrying {
    pub kind: ResourceKind,
    pub amount: u32,
}

/// One simulated entity: soldier, villager, building, tree or projectile.
///
/// A unit always carries exactly one [`ActionStack`]; the engine keeps it
/// non-empty (Idle at the bottom) for as long as the unit lives. Fields like
/// `build_progress` and `resource` belong to the unit but are written by
/// actions running on *other* units (builders, gatherers), which is why they
/// live here rather than inside any single action.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    pub id: UnitId,
    pub owner: PlayerId,
    pub type_id: UnitTypeId,

    /// World position. None while garrisoned or otherwise off the map.
    pub position: Option<Phys3>,
    pub facing: Facing,

    pub hp: u32,
    pub max_hp: u32,

    pub attributes: Attributes,
    pub stack: ActionStack,

    /// Construction progress for foundations, on a 0..=1 scale.
    pub build_progress: f32,
    /// Remaining harvestable resource, if this unit is a deposit.
    pub resource: Option<ResourceNode>,
    /// Units garrisoned inside this one.
    pub garrisoned: ArrayVec<UnitId, { EngineConfig::MAX_GARRISON }>,
    /// Gathered payload, if this unit is a gatherer.
    pub carrying: Option<Carrying>,
}

impl Default for UnitTypeId {
    fn default() -> Self {
        Self(0)
    }
}

impl Unit {
    pub fn new(
        id: UnitId,
        owner: PlayerId,
        type_id: UnitTypeId,
        position: Phys3,
        max_hp: u32,
    ) -> Self {
        Self {
            id,
            owner,
            type_id,
            position: Some(position),
            facing: Facing::default(),
            hp: max_hp,
            max_hp,
            attributes: Attributes::default(),
            stack: ActionStack::default(),
            build_progress: 0.0,
            resource: None,
            garrisoned: ArrayVec::new(),
            carrying: None,
        }
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_resource(mut self, kind: ResourceKind, amount: u32) -> Self {
        self.resource = Some(ResourceNode { kind, amount });
        self
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    #[inline]
    pub fn at_full_health(&self) -> bool {
        self.hp >= self.max_hp
    }

    /// Restores hit points, capped at the maximum. Returns the amount
    /// actually applied.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let applied = amount.min(self.max_hp - self.hp.min(self.max_hp));
        self.hp += applied;
        applied
    }

    /// Ground distance to another unit, when both are on the map.
    pub fn distance_to(&self, other: &Unit) -> Option<Phys> {
        Some(self.position?.ground_distance(other.position?))
    }

    /// Turns the unit towards a point; no-op when off-map or already there.
    pub fn face_towards(&mut self, target: Phys3) {
        if let Some(pos) = self.position
            && let Some(facing) = Facing::towards(pos, target)
        {
            self.facing = facing;
        }
    }

    pub fn has_garrison_space(&self) -> bool {
        (self.garrisoned.len() as u32) < self.attributes.garrison_capacity
    }
}
