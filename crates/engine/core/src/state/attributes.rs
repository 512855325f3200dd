//! Per-unit attribute set.
//!
//! Attributes are typed optional capabilities: a unit without an attack
//! attribute simply cannot fight, and range helpers fall back to the
//! touching distance when a ranged attribute is absent.

use crate::coord::Phys;
use crate::state::resources::{ResourceClasses, ResourceKind};
use crate::state::unit::UnitTypeId;

bitflags::bitflags! {
    /// Coarse ability mask used by idle auto-tasking and command validation.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Capabilities: u16 {
        const MOVE = 1 << 0;
        const ATTACK = 1 << 1;
        const HEAL = 1 << 2;
        const GATHER = 1 << 3;
        const BUILD = 1 << 4;
        const REPAIR = 1 << 5;
        const CONVERT = 1 << 6;
        const GARRISON = 1 << 7;
        const TRAIN = 1 << 8;
        const RESEARCH = 1 << 9;
    }
}

// Flag names in human-readable formats ("MOVE | ATTACK"), raw bits otherwise.
#[cfg(feature = "serde")]
impl serde::Serialize for Capabilities {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        bitflags::serde::serialize(self, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Capabilities {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        bitflags::serde::deserialize(deserializer)
    }
}

/// Offensive capability.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackAttribute {
    /// Hit points removed per stroke or impact.
    pub damage: u32,
    /// Engagement radius. Melee units use the touching distance instead.
    pub range: Option<Phys>,
    /// Ticks between strokes.
    pub rate: u32,
    /// Ranged attacks spawn this projectile type instead of striking.
    pub projectile: Option<UnitTypeId>,
}

/// Restorative capability.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealAttribute {
    /// Hit points restored per stroke.
    pub amount: u32,
    pub range: Option<Phys>,
    /// Ticks between strokes.
    pub rate: u32,
}

/// Harvesting capability.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GatherAttribute {
    /// Ticks per unit of resource harvested.
    pub rate: u32,
    /// Payload limit before a dropsite run.
    pub capacity: u32,
}

/// Ownership-conversion capability.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvertAttribute {
    /// Progress accrued per tick, on a 0..=1 scale.
    pub rate: f32,
    pub range: Option<Phys>,
}

/// Everything a unit type can do, as data.
///
/// Absent fields are absent capabilities. The engine never invents a default
/// attack or speed; templates decide.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attributes {
    /// Ground speed in tiles per tick. None for immobile units.
    pub speed: Option<Phys>,
    pub attack: Option<AttackAttribute>,
    pub heal: Option<HealAttribute>,
    pub gather: Option<GatherAttribute>,
    pub convert: Option<ConvertAttribute>,
    /// Construction progress contributed per tick, on a 0..=1 scale.
    pub build_rate: Option<f32>,
    /// Ticks between repair strokes (1 HP each).
    pub repair_rate: Option<u32>,
    /// Resource kinds this unit accepts as a dropsite.
    pub dropsite: ResourceClasses,
    /// Garrison bay size. Zero for units that cannot hold others.
    pub garrison_capacity: u32,
    pub capabilities: Capabilities,
}

impl Attributes {
    pub fn accepts_dropoff(&self, kind: ResourceKind) -> bool {
        self.dropsite.contains(kind.into())
    }

    pub fn can(&self, capability: Capabilities) -> bool {
        self.capabilities.contains(capability)
    }
}
