//! Resource bookkeeping at the cost-application boundary.
//!
//! The engine does not model an economy; it only deducts and credits
//! [`ResourceBundle`]s when actions demand it. Shortage is an ordinary
//! blocked state, never an error (progress timers simply freeze).

use std::fmt;
use std::ops::{Index, IndexMut};

use strum::IntoEnumIterator;

/// The stockpiled resource kinds.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceKind {
    Food,
    Wood,
    Gold,
    Stone,
}

impl ResourceKind {
    pub const COUNT: usize = 4;

    const fn index(self) -> usize {
        self as usize
    }
}

bitflags::bitflags! {
    /// Which resource kinds a dropsite accepts.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct ResourceClasses: u8 {
        const FOOD = 1 << 0;
        const WOOD = 1 << 1;
        const GOLD = 1 << 2;
        const STONE = 1 << 3;
    }
}

// Flag names in human-readable formats ("FOOD | WOOD"), raw bits otherwise.
#[cfg(feature = "serde")]
impl serde::Serialize for ResourceClasses {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        bitflags::serde::serialize(self, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ResourceClasses {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        bitflags::serde::deserialize(deserializer)
    }
}

impl From<ResourceKind> for ResourceClasses {
    fn from(kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::Food => Self::FOOD,
            ResourceKind::Wood => Self::WOOD,
            ResourceKind::Gold => Self::GOLD,
            ResourceKind::Stone => Self::STONE,
        }
    }
}

/// Per-kind resource quantities: a cost, a payload, or a refund.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceBundle {
    amounts: [u32; ResourceKind::COUNT],
}

impl ResourceBundle {
    pub const EMPTY: Self = Self {
        amounts: [0; ResourceKind::COUNT],
    };

    pub fn of(kind: ResourceKind, amount: u32) -> Self {
        let mut bundle = Self::EMPTY;
        bundle[kind] = amount;
        bundle
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.iter().all(|&a| a == 0)
    }

    pub fn add(&mut self, other: &ResourceBundle) {
        for kind in ResourceKind::iter() {
            self[kind] = self[kind].saturating_add(other[kind]);
        }
    }

    /// True if every component of `cost` is covered.
    pub fn covers(&self, cost: &ResourceBundle) -> bool {
        ResourceKind::iter().all(|kind| self[kind] >= cost[kind])
    }

    /// Subtracts `cost` if fully covered. Returns false (and leaves the
    /// bundle untouched) otherwise.
    pub fn deduct(&mut self, cost: &ResourceBundle) -> bool {
        if !self.covers(cost) {
            return false;
        }
        for kind in ResourceKind::iter() {
            self[kind] -= cost[kind];
        }
        true
    }
}

impl Index<ResourceKind> for ResourceBundle {
    type Output = u32;
    fn index(&self, kind: ResourceKind) -> &u32 {
        &self.amounts[kind.index()]
    }
}

impl IndexMut<ResourceKind> for ResourceBundle {
    fn index_mut(&mut self, kind: ResourceKind) -> &mut u32 {
        &mut self.amounts[kind.index()]
    }
}

impl fmt::Display for ResourceBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for kind in ResourceKind::iter() {
            if self[kind] > 0 {
                if !first {
                    write!(f, " ")?;
                }
                write!(f, "{}:{}", kind, self[kind])?;
                first = false;
            }
        }
        if first {
            write!(f, "nothing")?;
        }
        Ok(())
    }
}

/// Identifier of a researchable technology.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TechId(pub u32);

/// One player's stockpile and completed research.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceBank {
    pub stock: ResourceBundle,
    researched: Vec<TechId>,
}

impl ResourceBank {
    pub fn with_stock(stock: ResourceBundle) -> Self {
        Self {
            stock,
            researched: Vec::new(),
        }
    }

    pub fn can_afford(&self, cost: &ResourceBundle) -> bool {
        self.stock.covers(cost)
    }

    /// Pays `cost` if affordable; false means nothing was deducted.
    pub fn pay(&mut self, cost: &ResourceBundle) -> bool {
        self.stock.deduct(cost)
    }

    pub fn credit(&mut self, income: &ResourceBundle) {
        self.stock.add(income);
    }

    pub fn mark_researched(&mut self, tech: TechId) {
        if !self.researched.contains(&tech) {
            self.researched.push(tech);
        }
    }

    pub fn has_researched(&self, tech: TechId) -> bool {
        self.researched.contains(&tech)
    }
}
