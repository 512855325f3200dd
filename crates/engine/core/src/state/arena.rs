//! Generational unit storage.
//!
//! Units live in a slot arena addressed by [`UnitId`] handles that carry the
//! slot's generation. A handle held across a unit's death dereferences to
//! `None` rather than aliasing whatever reuses the slot, which is the single
//! mechanism behind "target disappeared" transitions throughout the action
//! layer. Iteration is in slot order, so every lockstep peer walks units in
//! the same sequence.

use std::fmt;

use crate::state::unit::Unit;

/// Generation-checked handle to a unit.
///
/// Copyable and freely storable; a stale handle is harmless and simply stops
/// resolving. Actions treat a failed lookup as "target gone", never as a
/// crash.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitId {
    index: u32,
    generation: u32,
}

impl UnitId {
    /// A handle that never resolves. Placeholder for Default-constructed
    /// containers; real ids come from [`UnitArena::spawn`].
    pub const DANGLING: Self = Self {
        index: u32::MAX,
        generation: u32::MAX,
    };
}

impl Default for UnitId {
    fn default() -> Self {
        Self::DANGLING
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}.{}", self.index, self.generation)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct Slot {
    generation: u32,
    unit: Option<Unit>,
}

/// Slot arena owning every live unit in the simulation.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl UnitArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a unit built from its freshly assigned id.
    pub fn spawn(&mut self, build: impl FnOnce(UnitId) -> Unit) -> UnitId {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot::default());
                (self.slots.len() - 1) as u32
            }
        };
        let slot = &mut self.slots[index as usize];
        let id = UnitId {
            index,
            generation: slot.generation,
        };
        slot.unit = Some(build(id));
        self.len += 1;
        id
    }

    pub fn get(&self, id: UnitId) -> Option<&Unit> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.unit.as_ref()
    }

    pub fn get_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.unit.as_mut()
    }

    /// Removes a unit, bumping the slot generation so held handles go stale.
    pub fn remove(&mut self, id: UnitId) -> Option<Unit> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation || slot.unit.is_none() {
            return None;
        }
        let unit = slot.unit.take();
        slot.generation += 1;
        self.free.push(id.index);
        self.len -= 1;
        unit
    }

    pub fn contains(&self, id: UnitId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Live units in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Unit> {
        self.slots.iter().filter_map(|slot| slot.unit.as_ref())
    }

    /// Snapshot of live ids in slot order. Taken before a tick so spawns and
    /// removals during the tick cannot perturb the walk.
    pub fn ids(&self) -> Vec<UnitId> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.unit.is_some())
            .map(|(index, slot)| UnitId {
                index: index as u32,
                generation: slot.generation,
            })
            .collect()
    }
}
