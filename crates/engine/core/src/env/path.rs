//! Pathfinding boundary.
//!
//! The engine never searches for paths; it asks an external [`PathOracle`]
//! and consumes the returned waypoints one by one. When the oracle cannot
//! produce a path, the requesting action retries a bounded number of times
//! and then gives up on the target.

use crate::coord::Phys3;

/// An ordered sequence of waypoints, consumed front to back.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    waypoints: Vec<Phys3>,
    next: usize,
}

impl Path {
    pub fn new(waypoints: Vec<Phys3>) -> Self {
        Self { waypoints, next: 0 }
    }

    /// The waypoint currently being travelled towards.
    pub fn current(&self) -> Option<Phys3> {
        self.waypoints.get(self.next).copied()
    }

    /// Marks the current waypoint as reached.
    pub fn advance(&mut self) {
        if self.next < self.waypoints.len() {
            self.next += 1;
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.next >= self.waypoints.len()
    }

    /// The final goal position, if the path is non-empty.
    pub fn goal(&self) -> Option<Phys3> {
        self.waypoints.last().copied()
    }

    /// Remaining waypoints, for debug overlays.
    pub fn remaining(&self) -> &[Phys3] {
        &self.waypoints[self.next.min(self.waypoints.len())..]
    }
}

/// External pathfinding service.
///
/// `within` is the acceptable stopping distance from `to`; implementations
/// may end the path anywhere inside that radius. `None` means no route
/// exists right now (which the action layer treats as a transient condition,
/// not an error).
pub trait PathOracle {
    fn find_path(&self, from: Phys3, to: Phys3, within: crate::coord::Phys) -> Option<Path>;
}
