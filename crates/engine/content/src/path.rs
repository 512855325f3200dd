//! Trivial pathfinding for embedders without a navigation mesh.

use engine_core::{Path, PathOracle, Phys, Phys3};

/// Path oracle that walks straight towards the goal.
///
/// Good enough for open maps, demos and tests; real embedders plug in their
/// own navigation.
#[derive(Clone, Copy, Debug, Default)]
pub struct StraightLinePaths;

impl PathOracle for StraightLinePaths {
    fn find_path(&self, _from: Phys3, to: Phys3, _within: Phys) -> Option<Path> {
        Some(Path::new(vec![to]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_ends_at_the_goal() {
        let goal = Phys3::on_ground(4, 7);
        let path = StraightLinePaths
            .find_path(Phys3::ORIGIN, goal, Phys::ZERO)
            .unwrap();
        assert_eq!(path.goal(), Some(goal));
    }
}
