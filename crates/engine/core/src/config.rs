use crate::coord::Phys;

/// Engine configuration constants and tunable parameters.
///
/// Threaded through the update context explicitly; there is no process-wide
/// mutable state, so two simulations with different settings can coexist.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Emit per-action debug drawing through the [`DebugDraw`] hook.
    ///
    /// [`DebugDraw`]: crate::graphics::DebugDraw
    pub show_debug: bool,

    /// How often a fresh path is requested before a target is written off as
    /// unreachable and the pursuing action ends.
    pub repath_attempts: u32,

    /// Distance at which two units are considered touching. Used as the
    /// engagement radius whenever a unit lacks a ranged attribute.
    pub adjacent_range: Phys,

    /// Downward acceleration applied to projectiles, in tiles per tick².
    pub projectile_gravity: Phys,

    /// Ticks between idle auto-task scans.
    pub idle_scan_interval: u32,

    /// Radius within which idle units look for auto-task opportunities.
    pub idle_scan_radius: Phys,
}

impl EngineConfig {
    // ===== compile-time capacities used as type parameters =====
    /// Maximum depth of a unit's action stack.
    pub const MAX_STACK_DEPTH: usize = 8;
    /// Maximum secondary actions per unit.
    pub const MAX_SECONDARY_ACTIONS: usize = 4;
    /// Maximum units garrisoned inside one building.
    pub const MAX_GARRISON: usize = 16;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_REPATH_ATTEMPTS: u32 = 10;
    pub const DEFAULT_IDLE_SCAN_INTERVAL: u32 = 25;

    pub fn new() -> Self {
        Self {
            show_debug: false,
            repath_attempts: Self::DEFAULT_REPATH_ATTEMPTS,
            adjacent_range: Phys::from_raw(Phys::ONE.0 / 2),
            projectile_gravity: Phys::from_raw(Phys::ONE.0 / 64),
            idle_scan_interval: Self::DEFAULT_IDLE_SCAN_INTERVAL,
            idle_scan_radius: Phys::from_int(6),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
