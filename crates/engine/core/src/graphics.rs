//! Rendering-facing identifiers.
//!
//! The engine never draws anything. Each tick it exposes which animation set
//! a unit's active action wants ([`GraphicType`]) and the frame cursor within
//! it; the renderer resolves both against its own assets. Debug overlays go
//! through the [`DebugDraw`] hook so the core stays renderer-agnostic.

use crate::coord::{Phys, Phys3};

/// Which animation family an action wants for its unit.
///
/// Resolved to a concrete [`GraphicSetId`] through the unit's template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GraphicType {
    Standing,
    Moving,
    Attacking,
    Healing,
    Working,
    Carrying,
    Dying,
    Decaying,
    Construction,
}

/// Opaque handle into the renderer's animation catalogue.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphicSetId(pub u32);

/// One animation set: asset handle plus pacing metadata the engine needs to
/// run fixed-length sequences (death, decay) to their final frame.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphicSet {
    pub id: GraphicSetId,
    /// Number of frames in the sequence.
    pub frame_count: u32,
    /// Frames advanced per tick.
    pub frame_rate: f32,
}

impl GraphicSet {
    pub const EMPTY: Self = Self {
        id: GraphicSetId(0),
        frame_count: 1,
        frame_rate: 0.0,
    };
}

/// External overlay used to visualise paths and ranges.
///
/// Actions call into this only when [`EngineConfig::show_debug`] is set; no
/// implementation ships with the engine.
///
/// [`EngineConfig::show_debug`]: crate::config::EngineConfig::show_debug
pub trait DebugDraw {
    /// A path segment the unit intends to travel.
    fn segment(&mut self, from: Phys3, to: Phys3);

    /// An engagement or activation radius around a position.
    fn circle(&mut self, center: Phys3, radius: Phys);
}
