//! Data-driven unit content and loaders for the behavior engine.
//!
//! This crate houses the static side of a simulation and the loaders that
//! read it from data files:
//! - unit type templates (data-driven via RON)
//! - engine configuration (data-driven via TOML)
//! - a straight-line path oracle for embedders without real pathfinding
//!
//! Content is consumed by the engine through its oracle traits and never
//! appears in simulation state.

pub mod path;
pub mod templates;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use path::StraightLinePaths;
pub use templates::TemplateSet;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, TemplateLoader};
