//! Traits describing the engine's external collaborators.
//!
//! Oracles expose pathfinding and unit type data without coupling the core
//! to concrete implementations. The [`Env`] aggregate bundles them together
//! with the engine configuration so the action layer receives everything
//! through one handle.

mod path;
mod template;

pub use path::{Path, PathOracle};
pub use template::{TemplateOracle, UnitTemplate};

use crate::config::EngineConfig;
use crate::state::UnitTypeId;

/// A required oracle was not provided, or a lookup hit unknown data.
///
/// These are embedder contract violations (a simulation wired up without its
/// collaborators), not in-game conditions, and they surface as errors all the
/// way out of the tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    #[error("path oracle not available")]
    PathNotAvailable,
    #[error("template oracle not available")]
    TemplatesNotAvailable,
    #[error("no template registered for unit type {0:?}")]
    UnknownTemplate(UnitTypeId),
}

/// Aggregates the read-only collaborators required by the action layer.
#[derive(Clone, Copy)]
pub struct Env<'a> {
    path: Option<&'a dyn PathOracle>,
    templates: Option<&'a dyn TemplateOracle>,
    config: &'a EngineConfig,
}

impl<'a> Env<'a> {
    pub fn new(
        path: Option<&'a dyn PathOracle>,
        templates: Option<&'a dyn TemplateOracle>,
        config: &'a EngineConfig,
    ) -> Self {
        Self {
            path,
            templates,
            config,
        }
    }

    pub fn with_all(
        path: &'a dyn PathOracle,
        templates: &'a dyn TemplateOracle,
        config: &'a EngineConfig,
    ) -> Self {
        Self::new(Some(path), Some(templates), config)
    }

    /// Returns the path oracle, or an error if not available.
    pub fn path(&self) -> Result<&'a dyn PathOracle, OracleError> {
        self.path.ok_or(OracleError::PathNotAvailable)
    }

    /// Returns the template oracle, or an error if not available.
    pub fn templates(&self) -> Result<&'a dyn TemplateOracle, OracleError> {
        self.templates.ok_or(OracleError::TemplatesNotAvailable)
    }

    /// Resolves one unit type template.
    pub fn template(&self, type_id: UnitTypeId) -> Result<&'a UnitTemplate, OracleError> {
        self.templates()?
            .template(type_id)
            .ok_or(OracleError::UnknownTemplate(type_id))
    }

    pub fn config(&self) -> &'a EngineConfig {
        self.config
    }
}
