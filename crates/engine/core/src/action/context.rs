//! Per-update context handed to actions.

use crate::action::error::UpdateError;
use crate::config::EngineConfig;
use crate::env::{Env, UnitTemplate};
use crate::state::{SimState, Unit, UnitId};

/// Everything one action update may touch: the whole mutable state, the
/// read-only environment, and the identity of the acting unit.
///
/// The acting unit's stack is detached while its actions run, so actions are
/// free to look up and mutate any unit in the arena, including the actor.
pub struct UpdateCtx<'a, 'e> {
    pub state: &'a mut SimState,
    pub env: Env<'e>,
    /// The unit whose stack is currently being updated.
    pub unit: UnitId,
}

impl<'e> UpdateCtx<'_, 'e> {
    /// The acting unit. Failure means the embedder updated a stack whose
    /// owner is gone, which is a contract violation.
    pub fn actor(&self) -> Result<&Unit, UpdateError> {
        self.state
            .units
            .get(self.unit)
            .ok_or(UpdateError::ActorMissing(self.unit))
    }

    pub fn actor_mut(&mut self) -> Result<&mut Unit, UpdateError> {
        self.state
            .units
            .get_mut(self.unit)
            .ok_or(UpdateError::ActorMissing(self.unit))
    }

    /// Template of the acting unit's type.
    pub fn actor_template(&self) -> Result<&'e UnitTemplate, UpdateError> {
        let type_id = self.actor()?.type_id;
        Ok(self.env.template(type_id)?)
    }

    pub fn config(&self) -> &'e EngineConfig {
        self.env.config()
    }
}
