//! Training units and researching technologies.
//!
//! Both actions follow the same pattern: pay the full cost up front (the
//! action blocks, not fails, until the owner can afford it), then run a
//! single-shot timer to completion. Neither is interruptible once started;
//! the cost is already spent.

use crate::action::context::UpdateCtx;
use crate::action::error::UpdateError;
use crate::action::Action;
use crate::coord::{Phys, Phys3};
use crate::graphics::GraphicType;
use crate::state::{ResourceBundle, TechId, UnitTypeId};
use crate::timer::IntervalTimer;

/// Produces one unit of a given type at the trainer's side.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrainAction {
    produce: UnitTypeId,
    /// Created once the cost is paid; interval and cap come from the
    /// template.
    timer: Option<IntervalTimer>,
    paid: bool,
    complete: bool,
}

impl TrainAction {
    pub fn new(produce: UnitTypeId) -> Self {
        Self {
            produce,
            timer: None,
            paid: false,
            complete: false,
        }
    }

    pub fn get_produce_type(&self) -> UnitTypeId {
        self.produce
    }

    /// Production progress on a 0..=1 scale. Zero while blocked on cost.
    pub fn get_progress(&self) -> f32 {
        if self.complete {
            return 1.0;
        }
        self.timer.as_ref().map_or(0.0, IntervalTimer::get_progress)
    }

    pub fn update(
        &mut self,
        ctx: &mut UpdateCtx,
        elapsed: u32,
    ) -> Result<Option<Action>, UpdateError> {
        if self.complete {
            return Ok(None);
        }
        let template = ctx.env.template(self.produce)?;
        if !self.paid {
            let owner = ctx.actor()?.owner;
            if !ctx.state.bank_mut(owner).pay(&template.cost) {
                // Blocked until the stockpile covers the cost.
                return Ok(None);
            }
            self.paid = true;
            tracing::debug!(unit = %ctx.unit, produce = ?self.produce, "training started");
        }
        let timer = self
            .timer
            .get_or_insert_with(|| IntervalTimer::capped(template.train_time.max(1), 1));
        if timer.update(elapsed) {
            let actor = ctx.actor()?;
            let owner = actor.owner;
            match actor.position {
                Some(door) => {
                    let rally = Phys3 {
                        ne: door.ne + Phys::ONE,
                        ..door
                    };
                    let recruit = ctx.state.spawn_from_template(template, owner, rally);
                    tracing::debug!(unit = %ctx.unit, %recruit, "training complete");
                }
                None => {
                    tracing::debug!(unit = %ctx.unit, "trainer off map, recruit lost");
                }
            }
            self.complete = true;
        }
        Ok(None)
    }

    pub fn completed(&self) -> bool {
        self.complete
    }

    pub fn on_completion(
        &mut self,
        _ctx: &mut UpdateCtx,
    ) -> Result<Option<Action>, UpdateError> {
        Ok(None)
    }

    pub fn allow_interrupt(&self) -> bool {
        false
    }

    pub fn allow_control(&self) -> bool {
        true
    }

    pub fn graphic_type(&self) -> GraphicType {
        GraphicType::Standing
    }
}

/// Researches a technology, marking it in the owner's bank on completion.
///
/// Costs and research time come from the embedder's tech data; the engine
/// only tracks the payment and the clock.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResearchAction {
    tech: TechId,
    cost: ResourceBundle,
    timer: IntervalTimer,
    paid: bool,
    complete: bool,
}

impl ResearchAction {
    pub fn new(tech: TechId, cost: ResourceBundle, research_time: u32) -> Self {
        Self {
            tech,
            cost,
            timer: IntervalTimer::capped(research_time.max(1), 1),
            paid: false,
            complete: false,
        }
    }

    pub fn get_research_type(&self) -> TechId {
        self.tech
    }

    /// Research progress on a 0..=1 scale. Zero while blocked on cost.
    pub fn get_progress(&self) -> f32 {
        if self.complete {
            return 1.0;
        }
        if !self.paid {
            return 0.0;
        }
        self.timer.get_progress()
    }

    pub fn update(
        &mut self,
        ctx: &mut UpdateCtx,
        elapsed: u32,
    ) -> Result<Option<Action>, UpdateError> {
        if self.complete {
            return Ok(None);
        }
        let owner = ctx.actor()?.owner;
        if !self.paid {
            if !ctx.state.bank_mut(owner).pay(&self.cost) {
                return Ok(None);
            }
            self.paid = true;
            tracing::debug!(unit = %ctx.unit, tech = ?self.tech, "research started");
        }
        if self.timer.update(elapsed) {
            ctx.state.bank_mut(owner).mark_researched(self.tech);
            tracing::debug!(unit = %ctx.unit, tech = ?self.tech, "research complete");
            self.complete = true;
        }
        Ok(None)
    }

    pub fn completed(&self) -> bool {
        self.complete
    }

    pub fn on_completion(
        &mut self,
        _ctx: &mut UpdateCtx,
    ) -> Result<Option<Action>, UpdateError> {
        Ok(None)
    }

    pub fn allow_interrupt(&self) -> bool {
        false
    }

    pub fn allow_control(&self) -> bool {
        true
    }

    pub fn graphic_type(&self) -> GraphicType {
        GraphicType::Standing
    }
}
