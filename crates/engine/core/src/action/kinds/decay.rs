//! Death sequence and corpse fade-out.

use crate::action::context::UpdateCtx;
use crate::action::error::UpdateError;
use crate::action::Action;
use crate::graphics::GraphicType;
use crate::state::UnitId;

/// Advances a fixed-length animation to its final frame.
///
/// The frame count comes from the unit template's set for the given graphic
/// type, read on the first update. A zero frame rate falls back to one frame
/// per tick so the sequence always terminates.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct FrameRun {
    graphic: GraphicType,
    frame: f32,
    end_frame: Option<f32>,
}

impl FrameRun {
    fn new(graphic: GraphicType) -> Self {
        Self {
            graphic,
            frame: 0.0,
            end_frame: None,
        }
    }

    fn update(&mut self, ctx: &UpdateCtx, elapsed: u32) -> Result<(), UpdateError> {
        let set = ctx.actor_template()?.graphic(self.graphic);
        let end_frame = *self
            .end_frame
            .get_or_insert(set.frame_count.max(1) as f32);
        let rate = if set.frame_rate > 0.0 {
            set.frame_rate
        } else {
            1.0
        };
        self.frame = (self.frame + rate * elapsed as f32).min(end_frame);
        Ok(())
    }

    fn finished(&self) -> bool {
        self.end_frame.is_some_and(|end| self.frame >= end)
    }
}

/// Hook invoked exactly once when a death sequence finishes.
///
/// Lets embedders react to a unit's removal (score, notifications) without
/// the engine knowing about them. Defaults to nothing.
pub type DeathHook = fn(&mut UpdateCtx, UnitId);

/// Plays the dying animation to its last frame, then fades the corpse.
///
/// Not interruptible and not controllable: a killed unit always finishes
/// dying.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeadAction {
    run: FrameRun,
    /// Explicit optional completion hook; `None` means do nothing extra.
    #[cfg_attr(feature = "serde", serde(skip))]
    on_complete: Option<DeathHook>,
}

impl DeadAction {
    pub fn new(on_complete: Option<DeathHook>) -> Self {
        Self {
            run: FrameRun::new(GraphicType::Dying),
            on_complete,
        }
    }

    pub fn update(
        &mut self,
        ctx: &mut UpdateCtx,
        elapsed: u32,
    ) -> Result<Option<Action>, UpdateError> {
        self.run.update(ctx, elapsed)?;
        Ok(None)
    }

    pub fn completed(&self) -> bool {
        self.run.finished()
    }

    pub fn on_completion(
        &mut self,
        ctx: &mut UpdateCtx,
    ) -> Result<Option<Action>, UpdateError> {
        if let Some(hook) = self.on_complete.take() {
            let unit = ctx.unit;
            hook(ctx, unit);
        }
        // The corpse lingers and fades.
        Ok(Some(Action::Decay(DecayAction::new())))
    }

    pub fn allow_interrupt(&self) -> bool {
        false
    }

    pub fn allow_control(&self) -> bool {
        false
    }

    pub fn graphic_type(&self) -> GraphicType {
        GraphicType::Dying
    }

    pub fn current_frame(&self) -> f32 {
        self.run.frame
    }
}

/// Fades the corpse out, then removes the unit from the simulation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecayAction {
    run: FrameRun,
}

impl DecayAction {
    pub fn new() -> Self {
        Self {
            run: FrameRun::new(GraphicType::Decaying),
        }
    }

    pub fn update(
        &mut self,
        ctx: &mut UpdateCtx,
        elapsed: u32,
    ) -> Result<Option<Action>, UpdateError> {
        self.run.update(ctx, elapsed)?;
        Ok(None)
    }

    pub fn completed(&self) -> bool {
        self.run.finished()
    }

    pub fn on_completion(
        &mut self,
        ctx: &mut UpdateCtx,
    ) -> Result<Option<Action>, UpdateError> {
        tracing::debug!(unit = %ctx.unit, "corpse decayed, removing unit");
        ctx.state.units.remove(ctx.unit);
        Ok(None)
    }

    pub fn allow_interrupt(&self) -> bool {
        false
    }

    pub fn allow_control(&self) -> bool {
        false
    }

    pub fn graphic_type(&self) -> GraphicType {
        GraphicType::Decaying
    }

    pub fn current_frame(&self) -> f32 {
        self.run.frame
    }
}

impl Default for DecayAction {
    fn default() -> Self {
        Self::new()
    }
}
