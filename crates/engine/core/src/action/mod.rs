//! Unit behavior as a stack of closed action variants.
//!
//! Every behavior a unit can run is one variant of [`Action`]; dispatch is a
//! plain match, so the whole behavior space is visible in one place and
//! serializes as data. Actions follow a shared contract:
//!
//! - `update` runs one tick and may request a follow-up push
//! - completion is latched during `update`; `completed` is a pure read
//! - `on_completion` runs exactly once when the action leaves the stack
//!   normally, and may hand back a continuation
//! - `allow_interrupt` gates cancellation, `allow_control` gates new orders
//!   landing on top

pub mod context;
pub mod error;
pub mod kinds;
pub mod pursuit;
pub mod stack;

pub use context::UpdateCtx;
pub use error::{PushError, UpdateError};
pub use pursuit::{Pursuit, PursuitStep};
pub use stack::ActionStack;

use crate::graphics::{DebugDraw, GraphicSet, GraphicType};
use crate::state::Unit;
pub use kinds::{
    AttackAction, BuildAction, ConvertAction, DeadAction, DeathHook, DecayAction,
    FoundationAction, GarrisonAction, GatherAction, HealAction, IdleAction, MoveAction, MoveGoal,
    ProjectileAction, RepairAction, ResearchAction, TrainAction, UngarrisonAction,
};

/// One unit behavior. See the [kinds] module for each variant's semantics.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Idle(IdleAction),
    Move(MoveAction),
    Dead(DeadAction),
    Decay(DecayAction),
    Foundation(FoundationAction),
    Build(BuildAction),
    Repair(RepairAction),
    Gather(GatherAction),
    Attack(AttackAction),
    Heal(HealAction),
    Convert(ConvertAction),
    Garrison(GarrisonAction),
    Ungarrison(UngarrisonAction),
    Train(TrainAction),
    Research(ResearchAction),
    Projectile(ProjectileAction),
}

impl Action {
    /// Runs one tick. A returned action is a follow-up push request,
    /// applied by the owning stack.
    pub fn update(
        &mut self,
        ctx: &mut UpdateCtx,
        elapsed: u32,
    ) -> Result<Option<Action>, UpdateError> {
        match self {
            Action::Idle(a) => a.update(ctx, elapsed),
            Action::Move(a) => a.update(ctx, elapsed),
            Action::Dead(a) => a.update(ctx, elapsed),
            Action::Decay(a) => a.update(ctx, elapsed),
            Action::Foundation(a) => a.update(ctx, elapsed),
            Action::Build(a) => a.update(ctx, elapsed),
            Action::Repair(a) => a.update(ctx, elapsed),
            Action::Gather(a) => a.update(ctx, elapsed),
            Action::Attack(a) => a.update(ctx, elapsed),
            Action::Heal(a) => a.update(ctx, elapsed),
            Action::Convert(a) => a.update(ctx, elapsed),
            Action::Garrison(a) => a.update(ctx, elapsed),
            Action::Ungarrison(a) => a.update(ctx, elapsed),
            Action::Train(a) => a.update(ctx, elapsed),
            Action::Research(a) => a.update(ctx, elapsed),
            Action::Projectile(a) => a.update(ctx, elapsed),
        }
    }

    /// Whether the action latched completion during an earlier update.
    /// Pure read; never consults state.
    pub fn completed(&self) -> bool {
        match self {
            Action::Idle(a) => a.completed(),
            Action::Move(a) => a.completed(),
            Action::Dead(a) => a.completed(),
            Action::Decay(a) => a.completed(),
            Action::Foundation(a) => a.completed(),
            Action::Build(a) => a.completed(),
            Action::Repair(a) => a.completed(),
            Action::Gather(a) => a.completed(),
            Action::Attack(a) => a.completed(),
            Action::Heal(a) => a.completed(),
            Action::Convert(a) => a.completed(),
            Action::Garrison(a) => a.completed(),
            Action::Ungarrison(a) => a.completed(),
            Action::Train(a) => a.completed(),
            Action::Research(a) => a.completed(),
            Action::Projectile(a) => a.completed(),
        }
    }

    /// Runs once when the action leaves the stack normally. A returned
    /// action is a continuation, pushed in the popped action's place.
    pub fn on_completion(&mut self, ctx: &mut UpdateCtx) -> Result<Option<Action>, UpdateError> {
        match self {
            Action::Idle(a) => a.on_completion(ctx),
            Action::Move(a) => a.on_completion(ctx),
            Action::Dead(a) => a.on_completion(ctx),
            Action::Decay(a) => a.on_completion(ctx),
            Action::Foundation(a) => a.on_completion(ctx),
            Action::Build(a) => a.on_completion(ctx),
            Action::Repair(a) => a.on_completion(ctx),
            Action::Gather(a) => a.on_completion(ctx),
            Action::Attack(a) => a.on_completion(ctx),
            Action::Heal(a) => a.on_completion(ctx),
            Action::Convert(a) => a.on_completion(ctx),
            Action::Garrison(a) => a.on_completion(ctx),
            Action::Ungarrison(a) => a.on_completion(ctx),
            Action::Train(a) => a.on_completion(ctx),
            Action::Research(a) => a.on_completion(ctx),
            Action::Projectile(a) => a.on_completion(ctx),
        }
    }

    /// Whether an external stop may cancel this action.
    pub fn allow_interrupt(&self) -> bool {
        match self {
            Action::Idle(a) => a.allow_interrupt(),
            Action::Move(a) => a.allow_interrupt(),
            Action::Dead(a) => a.allow_interrupt(),
            Action::Decay(a) => a.allow_interrupt(),
            Action::Foundation(a) => a.allow_interrupt(),
            Action::Build(a) => a.allow_interrupt(),
            Action::Repair(a) => a.allow_interrupt(),
            Action::Gather(a) => a.allow_interrupt(),
            Action::Attack(a) => a.allow_interrupt(),
            Action::Heal(a) => a.allow_interrupt(),
            Action::Convert(a) => a.allow_interrupt(),
            Action::Garrison(a) => a.allow_interrupt(),
            Action::Ungarrison(a) => a.allow_interrupt(),
            Action::Train(a) => a.allow_interrupt(),
            Action::Research(a) => a.allow_interrupt(),
            Action::Projectile(a) => a.allow_interrupt(),
        }
    }

    /// Whether the unit stays controllable while this action is on top:
    /// new orders may be pushed and secondaries keep running.
    pub fn allow_control(&self) -> bool {
        match self {
            Action::Idle(a) => a.allow_control(),
            Action::Move(a) => a.allow_control(),
            Action::Dead(a) => a.allow_control(),
            Action::Decay(a) => a.allow_control(),
            Action::Foundation(a) => a.allow_control(),
            Action::Build(a) => a.allow_control(),
            Action::Repair(a) => a.allow_control(),
            Action::Gather(a) => a.allow_control(),
            Action::Attack(a) => a.allow_control(),
            Action::Heal(a) => a.allow_control(),
            Action::Convert(a) => a.allow_control(),
            Action::Garrison(a) => a.allow_control(),
            Action::Ungarrison(a) => a.allow_control(),
            Action::Train(a) => a.allow_control(),
            Action::Research(a) => a.allow_control(),
            Action::Projectile(a) => a.allow_control(),
        }
    }

    pub fn graphic_type(&self) -> GraphicType {
        match self {
            Action::Idle(a) => a.graphic_type(),
            Action::Move(a) => a.graphic_type(),
            Action::Dead(a) => a.graphic_type(),
            Action::Decay(a) => a.graphic_type(),
            Action::Foundation(a) => a.graphic_type(),
            Action::Build(a) => a.graphic_type(),
            Action::Repair(a) => a.graphic_type(),
            Action::Gather(a) => a.graphic_type(),
            Action::Attack(a) => a.graphic_type(),
            Action::Heal(a) => a.graphic_type(),
            Action::Convert(a) => a.graphic_type(),
            Action::Garrison(a) => a.graphic_type(),
            Action::Ungarrison(a) => a.graphic_type(),
            Action::Train(a) => a.graphic_type(),
            Action::Research(a) => a.graphic_type(),
            Action::Projectile(a) => a.graphic_type(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::Idle(_) => "idle",
            Action::Move(_) => "move",
            Action::Dead(_) => "dead",
            Action::Decay(_) => "decay",
            Action::Foundation(_) => "foundation",
            Action::Build(_) => "build",
            Action::Repair(_) => "repair",
            Action::Gather(_) => "gather",
            Action::Attack(_) => "attack",
            Action::Heal(_) => "heal",
            Action::Convert(_) => "convert",
            Action::Garrison(_) => "garrison",
            Action::Ungarrison(_) => "ungarrison",
            Action::Train(_) => "train",
            Action::Research(_) => "research",
            Action::Projectile(_) => "projectile",
        }
    }

    pub fn is_foundation(&self) -> bool {
        matches!(self, Action::Foundation(_))
    }

    /// Animation set this action selects from `unit`'s template.
    pub fn current_graphics(&self, template: &crate::env::UnitTemplate) -> GraphicSet {
        template.graphic(self.graphic_type())
    }

    /// Draws paths and radii for actions that have them. Gated by
    /// [`EngineConfig::show_debug`](crate::config::EngineConfig::show_debug)
    /// at the engine level.
    pub fn draw_debug(&self, unit: &Unit, draw: &mut dyn DebugDraw) {
        match self {
            Action::Move(a) => a.draw_debug(unit, draw),
            Action::Build(a) => a.draw_debug(unit, draw),
            Action::Repair(a) => a.draw_debug(unit, draw),
            Action::Gather(a) => a.draw_debug(unit, draw),
            Action::Attack(a) => a.draw_debug(unit, draw),
            Action::Heal(a) => a.draw_debug(unit, draw),
            Action::Convert(a) => a.draw_debug(unit, draw),
            Action::Garrison(a) => a.draw_debug(unit, draw),
            _ => {}
        }
    }
}
