//! Deterministic per-unit behavior engine for lockstep RTS simulations.
//!
//! `engine-core` models each unit's behavior as a stack of closed [`Action`]
//! variants driven by integer tick deltas. All state mutation flows through
//! [`Engine::update`]; pathfinding and unit type data arrive through the
//! oracle traits in [`env`], so the core performs no I/O and replays
//! identically on every peer.
pub mod action;
pub mod config;
pub mod coord;
pub mod engine;
pub mod env;
pub mod graphics;
pub mod state;
pub mod timer;
pub use action::{
    Action, ActionStack, AttackAction, BuildAction, ConvertAction, DeadAction, DeathHook,
    DecayAction, FoundationAction, GarrisonAction, GatherAction, HealAction, IdleAction,
    MoveAction, MoveGoal, ProjectileAction, PushError, Pursuit, PursuitStep, RepairAction,
    ResearchAction, TrainAction, UngarrisonAction, UpdateCtx, UpdateError,
};
pub use config::EngineConfig;
pub use coord::{Facing, Phys, Phys3};
pub use engine::Engine;
pub use env::{Env, OracleError, Path, PathOracle, TemplateOracle, UnitTemplate};
pub use graphics::{DebugDraw, GraphicSet, GraphicSetId, GraphicType};
pub use state::{
    AttackAttribute, Attributes, Capabilities, Carrying, ConvertAttribute, GatherAttribute,
    HealAttribute, PlayerId, ResourceBank, ResourceBundle, ResourceClasses, ResourceKind,
    ResourceNode, SimState, TechId, Unit, UnitArena, UnitId, UnitTypeId,
};
pub use timer::IntervalTimer;
