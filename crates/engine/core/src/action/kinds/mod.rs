//! The concrete action kinds a unit can run.

pub mod combat;
pub mod decay;
pub mod foundation;
pub mod garrison;
pub mod gather;
pub mod idle;
pub mod movement;
pub mod production;
pub mod projectile;

pub use combat::{
    apply_damage, attack_range, convert_range, heal_range, AttackAction, ConvertAction,
    HealAction,
};
pub use decay::{DeadAction, DeathHook, DecayAction};
pub use foundation::{BuildAction, FoundationAction, RepairAction};
pub use garrison::{GarrisonAction, UngarrisonAction};
pub use gather::GatherAction;
pub use idle::IdleAction;
pub use movement::{MoveAction, MoveGoal};
pub use production::{ResearchAction, TrainAction};
pub use projectile::ProjectileAction;
