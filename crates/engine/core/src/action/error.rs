//! Action and stack error types.
//!
//! In-game setbacks (lost targets, blocked paths, empty stockpiles) are not
//! errors; they resolve into ordinary completion. Errors here mark contract
//! violations: a simulation missing its oracles, or stack misuse.

use crate::env::OracleError;
use crate::state::UnitId;

/// A per-tick action update could not run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum UpdateError {
    #[error(transparent)]
    Oracle(#[from] OracleError),

    /// The unit whose stack is being updated vanished from the arena.
    /// The engine never does this; it indicates embedder misuse.
    #[error("acting unit {0} missing from the arena")]
    ActorMissing(UnitId),
}

/// A push onto a unit's action stack was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PushError {
    /// The topmost action denies control while it runs (dead, decaying,
    /// under construction, in flight).
    #[error("top action `{0}` does not allow control")]
    Exclusive(&'static str),

    #[error("action stack is at capacity")]
    StackFull,
}
