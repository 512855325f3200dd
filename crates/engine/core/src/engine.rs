//! The deterministic per-tick driver.
//!
//! One [`Engine::update`] call advances every unit by the same elapsed tick
//! delta, in arena slot order, so identical inputs produce identical states
//! on every peer.

use std::mem;

use crate::action::kinds::{DeadAction, DeathHook, IdleAction};
use crate::action::{Action, UpdateCtx, UpdateError};
use crate::env::Env;
use crate::graphics::DebugDraw;
use crate::state::{SimState, UnitId};

/// Stateless driver over a [`SimState`] plus its environment.
pub struct Engine;

impl Engine {
    /// Advances the whole simulation by `elapsed` ticks.
    ///
    /// Per unit, in slot order: a freshly killed unit has its stack replaced
    /// by the death sequence (pending work stops without completions) and
    /// its garrisoned occupants released, a
    /// living unit with an empty stack receives Idle, then the stack runs
    /// one tick. The stack is detached from its unit while it runs, so
    /// actions may freely mutate any unit, including their own.
    ///
    /// Units spawned during the tick (projectiles, trained units) are not
    /// updated until the next call; units removed during the tick are
    /// skipped.
    pub fn update(state: &mut SimState, env: Env<'_>, elapsed: u32) -> Result<(), UpdateError> {
        state.clock += u64::from(elapsed);
        for unit_id in state.units.ids() {
            let Some(unit) = state.units.get_mut(unit_id) else {
                continue;
            };
            let newly_dead = !unit.is_alive() && !unit.stack.is_dying();
            if newly_dead {
                unit.stack.clear_without_completion();
                if let Err(err) = unit.stack.force_push(Action::Dead(DeadAction::new(None))) {
                    tracing::warn!(unit = %unit_id, %err, "could not start death sequence");
                }
            } else if unit.is_alive() && unit.stack.is_empty() {
                let idle = IdleAction::new(env.config().idle_scan_interval);
                if let Err(err) = unit.stack.force_push(Action::Idle(idle)) {
                    tracing::warn!(unit = %unit_id, %err, "could not seed idle action");
                }
            }
            if newly_dead {
                Self::release_garrisoned(state, unit_id);
            }
            Self::update_unit(state, env, unit_id, elapsed)?;
        }
        Ok(())
    }

    /// A dying host cannot keep its bay shut: occupants step out at the
    /// corpse's position. A host lost off the map takes them with it.
    fn release_garrisoned(state: &mut SimState, host: UnitId) {
        let Some(unit) = state.units.get_mut(host) else {
            return;
        };
        if unit.garrisoned.is_empty() {
            return;
        }
        let door = unit.position;
        let occupants: Vec<UnitId> = unit.garrisoned.drain(..).collect();
        for id in occupants {
            let Some(occupant) = state.units.get_mut(id) else {
                continue;
            };
            match door {
                Some(position) => {
                    occupant.position = Some(position);
                    tracing::debug!(unit = %id, %host, "released from dying host");
                }
                None => {
                    occupant.hp = 0;
                    tracing::debug!(unit = %id, %host, "lost with off-map host");
                }
            }
        }
    }

    fn update_unit(
        state: &mut SimState,
        env: Env<'_>,
        unit: UnitId,
        elapsed: u32,
    ) -> Result<(), UpdateError> {
        let Some(actor) = state.units.get_mut(unit) else {
            return Ok(());
        };
        let mut stack = mem::take(&mut actor.stack);
        let mut ctx = UpdateCtx { state, env, unit };
        let result = stack.update(&mut ctx, elapsed);
        // The unit may have removed itself (decay, spent projectile).
        if let Some(actor) = state.units.get_mut(unit) {
            actor.stack = stack;
        }
        result
    }

    /// Kills a unit immediately. Its pending actions stop without running
    /// completions and the death sequence starts on the next tick; `hook`
    /// fires when the dying animation finishes.
    pub fn kill(state: &mut SimState, unit: UnitId, hook: Option<DeathHook>) {
        let Some(victim) = state.units.get_mut(unit) else {
            return;
        };
        victim.hp = 0;
        victim.stack.clear_without_completion();
        if let Err(err) = victim.stack.force_push(Action::Dead(DeadAction::new(hook))) {
            tracing::warn!(%unit, %err, "could not start death sequence");
        }
        Self::release_garrisoned(state, unit);
    }

    /// Cancels a unit's interruptible actions (an external stop order).
    /// Returns how many actions were cancelled.
    pub fn interrupt(
        state: &mut SimState,
        env: Env<'_>,
        unit: UnitId,
    ) -> Result<usize, UpdateError> {
        let Some(actor) = state.units.get_mut(unit) else {
            return Ok(0);
        };
        let mut stack = mem::take(&mut actor.stack);
        let mut ctx = UpdateCtx { state, env, unit };
        let result = stack.interrupt(&mut ctx);
        if let Some(actor) = state.units.get_mut(unit) {
            actor.stack = stack;
        }
        result
    }

    /// Draws every unit's current action through `draw`, when the
    /// configuration enables debug drawing.
    pub fn draw_debug(state: &SimState, env: Env<'_>, draw: &mut dyn DebugDraw) {
        if !env.config().show_debug {
            return;
        }
        for unit in state.units.iter() {
            if let Some(action) = unit.stack.top() {
                action.draw_debug(unit, draw);
            }
        }
    }
}
