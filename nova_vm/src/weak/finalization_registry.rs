// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::engine::{Agent, ExceptionType, Job, JsResult};
use crate::functions::{call_function, Function};
use crate::heap::{CreateHeapData, FinalizationRegistryIndex};
use crate::types::Value;
use crate::weak::weak_key::{can_be_held_weakly, WeakKey};

/// A single registered target: the weak target itself (cleared by the
/// sweep once collected, at which point the cell becomes a pending
/// cleanup), the strongly-held value passed to the cleanup callback,
/// and an optional weak unregister token.
#[derive(Debug, Clone)]
pub struct Cell {
    pub(crate) target: Option<WeakKey>,
    pub(crate) held_value: Value,
    pub(crate) unregister_token: Option<WeakKey>,
}

#[derive(Debug, Clone)]
pub struct FinalizationRegistryHeapData {
    pub(crate) cleanup_callback: Function,
    pub(crate) cells: Vec<Cell>,
}

/// ### [27.4.1.1 FinalizationRegistry ( cleanupCallback )](https://tc39.es/ecma262/#sec-finalization-registry-cleanup-callback)
pub fn create_finalization_registry(agent: &mut Agent, cleanup_callback: Function) -> FinalizationRegistryIndex {
    agent.heap.create(FinalizationRegistryHeapData {
        cleanup_callback,
        cells: Vec::new(),
    })
}

/// ### [27.4.3.3 FinalizationRegistry.prototype.register ( target, heldValue [ , unregisterToken ] )](https://tc39.es/ecma262/#sec-finalization-registry.prototype.register)
pub fn finalization_registry_register(
    agent: &mut Agent,
    registry: FinalizationRegistryIndex,
    target: Value,
    held_value: Value,
    unregister_token: Option<Value>,
) -> JsResult<()> {
    let Some(target_key) = can_be_held_weakly(agent, target) else {
        return Err(agent.throw_exception(
            ExceptionType::TypeError,
            "target is not a non-null object or unique symbol",
        ));
    };
    if held_value == target {
        return Err(agent.throw_exception(
            ExceptionType::TypeError,
            "target and held value must not be the same",
        ));
    }
    let unregister_token = match unregister_token {
        Some(token) => {
            let Some(key) = can_be_held_weakly(agent, token) else {
                return Err(agent.throw_exception(
                    ExceptionType::TypeError,
                    "unregisterToken is not a non-null object or unique symbol",
                ));
            };
            Some(key)
        }
        None => None,
    };
    agent.heap.finalization_registries[registry].cells.push(Cell {
        target: Some(target_key),
        held_value,
        unregister_token,
    });
    Ok(())
}

/// ### [27.4.3.4 FinalizationRegistry.prototype.unregister ( unregisterToken )](https://tc39.es/ecma262/#sec-finalization-registry.prototype.unregister)
pub fn finalization_registry_unregister(
    agent: &mut Agent,
    registry: FinalizationRegistryIndex,
    unregister_token: Value,
) -> JsResult<bool> {
    let Some(token) = can_be_held_weakly(agent, unregister_token) else {
        return Err(agent.throw_exception(
            ExceptionType::TypeError,
            "unregisterToken is not a non-null object or unique symbol",
        ));
    };
    let cells = &mut agent.heap.finalization_registries[registry].cells;
    let before = cells.len();
    cells.retain(|cell| cell.unregister_token != Some(token));
    Ok(cells.len() != before)
}

/// Runs every pending cleanup (a cell whose target was cleared by the
/// last sweep) synchronously as a microtask job, per [27.4.2 "a clean-up
/// callback ... is called with no arguments and no this value"]. Called
/// from `crate::weak::sweep_weak_collections` once per swept registry.
pub(crate) fn enqueue_pending_cleanups(agent: &mut Agent, registry: FinalizationRegistryIndex) {
    let pending: Vec<Value> = {
        let data = &mut agent.heap.finalization_registries[registry];
        let mut pending = Vec::new();
        data.cells.retain(|cell| {
            if cell.target.is_none() {
                pending.push(cell.held_value.clone());
                false
            } else {
                true
            }
        });
        pending
    };
    for held_value in pending {
        let callback = agent.heap.finalization_registries[registry].cleanup_callback;
        agent.enqueue_job(Job {
            inner: crate::engine::InnerJob::FinalizationRegistryCleanup(FinalizationRegistryCleanupJob {
                callback,
                held_value,
            }),
        });
    }
}

#[derive(Debug, Clone)]
pub struct FinalizationRegistryCleanupJob {
    pub callback: Function,
    pub held_value: Value,
}

impl FinalizationRegistryCleanupJob {
    pub fn run(self, agent: &mut Agent) -> JsResult<()> {
        call_function(agent, self.callback, Value::Undefined, &[self.held_value])?;
        Ok(())
    }
}
