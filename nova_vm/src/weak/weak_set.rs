// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::engine::{Agent, ExceptionType, JsResult};
use crate::heap::{CreateHeapData, WeakSetIndex};
use crate::types::Value;
use crate::weak::weak_key::{can_be_held_weakly, WeakKey};

#[derive(Debug, Clone, Default)]
pub struct WeakSetHeapData {
    pub(crate) entries: Vec<WeakKey>,
}

pub fn create_weak_set(agent: &mut Agent) -> WeakSetIndex {
    agent.heap.create(WeakSetHeapData::default())
}

/// ### [24.4.3.1 WeakSet.prototype.add ( value )](https://tc39.es/ecma262/#sec-weakset.prototype.add)
pub fn weak_set_add(agent: &mut Agent, set: WeakSetIndex, value: Value) -> JsResult<()> {
    let Some(key) = can_be_held_weakly(agent, value) else {
        return Err(agent.throw_exception(
            ExceptionType::TypeError,
            "Invalid value used in weak set",
        ));
    };
    let entries = &mut agent.heap.weak_sets[set].entries;
    if !entries.contains(&key) {
        entries.push(key);
    }
    Ok(())
}

/// ### [24.4.3.3 WeakSet.prototype.delete ( value )](https://tc39.es/ecma262/#sec-weakset.prototype.delete)
pub fn weak_set_delete(agent: &mut Agent, set: WeakSetIndex, value: Value) -> JsResult<bool> {
    let Some(key) = can_be_held_weakly(agent, value) else {
        return Ok(false);
    };
    let entries = &mut agent.heap.weak_sets[set].entries;
    let before = entries.len();
    entries.retain(|k| *k != key);
    Ok(entries.len() != before)
}

/// ### [24.4.3.4 WeakSet.prototype.has ( value )](https://tc39.es/ecma262/#sec-weakset.prototype.has)
pub fn weak_set_has(agent: &mut Agent, set: WeakSetIndex, value: Value) -> JsResult<bool> {
    let Some(key) = can_be_held_weakly(agent, value) else {
        return Ok(false);
    };
    Ok(agent.heap.weak_sets[set].entries.contains(&key))
}
