// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::engine::{Agent, ExceptionType, JsResult};
use crate::heap::{CreateHeapData, WeakMapIndex};
use crate::types::Value;
use crate::weak::weak_key::{can_be_held_weakly, WeakKey};

/// Keys are weak (swept by [`crate::weak::sweep_weak_collections`]);
/// values are held strongly for as long as their key is live. A plain
/// `Vec` of entries is used rather than a hash table: `WeakKey` entry
/// counts in realistic programs are small, and a linear scan keeps the
/// sweep pass (which must visit every entry regardless) just as cheap.
#[derive(Debug, Clone, Default)]
pub struct WeakMapHeapData {
    pub(crate) entries: Vec<(WeakKey, Value)>,
}

pub fn create_weak_map(agent: &mut Agent) -> WeakMapIndex {
    agent.heap.create(WeakMapHeapData::default())
}

fn require_key(agent: &mut Agent, key: Value) -> JsResult<Option<WeakKey>> {
    Ok(can_be_held_weakly(agent, key))
}

/// ### [24.3.3.3 WeakMap.prototype.get ( key )](https://tc39.es/ecma262/#sec-weakmap.prototype.get)
pub fn weak_map_get(agent: &mut Agent, map: WeakMapIndex, key: Value) -> JsResult<Value> {
    let Some(key) = require_key(agent, key)? else {
        return Ok(Value::Undefined);
    };
    Ok(agent.heap.weak_maps[map]
        .entries
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v.clone())
        .unwrap_or(Value::Undefined))
}

/// ### [24.3.3.2 WeakMap.prototype.set ( key, value )](https://tc39.es/ecma262/#sec-weakmap.prototype.set)
pub fn weak_map_set(agent: &mut Agent, map: WeakMapIndex, key: Value, value: Value) -> JsResult<()> {
    let Some(key) = require_key(agent, key)? else {
        return Err(agent.throw_exception(
            ExceptionType::TypeError,
            "Invalid value used as weak map key",
        ));
    };
    let entries = &mut agent.heap.weak_maps[map].entries;
    if let Some(slot) = entries.iter_mut().find(|(k, _)| *k == key) {
        slot.1 = value;
    } else {
        entries.push((key, value));
    }
    Ok(())
}

/// ### [24.3.3.1 WeakMap.prototype.delete ( key )](https://tc39.es/ecma262/#sec-weakmap.prototype.delete)
pub fn weak_map_delete(agent: &mut Agent, map: WeakMapIndex, key: Value) -> JsResult<bool> {
    let Some(key) = require_key(agent, key)? else {
        return Ok(false);
    };
    let entries = &mut agent.heap.weak_maps[map].entries;
    let before = entries.len();
    entries.retain(|(k, _)| *k != key);
    Ok(entries.len() != before)
}

/// ### [24.3.3.4 WeakMap.prototype.has ( key )](https://tc39.es/ecma262/#sec-weakmap.prototype.has)
pub fn weak_map_has(agent: &mut Agent, map: WeakMapIndex, key: Value) -> JsResult<bool> {
    let Some(key) = require_key(agent, key)? else {
        return Ok(false);
    };
    Ok(agent.heap.weak_maps[map].entries.iter().any(|(k, _)| *k == key))
}
