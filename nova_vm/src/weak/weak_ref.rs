// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::engine::{Agent, ExceptionType, JsResult};
use crate::heap::{CreateHeapData, WeakRefIndex};
use crate::types::Value;
use crate::weak::weak_key::{can_be_held_weakly, WeakKey};

/// A non-retaining handle to a [`WeakKey`]. Cleared (set to `None`) by
/// [`crate::weak::sweep_weak_collections`] once its target is no longer
/// reachable from anywhere else.
#[derive(Debug, Clone)]
pub struct WeakRefHeapData {
    pub(crate) target: Option<WeakKey>,
}

/// ### [26.1.1.1 WeakRef ( target )](https://tc39.es/ecma262/#sec-weak-ref-target)
pub fn create_weak_ref(agent: &mut Agent, target: Value) -> JsResult<WeakRefIndex> {
    let Some(key) = can_be_held_weakly(agent, target) else {
        return Err(agent.throw_exception(
            ExceptionType::TypeError,
            "target is not a non-null object or unique symbol",
        ));
    };
    Ok(agent.heap.create(WeakRefHeapData { target: Some(key) }))
}

/// ### [26.1.3.2 WeakRef.prototype.deref ( )](https://tc39.es/ecma262/#sec-weak-ref.prototype.deref)
pub fn weak_ref_deref(agent: &Agent, weak_ref: WeakRefIndex) -> Value {
    match agent.heap.weak_refs[weak_ref].target {
        Some(key) => key.to_value(),
        None => Value::Undefined,
    }
}
