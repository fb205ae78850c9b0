// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::engine::Agent;
use crate::functions::Function;
use crate::heap::CreateHeapData;
use crate::types::{StringValue, Value};

#[derive(Debug, Clone)]
pub struct BoundFunctionHeapData {
    pub target: Function,
    pub bound_this: Value,
    pub bound_arguments: Vec<Value>,
    pub name: Option<StringValue>,
    pub length: u32,
}

/// ### [10.4.1.3 BoundFunctionCreate ( targetFunction, boundThis, boundArgs )](https://tc39.es/ecma262/#sec-boundfunctioncreate)
pub fn bound_function_create(
    agent: &mut Agent,
    target: Function,
    bound_this: Value,
    bound_arguments: Vec<Value>,
) -> crate::heap::BoundFunctionIndex {
    let target_length = target.length(agent);
    let length = target_length.saturating_sub(bound_arguments.len() as u32);
    let name = target
        .name(agent)
        .map(|n| n.as_str(agent).into_owned())
        .map(|n| StringValue::from_str(agent, &format!("bound {n}")))
        .or_else(|| Some(StringValue::from_str(agent, "bound ")));
    agent.heap.create(BoundFunctionHeapData {
        target,
        bound_this,
        bound_arguments,
        name,
        length,
    })
}
