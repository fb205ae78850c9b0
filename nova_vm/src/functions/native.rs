// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::engine::{Agent, JsResult};
use crate::heap::{CreateHeapData, NativeFunctionIndex};
use crate::types::{StringValue, Value};

/// A host-provided callback. Takes the agent, the call's `this`, and
/// its arguments; returns a value or propagates a `JsError`.
pub type NativeFn = fn(&mut Agent, Value, &[Value]) -> JsResult<Value>;

#[derive(Debug, Clone)]
pub struct NativeFunctionHeapData {
    pub name: Option<StringValue>,
    pub length: u32,
    pub is_constructor: bool,
    pub behavior: NativeFn,
}

/// ### Embedder entry point: define a global/native function (§6 "Native-function contract")
pub fn create_native_function(
    agent: &mut Agent,
    name: Option<&str>,
    length: u32,
    is_constructor: bool,
    behavior: NativeFn,
) -> NativeFunctionIndex {
    agent.heap.create(NativeFunctionHeapData {
        name: name.map(|n| StringValue::from_str(agent, n)),
        length,
        is_constructor,
        behavior,
    })
}
