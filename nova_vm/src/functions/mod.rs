// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polymorphic callables (§4.5): bytecode functions, native functions,
//! bound functions, and classes, all reachable through the single
//! [`Function`] sum and its uniform `call`/`construct` contract.

mod bound;
mod bytecode;
mod class;
mod function;
mod native;

pub use bound::{bound_function_create, BoundFunctionHeapData};
pub use bytecode::{create_bytecode_function, BytecodeFunctionHeapData, CompiledBody, FunctionKind};
pub use class::ClassHeapData;
pub use function::{call, call_function, construct, Function};
pub use native::{create_native_function, NativeFn, NativeFunctionHeapData};

use crate::engine::{Agent, JsResult};
use crate::heap::ClassIndex;
use crate::object::{ordinary_object_create, Object};
use crate::types::Value;

/// ### Super dispatch for `class` construction (§4.5)
///
/// A derived class first constructs through its superclass chain, then
/// layers its own instance field initializers onto the resulting
/// `this`, then runs its own constructor body (if any) against that
/// same `this`. A base class (no `super_class`) just allocates a plain
/// instance off its own prototype.
pub(crate) fn construct_class(agent: &mut Agent, index: ClassIndex, args: &[Value]) -> JsResult<Value> {
    let data = agent.heap.classes[index].clone();
    let this_value = if let Some(super_class) = data.super_class {
        construct(agent, super_class, args)?
    } else {
        let instance = ordinary_object_create(agent, Some(data.prototype));
        Value::Object(instance)
    };
    let Value::Object(this_object) = this_value.clone() else {
        return Err(agent.throw_exception(
            crate::engine::ExceptionType::TypeError,
            "super constructor did not return an object",
        ));
    };
    for (key, initial_value) in &data.instance_fields {
        Object::from(this_object).set(agent, key.clone(), initial_value.clone(), this_value.clone())?;
    }
    if let Some(ctor) = data.constructor {
        let result = call_function(agent, ctor, this_value.clone(), args)?;
        if result.is_object() {
            return Ok(result);
        }
    }
    Ok(this_value)
}
