// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::engine::{Agent, ExceptionType, JsResult};
use crate::heap::{BoundFunctionIndex, BytecodeFunctionIndex, ClassIndex, NativeFunctionIndex};
use crate::object::Object;
use crate::types::{StringValue, Value};

/// A callable entity. Every variant shares the single `call` contract
/// (§4.5): agent, `this`, arguments in, a value or thrown error out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Bytecode(BytecodeFunctionIndex),
    Native(NativeFunctionIndex),
    Bound(BoundFunctionIndex),
    Class(ClassIndex),
}

impl Function {
    pub fn name(self, agent: &Agent) -> Option<StringValue> {
        match self {
            Function::Bytecode(i) => agent.heap.bytecode_functions[i].name,
            Function::Native(i) => agent.heap.native_functions[i].name,
            Function::Bound(i) => agent.heap.bound_functions[i].name,
            Function::Class(i) => agent.heap.classes[i].name,
        }
    }

    pub fn length(self, agent: &Agent) -> u32 {
        match self {
            Function::Bytecode(i) => agent.heap.bytecode_functions[i].length,
            Function::Native(i) => agent.heap.native_functions[i].length,
            Function::Bound(i) => agent.heap.bound_functions[i].length,
            Function::Class(_) => 0,
        }
    }

    pub fn is_constructor(self, agent: &Agent) -> bool {
        match self {
            Function::Bytecode(i) => agent.heap.bytecode_functions[i].is_constructor,
            Function::Native(i) => agent.heap.native_functions[i].is_constructor,
            Function::Bound(i) => agent.heap.bound_functions[i].target.is_constructor(agent),
            Function::Class(_) => true,
        }
    }
}

/// ### Call ( F, V [ , argumentsList ] )
pub fn call(agent: &mut Agent, callee: Value, this: Value, args: &[Value]) -> JsResult<Value> {
    let Value::Object(obj) = callee else {
        return Err(agent.throw_exception(ExceptionType::TypeError, "value is not a function"));
    };
    let Some(function) = agent.heap.objects[obj].callable else {
        return Err(agent.throw_exception(ExceptionType::TypeError, "value is not a function"));
    };
    call_function(agent, function, this, args)
}

pub fn call_function(
    agent: &mut Agent,
    function: Function,
    this: Value,
    args: &[Value],
) -> JsResult<Value> {
    match function {
        Function::Bytecode(index) => crate::executor::Vm::call(agent, index, this, args),
        Function::Native(index) => {
            let behavior = agent.heap.native_functions[index].behavior;
            behavior(agent, this, args)
        }
        Function::Bound(index) => {
            let data = agent.heap.bound_functions[index].clone();
            let mut full_args = data.bound_arguments;
            full_args.extend_from_slice(args);
            call_function(agent, data.target, data.bound_this, &full_args)
        }
        Function::Class(_) => Err(agent.throw_exception(
            ExceptionType::TypeError,
            "Class constructor cannot be invoked without 'new'",
        )),
    }
}

/// ### Construct ( F [ , argumentsList [ , newTarget ] ] )
pub fn construct(agent: &mut Agent, function: Function, args: &[Value]) -> JsResult<Value> {
    match function {
        Function::Class(index) => crate::functions::construct_class(agent, index, args),
        Function::Bound(index) => {
            let data = agent.heap.bound_functions[index].clone();
            let mut full_args = data.bound_arguments;
            full_args.extend_from_slice(args);
            construct(agent, data.target, &full_args)
        }
        Function::Bytecode(index) => {
            if !agent.heap.bytecode_functions[index].is_constructor {
                return Err(agent.throw_exception(ExceptionType::TypeError, "not a constructor"));
            }
            let prototype = Object::ordinary_object_prototype(agent);
            let instance = crate::object::ordinary_object_create(agent, Some(prototype));
            let this = Value::Object(instance);
            let result = crate::executor::Vm::call(agent, index, this.clone(), args)?;
            Ok(if result.is_object() { result } else { this })
        }
        Function::Native(index) => {
            if !agent.heap.native_functions[index].is_constructor {
                return Err(agent.throw_exception(ExceptionType::TypeError, "not a constructor"));
            }
            let behavior = agent.heap.native_functions[index].behavior;
            behavior(agent, Value::Undefined, args)
        }
    }
}
