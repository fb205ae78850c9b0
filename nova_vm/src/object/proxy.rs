// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Proxy trap dispatch (§4.3). Each trap checks whether the handler
//! exposes a callable property of the matching name; if so it is
//! invoked with the documented argument shape, otherwise the operation
//! is forwarded to the target unchanged.

use crate::engine::{Agent, ExceptionType, JsResult};
use crate::functions::call;
use crate::heap::ObjectIndex;
use crate::object::Object;
use crate::types::{PropertyKey, Value};

fn trap(agent: &mut Agent, handler: ObjectIndex, name: &str) -> JsResult<Option<Value>> {
    let key = PropertyKey::from_str(agent, name);
    let value = Object::from(handler).get(agent, key, Value::Object(handler))?;
    if matches!(&value, Value::Undefined | Value::Null) {
        return Ok(None);
    }
    let Value::Object(method) = &value else {
        return Err(agent.throw_exception(ExceptionType::TypeError, "proxy trap is not callable"));
    };
    if !Object::from(*method).is_callable(agent) {
        return Err(agent.throw_exception(ExceptionType::TypeError, "proxy trap is not callable"));
    }
    Ok(Some(value))
}

pub fn proxy_get(
    agent: &mut Agent,
    target: ObjectIndex,
    handler: ObjectIndex,
    key: PropertyKey,
    receiver: Value,
) -> JsResult<Value> {
    match trap(agent, handler, "get")? {
        Some(trap_fn) => {
            let key_value = key.convert_to_value(agent);
            call(agent, trap_fn, Value::Object(handler), &[Value::Object(target), key_value, receiver])
        }
        None => Object::from(target).get(agent, key, receiver),
    }
}

pub fn proxy_set(
    agent: &mut Agent,
    target: ObjectIndex,
    handler: ObjectIndex,
    key: PropertyKey,
    value: Value,
    receiver: Value,
) -> JsResult<bool> {
    match trap(agent, handler, "set")? {
        Some(trap_fn) => {
            let key_value = key.convert_to_value(agent);
            let result = call(
                agent,
                trap_fn,
                Value::Object(handler),
                &[Value::Object(target), key_value, value, receiver],
            )?;
            Ok(result.to_boolean(agent))
        }
        None => Object::from(target).set(agent, key, value, receiver),
    }
}

pub fn proxy_has(
    agent: &mut Agent,
    target: ObjectIndex,
    handler: ObjectIndex,
    key: PropertyKey,
) -> JsResult<bool> {
    match trap(agent, handler, "has")? {
        Some(trap_fn) => {
            let key_value = key.convert_to_value(agent);
            let result = call(agent, trap_fn, Value::Object(handler), &[Value::Object(target), key_value])?;
            Ok(result.to_boolean(agent))
        }
        None => Object::from(target).has(agent, key),
    }
}

pub fn proxy_delete(
    agent: &mut Agent,
    target: ObjectIndex,
    handler: ObjectIndex,
    key: PropertyKey,
) -> JsResult<bool> {
    match trap(agent, handler, "deleteProperty")? {
        Some(trap_fn) => {
            let key_value = key.convert_to_value(agent);
            let result = call(agent, trap_fn, Value::Object(handler), &[Value::Object(target), key_value])?;
            Ok(result.to_boolean(agent))
        }
        None => Object::from(target).delete(agent, key),
    }
}

/// `ownKeys` trap results must be an array-like of keys; this
/// implementation accepts anything array-like with a numeric `length`
/// and reads each indexed element as a key, converting strings/symbols
/// and rejecting anything else (`TypeError`).
pub fn proxy_own_keys(
    agent: &mut Agent,
    target: ObjectIndex,
    handler: ObjectIndex,
) -> JsResult<Vec<PropertyKey>> {
    match trap(agent, handler, "ownKeys")? {
        Some(trap_fn) => {
            let result = call(agent, trap_fn, Value::Object(handler), &[Value::Object(target)])?;
            let Value::Object(list) = result else {
                return Err(agent.throw_exception(ExceptionType::TypeError, "ownKeys trap result is not an object"));
            };
            let length_key = PropertyKey::from_str(agent, "length");
            let length = Object::from(list).get(agent, length_key, Value::Object(list))?;
            let length = crate::types::conversion::to_number(agent, length)? as u32;
            let mut keys = Vec::with_capacity(length as usize);
            for i in 0..length {
                let index_key = PropertyKey::from_str(agent, &i.to_string());
                let item = Object::from(list).get(agent, index_key, Value::Object(list))?;
                keys.push(item.to_property_key(agent)?);
            }
            Ok(keys)
        }
        None => Ok(Object::from(target).own_property_keys(agent)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Options;
    use crate::functions::{create_native_function, Function};
    use crate::heap::CreateHeapData;
    use crate::object::{create_function_object, ordinary_object_create, InternalSlot, ObjectHeapData};
    use crate::types::PropertyDescriptor;

    fn get_trap(agent: &mut Agent, _this: Value, args: &[Value]) -> JsResult<Value> {
        // `get(target, key, receiver)`; always returns a fixed marker so
        // the test can tell the trap actually ran.
        let _ = args;
        Ok(Value::from_str(agent, "trapped"))
    }

    #[test]
    fn get_invokes_a_defined_trap_instead_of_forwarding() {
        let mut agent = Agent::new(Options::default());
        let target = ordinary_object_create(&mut agent, None);

        let handler = ordinary_object_create(&mut agent, None);
        let trap_fn = create_native_function(&mut agent, Some("get"), 3, false, get_trap);
        let trap_method = Value::Object(create_function_object(&mut agent, Function::Native(trap_fn)));
        let get_key = PropertyKey::from_str(&mut agent, "get");
        Object::from(handler)
            .define_own_property(&mut agent, get_key, PropertyDescriptor::new_data_descriptor(trap_method))
            .unwrap();

        let mut data = ObjectHeapData::new(None);
        data.internal = InternalSlot::Proxy { target, handler };
        let proxy = agent.heap.create(data);

        let key = PropertyKey::from_str(&mut agent, "anything");
        let result = Object::from(proxy).get(&mut agent, key, Value::Object(proxy)).unwrap();
        assert_eq!(result, Value::from_str(&mut agent, "trapped"));
    }

    #[test]
    fn get_forwards_to_the_target_when_no_trap_is_defined() {
        let mut agent = Agent::new(Options::default());
        let target = ordinary_object_create(&mut agent, None);
        let key = PropertyKey::from_str(&mut agent, "prop");
        Object::from(target)
            .define_own_property(&mut agent, key, PropertyDescriptor::new_data_descriptor(Value::Number(42.0)))
            .unwrap();

        let handler = ordinary_object_create(&mut agent, None);
        let mut data = ObjectHeapData::new(None);
        data.internal = InternalSlot::Proxy { target, handler };
        let proxy = agent.heap.create(data);

        let result = Object::from(proxy).get(&mut agent, key, Value::Object(proxy)).unwrap();
        assert_eq!(result, Value::Number(42.0));
    }
}
