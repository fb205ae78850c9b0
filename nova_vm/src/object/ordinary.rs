// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::engine::{Agent, ExceptionType, JsResult};
use crate::functions::Function;
use crate::heap::{CreateHeapData, ObjectIndex};
use crate::object::{InternalSlot, Object, ObjectHeapData};
use crate::types::{PropertyDescriptor, PropertyKey, Value};

/// Depth limit for prototype-chain walks, guarding against cycles a
/// malicious or buggy `Object.setPrototypeOf` chain could otherwise
/// spin forever on.
const MAX_PROTOTYPE_CHAIN_DEPTH: usize = 10_000;

pub fn ordinary_object_create(agent: &mut Agent, prototype: Option<ObjectIndex>) -> ObjectIndex {
    agent.heap.create(ObjectHeapData::new(prototype))
}

pub fn create_primitive_wrapper(agent: &mut Agent, primitive: Value) -> ObjectIndex {
    let prototype = Object::ordinary_object_prototype(agent);
    let mut data = ObjectHeapData::new(Some(prototype));
    data.internal = InternalSlot::Primitive(primitive);
    agent.heap.create(data)
}

/// Wraps a [`Function`] in an ordinary object so it can be handed out
/// as an observable JS value (`Value::Object`) - every function is
/// also an object, so there is no separate "function value" variant.
pub fn create_function_object(agent: &mut Agent, function: Function) -> ObjectIndex {
    let prototype = Object::ordinary_object_prototype(agent);
    let mut data = ObjectHeapData::new(Some(prototype));
    data.callable = Some(function);
    agent.heap.create(data)
}

impl Object {
    /// Every realm needs *some* root prototype for plain objects; this
    /// core has no pre-populated intrinsics table (§6 "Intrinsic
    /// registry" is left to the embedder), so freshly wrapped
    /// primitives and `class`-less object literals get a bare,
    /// prototype-less object as their prototype.
    pub fn ordinary_object_prototype(agent: &mut Agent) -> ObjectIndex {
        if let Some(proto) = agent.object_prototype {
            return proto;
        }
        let proto = agent.heap.create(ObjectHeapData::new(None));
        agent.object_prototype = Some(proto);
        proto
    }

    /// ### [OrdinaryGet ( O, P, Receiver )](https://tc39.es/ecma262/#sec-ordinaryget)
    pub fn get(&self, agent: &mut Agent, key: PropertyKey, receiver: Value) -> JsResult<Value> {
        if let InternalSlot::Proxy { target, handler } = agent.heap.objects[self.0].internal {
            return crate::object::proxy::proxy_get(agent, target, handler, key, receiver);
        }
        let mut current = Some(self.0);
        let mut depth = 0;
        while let Some(index) = current {
            depth += 1;
            if depth > MAX_PROTOTYPE_CHAIN_DEPTH {
                return Err(agent.throw_exception(ExceptionType::RangeError, "prototype chain too long"));
            }
            let desc = agent.heap.objects[index].shape.get(agent, &key).cloned();
            if let Some(desc) = desc {
                if desc.is_accessor_descriptor() {
                    return match desc.get {
                        Some(getter) => crate::functions::call_function(agent, getter, receiver, &[]),
                        None => Ok(Value::Undefined),
                    };
                }
                return Ok(desc.value.unwrap_or(Value::Undefined));
            }
            current = agent.heap.objects[index].prototype;
        }
        Ok(Value::Undefined)
    }

    /// ### [OrdinarySet ( O, P, V, Receiver )](https://tc39.es/ecma262/#sec-ordinaryset)
    pub fn set(&self, agent: &mut Agent, key: PropertyKey, value: Value, receiver: Value) -> JsResult<bool> {
        if let InternalSlot::Proxy { target, handler } = agent.heap.objects[self.0].internal {
            return crate::object::proxy::proxy_set(agent, target, handler, key, value, receiver);
        }
        let mut current = Some(self.0);
        while let Some(index) = current {
            let desc = agent.heap.objects[index].shape.get(agent, &key).cloned();
            if let Some(desc) = desc {
                if desc.is_accessor_descriptor() {
                    return match desc.set {
                        Some(setter) => {
                            crate::functions::call_function(agent, setter, receiver, &[value])?;
                            Ok(true)
                        }
                        None => Ok(false),
                    };
                }
                if index == self.0 {
                    if desc.writable == Some(false) {
                        return Ok(false);
                    }
                    let mut new_desc = desc;
                    new_desc.value = Some(value);
                    agent.heap.objects[index].shape.insert(agent, key, new_desc);
                    return Ok(true);
                }
                if desc.writable == Some(false) {
                    return Ok(false);
                }
                break;
            }
            current = agent.heap.objects[index].prototype;
        }
        // No existing property found anywhere in the chain (or an
        // inherited writable data property): create an own data
        // property on the receiver, per OrdinaryCreateFromConstructor
        // fallthrough of OrdinarySet.
        if !agent.heap.objects[self.0].extensible {
            return Ok(false);
        }
        let desc = PropertyDescriptor::new_data_descriptor(value);
        agent.heap.objects[self.0].shape.insert(agent, key, desc);
        Ok(true)
    }

    /// ### [OrdinaryHasProperty ( O, P )](https://tc39.es/ecma262/#sec-ordinaryhasproperty)
    pub fn has(&self, agent: &mut Agent, key: PropertyKey) -> JsResult<bool> {
        if let InternalSlot::Proxy { target, handler } = agent.heap.objects[self.0].internal {
            return crate::object::proxy::proxy_has(agent, target, handler, key);
        }
        let mut current = Some(self.0);
        while let Some(index) = current {
            if agent.heap.objects[index].shape.get(agent, &key).is_some() {
                return Ok(true);
            }
            current = agent.heap.objects[index].prototype;
        }
        Ok(false)
    }

    /// ### [OrdinaryDelete ( O, P )](https://tc39.es/ecma262/#sec-ordinarydelete)
    pub fn delete(&self, agent: &mut Agent, key: PropertyKey) -> JsResult<bool> {
        if let InternalSlot::Proxy { target, handler } = agent.heap.objects[self.0].internal {
            return crate::object::proxy::proxy_delete(agent, target, handler, key);
        }
        let Some(desc) = agent.heap.objects[self.0].shape.get(agent, &key).cloned() else {
            return Ok(true);
        };
        if desc.configurable == Some(false) {
            return Ok(false);
        }
        Ok(agent.heap.objects[self.0].shape.delete(agent, &key))
    }

    /// ### [OrdinaryDefineOwnProperty ( O, P, Desc )](https://tc39.es/ecma262/#sec-ordinarydefineownproperty)
    pub fn define_own_property(
        &self,
        agent: &mut Agent,
        key: PropertyKey,
        descriptor: PropertyDescriptor,
    ) -> JsResult<bool> {
        let existing = agent.heap.objects[self.0].shape.get(agent, &key).cloned();
        match existing {
            None => {
                if !agent.heap.objects[self.0].extensible {
                    return Ok(false);
                }
                let complete = descriptor.complete();
                agent.heap.objects[self.0].shape.insert(agent, key, complete);
                Ok(true)
            }
            Some(current) => {
                if current.configurable == Some(false) {
                    let changes_configurable = descriptor.configurable == Some(true);
                    let changes_enumerable =
                        matches!(descriptor.enumerable, Some(e) if Some(e) != current.enumerable);
                    let changes_kind = (descriptor.is_accessor_descriptor()
                        && current.is_data_descriptor())
                        || (descriptor.is_data_descriptor() && current.is_accessor_descriptor());
                    if changes_configurable || changes_enumerable || changes_kind {
                        return Ok(false);
                    }
                    if current.is_data_descriptor()
                        && current.writable == Some(false)
                        && descriptor.writable == Some(true)
                    {
                        return Ok(false);
                    }
                    if current.is_data_descriptor()
                        && current.writable == Some(false)
                        && matches!(&descriptor.value, Some(v) if !v.same_value(agent, current.value.as_ref().unwrap()))
                    {
                        return Ok(false);
                    }
                }
                let merged = current.merge(&descriptor);
                agent.heap.objects[self.0].shape.insert(agent, key, merged);
                Ok(true)
            }
        }
    }

    /// ### [OrdinaryOwnPropertyKeys ( O )](https://tc39.es/ecma262/#sec-ordinaryownpropertykeys)
    /// Integer-index keys first (ascending), then strings, then
    /// symbols, both of the latter in insertion order.
    pub fn own_property_keys(&self, agent: &Agent) -> Vec<PropertyKey> {
        let mut indices: Vec<u32> = Vec::new();
        let mut strings = Vec::new();
        let mut symbols = Vec::new();
        for key in agent.heap.objects[self.0].shape.keys() {
            match key {
                PropertyKey::Integer(i) => indices.push(*i),
                PropertyKey::Symbol(_) => symbols.push(*key),
                _ => strings.push(*key),
            }
        }
        indices.sort_unstable();
        indices
            .into_iter()
            .map(PropertyKey::Integer)
            .chain(strings)
            .chain(symbols)
            .collect()
    }

    pub fn enumerable_keys(&self, agent: &Agent) -> Vec<PropertyKey> {
        agent.heap.objects[self.0]
            .shape
            .entries()
            .filter(|(k, d)| !k.is_symbol() && d.enumerable == Some(true))
            .map(|(k, _)| *k)
            .collect()
    }

    pub fn get_prototype_of(&self, agent: &Agent) -> Option<ObjectIndex> {
        agent.heap.objects[self.0].prototype
    }

    pub fn set_prototype_of(&self, agent: &mut Agent, prototype: Option<ObjectIndex>) -> bool {
        // Cycle check: walk from the candidate prototype back up; if we
        // ever see `self`, refuse (SetImmutablePrototype-adjacent guard).
        let mut current = prototype;
        let mut depth = 0;
        while let Some(index) = current {
            if index == self.0 {
                return false;
            }
            depth += 1;
            if depth > MAX_PROTOTYPE_CHAIN_DEPTH {
                return false;
            }
            current = agent.heap.objects[index].prototype;
        }
        agent.heap.objects[self.0].prototype = prototype;
        true
    }

    pub fn is_extensible(&self, agent: &Agent) -> bool {
        agent.heap.objects[self.0].extensible
    }

    pub fn prevent_extensions(&self, agent: &mut Agent) {
        agent.heap.objects[self.0].extensible = false;
    }

    pub fn is_callable(&self, agent: &Agent) -> bool {
        agent.heap.objects[self.0].is_callable()
    }
}
