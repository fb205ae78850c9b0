// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sync iterator protocol and `for-of`/`for-in` traversal (§4.7).
//!
//! This core has no well-known-symbol table (§6 leaves intrinsics to
//! the embedder), so `Symbol.iterator`/`Symbol.asyncIterator` are
//! modeled as entries in the same global symbol registry `Symbol.for`
//! uses, keyed by their spec names, rather than as engine-internal
//! symbols no property lookup could ever observe. This is a deliberate
//! simplification: it makes them indistinguishable from a user
//! registering the same string via `Symbol.for`, which the full
//! specification does not allow.

use crate::engine::{Agent, ExceptionType, JsResult};
use crate::functions::{call_function, Function};
use crate::object::Object;
use crate::types::{PropertyKey, Value};

pub const SYMBOL_ITERATOR_KEY: &str = "Symbol.iterator";
pub const SYMBOL_ASYNC_ITERATOR_KEY: &str = "Symbol.asyncIterator";

pub fn well_known_symbol(agent: &mut Agent, name: &str) -> PropertyKey {
    PropertyKey::from_symbol(agent.symbol_for(name))
}

#[derive(Debug, Clone)]
pub struct IteratorRecord {
    pub iterator: Object,
    pub next_method: Function,
}

/// ### [7.4.2 GetIteratorFromMethod ( obj, method )](https://tc39.es/ecma262/#sec-getiteratorfrommethod)
pub fn get_iterator_from_method(agent: &mut Agent, obj: Value, method: Value) -> JsResult<IteratorRecord> {
    let iterator_value = crate::functions::call(agent, method, obj, &[])?;
    let Value::Object(iterator_object) = iterator_value else {
        return Err(agent.throw_exception(ExceptionType::TypeError, "Result of the Symbol.iterator method is not an object"));
    };
    let iterator = Object::from(iterator_object);
    let next_key = PropertyKey::from_str(agent, "next");
    let next_value = iterator.get(agent, next_key, Value::Object(iterator_object))?;
    let Value::Object(next_object) = next_value else {
        return Err(agent.throw_exception(ExceptionType::TypeError, "iterator.next is not a function"));
    };
    let Some(next_method) = agent.heap.objects[next_object].callable else {
        return Err(agent.throw_exception(ExceptionType::TypeError, "iterator.next is not a function"));
    };
    Ok(IteratorRecord { iterator, next_method })
}

/// ### [7.4.3 GetIterator ( obj, kind )](https://tc39.es/ecma262/#sec-getiterator)
pub fn get_iterator(agent: &mut Agent, obj: Value) -> JsResult<IteratorRecord> {
    let key = well_known_symbol(agent, SYMBOL_ITERATOR_KEY);
    let method = crate::types::conversion::to_object(agent, obj.clone())?.get(agent, key, obj.clone())?;
    get_iterator_from_method(agent, obj, method)
}

/// ### [7.4.4 GetIteratorDirect ( obj )](https://tc39.es/ecma262/#sec-getiteratordirect)
/// Wraps an object that is already an iterator (has its own callable
/// `next`) without invoking `Symbol.iterator` - used for objects
/// produced by generator functions, which are their own iterator.
pub fn get_iterator_direct(agent: &mut Agent, obj: Value) -> JsResult<IteratorRecord> {
    let Value::Object(iterator_object) = obj else {
        return Err(agent.throw_exception(ExceptionType::TypeError, "value is not an iterator"));
    };
    let iterator = Object::from(iterator_object);
    let next_key = PropertyKey::from_str(agent, "next");
    let next_value = iterator.get(agent, next_key, obj)?;
    let Value::Object(next_object) = next_value else {
        return Err(agent.throw_exception(ExceptionType::TypeError, "iterator.next is not a function"));
    };
    let Some(next_method) = agent.heap.objects[next_object].callable else {
        return Err(agent.throw_exception(ExceptionType::TypeError, "iterator.next is not a function"));
    };
    Ok(IteratorRecord { iterator, next_method })
}

/// ### [7.4.8 IteratorStep ( iteratorRecord )](https://tc39.es/ecma262/#sec-iteratorstep)
pub fn iterator_step(agent: &mut Agent, record: &IteratorRecord) -> JsResult<Option<Value>> {
    let receiver = Value::Object(record.iterator.0);
    let result = call_function(agent, record.next_method, receiver, &[])?;
    let Value::Object(result_object) = result else {
        return Err(agent.throw_exception(ExceptionType::TypeError, "Iterator result is not an object"));
    };
    let result = Object::from(result_object);
    let done_key = PropertyKey::from_str(agent, "done");
    let done = result.get(agent, done_key, Value::Object(result_object))?.to_boolean(agent);
    if done {
        return Ok(None);
    }
    let value_key = PropertyKey::from_str(agent, "value");
    Ok(Some(result.get(agent, value_key, Value::Object(result_object))?))
}

/// ### [7.4.11 IteratorClose ( iteratorRecord, completion )](https://tc39.es/ecma262/#sec-iteratorclose)
/// Calls the iterator's `return` method (if present) and discards its
/// result, unless `completion` itself was `Ok` and calling `return`
/// throws - in which case that throw replaces the original completion.
pub fn iterator_close<T>(agent: &mut Agent, record: &IteratorRecord, completion: JsResult<T>) -> JsResult<T> {
    let return_key = PropertyKey::from_str(agent, "return");
    let receiver = Value::Object(record.iterator.0);
    let return_method = match record.iterator.get(agent, return_key, receiver.clone()) {
        Ok(value) => value,
        Err(err) => return completion.and(Err(err)),
    };
    if matches!(return_method, Value::Undefined | Value::Null) {
        return completion;
    }
    match crate::functions::call(agent, return_method, receiver, &[]) {
        Ok(_) => completion,
        Err(err) => match completion {
            Ok(_) => Err(err),
            Err(original) => Err(original),
        },
    }
}

pub enum LoopSignal {
    Continue,
    Break,
}

/// ### [14.7.5 The for-of Statement] (body form)
/// Drives `body` once per iterated value, closing the iterator both on
/// a normal `Break` and on a thrown error escaping `body`.
pub fn for_of(
    agent: &mut Agent,
    iterable: Value,
    mut body: impl FnMut(&mut Agent, Value) -> JsResult<LoopSignal>,
) -> JsResult<()> {
    let record = get_iterator(agent, iterable)?;
    loop {
        let Some(value) = iterator_step(agent, &record)? else {
            return Ok(());
        };
        match body(agent, value) {
            Ok(LoopSignal::Continue) => continue,
            Ok(LoopSignal::Break) => return iterator_close(agent, &record, Ok(())),
            Err(err) => return iterator_close(agent, &record, Err(err)),
        }
    }
}

/// Enumerable string keys of `object` and its prototype chain, each
/// name visited once (a shadowed prototype property is skipped).
pub fn for_in(agent: &mut Agent, object: Object) -> Vec<PropertyKey> {
    let mut seen = std::collections::HashSet::new();
    let mut result = Vec::new();
    let mut current = Some(object);
    while let Some(obj) = current {
        for key in obj.enumerable_keys(agent) {
            let display = key.as_display(agent).into_owned();
            if seen.insert(display) {
                result.push(key);
            }
        }
        current = obj.get_prototype_of(agent).map(Object::from);
    }
    result
}

/// ### [7.4.13 IterableToList ( items [ , method ] )](https://tc39.es/ecma262/#sec-iterabletolist)
pub fn iterable_to_list(agent: &mut Agent, iterable: Value) -> JsResult<Vec<Value>> {
    let record = get_iterator(agent, iterable)?;
    let mut values = Vec::new();
    while let Some(value) = iterator_step(agent, &record)? {
        values.push(value);
    }
    Ok(values)
}
