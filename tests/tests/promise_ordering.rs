// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Two `.then()` reactions on the same promise must fire in
//! registration order once the microtask queue drains, regardless of
//! which settles the promise.

use nova_vm::engine::{Agent, JsResult, Options};
use nova_vm::functions::{bound_function_create, create_native_function, Function};
use nova_vm::object::{ordinary_object_create, Object};
use nova_vm::promise::{new_promise, perform_promise_then, resolve_promise};
use nova_vm::types::{PropertyDescriptor, PropertyKey, Value};

fn push_log(agent: &mut Agent, _this: Value, args: &[Value]) -> JsResult<Value> {
    let Some(Value::Object(log)) = args.first().cloned() else {
        panic!("push_log expects the log object as its first bound argument");
    };
    let tag = args.get(1).cloned().unwrap_or(Value::Undefined);
    let log = Object::from(log);
    let next_index = log.own_property_keys(agent).len();
    let key = PropertyKey::from_str(agent, &next_index.to_string());
    log.define_own_property(agent, key, PropertyDescriptor::new_data_descriptor(tag))
        .unwrap();
    Ok(Value::Undefined)
}

fn entry_at(agent: &mut Agent, log: Object, index: usize) -> Value {
    let key = PropertyKey::from_str(agent, &index.to_string());
    log.get(agent, key, Value::Object(log.0)).unwrap()
}

#[test]
fn reactions_run_in_registration_order() {
    let mut agent = Agent::new(Options::default());
    let (promise, _wrapper) = new_promise(&mut agent);
    let log = Object::from(ordinary_object_create(&mut agent, None));

    let push_log_fn = create_native_function(&mut agent, Some("pushLog"), 2, false, push_log);
    let tag_a = Value::from_str(&mut agent, "a");
    let tag_b = Value::from_str(&mut agent, "b");
    let handler_a = bound_function_create(
        &mut agent,
        Function::Native(push_log_fn),
        Value::Undefined,
        vec![Value::Object(log.0), tag_a],
    );
    let handler_b = bound_function_create(
        &mut agent,
        Function::Native(push_log_fn),
        Value::Undefined,
        vec![Value::Object(log.0), tag_b],
    );

    perform_promise_then(&mut agent, promise, Some(Function::Bound(handler_a)), None, None);
    perform_promise_then(&mut agent, promise, Some(Function::Bound(handler_b)), None, None);

    assert!(!agent.has_pending_microtasks());
    resolve_promise(&mut agent, promise, Value::Number(42.0)).unwrap();
    assert!(agent.has_pending_microtasks());
    agent.run_jobs().unwrap();
    assert!(!agent.has_pending_microtasks());

    assert_eq!(entry_at(&mut agent, log, 0), Value::from_str(&mut agent, "a"));
    assert_eq!(entry_at(&mut agent, log, 1), Value::from_str(&mut agent, "b"));
}
