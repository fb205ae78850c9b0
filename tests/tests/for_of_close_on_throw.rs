// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A `for-of` body that throws must still call the iterator's
//! `return()` before the error escapes (`IteratorClose`).

use nova_vm::engine::{Agent, ExceptionType, JsResult, Options};
use nova_vm::functions::{bound_function_create, create_native_function, Function};
use nova_vm::iteration::{for_of, well_known_symbol, SYMBOL_ITERATOR_KEY};
use nova_vm::object::{create_function_object, ordinary_object_create, Object};
use nova_vm::types::{PropertyDescriptor, PropertyKey, Value};

fn always_not_done(agent: &mut Agent, _this: Value, _args: &[Value]) -> JsResult<Value> {
    let result = Object::from(ordinary_object_create(agent, None));
    let value_key = PropertyKey::from_str(agent, "value");
    let done_key = PropertyKey::from_str(agent, "done");
    result
        .define_own_property(agent, value_key, PropertyDescriptor::new_data_descriptor(Value::Number(1.0)))
        .unwrap();
    result
        .define_own_property(agent, done_key, PropertyDescriptor::new_data_descriptor(Value::Boolean(false)))
        .unwrap();
    Ok(Value::Object(result.0))
}

fn return_this(_agent: &mut Agent, this: Value, _args: &[Value]) -> JsResult<Value> {
    Ok(this)
}

fn mark_return_called(agent: &mut Agent, _this: Value, args: &[Value]) -> JsResult<Value> {
    let Some(Value::Object(state)) = args.first().cloned() else {
        panic!("mark_return_called expects the tracked state object as its first bound argument");
    };
    let key = PropertyKey::from_str(agent, "returnCalled");
    Object::from(state)
        .define_own_property(agent, key, PropertyDescriptor::new_data_descriptor(Value::Boolean(true)))
        .unwrap();
    Ok(Value::Undefined)
}

#[test]
fn throwing_from_the_loop_body_still_calls_iterator_return() {
    let mut agent = Agent::new(Options::default());

    let state = Object::from(ordinary_object_create(&mut agent, None));
    let return_called_key = PropertyKey::from_str(&mut agent, "returnCalled");
    state
        .define_own_property(&mut agent, return_called_key, PropertyDescriptor::new_data_descriptor(Value::Boolean(false)))
        .unwrap();

    let iterator = Object::from(ordinary_object_create(&mut agent, None));

    let next_fn = create_native_function(&mut agent, Some("next"), 0, false, always_not_done);
    let next_key = PropertyKey::from_str(&mut agent, "next");
    iterator
        .define_own_property(
            &mut agent,
            next_key,
            PropertyDescriptor::new_data_descriptor(Value::Object(create_function_object(
                &mut agent,
                Function::Native(next_fn),
            ))),
        )
        .unwrap();

    let mark_return_fn = create_native_function(&mut agent, Some("return"), 0, false, mark_return_called);
    let bound_return = bound_function_create(
        &mut agent,
        Function::Native(mark_return_fn),
        Value::Undefined,
        vec![Value::Object(state.0)],
    );
    let return_key = PropertyKey::from_str(&mut agent, "return");
    iterator
        .define_own_property(
            &mut agent,
            return_key,
            PropertyDescriptor::new_data_descriptor(Value::Object(create_function_object(
                &mut agent,
                Function::Bound(bound_return),
            ))),
        )
        .unwrap();

    let symbol_iterator_fn = create_native_function(&mut agent, Some("[Symbol.iterator]"), 0, false, return_this);
    let symbol_iterator_key = well_known_symbol(&mut agent, SYMBOL_ITERATOR_KEY);
    iterator
        .define_own_property(
            &mut agent,
            symbol_iterator_key,
            PropertyDescriptor::new_data_descriptor(Value::Object(create_function_object(
                &mut agent,
                Function::Native(symbol_iterator_fn),
            ))),
        )
        .unwrap();

    let thrown = agent.throw_exception(ExceptionType::Error, "boom");
    let thrown_value = thrown.value();
    let result = for_of(&mut agent, Value::Object(iterator.0), |_agent, _value| {
        Err(thrown.clone())
    });

    let err = result.expect_err("the throw from the loop body must propagate");
    assert_eq!(err.value(), thrown_value);

    let return_called = state.get(&mut agent, return_called_key, Value::Object(state.0)).unwrap();
    assert_eq!(return_called, Value::Boolean(true));
}
