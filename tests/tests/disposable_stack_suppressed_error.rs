// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! When more than one disposal throws, `DisposableStack.prototype.dispose`
//! composes the failures into a `SuppressedError` chain instead of
//! dropping all but the last one, and disposal order is LIFO.

use nova_vm::engine::{Agent, ExceptionType, JsResult, Options};
use nova_vm::object::{create_function_object, ordinary_object_create, Object};
use nova_vm::functions::{create_native_function, Function};
use nova_vm::types::{PropertyDescriptor, Value};
use nova_vm::weak::{create_disposable_stack, dispose, stack_use};

fn throw_a(agent: &mut Agent, _this: Value, _args: &[Value]) -> JsResult<Value> {
    Err(agent.throw_exception(ExceptionType::Error, "dispose A failed"))
}

fn throw_b(agent: &mut Agent, _this: Value, _args: &[Value]) -> JsResult<Value> {
    Err(agent.throw_exception(ExceptionType::Error, "dispose B failed"))
}

fn disposable_with(agent: &mut Agent, behavior: nova_vm::functions::NativeFn) -> Object {
    let object = Object::from(ordinary_object_create(agent, None));
    let native = create_native_function(agent, Some("[Symbol.dispose]"), 0, false, behavior);
    let method = Value::Object(create_function_object(agent, Function::Native(native)));
    let dispose_key = nova_vm::types::PropertyKey::from_symbol(agent.symbol_for("Symbol.dispose"));
    object
        .define_own_property(agent, dispose_key, PropertyDescriptor::new_data_descriptor(method))
        .unwrap();
    object
}

fn message_of(agent: &mut Agent, error: Value) -> String {
    let Value::Object(error_object) = error else {
        panic!("expected an error object");
    };
    let message_key = nova_vm::types::PropertyKey::from_str(agent, "message");
    let message = Object::from(error_object).get(agent, message_key, error).unwrap();
    let Value::String(s) = message else {
        panic!("expected message to be a string");
    };
    s.as_str(agent).into_owned()
}

#[test]
fn two_throwing_disposals_compose_into_a_suppressed_error_in_lifo_order() {
    let mut agent = Agent::new(Options::default());
    let stack = create_disposable_stack(&mut agent, false);

    let a = disposable_with(&mut agent, throw_a);
    let b = disposable_with(&mut agent, throw_b);
    stack_use(&mut agent, stack, Value::Object(a.0)).unwrap();
    stack_use(&mut agent, stack, Value::Object(b.0)).unwrap();

    let err = dispose(&mut agent, stack).expect_err("both disposals throw");
    let outer = err.value();

    let Value::Object(outer_object) = outer.clone() else {
        panic!("expected a SuppressedError object");
    };
    let outer_object = Object::from(outer_object);

    let name_key = nova_vm::types::PropertyKey::from_str(&mut agent, "name");
    let name = outer_object.get(&mut agent, name_key, outer.clone()).unwrap();
    assert_eq!(name, Value::from_str(&mut agent, "SuppressedError"));

    // LIFO: `b` was pushed last, so it disposes first and becomes the
    // *suppressed* error; `a` disposes second and becomes the primary
    // `error` since it's the last one thrown.
    let error_key = nova_vm::types::PropertyKey::from_str(&mut agent, "error");
    let suppressed_key = nova_vm::types::PropertyKey::from_str(&mut agent, "suppressed");
    let primary = outer_object.get(&mut agent, error_key, outer.clone()).unwrap();
    let suppressed = outer_object.get(&mut agent, suppressed_key, outer.clone()).unwrap();

    assert_eq!(message_of(&mut agent, primary), "dispose A failed");
    assert_eq!(message_of(&mut agent, suppressed), "dispose B failed");

    // The stack is now disposed; disposing again is a no-op.
    dispose(&mut agent, stack).unwrap();
}
