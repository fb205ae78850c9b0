// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ToPrimitive / ToNumber / ToString / ToObject and friends: the
//! conversion algebra that sits between the raw [`Value`] tag and
//! everything that consumes a value as a particular JS type.

use num_traits::FromPrimitive;

use crate::engine::{Agent, ExceptionType, JsResult};
use crate::object::Object;
use crate::types::{number, BigIntValue, PreferredType, StringValue, Value};

/// ### ToPrimitive ( input [ , preferredType ] )
pub fn to_primitive(agent: &mut Agent, input: Value, hint: PreferredType) -> JsResult<Value> {
    let Value::Object(obj) = input else {
        return Ok(input);
    };
    let object = Object::from(obj);
    // No exotic Symbol.toPrimitive hook in this core; fall back directly
    // to OrdinaryToPrimitive's method-order rule.
    let method_order: [&str; 2] = match hint {
        PreferredType::String => ["toString", "valueOf"],
        PreferredType::Number | PreferredType::Default => ["valueOf", "toString"],
    };
    for method_name in method_order {
        let key = crate::types::PropertyKey::from_str(agent, method_name);
        let method = object.get(agent, key, input.clone())?;
        if let Value::Object(method_obj) = &method {
            if agent.heap.objects[*method_obj].is_callable() {
                let result = crate::functions::call(agent, method, input.clone(), &[])?;
                if !result.is_object() {
                    return Ok(result);
                }
            }
        }
    }
    Err(agent.throw_exception(
        ExceptionType::TypeError,
        "Cannot convert object to primitive value",
    ))
}

/// ### ToNumeric ( value )
pub fn to_numeric(agent: &mut Agent, value: Value) -> JsResult<Value> {
    let prim = to_primitive(agent, value, PreferredType::Number)?;
    if matches!(prim, Value::BigInt(_)) {
        return Ok(prim);
    }
    Ok(Value::Number(to_number_from_primitive(agent, prim)?))
}

/// ### ToNumber ( argument )
pub fn to_number(agent: &mut Agent, value: Value) -> JsResult<f64> {
    let prim = to_primitive(agent, value, PreferredType::Number)?;
    to_number_from_primitive(agent, prim)
}

fn to_number_from_primitive(agent: &mut Agent, value: Value) -> JsResult<f64> {
    match value {
        Value::Undefined => Ok(f64::NAN),
        Value::Null => Ok(0.0),
        Value::Boolean(b) => Ok(if b { 1.0 } else { 0.0 }),
        Value::Number(n) => Ok(n),
        Value::String(s) => Ok(number::string_to_number(&s.as_str(agent))),
        Value::BigInt(_) => {
            Err(agent.throw_exception(ExceptionType::TypeError, "Cannot convert a BigInt to a number"))
        }
        Value::Symbol(_) => {
            Err(agent.throw_exception(ExceptionType::TypeError, "Cannot convert a Symbol to a number"))
        }
        Value::Object(_) => unreachable!("to_primitive never returns an Object"),
    }
}

/// ### ToString ( argument )
pub fn to_string(agent: &mut Agent, value: Value) -> JsResult<StringValue> {
    match value {
        Value::String(s) => Ok(s),
        Value::Undefined => Ok(StringValue::from_str(agent, "undefined")),
        Value::Null => Ok(StringValue::from_str(agent, "null")),
        Value::Boolean(b) => Ok(StringValue::from_str(agent, if b { "true" } else { "false" })),
        Value::Number(n) => Ok(StringValue::from_str(agent, &number::number_to_string(n))),
        Value::BigInt(b) => Ok(StringValue::from_str(agent, &b.to_string_radix(10))),
        Value::Symbol(_) => {
            Err(agent.throw_exception(ExceptionType::TypeError, "Cannot convert a Symbol to a string"))
        }
        Value::Object(_) => {
            let prim = to_primitive(agent, value, PreferredType::String)?;
            to_string(agent, prim)
        }
    }
}

/// ### ToObject ( argument )
pub fn to_object(agent: &mut Agent, value: Value) -> JsResult<Object> {
    match value {
        Value::Object(obj) => Ok(Object::from(obj)),
        Value::Undefined | Value::Null => {
            Err(agent.throw_exception(ExceptionType::TypeError, "Cannot convert undefined or null to object"))
        }
        primitive => Ok(Object::from(crate::object::create_primitive_wrapper(agent, primitive))),
    }
}

/// ### ToBigInt ( argument )
pub fn to_big_int(agent: &mut Agent, value: Value) -> JsResult<BigIntValue> {
    let prim = to_primitive(agent, value, PreferredType::Number)?;
    match prim {
        Value::BigInt(b) => Ok(b),
        Value::Boolean(b) => Ok(BigIntValue::from_i64(if b { 1 } else { 0 })),
        Value::String(s) => {
            let owned = s.as_str(agent).into_owned();
            string_to_big_int(&owned)
                .ok_or_else(|| agent.throw_exception(ExceptionType::SyntaxError, "Cannot convert string to a BigInt"))
        }
        _ => Err(agent.throw_exception(ExceptionType::TypeError, "Cannot convert value to a BigInt")),
    }
}

/// ### StringToBigInt ( str )
/// Unlike [`to_big_int`]'s string arm this never throws: a non-numeric
/// string simply yields `None`, matching `IsLooselyEqual`'s use of it.
fn string_to_big_int(s: &str) -> Option<BigIntValue> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Some(BigIntValue::zero());
    }
    num_bigint::BigInt::parse_bytes(trimmed.as_bytes(), 10).map(BigIntValue::from_big_int)
}

fn big_int_equals_number(b: &BigIntValue, n: f64) -> bool {
    if !n.is_finite() || n.fract() != 0.0 {
        return false;
    }
    match num_bigint::BigInt::from_f64(n) {
        Some(as_big_int) => b.to_big_int() == as_big_int,
        None => false,
    }
}

/// ### IsLooselyEqual ( x, y )
pub fn loose_equals(agent: &mut Agent, x: &Value, y: &Value) -> JsResult<bool> {
    use Value::*;
    match (x, y) {
        (Undefined | Null, Undefined | Null) => Ok(true),
        (Number(_), Number(_))
        | (String(_), String(_))
        | (Boolean(_), Boolean(_))
        | (BigInt(_), BigInt(_))
        | (Symbol(_), Symbol(_))
        | (Object(_), Object(_)) => Ok(x.strict_equals(agent, y)),

        (Number(a), String(s)) => Ok(*a == number::string_to_number(&s.as_str(agent))),
        (String(s), Number(b)) => Ok(number::string_to_number(&s.as_str(agent)) == *b),

        (BigInt(a), String(s)) => {
            let owned = s.as_str(agent).into_owned();
            Ok(string_to_big_int(&owned).is_some_and(|b| *a == b))
        }
        (String(_), BigInt(_)) => loose_equals(agent, y, x),

        (Boolean(b), _) => {
            let as_number = Value::Number(if *b { 1.0 } else { 0.0 });
            loose_equals(agent, &as_number, y)
        }
        (_, Boolean(b)) => {
            let as_number = Value::Number(if *b { 1.0 } else { 0.0 });
            loose_equals(agent, x, &as_number)
        }

        (Number(_) | BigInt(_) | String(_) | Symbol(_), Object(_)) => {
            let y_prim = to_primitive(agent, y.clone(), PreferredType::Default)?;
            loose_equals(agent, x, &y_prim)
        }
        (Object(_), Number(_) | BigInt(_) | String(_) | Symbol(_)) => {
            let x_prim = to_primitive(agent, x.clone(), PreferredType::Default)?;
            loose_equals(agent, &x_prim, y)
        }

        (BigInt(a), Number(b)) => Ok(big_int_equals_number(a, *b)),
        (Number(a), BigInt(b)) => Ok(big_int_equals_number(b, *a)),

        _ => Ok(false),
    }
}
