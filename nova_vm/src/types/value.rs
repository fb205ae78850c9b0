// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::engine::{Agent, ExceptionType, JsResult};
use crate::heap::{ObjectIndex, SymbolIndex};
use crate::types::{BigIntValue, PropertyKey, StringValue};

/// A tagged JavaScript value. Every variant here is directly observable
/// from JS code; internal VM bookkeeping (the bytecode executor's
/// catch-offset markers) deliberately lives in a separate
/// `executor::StackSlot` type rather than as a `Value` variant, so a
/// marker can never leak onto a user-visible stack or into a property.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Undefined,
    Null,
    Boolean(bool),
    Number(f64),
    BigInt(BigIntValue),
    String(StringValue),
    Symbol(SymbolIndex),
    Object(ObjectIndex),
}

/// Hint passed to `ToPrimitive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferredType {
    Default,
    Number,
    String,
}

impl Value {
    pub fn from_str(agent: &mut Agent, s: &str) -> Self {
        Value::String(StringValue::from_str(agent, s))
    }

    pub fn type_of(&self, agent: &Agent) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "object",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::BigInt(_) => "bigint",
            Value::String(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::Object(obj) => {
                if agent.heap.objects[*obj].is_callable() {
                    "function"
                } else {
                    "object"
                }
            }
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// ### ToBoolean
    pub fn to_boolean(&self, agent: &Agent) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Boolean(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::BigInt(b) => !b.is_zero(),
            Value::String(s) => !s.is_empty(agent),
            Value::Symbol(_) | Value::Object(_) => true,
        }
    }

    /// ### SameValue
    pub fn same_value(&self, agent: &Agent, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => {
                if a.is_nan() && b.is_nan() {
                    true
                } else if *a == 0.0 && *b == 0.0 {
                    a.is_sign_positive() == b.is_sign_positive()
                } else {
                    a == b
                }
            }
            _ => self.same_value_zero(agent, other),
        }
    }

    /// ### SameValueZero
    pub fn same_value_zero(&self, agent: &Agent, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => {
                (a.is_nan() && b.is_nan()) || a == b
            }
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::String(a), Value::String(b)) => a.equals(agent, b),
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            _ => false,
        }
    }

    /// ### IsStrictlyEqual
    pub fn strict_equals(&self, agent: &Agent, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            _ => self.same_value_zero(agent, other) && !matches!(self, Value::Number(n) if n.is_nan()),
        }
    }

    pub fn to_property_key(&self, agent: &mut Agent) -> JsResult<PropertyKey> {
        match self {
            Value::Symbol(s) => Ok(PropertyKey::Symbol(*s)),
            Value::String(StringValue::Small(small)) => {
                Ok(PropertyKey::from_str(agent, small.as_str()))
            }
            Value::String(StringValue::Heap(_)) => {
                let s = self.clone();
                if let Value::String(sv) = s {
                    let owned = sv.as_str(agent).into_owned();
                    Ok(PropertyKey::from_str(agent, &owned))
                } else {
                    unreachable!()
                }
            }
            Value::Number(n) => Ok(PropertyKey::from_str(agent, &crate::types::number::number_to_string(*n))),
            _ => {
                let s = crate::types::conversion::to_string(agent, self.clone())?;
                let owned = s.as_str(agent).into_owned();
                Ok(PropertyKey::from_str(agent, &owned))
            }
        }
    }

    pub fn throw_type_error(agent: &mut Agent, message: &'static str) -> JsResult<Value> {
        Err(agent.throw_exception(ExceptionType::TypeError, message))
    }
}
