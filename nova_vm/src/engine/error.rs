// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::types::Value;

/// Outcome type for every fallible engine operation. `Err` carries the
/// thrown value directly, so Rust-level `?` propagation and JS-level
/// `try`/`catch` share one representation: there is no separate
/// "pending exception" flag to forget to check.
pub type JsResult<T> = Result<T, JsError>;

/// A JS exception in flight. Wraps the thrown value verbatim -
/// `throw 3` and `throw new TypeError("no")` both fit here unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct JsError(Value);

impl JsError {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Value {
        self.0.clone()
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for JsError {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

/// The built-in error taxonomy. Each variant names the constructor used
/// to build the thrown `Error`-like object; `Agent::throw_exception`
/// looks up the matching intrinsic prototype by this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExceptionType {
    Error,
    AggregateError,
    EvalError,
    RangeError,
    ReferenceError,
    SyntaxError,
    TypeError,
    UriError,
}

impl ExceptionType {
    pub const fn name(self) -> &'static str {
        match self {
            ExceptionType::Error => "Error",
            ExceptionType::AggregateError => "AggregateError",
            ExceptionType::EvalError => "EvalError",
            ExceptionType::RangeError => "RangeError",
            ExceptionType::ReferenceError => "ReferenceError",
            ExceptionType::SyntaxError => "SyntaxError",
            ExceptionType::TypeError => "TypeError",
            ExceptionType::UriError => "URIError",
        }
    }
}

impl TryFrom<u16> for ExceptionType {
    type Error = ();

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => ExceptionType::Error,
            1 => ExceptionType::AggregateError,
            2 => ExceptionType::EvalError,
            3 => ExceptionType::RangeError,
            4 => ExceptionType::ReferenceError,
            5 => ExceptionType::SyntaxError,
            6 => ExceptionType::TypeError,
            7 => ExceptionType::UriError,
            _ => return Err(()),
        })
    }
}
