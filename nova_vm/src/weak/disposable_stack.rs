// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `DisposableStack`/`AsyncDisposableStack` (§4.9): LIFO-ordered
//! explicit resource management, composing failures from multiple
//! disposals into a `SuppressedError` chain rather than dropping all
//! but the last one.

use crate::engine::{Agent, ExceptionType, JsError, JsResult};
use crate::functions::{call_function, Function};
use crate::heap::{CreateHeapData, DisposableStackIndex};
use crate::object::Object;
use crate::types::{PropertyDescriptor, PropertyKey, Value};

#[derive(Debug, Clone)]
enum DisposeEntry {
    /// `use(v)`: dispose by calling the captured method against `v`.
    Use { value: Value, method: Function },
    /// `adopt(v, cb)`: dispose by calling `cb` with `v`.
    Adopt { value: Value, callback: Function },
    /// `defer(cb)`: dispose by calling `cb` with no arguments.
    Defer { callback: Function },
}

#[derive(Debug, Clone)]
pub struct DisposableStackHeapData {
    entries: Vec<DisposeEntry>,
    pub(crate) disposed: bool,
    pub(crate) is_async: bool,
}

pub fn create_disposable_stack(agent: &mut Agent, is_async: bool) -> DisposableStackIndex {
    agent.heap.create(DisposableStackHeapData {
        entries: Vec::new(),
        disposed: false,
        is_async,
    })
}

fn dispose_method_key(agent: &mut Agent, is_async: bool) -> (PropertyKey, PropertyKey) {
    (
        PropertyKey::from_symbol(if is_async {
            agent.symbol_for("Symbol.asyncDispose")
        } else {
            agent.symbol_for("Symbol.dispose")
        }),
        PropertyKey::from_symbol(agent.symbol_for("Symbol.dispose")),
    )
}

fn require_not_disposed(agent: &mut Agent, stack: DisposableStackIndex) -> JsResult<()> {
    if agent.heap.disposable_stacks[stack].disposed {
        return Err(agent.throw_exception(ExceptionType::TypeError, "disposable stack has already been disposed"));
    }
    Ok(())
}

/// ### `DisposableStack.prototype.use` / `AsyncDisposableStack.prototype.use`
/// Captures `v[Symbol.(async)dispose]` now, falling back to the sync
/// dispose method for an async stack (per "with sync fallback").
pub fn stack_use(agent: &mut Agent, stack: DisposableStackIndex, value: Value) -> JsResult<Value> {
    require_not_disposed(agent, stack)?;
    if value == Value::Undefined || value == Value::Null {
        return Ok(value);
    }
    let Value::Object(object) = value.clone() else {
        return Err(agent.throw_exception(ExceptionType::TypeError, "value is not an object"));
    };
    let is_async = agent.heap.disposable_stacks[stack].is_async;
    let (primary_key, fallback_key) = dispose_method_key(agent, is_async);
    let primary = Object::from(object).get(agent, primary_key, value.clone())?;
    let method = if let Value::Object(m) = &primary {
        agent.heap.objects[*m].callable
    } else if is_async {
        let fallback = Object::from(object).get(agent, fallback_key, value.clone())?;
        match fallback {
            Value::Object(m) => agent.heap.objects[m].callable,
            _ => None,
        }
    } else {
        None
    };
    let Some(method) = method else {
        return Err(agent.throw_exception(ExceptionType::TypeError, "value is not disposable"));
    };
    agent.heap.disposable_stacks[stack]
        .entries
        .push(DisposeEntry::Use { value: value.clone(), method });
    Ok(value)
}

/// ### `DisposableStack.prototype.adopt`
pub fn stack_adopt(agent: &mut Agent, stack: DisposableStackIndex, value: Value, callback: Function) -> JsResult<Value> {
    require_not_disposed(agent, stack)?;
    agent.heap.disposable_stacks[stack]
        .entries
        .push(DisposeEntry::Adopt { value: value.clone(), callback });
    Ok(value)
}

/// ### `DisposableStack.prototype.defer`
pub fn stack_defer(agent: &mut Agent, stack: DisposableStackIndex, callback: Function) -> JsResult<()> {
    require_not_disposed(agent, stack)?;
    agent.heap.disposable_stacks[stack].entries.push(DisposeEntry::Defer { callback });
    Ok(())
}

/// ### `DisposableStack.prototype.move`
/// Transfers every recorded entry to a fresh stack and marks `stack`
/// itself as disposed (without running any callback).
pub fn stack_move(agent: &mut Agent, stack: DisposableStackIndex) -> JsResult<DisposableStackIndex> {
    require_not_disposed(agent, stack)?;
    let is_async = agent.heap.disposable_stacks[stack].is_async;
    let moved_entries = std::mem::take(&mut agent.heap.disposable_stacks[stack].entries);
    agent.heap.disposable_stacks[stack].disposed = true;
    let fresh = create_disposable_stack(agent, is_async);
    agent.heap.disposable_stacks[fresh].entries = moved_entries;
    Ok(fresh)
}

fn run_entry(agent: &mut Agent, entry: &DisposeEntry) -> JsResult<Value> {
    match entry {
        DisposeEntry::Use { value, method } => call_function(agent, *method, value.clone(), &[]),
        DisposeEntry::Adopt { value, callback } => call_function(agent, *callback, Value::Undefined, &[value.clone()]),
        DisposeEntry::Defer { callback } => call_function(agent, *callback, Value::Undefined, &[]),
    }
}

/// Composes a newly thrown error with one already captured during this
/// disposal pass, per `SuppressedError`'s ("An error was suppressed
/// during disposal.") shape.
fn compose_suppressed(agent: &mut Agent, new_error: Value, suppressed: Value) -> Value {
    let prototype = Object::ordinary_object_prototype(agent);
    let object = crate::object::ordinary_object_create(agent, Some(prototype));
    let wrapped = Object::from(object);
    let name_key = PropertyKey::from_str(agent, "name");
    let message_key = PropertyKey::from_str(agent, "message");
    let error_key = PropertyKey::from_str(agent, "error");
    let suppressed_key = PropertyKey::from_str(agent, "suppressed");
    let name_value = Value::from_str(agent, "SuppressedError");
    let message_value = Value::from_str(agent, "An error was suppressed during disposal.");
    let _ = wrapped.define_own_property(agent, name_key, PropertyDescriptor::new_data_descriptor(name_value));
    let _ = wrapped.define_own_property(agent, message_key, PropertyDescriptor::new_data_descriptor(message_value));
    let _ = wrapped.define_own_property(agent, error_key, PropertyDescriptor::new_data_descriptor(new_error));
    let _ = wrapped.define_own_property(agent, suppressed_key, PropertyDescriptor::new_data_descriptor(suppressed));
    Value::Object(object)
}

/// ### `DisposableStack.prototype.dispose`
/// Runs every entry in LIFO order, composing a `SuppressedError` chain
/// if more than one throws, and re-raises at the end.
pub fn dispose(agent: &mut Agent, stack: DisposableStackIndex) -> JsResult<()> {
    if agent.heap.disposable_stacks[stack].disposed {
        return Ok(());
    }
    agent.heap.disposable_stacks[stack].disposed = true;
    let entries = std::mem::take(&mut agent.heap.disposable_stacks[stack].entries);
    let mut captured: Option<Value> = None;
    for entry in entries.iter().rev() {
        if let Err(err) = run_entry(agent, entry) {
            captured = Some(match captured {
                Some(previous) => compose_suppressed(agent, err.value(), previous),
                None => err.value(),
            });
        }
    }
    match captured {
        Some(error) => Err(JsError::new(error)),
        None => Ok(()),
    }
}

/// ### `AsyncDisposableStack.prototype.disposeAsync`
/// Identical LIFO/suppression algorithm, but each disposal result may
/// itself be a thenable: drains the microtask queue up to
/// `Options::async_dispose_poll_budget` steps waiting for it to settle
/// before giving up with a `RangeError`.
pub fn dispose_async(agent: &mut Agent, stack: DisposableStackIndex) -> JsResult<()> {
    if agent.heap.disposable_stacks[stack].disposed {
        return Ok(());
    }
    agent.heap.disposable_stacks[stack].disposed = true;
    let entries = std::mem::take(&mut agent.heap.disposable_stacks[stack].entries);
    let mut captured: Option<Value> = None;
    for entry in entries.iter().rev() {
        let outcome = run_entry(agent, entry).and_then(|result| await_if_thenable(agent, result));
        if let Err(err) = outcome {
            captured = Some(match captured {
                Some(previous) => compose_suppressed(agent, err.value(), previous),
                None => err.value(),
            });
        }
    }
    match captured {
        Some(error) => Err(JsError::new(error)),
        None => Ok(()),
    }
}

/// Polls the microtask queue waiting for a thenable to settle, within
/// `Options::async_dispose_poll_budget` drains. This core has no
/// first-class `await` outside compiled bytecode, so
/// `AsyncDisposableStack` resolves its callbacks' results synchronously
/// by repeatedly draining microtasks rather than suspending.
fn await_if_thenable(agent: &mut Agent, value: Value) -> JsResult<Value> {
    let Value::Object(object) = &value else {
        return Ok(value);
    };
    let then_key = PropertyKey::from_str(agent, "then");
    let then = Object::from(*object).get(agent, then_key, value.clone())?;
    if !matches!(&then, Value::Object(m) if agent.heap.objects[*m].callable.is_some()) {
        return Ok(value);
    }
    let budget = agent.options().async_dispose_poll_budget;
    for _ in 0..budget {
        agent.run_jobs()?;
        if !agent.has_pending_microtasks() {
            break;
        }
    }
    if agent.has_pending_microtasks() {
        return Err(agent.throw_exception(
            ExceptionType::RangeError,
            "Promise did not settle during async disposal",
        ));
    }
    Ok(value)
}
