// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The promise state machine and resolution algorithm (§4.8).

use crate::engine::{Agent, ExceptionType, InnerJob, Job, JsResult, PromiseRejectionTrackerOperation};
use crate::functions::{bound_function_create, call_function, Function};
use crate::heap::{CreateHeapData, NativeFunctionIndex, ObjectIndex, PromiseIndex};
use crate::object::{InternalSlot, Object, ObjectHeapData};
use crate::promise::reaction::{PromiseCapability, PromiseReactionData, PromiseReactions, ReactionType};
use crate::types::{PropertyKey, Value};

#[derive(Debug, Clone)]
pub enum PromiseState {
    Pending {
        fulfill_reactions: PromiseReactions,
        reject_reactions: PromiseReactions,
    },
    Fulfilled {
        value: Value,
    },
    Rejected {
        value: Value,
        is_handled: bool,
    },
}

#[derive(Debug, Clone)]
pub struct PromiseHeapData {
    pub state: PromiseState,
    /// The object callers see (`Value::Object`) wrapping this promise's
    /// internal state - kept here so reject/fulfill can hand the host
    /// rejection tracker an [`Object`] without threading it through
    /// every call site.
    pub wrapper: ObjectIndex,
}

/// ### [27.2.3.1 Promise ( executor )](https://tc39.es/ecma262/#sec-promise-executor) (construction half)
/// Allocates a pending promise and its public object wrapper.
pub fn new_promise(agent: &mut Agent) -> (PromiseIndex, ObjectIndex) {
    let prototype = Object::ordinary_object_prototype(agent);
    let promise = agent.heap.create(PromiseHeapData {
        state: PromiseState::Pending {
            fulfill_reactions: PromiseReactions::default(),
            reject_reactions: PromiseReactions::default(),
        },
        // Overwritten immediately below once the wrapper object exists;
        // the two are circular (the object's internal slot points back
        // at `promise`) so one side must be built in two steps.
        wrapper: ObjectIndex::from_u32(0),
    });
    let mut data = ObjectHeapData::new(Some(prototype));
    data.internal = InternalSlot::Promise(promise);
    let object = agent.heap.create(data);
    agent.heap.promises[promise].wrapper = object;
    (promise, object)
}

fn resolving_function_behavior(kind: ReactionType) -> crate::functions::NativeFn {
    match kind {
        ReactionType::Fulfill => resolve_function,
        ReactionType::Reject => reject_function,
    }
}

fn promise_from_marker(agent: &Agent, marker: Value) -> Option<PromiseIndex> {
    let Value::Object(marker_object) = marker else {
        return None;
    };
    match agent.heap.objects[marker_object].internal {
        InternalSlot::Promise(promise) => Some(promise),
        _ => None,
    }
}

fn resolve_function(agent: &mut Agent, _this: Value, args: &[Value]) -> JsResult<Value> {
    let marker = args.first().cloned().unwrap_or(Value::Undefined);
    let resolution = args.get(1).cloned().unwrap_or(Value::Undefined);
    if let Some(promise) = promise_from_marker(agent, marker) {
        resolve_promise(agent, promise, resolution)?;
    }
    Ok(Value::Undefined)
}

fn reject_function(agent: &mut Agent, _this: Value, args: &[Value]) -> JsResult<Value> {
    let marker = args.first().cloned().unwrap_or(Value::Undefined);
    let reason = args.get(1).cloned().unwrap_or(Value::Undefined);
    if let Some(promise) = promise_from_marker(agent, marker) {
        reject_promise(agent, promise, reason);
    }
    Ok(Value::Undefined)
}

fn create_resolving_function(agent: &mut Agent, promise_object: ObjectIndex, kind: ReactionType) -> Function {
    let native: NativeFunctionIndex = agent.heap.create(crate::functions::NativeFunctionHeapData {
        name: None,
        length: 1,
        is_constructor: false,
        behavior: resolving_function_behavior(kind),
    });
    let bound = bound_function_create(
        agent,
        Function::Native(native),
        Value::Undefined,
        vec![Value::Object(promise_object)],
    );
    Function::Bound(bound)
}

/// ### [27.2.1.3 CreateResolvingFunctions ( promise )](https://tc39.es/ecma262/#sec-createresolvingfunctions)
pub fn create_resolving_functions(agent: &mut Agent, promise_object: ObjectIndex) -> (Function, Function) {
    (
        create_resolving_function(agent, promise_object, ReactionType::Fulfill),
        create_resolving_function(agent, promise_object, ReactionType::Reject),
    )
}

/// ### [27.2.1.3.2 Promise Resolve Functions](https://tc39.es/ecma262/#sec-promise-resolve-functions)
pub fn resolve_promise(agent: &mut Agent, promise: PromiseIndex, resolution: Value) -> JsResult<()> {
    if !matches!(agent.heap.promises[promise].state, PromiseState::Pending { .. }) {
        return Ok(());
    }
    let wrapper = agent.heap.promises[promise].wrapper;
    if let Value::Object(resolution_object) = &resolution {
        if *resolution_object == wrapper {
            let error = agent.throw_exception(ExceptionType::TypeError, "Chaining cycle detected for promise");
            reject_promise(agent, promise, error.value());
            return Ok(());
        }
    }
    let Value::Object(resolution_object) = resolution else {
        fulfill_promise(agent, promise, resolution);
        return Ok(());
    };
    let then_key = PropertyKey::from_str(agent, "then");
    let then = match Object::from(resolution_object).get(agent, then_key, Value::Object(resolution_object)) {
        Ok(value) => value,
        Err(err) => {
            reject_promise(agent, promise, err.value());
            return Ok(());
        }
    };
    let Value::Object(then_object) = &then else {
        fulfill_promise(agent, promise, Value::Object(resolution_object));
        return Ok(());
    };
    let Some(then_function) = agent.heap.objects[*then_object].callable else {
        fulfill_promise(agent, promise, Value::Object(resolution_object));
        return Ok(());
    };
    agent.enqueue_job(Job {
        inner: InnerJob::PromiseResolveThenable(crate::promise::jobs::PromiseResolveThenableJob {
            promise,
            thenable: Value::Object(resolution_object),
            then: then_function,
        }),
    });
    Ok(())
}

/// ### [27.2.1.4 FulfillPromise ( promise, value )](https://tc39.es/ecma262/#sec-fulfillpromise)
pub fn fulfill_promise(agent: &mut Agent, promise: PromiseIndex, value: Value) {
    let PromiseState::Pending { fulfill_reactions, .. } =
        std::mem::replace(&mut agent.heap.promises[promise].state, PromiseState::Fulfilled { value: value.clone() })
    else {
        return;
    };
    fulfill_reactions.trigger(agent, value);
}

/// ### [27.2.1.7 RejectPromise ( promise, reason )](https://tc39.es/ecma262/#sec-rejectpromise)
pub fn reject_promise(agent: &mut Agent, promise: PromiseIndex, reason: Value) {
    let previous = std::mem::replace(
        &mut agent.heap.promises[promise].state,
        PromiseState::Rejected {
            value: reason.clone(),
            is_handled: false,
        },
    );
    let PromiseState::Pending { reject_reactions, .. } = previous else {
        agent.heap.promises[promise].state = previous;
        return;
    };
    let had_no_handler = reject_reactions.is_empty();
    if had_no_handler {
        let wrapper = agent.heap.promises[promise].wrapper;
        agent
            .host_hooks()
            .promise_rejection_tracker(Object::from(wrapper), PromiseRejectionTrackerOperation::Reject);
    }
    reject_reactions.trigger(agent, reason);
}

/// ### [27.2.5.4.1 PerformPromiseThen ( promise, onFulfilled, onRejected [ , resultCapability ] )](https://tc39.es/ecma262/#sec-performpromisethen)
pub fn perform_promise_then(
    agent: &mut Agent,
    promise: PromiseIndex,
    on_fulfilled: Option<Function>,
    on_rejected: Option<Function>,
    capability: Option<PromiseCapability>,
) -> Value {
    let fulfill_reaction = agent.heap.create(PromiseReactionData {
        capability: capability.clone(),
        reaction_type: ReactionType::Fulfill,
        handler: on_fulfilled,
    });
    let reject_reaction = agent.heap.create(PromiseReactionData {
        capability: capability.clone(),
        reaction_type: ReactionType::Reject,
        handler: on_rejected,
    });
    let state = std::mem::replace(
        &mut agent.heap.promises[promise].state,
        PromiseState::Fulfilled { value: Value::Undefined },
    );
    let new_state = match state {
        PromiseState::Pending {
            mut fulfill_reactions,
            mut reject_reactions,
        } => {
            fulfill_reactions.push(fulfill_reaction);
            reject_reactions.push(reject_reaction);
            PromiseState::Pending {
                fulfill_reactions,
                reject_reactions,
            }
        }
        PromiseState::Fulfilled { value } => {
            agent.enqueue_job(Job {
                inner: InnerJob::PromiseReaction(crate::promise::jobs::PromiseReactionJob {
                    reaction: fulfill_reaction,
                    argument: value.clone(),
                }),
            });
            PromiseState::Fulfilled { value }
        }
        PromiseState::Rejected { value, is_handled } => {
            agent.enqueue_job(Job {
                inner: InnerJob::PromiseReaction(crate::promise::jobs::PromiseReactionJob {
                    reaction: reject_reaction,
                    argument: value.clone(),
                }),
            });
            if !is_handled {
                let wrapper = agent.heap.promises[promise].wrapper;
                agent
                    .host_hooks()
                    .promise_rejection_tracker(Object::from(wrapper), PromiseRejectionTrackerOperation::Handle);
            }
            PromiseState::Rejected { value, is_handled: true }
        }
    };
    agent.heap.promises[promise].state = new_state;
    match capability {
        Some(c) => Value::Object(c.promise),
        None => Value::Undefined,
    }
}

/// ### [27.2.1.5 NewPromiseCapability ( C )](https://tc39.es/ecma262/#sec-newpromisecapability)
/// Simplified to this core's single concrete `Promise` kind: there is
/// no constructor parameter `C` to invoke, since promises are not
/// subclassable without a class/constructor intrinsics table.
pub fn new_promise_capability(agent: &mut Agent) -> PromiseCapability {
    let (_, promise_object) = new_promise(agent);
    let (resolve, reject) = create_resolving_functions(agent, promise_object);
    PromiseCapability {
        promise: promise_object,
        resolve,
        reject,
    }
}

/// Invokes a capability's `resolve`/`reject` function, used by
/// [`crate::promise::jobs::PromiseReactionJob`] once a handler has run
/// (or been defaulted to identity/thrower).
pub fn settle_capability(agent: &mut Agent, capability: &PromiseCapability, result: JsResult<Value>) -> JsResult<Value> {
    match result {
        Ok(value) => call_function(agent, capability.resolve, Value::Undefined, &[value]),
        Err(err) => call_function(agent, capability.reject, Value::Undefined, &[err.value()]),
    }
}
