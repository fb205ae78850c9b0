// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The two microtask job kinds a resolved promise can enqueue.

use crate::engine::{Agent, JsResult};
use crate::functions::{call_function, Function};
use crate::heap::PromiseReactionIndex;
use crate::object::create_function_object;
use crate::promise::promise::{create_resolving_functions, reject_promise, settle_capability};
use crate::promise::reaction::ReactionType;
use crate::types::Value;

/// ### [27.2.2.2 PromiseResolveThenableJob ( promise, thenable, then )](https://tc39.es/ecma262/#sec-promiseresolvethenablejob)
#[derive(Debug, Clone)]
pub struct PromiseResolveThenableJob {
    pub promise: crate::heap::PromiseIndex,
    pub thenable: Value,
    pub then: Function,
}

impl PromiseResolveThenableJob {
    pub fn run(self, agent: &mut Agent) -> JsResult<()> {
        let promise_object = agent.heap.promises[self.promise].wrapper;
        let (resolve, reject) = create_resolving_functions(agent, promise_object);
        let resolve_value = Value::Object(create_function_object(agent, resolve));
        let reject_value = Value::Object(create_function_object(agent, reject));
        if let Err(err) = call_function(agent, self.then, self.thenable, &[resolve_value, reject_value]) {
            reject_promise(agent, self.promise, err.value());
        }
        Ok(())
    }
}

/// ### [27.2.2.1 PromiseReactionJob ( reaction, argument )](https://tc39.es/ecma262/#sec-promisereactionjob)
#[derive(Debug, Clone)]
pub struct PromiseReactionJob {
    pub reaction: PromiseReactionIndex,
    pub argument: Value,
}

impl PromiseReactionJob {
    pub fn run(self, agent: &mut Agent) -> JsResult<()> {
        let data = agent.heap.promise_reactions[self.reaction].clone();
        let handler_result = match data.handler {
            Some(handler) => call_function(agent, handler, Value::Undefined, &[self.argument]),
            None => match data.reaction_type {
                ReactionType::Fulfill => Ok(self.argument),
                ReactionType::Reject => Err(crate::engine::JsError::new(self.argument)),
            },
        };
        match data.capability {
            Some(capability) => {
                settle_capability(agent, &capability, handler_result)?;
                Ok(())
            }
            None => {
                // No capability attached (the reaction came from an
                // internal `perform_promise_then` call with no visible
                // `.then()` result promise): an unhandled rejection from
                // the handler itself has nowhere further to propagate.
                if let Err(err) = handler_result {
                    if data.reaction_type == ReactionType::Fulfill {
                        return Err(err);
                    }
                }
                Ok(())
            }
        }
    }
}
