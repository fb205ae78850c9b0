// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A promise that rejects with no reaction attached must notify
//! `HostHooks::promise_rejection_tracker` with `Reject`; attaching a
//! handler afterward retracts it with `Handle`.

use std::any::Any;
use std::cell::RefCell;

use nova_vm::engine::{Agent, HostHooks, Options, PromiseRejectionTrackerOperation};
use nova_vm::object::Object;
use nova_vm::promise::{new_promise, perform_promise_then, reject_promise};
use nova_vm::types::Value;

#[derive(Debug, Default)]
struct RecordingHooks {
    events: RefCell<Vec<PromiseRejectionTrackerOperation>>,
}

impl HostHooks for RecordingHooks {
    fn promise_rejection_tracker(&self, _promise: Object, operation: PromiseRejectionTrackerOperation) {
        self.events.borrow_mut().push(operation);
    }

    fn get_host_data(&self) -> &dyn Any {
        self
    }
}

#[test]
fn reject_then_later_handle_is_reported_in_order() {
    let mut agent = Agent::with_host_hooks(Options::default(), Box::new(RecordingHooks::default()));
    let (promise, _wrapper) = new_promise(&mut agent);

    let reason = Value::from_str(&mut agent, "no handler yet");
    reject_promise(&mut agent, promise, reason);
    perform_promise_then(&mut agent, promise, None, None, None);
    agent.run_jobs().unwrap();

    let events = agent
        .host_hooks()
        .get_host_data()
        .downcast_ref::<RecordingHooks>()
        .expect("host data must be the RecordingHooks instance")
        .events
        .borrow()
        .clone();

    assert_eq!(
        events,
        vec![
            PromiseRejectionTrackerOperation::Reject,
            PromiseRejectionTrackerOperation::Handle,
        ]
    );
}
