// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::any::Any;
use std::fmt::Debug;

use crate::object::Object;

/// Which transition a promise made, passed to
/// [`HostHooks::promise_rejection_tracker`]. Named after the four
/// `HostPromiseRejectionTracker` operations plus the two informational
/// ones engines commonly surface to embedders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromiseRejectionTrackerOperation {
    /// A promise rejected with no reject reaction registered at the time.
    Reject,
    /// A reject reaction was registered on a promise previously reported
    /// via `Reject`, retracting the earlier notification.
    Handle,
}

/// Host-provided notification hooks. Unlike a browser-hosted engine,
/// this core owns its microtask queue directly (`Agent::enqueue_job`)
/// rather than delegating scheduling to the embedder; `HostHooks` is
/// purely for observing what the engine did.
pub trait HostHooks: Debug {
    /// Called when a promise becomes rejected with no handler, and again
    /// if a handler is attached later. Default: ignore.
    fn promise_rejection_tracker(
        &self,
        _promise: Object,
        _operation: PromiseRejectionTrackerOperation,
    ) {
    }

    /// Opaque embedder-owned state, retrievable from the `Agent`.
    fn get_host_data(&self) -> &dyn Any {
        &()
    }
}

/// A `HostHooks` that ignores every notification; sufficient for
/// embedding this crate without a surrounding host environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHostHooks;

impl HostHooks for NullHostHooks {}
