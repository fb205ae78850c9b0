// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Promises and their microtask jobs (§4.8): the pending/fulfilled/
//! rejected state machine, the resolve/reject native-function pair, and
//! the two job kinds a settling promise can enqueue.

mod jobs;
mod promise;
mod reaction;

pub use jobs::{PromiseReactionJob, PromiseResolveThenableJob};
pub use promise::{
    create_resolving_functions, fulfill_promise, new_promise, new_promise_capability, perform_promise_then,
    reject_promise, resolve_promise, settle_capability, PromiseHeapData, PromiseState,
};
pub use reaction::{PromiseCapability, PromiseReactionData, PromiseReactions, ReactionType};
