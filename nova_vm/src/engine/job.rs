// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The microtask unit and its FIFO queue. Mirrors the job/queue split
//! used for promise reactions: a [`Job`] is an inert, owned description
//! of work to do; running it is a separate step so the queue can be
//! drained uniformly regardless of what kind of job it holds.

use std::collections::VecDeque;

use crate::engine::{Agent, JsResult};
use crate::promise::{PromiseReactionJob, PromiseResolveThenableJob};
use crate::weak::FinalizationRegistryCleanupJob;

#[derive(Debug)]
pub enum InnerJob {
    PromiseResolveThenable(PromiseResolveThenableJob),
    PromiseReaction(PromiseReactionJob),
    FinalizationRegistryCleanup(FinalizationRegistryCleanupJob),
}

/// A single microtask. `realm` is omitted: this engine core models one
/// execution context per `Agent` rather than the multi-realm embedding
/// case, so every job always runs against the owning agent's single
/// global environment.
#[derive(Debug)]
pub struct Job {
    pub(crate) inner: InnerJob,
}

impl Job {
    pub fn run(self, agent: &mut Agent) -> JsResult<()> {
        match self.inner {
            InnerJob::PromiseResolveThenable(job) => job.run(agent),
            InnerJob::PromiseReaction(job) => job.run(agent),
            InnerJob::FinalizationRegistryCleanup(job) => job.run(agent),
        }
    }
}

/// FIFO queue of pending microtasks, with a reentrancy guard: calling
/// [`MicrotaskQueue::drain`] while already draining is a no-op, matching
/// `processMicrotasks`'s "a recursive call returns immediately" rule.
#[derive(Debug, Default)]
pub struct MicrotaskQueue {
    queue: VecDeque<Job>,
    draining: bool,
}

impl MicrotaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, job: Job) {
        self.queue.push_back(job);
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub(crate) fn pop(&mut self) -> Option<Job> {
        self.queue.pop_front()
    }

    pub(crate) fn is_draining(&self) -> bool {
        self.draining
    }

    pub(crate) fn set_draining(&mut self, draining: bool) {
        self.draining = draining;
    }
}
