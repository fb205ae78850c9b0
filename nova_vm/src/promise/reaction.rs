// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::engine::{Agent, InnerJob, Job};
use crate::functions::Function;
use crate::heap::{ObjectIndex, PromiseReactionIndex};
use crate::types::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionType {
    Fulfill,
    Reject,
}

/// A `PromiseCapability` record (§4.8): the promise a `.then()` call
/// returns, plus the pair of resolving functions that settle it.
#[derive(Debug, Clone)]
pub struct PromiseCapability {
    pub promise: ObjectIndex,
    pub resolve: Function,
    pub reject: Function,
}

#[derive(Debug, Clone)]
pub struct PromiseReactionData {
    pub capability: Option<PromiseCapability>,
    pub reaction_type: ReactionType,
    pub handler: Option<Function>,
}

/// Most promises accumulate zero or one reaction before settling;
/// `Many` only appears once a second `.then()` is attached to a still-
/// pending promise, so the common cases avoid a `Vec` allocation.
#[derive(Debug, Clone, Default)]
pub enum PromiseReactions {
    #[default]
    None,
    One(PromiseReactionIndex),
    Many(Vec<PromiseReactionIndex>),
}

impl PromiseReactions {
    pub fn push(&mut self, reaction: PromiseReactionIndex) {
        *self = match std::mem::take(self) {
            PromiseReactions::None => PromiseReactions::One(reaction),
            PromiseReactions::One(existing) => PromiseReactions::Many(vec![existing, reaction]),
            PromiseReactions::Many(mut reactions) => {
                reactions.push(reaction);
                PromiseReactions::Many(reactions)
            }
        };
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, PromiseReactions::None)
    }

    /// Enqueues one [`InnerJob::PromiseReaction`] per reaction, each
    /// carrying a clone of `argument` (the settled value/reason).
    pub fn trigger(self, agent: &mut Agent, argument: Value) {
        let reactions: Vec<PromiseReactionIndex> = match self {
            PromiseReactions::None => Vec::new(),
            PromiseReactions::One(reaction) => vec![reaction],
            PromiseReactions::Many(reactions) => reactions,
        };
        for reaction in reactions {
            agent.enqueue_job(Job {
                inner: InnerJob::PromiseReaction(crate::promise::jobs::PromiseReactionJob {
                    reaction,
                    argument: argument.clone(),
                }),
            });
        }
    }
}
