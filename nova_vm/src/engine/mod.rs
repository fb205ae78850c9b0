// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The engine module owns the single per-instance [`Agent`] record: its
//! heap, its configuration, its execution-context stack, and its
//! microtask queue. Everything else in the crate (types, objects,
//! executor, promises) is reached through a `&Agent` / `&mut Agent`.

mod agent;
mod diagnostics;
mod error;
mod host_hooks;
mod job;
mod options;

pub use agent::{Agent, ExecutionContext};
pub use error::{ExceptionType, JsError, JsResult};
pub use host_hooks::{HostHooks, NullHostHooks, PromiseRejectionTrackerOperation};
pub use job::{InnerJob, Job, MicrotaskQueue};
pub use options::Options;

pub(crate) use diagnostics::trace;
