// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/// Host-tunable knobs threaded into the [`Agent`](super::Agent) at
/// construction time. None of these change JS-visible semantics; they
/// control embedding-facing behaviour (diagnostics, GC, disposal
/// budgets).
#[derive(Debug, Clone, Copy)]
pub struct Options {
    /// When set, internal subsystems (executor, microtask drain, weak
    /// sweep) print a short trace line for each step they take. This is
    /// the engine's only logging facility; it has no JS-visible effect.
    pub print_internals: bool,
    /// When set, [`Agent::collect_garbage`](super::Agent::collect_garbage)
    /// becomes a no-op. Useful for tests that want object identity to
    /// survive across calls that would otherwise sweep unreachable data.
    pub disable_gc: bool,
    /// Upper bound on the number of microtask-queue drain steps
    /// `AsyncDisposableStack::disposeAsync` will wait through before
    /// giving up on a dispose callback's promise settling. Not a
    /// normative ECMAScript constant; an implementation-defined safety
    /// valve against runaway disposal chains.
    pub async_dispose_poll_budget: u32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            print_internals: false,
            disable_gc: false,
            async_dispose_poll_budget: 10_000,
        }
    }
}
