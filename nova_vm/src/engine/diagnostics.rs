// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `Options::print_internals`-gated diagnostic trace. This is the
//! engine's whole logging story: there is no JS-visible side effect,
//! and no subsystem should depend on whether a trace line was printed.

/// Prints `format!($($arg)*)` to stderr if `$agent.options().print_internals`
/// is set. Usage: `trace!(agent, "draining {} microtasks", n);`
macro_rules! trace {
    ($agent:expr, $($arg:tt)*) => {
        if $agent.options().print_internals {
            eprintln!("[nova_vm] {}", format!($($arg)*));
        }
    };
}

pub(crate) use trace;
