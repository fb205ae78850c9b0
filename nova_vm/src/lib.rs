// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `nova_vm`: the runtime core of an ECMAScript engine. No parser, no
//! bytecode compiler, no host/DOM bindings - just the value
//! representation, the object/shape model, the bytecode stack machine,
//! and the promise/microtask machinery a host embeds to run already-
//! compiled bytecode.
//!
//! Modules mirror the spec's component boundaries rather than any
//! particular ECMAScript chapter numbering:
//! - [`types`] - `Value`, `PropertyKey`, conversions.
//! - [`object`] - shapes, ordinary object operations, Proxy traps.
//! - [`buffers`] - `ArrayBuffer`/`TypedArray`/`DataView` (feature `array-buffer`).
//! - [`functions`] - the polymorphic `Function` sum and super dispatch.
//! - [`executor`] - the bytecode interpreter and generator state machine.
//! - [`iteration`] - the iterator protocol (`for-of`, `IteratorClose`).
//! - [`promise`] - the promise state machine and its microtask jobs.
//! - [`weak`] - weak collections and disposable stacks (feature `weak-refs`).
//! - [`engine`] - `Agent`: the thing that owns all of the above.

pub mod engine;
pub mod executor;
pub mod functions;
pub mod heap;
pub mod iteration;
pub mod object;
pub mod promise;
pub mod types;

#[cfg(feature = "array-buffer")]
pub mod buffers;

#[cfg(feature = "weak-refs")]
pub mod weak;
