// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The object model (§4.2-4.3): shapes, ordinary objects, internal
//! slots (primitive wrappers, buffers, callables, ...), and Proxy
//! trapping.

mod ordinary;
mod proxy;
mod shape;

pub use ordinary::{create_function_object, create_primitive_wrapper, ordinary_object_create};
pub use shape::Shape;

use crate::functions::Function;
#[cfg(feature = "array-buffer")]
use crate::heap::{ArrayBufferIndex, DataViewIndex, TypedArrayIndex};
#[cfg(feature = "weak-refs")]
use crate::heap::{DisposableStackIndex, FinalizationRegistryIndex, WeakMapIndex, WeakRefIndex};
#[cfg(feature = "set")]
use crate::heap::WeakSetIndex;
use crate::heap::{ObjectIndex, PromiseIndex};
use crate::types::Value;

/// Everything beyond "a bag of properties" an object can be: a
/// primitive wrapper, an exotic array, a buffer/view, a weak
/// collection, a promise, a disposable stack, or a Proxy's
/// target+handler pair. At most one slot is populated per object.
#[derive(Debug, Clone)]
pub enum InternalSlot {
    None,
    /// `Boolean`/`Number`/`String`/`Symbol`/`BigInt` wrapper objects.
    Primitive(Value),
    /// Marks exotic `Array` behavior; `length` itself is an ordinary
    /// own property kept in sync by `Object::set`.
    Array,
    #[cfg(feature = "array-buffer")]
    ArrayBuffer(ArrayBufferIndex),
    #[cfg(feature = "array-buffer")]
    TypedArray(TypedArrayIndex),
    #[cfg(feature = "array-buffer")]
    DataView(DataViewIndex),
    Proxy {
        target: ObjectIndex,
        handler: ObjectIndex,
    },
    #[cfg(feature = "weak-refs")]
    WeakRef(WeakRefIndex),
    #[cfg(feature = "weak-refs")]
    WeakMap(WeakMapIndex),
    #[cfg(feature = "set")]
    WeakSet(WeakSetIndex),
    #[cfg(feature = "weak-refs")]
    FinalizationRegistry(FinalizationRegistryIndex),
    Promise(PromiseIndex),
    #[cfg(feature = "weak-refs")]
    DisposableStack(DisposableStackIndex),
    #[cfg(feature = "weak-refs")]
    AsyncDisposableStack(DisposableStackIndex),
}

#[derive(Debug, Clone)]
pub struct ObjectHeapData {
    pub shape: Shape,
    pub prototype: Option<ObjectIndex>,
    pub extensible: bool,
    pub callable: Option<Function>,
    pub internal: InternalSlot,
}

impl ObjectHeapData {
    pub fn new(prototype: Option<ObjectIndex>) -> Self {
        Self {
            shape: Shape::new(),
            prototype,
            extensible: true,
            callable: None,
            internal: InternalSlot::None,
        }
    }

    pub fn is_callable(&self) -> bool {
        self.callable.is_some()
    }
}

/// A lightweight handle to a heap object, giving the ergonomic
/// `object.get(agent, ...)` method-call surface without making every
/// caller spell out `agent.heap.objects[index]` by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Object(pub ObjectIndex);

impl From<ObjectIndex> for Object {
    fn from(index: ObjectIndex) -> Self {
        Object(index)
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::Object(object.0)
    }
}
