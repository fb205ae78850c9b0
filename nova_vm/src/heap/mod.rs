// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Arena-based heap storage. Every heap-allocated kind of data (objects,
//! heap strings, symbols, bound functions, promises, ...) lives in its
//! own `Arena<T>`, a flat `Vec<T>` addressed by a small `Copy` handle
//! ([`Index<T>`]) rather than an owning Rust reference. This keeps
//! densely cross-referential structures (an object's prototype, a
//! promise's reactions, a bound function's target) representable
//! without lifetimes or reference counting: a handle is just a `u32`
//! plus a phantom type tag recording which arena it indexes into.

mod arena;

pub use arena::{Arena, Index};

#[cfg(feature = "array-buffer")]
use crate::buffers::{ArrayBufferHeapData, DataViewHeapData, TypedArrayHeapData};
use crate::executor::GeneratorHeapData;
use crate::functions::{BoundFunctionHeapData, BytecodeFunctionHeapData, ClassHeapData, NativeFunctionHeapData};
use crate::object::ObjectHeapData;
use crate::promise::{PromiseHeapData, PromiseReactionData};
use crate::types::{HeapStringData, SymbolHeapData};
#[cfg(feature = "weak-refs")]
use crate::weak::{DisposableStackHeapData, FinalizationRegistryHeapData, WeakMapHeapData, WeakRefHeapData};
#[cfg(feature = "set")]
use crate::weak::WeakSetHeapData;

pub type ObjectIndex = Index<ObjectHeapData>;
pub type StringIndex = Index<HeapStringData>;
pub type SymbolIndex = Index<SymbolHeapData>;
pub type BoundFunctionIndex = Index<BoundFunctionHeapData>;
pub type BytecodeFunctionIndex = Index<BytecodeFunctionHeapData>;
pub type NativeFunctionIndex = Index<NativeFunctionHeapData>;
pub type ClassIndex = Index<ClassHeapData>;
#[cfg(feature = "array-buffer")]
pub type ArrayBufferIndex = Index<ArrayBufferHeapData>;
#[cfg(feature = "array-buffer")]
pub type TypedArrayIndex = Index<TypedArrayHeapData>;
#[cfg(feature = "array-buffer")]
pub type DataViewIndex = Index<DataViewHeapData>;
pub type PromiseIndex = Index<PromiseHeapData>;
pub type PromiseReactionIndex = Index<PromiseReactionData>;
#[cfg(feature = "weak-refs")]
pub type WeakRefIndex = Index<WeakRefHeapData>;
#[cfg(feature = "weak-refs")]
pub type WeakMapIndex = Index<WeakMapHeapData>;
#[cfg(feature = "set")]
pub type WeakSetIndex = Index<WeakSetHeapData>;
#[cfg(feature = "weak-refs")]
pub type FinalizationRegistryIndex = Index<FinalizationRegistryHeapData>;
#[cfg(feature = "weak-refs")]
pub type DisposableStackIndex = Index<DisposableStackHeapData>;
pub type GeneratorIndex = Index<GeneratorHeapData>;

#[derive(Debug, Default)]
pub struct Heap {
    pub(crate) objects: Arena<ObjectHeapData>,
    pub(crate) strings: Arena<HeapStringData>,
    pub(crate) symbols: Arena<SymbolHeapData>,
    pub(crate) bound_functions: Arena<BoundFunctionHeapData>,
    pub(crate) bytecode_functions: Arena<BytecodeFunctionHeapData>,
    pub(crate) native_functions: Arena<NativeFunctionHeapData>,
    pub(crate) classes: Arena<ClassHeapData>,
    #[cfg(feature = "array-buffer")]
    pub(crate) array_buffers: Arena<ArrayBufferHeapData>,
    #[cfg(feature = "array-buffer")]
    pub(crate) typed_arrays: Arena<TypedArrayHeapData>,
    #[cfg(feature = "array-buffer")]
    pub(crate) data_views: Arena<DataViewHeapData>,
    pub(crate) promises: Arena<PromiseHeapData>,
    pub(crate) promise_reactions: Arena<PromiseReactionData>,
    #[cfg(feature = "weak-refs")]
    pub(crate) weak_refs: Arena<WeakRefHeapData>,
    #[cfg(feature = "weak-refs")]
    pub(crate) weak_maps: Arena<WeakMapHeapData>,
    #[cfg(feature = "set")]
    pub(crate) weak_sets: Arena<WeakSetHeapData>,
    #[cfg(feature = "weak-refs")]
    pub(crate) finalization_registries: Arena<FinalizationRegistryHeapData>,
    #[cfg(feature = "weak-refs")]
    pub(crate) disposable_stacks: Arena<DisposableStackHeapData>,
    pub(crate) generators: Arena<GeneratorHeapData>,
}

/// Implemented per heap-data kind so call sites can write
/// `agent.heap.create(data)` uniformly, mirroring `CreateHeapData` in
/// the lineage this crate is descended from.
pub trait CreateHeapData<T> {
    type Index;
    fn create(&mut self, data: T) -> Self::Index;
}

macro_rules! impl_create_heap_data {
    ($field:ident, $data:ty) => {
        impl CreateHeapData<$data> for Heap {
            type Index = Index<$data>;
            fn create(&mut self, data: $data) -> Self::Index {
                self.$field.alloc(data)
            }
        }
    };
}

impl_create_heap_data!(objects, ObjectHeapData);
impl_create_heap_data!(strings, HeapStringData);
impl_create_heap_data!(symbols, SymbolHeapData);
impl_create_heap_data!(bound_functions, BoundFunctionHeapData);
impl_create_heap_data!(bytecode_functions, BytecodeFunctionHeapData);
impl_create_heap_data!(native_functions, NativeFunctionHeapData);
impl_create_heap_data!(classes, ClassHeapData);
#[cfg(feature = "array-buffer")]
impl_create_heap_data!(array_buffers, ArrayBufferHeapData);
#[cfg(feature = "array-buffer")]
impl_create_heap_data!(typed_arrays, TypedArrayHeapData);
#[cfg(feature = "array-buffer")]
impl_create_heap_data!(data_views, DataViewHeapData);
impl_create_heap_data!(promises, PromiseHeapData);
impl_create_heap_data!(promise_reactions, PromiseReactionData);
#[cfg(feature = "weak-refs")]
impl_create_heap_data!(weak_refs, WeakRefHeapData);
#[cfg(feature = "weak-refs")]
impl_create_heap_data!(weak_maps, WeakMapHeapData);
#[cfg(feature = "set")]
impl_create_heap_data!(weak_sets, WeakSetHeapData);
#[cfg(feature = "weak-refs")]
impl_create_heap_data!(finalization_registries, FinalizationRegistryHeapData);
#[cfg(feature = "weak-refs")]
impl_create_heap_data!(disposable_stacks, DisposableStackHeapData);
impl_create_heap_data!(generators, GeneratorHeapData);
