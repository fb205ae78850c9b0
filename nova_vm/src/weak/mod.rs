// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Weak references and explicit resource management (§4.9). Liveness
//! for `WeakRef`/`WeakMap`/`WeakSet`/`FinalizationRegistry` is decided
//! by [`sweep_weak_collections`], a discrete mark pass the embedder
//! triggers via `Agent::collect_garbage` rather than a continuously
//! running tracing collector - this core has no background thread.

mod disposable_stack;
mod finalization_registry;
mod weak_key;
mod weak_map;
mod weak_ref;
mod weak_set;

pub use disposable_stack::{
    create_disposable_stack, dispose, dispose_async, stack_adopt, stack_defer, stack_move, stack_use,
    DisposableStackHeapData,
};
pub use finalization_registry::{
    create_finalization_registry, enqueue_pending_cleanups, finalization_registry_register,
    finalization_registry_unregister, Cell, FinalizationRegistryCleanupJob, FinalizationRegistryHeapData,
};
pub use weak_key::{can_be_held_weakly, WeakKey};
pub use weak_map::{create_weak_map, weak_map_delete, weak_map_get, weak_map_has, weak_map_set, WeakMapHeapData};
pub use weak_ref::{create_weak_ref, weak_ref_deref, WeakRefHeapData};
pub use weak_set::{create_weak_set, weak_set_add, weak_set_delete, weak_set_has, WeakSetHeapData};

use std::collections::HashSet;

use crate::engine::Agent;
use crate::functions::Function;
use crate::heap::{FinalizationRegistryIndex, ObjectIndex};
use crate::object::InternalSlot;
use crate::promise::PromiseState;
use crate::types::Value;

/// Marks every object reachable from `value`, recursing through
/// objects' own properties, prototypes, and the values embedded in
/// callables (bound arguments, class instance fields) and promise
/// state. Proxy target/handler objects and a `WeakMap`'s *values*
/// (held strongly per spec) are also followed; `WeakMap`/`WeakSet` keys
/// and `WeakRef`/`FinalizationRegistry` targets are deliberately not
/// followed here - that is precisely the edge this sweep decides.
fn mark_value(agent: &Agent, value: &Value, seen: &mut HashSet<u32>) {
    match value {
        Value::Object(object) => mark_object(agent, *object, seen),
        _ => {}
    }
}

fn mark_function(agent: &Agent, function: Function, seen: &mut HashSet<u32>) {
    match function {
        Function::Bound(index) => {
            let data = &agent.heap.bound_functions[index];
            mark_function(agent, data.target, seen);
            mark_value(agent, &data.bound_this, seen);
            for arg in &data.bound_arguments {
                mark_value(agent, arg, seen);
            }
        }
        Function::Bytecode(index) => {
            for capture in &agent.heap.bytecode_functions[index].captures {
                mark_value(agent, capture, seen);
            }
        }
        Function::Class(index) => {
            let data = &agent.heap.classes[index];
            mark_object(agent, data.prototype, seen);
            if let Some(ctor) = data.constructor {
                mark_function(agent, ctor, seen);
            }
            if let Some(super_class) = data.super_class {
                mark_function(agent, super_class, seen);
            }
            for (_, value) in &data.instance_fields {
                mark_value(agent, value, seen);
            }
        }
        Function::Native(_) => {}
    }
}

fn mark_object(agent: &Agent, object: ObjectIndex, seen: &mut HashSet<u32>) {
    if !seen.insert(object.into_u32()) {
        return;
    }
    let data = &agent.heap.objects[object];
    if let Some(prototype) = data.prototype {
        mark_object(agent, prototype, seen);
    }
    if let Some(callable) = data.callable {
        mark_function(agent, callable, seen);
    }
    for (_, descriptor) in data.shape.entries() {
        if let Some(value) = &descriptor.value {
            mark_value(agent, value, seen);
        }
        if let Some(getter) = descriptor.get {
            mark_function(agent, getter, seen);
        }
        if let Some(setter) = descriptor.set {
            mark_function(agent, setter, seen);
        }
    }
    match &data.internal {
        InternalSlot::Proxy { target, handler } => {
            mark_object(agent, *target, seen);
            mark_object(agent, *handler, seen);
        }
        InternalSlot::Promise(promise) => match &agent.heap.promises[*promise].state {
            PromiseState::Fulfilled { value } => mark_value(agent, value, seen),
            PromiseState::Rejected { value, .. } => mark_value(agent, value, seen),
            PromiseState::Pending { .. } => {}
        },
        _ => {}
    }
}

fn mark_weak_map_values(agent: &Agent, seen: &mut HashSet<u32>) {
    for map in agent.heap.weak_maps.iter() {
        for (_, value) in &map.entries {
            mark_value(agent, value, seen);
        }
    }
}

/// ### Ambient GC sweep (§4.9 "Ambient" note)
///
/// 1. Mark every object reachable from the execution-context stack,
///    suspended generator frames, and `WeakMap` values.
/// 2. For every weak collection, drop entries/clear handles whose
///    target is not in the marked set, running any now-due
///    `FinalizationRegistry` cleanup callbacks as microtasks.
///
/// The main object arena is never compacted - see `heap::arena::Arena`
/// - so this only ever affects weak-collection bookkeeping, never
/// object identity or the shapes/executor state built on top of it.
pub fn sweep_weak_collections(agent: &mut Agent) {
    let mut seen = HashSet::new();
    if let Some(prototype) = agent.object_prototype {
        mark_object(agent, prototype, &mut seen);
    }
    for context in agent.execution_context_stack_for_gc() {
        mark_value(agent, &context.this_value, &mut seen);
        if let Some(function) = context.function {
            mark_function(agent, function, &mut seen);
        }
    }
    for generator in agent.heap.generators.iter() {
        for value in generator.frame_values_for_gc() {
            mark_value(agent, value, &mut seen);
        }
    }
    // WeakMap values are held strongly; mark them before deciding what
    // is reachable so a value-only chain back into another collection's
    // key set is honored.
    mark_weak_map_values(agent, &mut seen);

    for weak_ref in agent.heap.weak_refs.iter_mut() {
        if let Some(target) = weak_ref.target {
            if !target.is_reachable(&seen) {
                weak_ref.target = None;
            }
        }
    }
    for map in agent.heap.weak_maps.iter_mut() {
        map.entries.retain(|(key, _)| key.is_reachable(&seen));
    }
    for set in agent.heap.weak_sets.iter_mut() {
        set.entries.retain(|key| key.is_reachable(&seen));
    }
    let registry_count = agent.heap.finalization_registries.len();
    for raw in 0..registry_count {
        let registry = FinalizationRegistryIndex::from_u32(raw as u32);
        for cell in agent.heap.finalization_registries[registry].cells.iter_mut() {
            if let Some(target) = cell.target {
                if !target.is_reachable(&seen) {
                    cell.target = None;
                }
            }
        }
        enqueue_pending_cleanups(agent, registry);
    }
}
