// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use ahash::AHashMap;

use crate::engine::diagnostics::trace;
use crate::engine::{ExceptionType, HostHooks, Job, JsError, JsResult, MicrotaskQueue, NullHostHooks, Options};
use crate::functions::Function;
use crate::heap::{Heap, ObjectIndex, SymbolIndex};
use crate::types::{StringValue, SymbolHeapData, Value};

/// One call frame: the function being run and the `this` it was
/// invoked with. The executor pushes one of these per call and pops it
/// on return/throw unwind past the function boundary.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    pub function: Option<Function>,
    pub this_value: Value,
}

/// The engine instance. Owns the heap, the configuration, the call
/// stack, the microtask queue, and the global symbol registry. There is
/// exactly one `Agent` per independent JS world - this core does not
/// model the multi-realm (same-agent, multiple-globals) case a
/// browser-hosted engine needs.
pub struct Agent {
    pub(crate) heap: Heap,
    options: Options,
    next_symbol_id: u64,
    global_symbol_registry: AHashMap<String, SymbolIndex>,
    host_hooks: Box<dyn HostHooks>,
    execution_context_stack: Vec<ExecutionContext>,
    microtasks: MicrotaskQueue,
    pub(crate) object_prototype: Option<ObjectIndex>,
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("options", &self.options)
            .field("execution_context_depth", &self.execution_context_stack.len())
            .field("pending_microtasks", &self.microtasks.len())
            .finish()
    }
}

impl Agent {
    pub fn new(options: Options) -> Self {
        Self::with_host_hooks(options, Box::new(NullHostHooks))
    }

    pub fn with_host_hooks(options: Options, host_hooks: Box<dyn HostHooks>) -> Self {
        Self {
            heap: Heap::default(),
            options,
            next_symbol_id: 0,
            global_symbol_registry: AHashMap::new(),
            host_hooks,
            execution_context_stack: vec![ExecutionContext {
                function: None,
                this_value: Value::Undefined,
            }],
            microtasks: MicrotaskQueue::new(),
            object_prototype: None,
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn host_hooks(&self) -> &dyn HostHooks {
        self.host_hooks.as_ref()
    }

    pub fn running_execution_context(&self) -> &ExecutionContext {
        self.execution_context_stack
            .last()
            .expect("execution context stack must never be empty")
    }

    pub fn running_execution_context_mut(&mut self) -> &mut ExecutionContext {
        self.execution_context_stack
            .last_mut()
            .expect("execution context stack must never be empty")
    }

    pub(crate) fn push_execution_context(&mut self, context: ExecutionContext) {
        self.execution_context_stack.push(context);
    }

    pub(crate) fn pop_execution_context(&mut self) -> ExecutionContext {
        self.execution_context_stack
            .pop()
            .expect("popped past the base execution context")
    }

    /// Every live execution context, oldest first. Used by
    /// `crate::weak::sweep_weak_collections` as GC roots.
    pub(crate) fn execution_context_stack_for_gc(&self) -> impl Iterator<Item = &ExecutionContext> {
        self.execution_context_stack.iter()
    }

    /// Creates a fresh, unregistered symbol.
    pub fn create_symbol(&mut self, description: Option<StringValue>) -> SymbolIndex {
        self.next_symbol_id += 1;
        self.heap.symbols.alloc(SymbolHeapData {
            descriptor: description,
            is_registered: false,
        })
    }

    /// ### [20.4.2.2 Symbol.for ( key )](https://tc39.es/ecma262/#sec-symbol.for)
    pub fn symbol_for(&mut self, key: &str) -> SymbolIndex {
        if let Some(existing) = self.global_symbol_registry.get(key) {
            return *existing;
        }
        let description = StringValue::from_str(self, key);
        let symbol = self.heap.symbols.alloc(SymbolHeapData {
            descriptor: Some(description),
            is_registered: true,
        });
        self.global_symbol_registry.insert(key.to_string(), symbol);
        symbol
    }

    /// Builds a thrown error value of the given kind. This core has no
    /// constructor/prototype intrinsics table, so the thrown value is a
    /// plain object carrying `name`/`message`, which is sufficient for
    /// `try`/`catch` and `.message`/`.name` inspection.
    pub fn create_exception(&mut self, kind: ExceptionType, message: &str) -> Value {
        let prototype = crate::object::Object::ordinary_object_prototype(self);
        let object = crate::object::ordinary_object_create(self, Some(prototype));
        let wrapped = crate::object::Object::from(object);
        let name_key = crate::types::PropertyKey::from_str(self, "name");
        let message_key = crate::types::PropertyKey::from_str(self, "message");
        let name_value = Value::from_str(self, kind.name());
        let message_value = Value::from_str(self, message);
        let _ = wrapped.define_own_property(
            self,
            name_key,
            crate::types::PropertyDescriptor::new_data_descriptor(name_value),
        );
        let _ = wrapped.define_own_property(
            self,
            message_key,
            crate::types::PropertyDescriptor::new_data_descriptor(message_value),
        );
        Value::Object(object)
    }

    pub fn throw_exception(&mut self, kind: ExceptionType, message: &str) -> JsError {
        let value = self.create_exception(kind, message);
        JsError::new(value)
    }

    pub fn enqueue_job(&mut self, job: Job) {
        self.microtasks.enqueue(job);
    }

    pub fn has_pending_microtasks(&self) -> bool {
        !self.microtasks.is_empty()
    }

    /// ### Microtask drain ("processMicrotasks")
    /// Reentrancy-guarded: a call while already draining is a no-op.
    pub fn run_jobs(&mut self) -> JsResult<()> {
        if self.microtasks.is_draining() {
            return Ok(());
        }
        self.microtasks.set_draining(true);
        trace!(self, "draining microtask queue");
        let result = (|| {
            while let Some(job) = self.microtasks.pop() {
                if let Err(err) = job.run(self) {
                    trace!(self, "unhandled error escaped a microtask: {:?}", err.value());
                }
            }
            Ok(())
        })();
        self.microtasks.set_draining(false);
        result
    }

    /// Discrete, host-invoked mark-and-sweep over weak collections
    /// (§4.9 ambient note). `Options::disable_gc` makes this a no-op,
    /// which test code relies on to keep object identity stable across
    /// calls that would otherwise sweep unreachable data.
    pub fn collect_garbage(&mut self) {
        if self.options.disable_gc {
            return;
        }
        crate::weak::sweep_weak_collections(self);
    }
}
