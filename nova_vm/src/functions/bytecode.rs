// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::rc::Rc;

use crate::engine::Agent;
use crate::executor::Instruction;
use crate::heap::{BytecodeFunctionIndex, CreateHeapData};
use crate::types::{StringValue, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    Normal,
    Generator,
    Async,
    AsyncGenerator,
}

/// A compiled function body: its instruction stream, constant pool,
/// captured closure values, and declared shape (arity/name/flags).
/// `body` is reference-counted so that multiple closures instantiated
/// from the same source function (each with its own `captures`) share
/// one instruction stream rather than copying it.
#[derive(Debug, Clone)]
pub struct BytecodeFunctionHeapData {
    pub name: Option<StringValue>,
    pub length: u32,
    pub kind: FunctionKind,
    pub is_constructor: bool,
    pub body: Rc<CompiledBody>,
    pub captures: Vec<Value>,
}

#[derive(Debug)]
pub struct CompiledBody {
    pub instructions: Vec<Instruction>,
    pub constants: Vec<crate::executor::Constant>,
    pub local_count: u32,
}

/// ### Embedder entry point: load a compiled function (§6 "Bytecode format")
/// The core never compiles source itself; an embedder hands it an
/// already-assembled [`CompiledBody`] plus the declared shape the
/// external compiler produced for it.
pub fn create_bytecode_function(
    agent: &mut Agent,
    body: Rc<CompiledBody>,
    name: Option<StringValue>,
    length: u32,
    kind: FunctionKind,
    is_constructor: bool,
    captures: Vec<Value>,
) -> BytecodeFunctionIndex {
    agent.heap.create(BytecodeFunctionHeapData {
        name,
        length,
        kind,
        is_constructor,
        body,
        captures,
    })
}
