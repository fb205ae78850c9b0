// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The bytecode executor (§4.6): opcode stream, stack machine, and
//! generator/async-generator suspension.

pub mod frame;
pub mod generator;
mod instruction;
pub mod vm;

pub use frame::{Frame, StackSlot};
pub use generator::{create_generator, resume, throw, GeneratorHeapData, GeneratorState, IteratorResultRecord, ResumeKind};
pub use instruction::{Constant, Instruction};
pub use vm::{ExecutionOutcome, Vm};
