// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The bytecode stack machine (§4.6): executes one [`CompiledBody`] at
//! a time, threading `try`/`catch` unwind through the frame's
//! catch-marker stack rather than Rust's own call stack, so a thrown
//! value can jump directly to its handler without unwinding native
//! frames.

use crate::engine::{Agent, ExceptionType, ExecutionContext, JsError, JsResult};
use crate::executor::frame::{Frame, StackSlot};
use crate::executor::instruction::{Constant, Instruction};
use crate::functions::{BytecodeFunctionHeapData, CompiledBody, Function, FunctionKind};
use crate::heap::BytecodeFunctionIndex;
use crate::types::{conversion, Value};

/// What a run of the interpreter loop stopped on: either the function
/// returned, or (inside a generator/async body) it hit a `Yield`.
#[derive(Debug)]
pub enum ExecutionOutcome {
    Return(Value),
    Yield(Value),
}

pub struct Vm;

impl Vm {
    /// Runs a bytecode function to completion. Generator/async-generator
    /// functions are never invoked through this entry point directly -
    /// calling one produces a suspended generator object instead, which
    /// `crate::executor::generator` drives via [`Vm::resume`].
    pub fn call(
        agent: &mut Agent,
        index: BytecodeFunctionIndex,
        this: Value,
        args: &[Value],
    ) -> JsResult<Value> {
        let (body, captures) = {
            let data: &BytecodeFunctionHeapData = &agent.heap.bytecode_functions[index];
            (data.body.clone(), data.captures.clone())
        };
        let mut frame = Self::prepare_frame(this, captures, &body, args);
        agent.push_execution_context(ExecutionContext {
            function: Some(Function::Bytecode(index)),
            this_value: frame.this_value.clone(),
        });
        let result = Self::run(agent, &mut frame, &body, 0);
        agent.pop_execution_context();
        match result? {
            (ExecutionOutcome::Return(value), _) => Ok(value),
            (ExecutionOutcome::Yield(_), _) => {
                Err(agent.throw_exception(ExceptionType::TypeError, "yield used outside a generator"))
            }
        }
    }

    fn prepare_frame(this: Value, captures: Vec<Value>, body: &CompiledBody, args: &[Value]) -> Frame {
        let mut frame = Frame::new(this, captures, body.local_count);
        for (i, arg) in args.iter().enumerate() {
            if (i as u32) < body.local_count {
                frame.locals[i] = arg.clone();
            }
        }
        frame
    }

    /// Resumes a generator/async-generator frame starting at `pc`.
    /// Exposed for [`crate::executor::generator`]; ordinary function
    /// calls never need a start offset other than `0`.
    pub(crate) fn run(
        agent: &mut Agent,
        frame: &mut Frame,
        body: &CompiledBody,
        start_pc: usize,
    ) -> JsResult<(ExecutionOutcome, usize)> {
        Self::run_from(agent, frame, body, start_pc, None)
    }

    /// Like [`Vm::run`], but resumes a suspended `yield` with an abrupt
    /// throw completion instead of a normal value: the `thrown` value is
    /// unwound through the frame's catch stack exactly as if the
    /// instruction at `start_pc` had itself executed `Throw`, before any
    /// further instruction runs.
    pub(crate) fn run_with_injected_throw(
        agent: &mut Agent,
        frame: &mut Frame,
        body: &CompiledBody,
        start_pc: usize,
        thrown: Value,
    ) -> JsResult<(ExecutionOutcome, usize)> {
        Self::run_from(agent, frame, body, start_pc, Some(JsError::new(thrown)))
    }

    fn run_from(
        agent: &mut Agent,
        frame: &mut Frame,
        body: &CompiledBody,
        start_pc: usize,
        injected: Option<JsError>,
    ) -> JsResult<(ExecutionOutcome, usize)> {
        let mut pc = start_pc;
        if let Some(err) = injected {
            pc = Self::unwind(frame, err)?;
        }
        loop {
            if pc >= body.instructions.len() {
                return Ok((ExecutionOutcome::Return(Value::Undefined), pc));
            }
            let instruction = body.instructions[pc].clone();
            let mut next_pc = pc + 1;
            let step = Self::step(agent, frame, body, &instruction, &mut next_pc);
            match step {
                Ok(Some(outcome)) => return Ok((outcome, next_pc)),
                Ok(None) => pc = next_pc,
                Err(err) => pc = Self::unwind(frame, err)?,
            }
        }
    }

    /// Pops the innermost catch marker and jumps to its handler, pushing
    /// `err`'s value as the caught value; propagates `err` unchanged if
    /// the frame has no enclosing `try`.
    fn unwind(frame: &mut Frame, err: JsError) -> JsResult<usize> {
        if let Some(marker) = frame.catch_stack.pop() {
            frame.operand_stack.truncate(marker.stack_depth);
            frame.push(err.value());
            Ok(marker.handler_pc)
        } else {
            Err(err)
        }
    }

    fn step(
        agent: &mut Agent,
        frame: &mut Frame,
        body: &CompiledBody,
        instruction: &Instruction,
        next_pc: &mut usize,
    ) -> JsResult<Option<ExecutionOutcome>> {
        match instruction {
            Instruction::LoadConstant(idx) => {
                let value = match &body.constants[*idx as usize] {
                    Constant::Value(v) => v.clone(),
                    Constant::PropertyKeyLiteral(s) => Value::from_str(agent, s),
                };
                frame.push(value);
            }
            Instruction::LoadLocal(idx) => {
                frame.push(frame.locals[*idx as usize].clone());
            }
            Instruction::StoreLocal(idx) => {
                let value = frame.pop();
                frame.locals[*idx as usize] = value;
            }
            Instruction::LoadThis => {
                frame.push(frame.this_value.clone());
            }
            Instruction::Pop => {
                frame.pop();
            }
            Instruction::Dup => {
                let top = frame.operand_stack.last().expect("operand stack underflow").clone();
                frame.push(top);
            }
            Instruction::Add => {
                let b = frame.pop();
                let a = frame.pop();
                frame.push(Self::add(agent, a, b)?);
            }
            Instruction::Sub => Self::binary_number_op(agent, frame, |a, b| a - b)?,
            Instruction::Mul => Self::binary_number_op(agent, frame, |a, b| a * b)?,
            Instruction::Div => Self::binary_number_op(agent, frame, |a, b| a / b)?,
            Instruction::StrictEqual => {
                let b = frame.pop();
                let a = frame.pop();
                frame.push(Value::Boolean(a.strict_equals(agent, &b)));
            }
            Instruction::LessThan => {
                let b = frame.pop();
                let a = frame.pop();
                let a = conversion::to_number(agent, a)?;
                let b = conversion::to_number(agent, b)?;
                frame.push(Value::Boolean(a < b));
            }
            Instruction::Not => {
                let a = frame.pop();
                frame.push(Value::Boolean(!a.to_boolean(agent)));
            }
            Instruction::JumpIfFalse(offset) => {
                let condition = frame.pop();
                if !condition.to_boolean(agent) {
                    *next_pc = (*next_pc as i64 + *offset as i64) as usize;
                }
            }
            Instruction::Jump(offset) => {
                *next_pc = (*next_pc as i64 + *offset as i64) as usize;
            }
            Instruction::PushCatch(offset) => {
                frame.catch_stack.push(StackSlot {
                    handler_pc: (*next_pc as i64 + *offset as i64) as usize,
                    stack_depth: frame.operand_stack.len(),
                });
            }
            Instruction::PopCatch => {
                frame.catch_stack.pop();
            }
            Instruction::Throw => {
                let value = frame.pop();
                return Err(JsError::new(value));
            }
            Instruction::Return => {
                let value = frame.pop();
                return Ok(Some(ExecutionOutcome::Return(value)));
            }
            Instruction::Call(argc) => {
                let argc = *argc as usize;
                let mut args = Vec::with_capacity(argc);
                for _ in 0..argc {
                    args.push(frame.pop());
                }
                args.reverse();
                let callee = frame.pop();
                let this = frame.pop();
                let result = crate::functions::call(agent, callee, this, &args)?;
                frame.push(result);
            }
            Instruction::GetProperty => {
                let key_value = frame.pop();
                let object_value = frame.pop();
                let key = key_value.to_property_key(agent)?;
                let Value::Object(object) = object_value else {
                    return Err(agent.throw_exception(
                        ExceptionType::TypeError,
                        "Cannot read properties of a non-object value",
                    ));
                };
                let result = crate::object::Object::from(object).get(agent, key, Value::Object(object))?;
                frame.push(result);
            }
            Instruction::SetProperty => {
                let value = frame.pop();
                let key_value = frame.pop();
                let object_value = frame.pop();
                let key = key_value.to_property_key(agent)?;
                let Value::Object(object) = object_value else {
                    return Err(agent.throw_exception(
                        ExceptionType::TypeError,
                        "Cannot set properties of a non-object value",
                    ));
                };
                crate::object::Object::from(object).set(agent, key, value.clone(), Value::Object(object))?;
                frame.push(value);
            }
            Instruction::Yield => {
                let value = frame.pop();
                return Ok(Some(ExecutionOutcome::Yield(value)));
            }
        }
        Ok(None)
    }

    fn add(agent: &mut Agent, a: Value, b: Value) -> JsResult<Value> {
        let a_prim = conversion::to_primitive(agent, a, crate::types::PreferredType::Default)?;
        let b_prim = conversion::to_primitive(agent, b, crate::types::PreferredType::Default)?;
        if matches!(a_prim, Value::String(_)) || matches!(b_prim, Value::String(_)) {
            let a_str = conversion::to_string(agent, a_prim)?;
            let b_str = conversion::to_string(agent, b_prim)?;
            let concatenated = format!("{}{}", a_str.as_str(agent), b_str.as_str(agent));
            return Ok(Value::from_str(agent, &concatenated));
        }
        let a_num = conversion::to_number(agent, a_prim)?;
        let b_num = conversion::to_number(agent, b_prim)?;
        Ok(Value::Number(a_num + b_num))
    }

    fn binary_number_op(
        agent: &mut Agent,
        frame: &mut Frame,
        op: impl FnOnce(f64, f64) -> f64,
    ) -> JsResult<()> {
        let b = frame.pop();
        let a = frame.pop();
        let a = conversion::to_number(agent, a)?;
        let b = conversion::to_number(agent, b)?;
        frame.push(Value::Number(op(a, b)));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Options;
    use crate::functions::CompiledBody;
    use crate::heap::CreateHeapData;
    use std::rc::Rc;

    fn make_function(agent: &mut Agent, instructions: Vec<Instruction>, constants: Vec<Constant>) -> BytecodeFunctionIndex {
        let body = Rc::new(CompiledBody {
            instructions,
            constants,
            local_count: 1,
        });
        agent.heap.create(BytecodeFunctionHeapData {
            name: None,
            length: 0,
            kind: FunctionKind::Normal,
            is_constructor: false,
            body,
            captures: Vec::new(),
        })
    }

    #[test]
    fn runs_a_simple_addition() {
        let mut agent = Agent::new(Options::default());
        let index = make_function(
            &mut agent,
            vec![
                Instruction::LoadConstant(0),
                Instruction::LoadConstant(1),
                Instruction::Add,
                Instruction::Return,
            ],
            vec![Constant::Value(Value::Number(2.0)), Constant::Value(Value::Number(3.0))],
        );
        let result = Vm::call(&mut agent, index, Value::Undefined, &[]).unwrap();
        assert_eq!(result, Value::Number(5.0));
    }

    #[test]
    fn catch_marker_absorbs_a_throw() {
        let mut agent = Agent::new(Options::default());
        // try { throw 1 } catch handler pushes 99, returns it.
        let index = make_function(
            &mut agent,
            vec![
                Instruction::PushCatch(2),
                Instruction::LoadConstant(0),
                Instruction::Throw,
                Instruction::Pop,
                Instruction::LoadConstant(1),
                Instruction::Return,
            ],
            vec![Constant::Value(Value::Number(1.0)), Constant::Value(Value::Number(99.0))],
        );
        let result = Vm::call(&mut agent, index, Value::Undefined, &[]).unwrap();
        assert_eq!(result, Value::Number(99.0));
    }
}
