// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Generator/async-generator state machine (§4.6). A generator keeps
//! its [`Frame`] and program counter alive across calls to `next`,
//! resuming the interpreter loop from where the previous [`Vm::resume`]
//! call left off instead of starting over.

use crate::engine::{Agent, ExceptionType, ExecutionContext, JsError, JsResult};
use crate::executor::frame::Frame;
use crate::executor::vm::{ExecutionOutcome, Vm};
use crate::functions::{BytecodeFunctionHeapData, Function};
use crate::heap::{BytecodeFunctionIndex, CreateHeapData, GeneratorIndex};
use crate::types::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorState {
    SuspendedStart,
    SuspendedYield,
    Executing,
    Completed,
}

/// What a `next`/`return`/`throw` resumption produces.
#[derive(Debug, Clone, PartialEq)]
pub struct IteratorResultRecord {
    pub value: Value,
    pub done: bool,
}

#[derive(Debug)]
pub struct GeneratorHeapData {
    function: BytecodeFunctionIndex,
    frame: Frame,
    pc: usize,
    state: GeneratorState,
}

pub fn create_generator(agent: &mut Agent, function: BytecodeFunctionIndex, this: Value, args: &[Value]) -> GeneratorIndex {
    let (body, captures) = {
        let data: &BytecodeFunctionHeapData = &agent.heap.bytecode_functions[function];
        (data.body.clone(), data.captures.clone())
    };
    let mut frame = Frame::new(this, captures, body.local_count);
    for (i, arg) in args.iter().enumerate() {
        if (i as u32) < body.local_count {
            frame.locals[i] = arg.clone();
        }
    }
    agent.heap.create(GeneratorHeapData {
        function,
        frame,
        pc: 0,
        state: GeneratorState::SuspendedStart,
    })
}

/// What a resumption injects into the suspended `yield` expression: a
/// plain value, or an abrupt throw completion.
#[derive(Debug, Clone)]
pub enum ResumeKind {
    Next(Value),
    Throw(Value),
}

/// ### [27.5.3.3 GeneratorResume ( generator, value, generatorBrand )](https://tc39.es/ecma262/#sec-generatorresume)
/// `resume_value` becomes the result of the `yield` expression that
/// suspended the generator; it is ignored on the very first resumption.
pub fn resume(agent: &mut Agent, generator: GeneratorIndex, resume_value: Value) -> JsResult<IteratorResultRecord> {
    resume_with(agent, generator, ResumeKind::Next(resume_value))
}

/// ### [27.5.3.4 GeneratorResumeAbrupt ( generator, abruptCompletion, generatorBrand )](https://tc39.es/ecma262/#sec-generatorresumeabrupt)
/// Drives the suspended `yield` expression with a throw completion
/// instead of a value, so a `try`/`catch` wrapping it observes the
/// thrown value the same way `throw` inside the generator body would.
pub fn throw(agent: &mut Agent, generator: GeneratorIndex, thrown_value: Value) -> JsResult<IteratorResultRecord> {
    resume_with(agent, generator, ResumeKind::Throw(thrown_value))
}

fn resume_with(agent: &mut Agent, generator: GeneratorIndex, kind: ResumeKind) -> JsResult<IteratorResultRecord> {
    let was_start = {
        let data = &agent.heap.generators[generator];
        match data.state {
            GeneratorState::Completed => {
                return match kind {
                    ResumeKind::Next(_) => Ok(IteratorResultRecord {
                        value: Value::Undefined,
                        done: true,
                    }),
                    ResumeKind::Throw(thrown) => Err(JsError::new(thrown)),
                };
            }
            GeneratorState::Executing => {
                return Err(agent.throw_exception(ExceptionType::TypeError, "Generator is already running"));
            }
            GeneratorState::SuspendedStart => true,
            GeneratorState::SuspendedYield => false,
        }
    };

    if was_start {
        if let ResumeKind::Throw(thrown) = kind {
            // Never started running: there is no `try` in scope yet to
            // catch this, so it propagates straight out.
            agent.heap.generators[generator].state = GeneratorState::Completed;
            return Err(JsError::new(thrown));
        }
    }

    agent.heap.generators[generator].state = GeneratorState::Executing;
    if !was_start {
        if let ResumeKind::Next(value) = &kind {
            // Not the first resumption: the value becomes the result of
            // the `yield` expression that suspended execution. A throw
            // resumption instead gets injected below via
            // `Vm::run_with_injected_throw`, unwinding the catch stack
            // right at the suspension point.
            agent.heap.generators[generator].frame.push(value.clone());
        }
    }

    let function = agent.heap.generators[generator].function;
    let body = agent.heap.bytecode_functions[function].body.clone();
    let start_pc = agent.heap.generators[generator].pc;

    agent.push_execution_context(ExecutionContext {
        function: Some(Function::Bytecode(function)),
        this_value: agent.heap.generators[generator].frame.this_value.clone(),
    });
    let mut frame = std::mem::replace(
        &mut agent.heap.generators[generator].frame,
        Frame::new(Value::Undefined, Vec::new(), 0),
    );
    let run_result = match kind {
        ResumeKind::Next(_) => Vm::run(agent, &mut frame, &body, start_pc),
        ResumeKind::Throw(thrown) => Vm::run_with_injected_throw(agent, &mut frame, &body, start_pc, thrown),
    };
    agent.heap.generators[generator].frame = frame;
    agent.pop_execution_context();

    match run_result {
        Ok((ExecutionOutcome::Yield(value), next_pc)) => {
            let data = &mut agent.heap.generators[generator];
            data.pc = next_pc;
            data.state = GeneratorState::SuspendedYield;
            Ok(IteratorResultRecord { value, done: false })
        }
        Ok((ExecutionOutcome::Return(value), _)) => {
            agent.heap.generators[generator].state = GeneratorState::Completed;
            Ok(IteratorResultRecord { value, done: true })
        }
        Err(err) => {
            agent.heap.generators[generator].state = GeneratorState::Completed;
            Err(err)
        }
    }
}

pub fn state(agent: &Agent, generator: GeneratorIndex) -> GeneratorState {
    agent.heap.generators[generator].state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Options;
    use crate::executor::instruction::{Constant, Instruction};
    use crate::functions::{BytecodeFunctionHeapData, CompiledBody, FunctionKind};
    use std::rc::Rc;

    /// `try { yield 1; "normal" } catch { e }`, roughly: the `yield` at
    /// pc 2 is wrapped in a catch (handler at pc 6) so a throw-kind
    /// resumption and a next-kind resumption take visibly different
    /// paths through the same suspended frame.
    fn make_generator_function(agent: &mut Agent) -> BytecodeFunctionIndex {
        let body = Rc::new(CompiledBody {
            instructions: vec![
                Instruction::PushCatch(5),    // 0: handler at pc 6
                Instruction::LoadConstant(0), // 1: push 1.0
                Instruction::Yield,           // 2: suspend yielding 1.0
                Instruction::PopCatch,        // 3: normal resumption only
                Instruction::LoadConstant(1), // 4: push 111.0
                Instruction::Return,          // 5: normal-path result
                Instruction::Return,          // 6: catch handler: return caught value
            ],
            constants: vec![Constant::Value(Value::Number(1.0)), Constant::Value(Value::Number(111.0))],
            local_count: 0,
        });
        agent.heap.create(BytecodeFunctionHeapData {
            name: None,
            length: 0,
            kind: FunctionKind::Generator,
            is_constructor: false,
            body,
            captures: Vec::new(),
        })
    }

    #[test]
    fn next_resumption_runs_past_the_yield_normally() {
        let mut agent = Agent::new(Options::default());
        let function = make_generator_function(&mut agent);
        let generator = create_generator(&mut agent, function, Value::Undefined, &[]);

        let first = resume(&mut agent, generator, Value::Undefined).unwrap();
        assert_eq!(first, IteratorResultRecord { value: Value::Number(1.0), done: false });

        let second = resume(&mut agent, generator, Value::Number(42.0)).unwrap();
        assert_eq!(second, IteratorResultRecord { value: Value::Number(111.0), done: true });
        assert_eq!(state(&agent, generator), GeneratorState::Completed);
    }

    #[test]
    fn throw_resumption_is_caught_by_the_generator_body() {
        let mut agent = Agent::new(Options::default());
        let function = make_generator_function(&mut agent);
        let generator = create_generator(&mut agent, function, Value::Undefined, &[]);

        let first = resume(&mut agent, generator, Value::Undefined).unwrap();
        assert_eq!(first, IteratorResultRecord { value: Value::Number(1.0), done: false });

        // Injecting a throw at the suspended `yield` must be caught by
        // the `try` wrapping it, not escape `throw()` as an `Err`.
        let second = throw(&mut agent, generator, Value::Number(7.0)).unwrap();
        assert_eq!(second, IteratorResultRecord { value: Value::Number(7.0), done: true });
        assert_eq!(state(&agent, generator), GeneratorState::Completed);
    }

    #[test]
    fn throw_resumption_with_no_enclosing_try_propagates() {
        let mut agent = Agent::new(Options::default());
        // No PushCatch at all: a single bare `yield 1`.
        let body = Rc::new(CompiledBody {
            instructions: vec![Instruction::LoadConstant(0), Instruction::Yield],
            constants: vec![Constant::Value(Value::Number(1.0))],
            local_count: 0,
        });
        let function = agent.heap.create(BytecodeFunctionHeapData {
            name: None,
            length: 0,
            kind: FunctionKind::Generator,
            is_constructor: false,
            body,
            captures: Vec::new(),
        });
        let generator = create_generator(&mut agent, function, Value::Undefined, &[]);
        resume(&mut agent, generator, Value::Undefined).unwrap();

        let err = throw(&mut agent, generator, Value::Number(13.0)).expect_err("nothing catches this");
        assert_eq!(err.value(), Value::Number(13.0));
        assert_eq!(state(&agent, generator), GeneratorState::Completed);
    }
}

impl GeneratorHeapData {
    /// Every [`Value`] a suspended generator's frame is holding onto -
    /// operand stack, locals, `this`, and closed-over captures. Used by
    /// `crate::weak::sweep_weak_collections` to mark reachability; a
    /// suspended generator is itself a GC root for its own frame.
    pub(crate) fn frame_values_for_gc(&self) -> impl Iterator<Item = &Value> {
        self.frame
            .operand_stack
            .iter()
            .chain(self.frame.locals.iter())
            .chain(std::iter::once(&self.frame.this_value))
            .chain(self.frame.captures.iter())
    }
}
