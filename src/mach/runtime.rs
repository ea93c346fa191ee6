use super::{Address, Instruction, Memory, Param, Word};
use crate::error;
use crate::lang::{parse, Error};
use std::collections::VecDeque;
use std::convert::TryFrom;
use std::io::{BufRead, Write};
use tracing::{debug, trace};

type Result<T> = std::result::Result<T, Error>;

/// Supplies input when the queue is empty. Receives the machine so it can
/// look at memory before answering.
pub type InputFn = Box<dyn FnMut(&Runtime) -> std::result::Result<Word, Error>>;

/// How the program counter moves after an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Shift(Word),
    Halt,
}

/// Result of a cycle limited `execute`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The cycle budget ran out with no output ready.
    Running,
    Output(Word),
    Halted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Running,
    Halted,
    Failed(Error),
}

/// ## Intcode machine
///
/// All state needed to resume lives here, so a driver can stop after any
/// output, feed more input, and pick up exactly where it left off.

pub struct Runtime {
    memory: Memory,
    pos: Address,
    base: Word,
    inputs: VecDeque<Word>,
    outputs: VecDeque<Word>,
    input_fn: Option<InputFn>,
    state: State,
}

impl Default for Runtime {
    fn default() -> Runtime {
        Runtime::new(vec![])
    }
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("pos", &self.pos)
            .field("base", &self.base)
            .field("state", &self.state)
            .field("inputs", &self.inputs)
            .field("outputs", &self.outputs)
            .field("input_fn", &self.input_fn.is_some())
            .field("memory", &self.memory)
            .finish()
    }
}

impl std::str::FromStr for Runtime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Runtime> {
        Ok(Runtime::new(parse(s)?))
    }
}

impl Runtime {
    pub fn new(image: Vec<Word>) -> Runtime {
        Runtime {
            memory: Memory::new(image),
            pos: 0,
            base: 0,
            inputs: VecDeque::new(),
            outputs: VecDeque::new(),
            input_fn: None,
            state: State::Running,
        }
    }

    pub fn with_pos(mut self, pos: Address) -> Runtime {
        self.pos = pos;
        self
    }

    pub fn with_inputs<I: IntoIterator<Item = Word>>(mut self, inputs: I) -> Runtime {
        self.inputs.extend(inputs);
        self
    }

    pub fn with_base(mut self, base: Word) -> Runtime {
        self.base = base;
        self
    }

    pub fn with_input_fn<F>(mut self, input_fn: F) -> Runtime
    where
        F: FnMut(&Runtime) -> std::result::Result<Word, Error> + 'static,
    {
        self.set_input_fn(input_fn);
        self
    }

    pub fn set_input_fn<F>(&mut self, input_fn: F)
    where
        F: FnMut(&Runtime) -> std::result::Result<Word, Error> + 'static,
    {
        self.input_fn = Some(Box::new(input_fn));
    }

    pub fn pos(&self) -> Address {
        self.pos
    }

    /// Moves the program counter. A halted machine becomes runnable again;
    /// a failed one stays failed.
    pub fn set_pos(&mut self, pos: Address) {
        self.pos = pos;
        if self.state == State::Halted {
            self.state = State::Running;
        }
    }

    pub fn base(&self) -> Word {
        self.base
    }

    pub fn is_halted(&self) -> bool {
        self.state == State::Halted
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.state, State::Failed(_))
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn read(&self, addr: Word) -> Result<Word> {
        self.memory.read(addr)
    }

    pub fn write(&mut self, addr: Word, value: Word) -> Result<()> {
        self.memory.write(addr, value)
    }

    pub fn push_input(&mut self, value: Word) {
        self.inputs.push_back(value);
    }

    pub fn extend_inputs<I: IntoIterator<Item = Word>>(&mut self, inputs: I) {
        self.inputs.extend(inputs);
    }

    pub fn pending_inputs(&self) -> usize {
        self.inputs.len()
    }

    /// Runs until halt and returns every output produced so far.
    /// The outputs stay queued.
    pub fn run(&mut self) -> Result<Vec<Word>> {
        self.check_fault()?;
        while self.step()? {}
        Ok(self.outputs.iter().copied().collect())
    }

    /// Runs until an output is available and returns it, or `None` if the
    /// machine halts first.
    pub fn run_until_output(&mut self) -> Result<Option<Word>> {
        self.check_fault()?;
        loop {
            if let Some(value) = self.outputs.pop_front() {
                return Ok(Some(value));
            }
            if !self.step()? {
                return Ok(None);
            }
        }
    }

    /// Collects `count` outputs in order. If the machine halts first the
    /// whole batch is `None`; values already taken are not put back.
    pub fn run_until_outputs(&mut self, count: usize) -> Result<Option<Vec<Word>>> {
        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            match self.run_until_output()? {
                Some(value) => values.push(value),
                None => return Ok(None),
            }
        }
        Ok(Some(values))
    }

    /// Like `run_until_output` but gives up after `cycles` instructions.
    pub fn execute(&mut self, cycles: usize) -> Result<Event> {
        self.check_fault()?;
        for _ in 0..cycles {
            if let Some(value) = self.outputs.pop_front() {
                return Ok(Event::Output(value));
            }
            if !self.step()? {
                return Ok(Event::Halted);
            }
        }
        Ok(match self.outputs.pop_front() {
            Some(value) => Event::Output(value),
            None if self.is_halted() => Event::Halted,
            None => Event::Running,
        })
    }

    /// Executes one instruction. Returns `false` once the machine has halted.
    pub fn step(&mut self) -> Result<bool> {
        match &self.state {
            State::Running => {}
            State::Halted => return Ok(false),
            State::Failed(error) => return Err(error.to_fault()),
        }
        match self.cycle() {
            Ok(alive) => Ok(alive),
            Err(error) => {
                debug!(pos = self.pos, %error, "machine failed");
                self.state = State::Failed(error.clone());
                Err(error)
            }
        }
    }

    fn check_fault(&self) -> Result<()> {
        match &self.state {
            State::Failed(error) => Err(error.to_fault()),
            _ => Ok(()),
        }
    }

    fn cycle(&mut self) -> Result<bool> {
        let pos = self.pos;
        if pos >= self.memory.len() {
            return Err(error!(OutOfBounds, pos).with_value(pos as Word));
        }
        let instruction = Instruction::decode(&self.memory, pos)?;
        trace!(pos, base = self.base, %instruction, "step");
        let flow = self.exec(instruction).map_err(|e| match e.address() {
            Some(_) => e,
            None => e.at_address(pos),
        })?;
        match flow {
            Flow::Halt => {
                debug!(pos, "halted");
                self.state = State::Halted;
                Ok(false)
            }
            Flow::Shift(delta) => {
                let next = (pos as Word)
                    .checked_add(delta)
                    .ok_or_else(|| error!(Overflow, pos))?;
                match Address::try_from(next) {
                    Ok(next) if next < self.memory.len() => {
                        self.pos = next;
                        Ok(true)
                    }
                    _ => Err(error!(OutOfBounds, pos).with_value(next)),
                }
            }
        }
    }

    fn exec(&mut self, instruction: Instruction) -> Result<Flow> {
        use Instruction::*;
        let width = instruction.width() as Word;
        match instruction {
            Add(a, b, dst) => {
                let value = self.read_param(a)?.checked_add(self.read_param(b)?);
                self.write_param(dst, value.ok_or_else(|| error!(Overflow))?)?;
            }
            Multiply(a, b, dst) => {
                let value = self.read_param(a)?.checked_mul(self.read_param(b)?);
                self.write_param(dst, value.ok_or_else(|| error!(Overflow))?)?;
            }
            Input(dst) => {
                let addr = Memory::address(dst.target(self.base)?)?;
                let value = self.request_input()?;
                self.memory.set(addr, value);
            }
            Output(a) => {
                let value = self.read_param(a)?;
                debug!(value, "output");
                self.outputs.push_back(value);
            }
            JumpIfTrue(a, target) => {
                if self.read_param(a)? != 0 {
                    return self.jump(target);
                }
            }
            JumpIfFalse(a, target) => {
                if self.read_param(a)? == 0 {
                    return self.jump(target);
                }
            }
            LessThan(a, b, dst) => {
                let value = (self.read_param(a)? < self.read_param(b)?) as Word;
                self.write_param(dst, value)?;
            }
            Equals(a, b, dst) => {
                let value = (self.read_param(a)? == self.read_param(b)?) as Word;
                self.write_param(dst, value)?;
            }
            BaseOffset(a) => {
                let offset = self.read_param(a)?;
                self.base = self
                    .base
                    .checked_add(offset)
                    .ok_or_else(|| error!(Overflow))?;
            }
            Halt => return Ok(Flow::Halt),
        }
        Ok(Flow::Shift(width))
    }

    fn jump(&self, target: Param) -> Result<Flow> {
        let target = self.read_param(target)?;
        match target.checked_sub(self.pos as Word) {
            Some(delta) => Ok(Flow::Shift(delta)),
            None => Err(error!(OutOfBounds).with_value(target)),
        }
    }

    fn read_param(&self, param: Param) -> Result<Word> {
        param.read(&self.memory, self.base)
    }

    fn write_param(&mut self, param: Param, value: Word) -> Result<()> {
        let addr = param.target(self.base)?;
        self.memory.write(addr, value)
    }

    fn request_input(&mut self) -> Result<Word> {
        if let Some(value) = self.inputs.pop_front() {
            debug!(value, "input from queue");
            return Ok(value);
        }
        if let Some(mut input_fn) = self.input_fn.take() {
            let result = input_fn(self);
            self.input_fn = Some(input_fn);
            let value = result?;
            debug!(value, "input from producer");
            return Ok(value);
        }
        debug!(pos = self.pos, "waiting for interactive input");
        interactive_input()
    }
}

fn interactive_input() -> Result<Word> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write!(out, "?? ")
        .and_then(|_| out.flush())
        .map_err(|_| error!(InvalidInput; "CANNOT PROMPT"))?;
    let stdin = std::io::stdin();
    let mut line = String::new();
    match stdin.lock().read_line(&mut line) {
        Ok(0) | Err(_) => Err(error!(InvalidInput; "END OF INPUT")),
        Ok(_) => line
            .trim()
            .parse::<Word>()
            .map_err(|_| error!(InvalidInput; "NOT AN INTEGER")),
    }
}
