use super::compile::compile;
use super::link::link;
use super::opcode::{Op, Target};
use super::operation::Operation;
use super::program::Program;
use super::var::Var;
use super::Address;
use crate::error;
use crate::lang::{lex, Error, PhraseSet, Sym, SymbolTable};
use std::collections::HashSet;
use std::time::Instant;

/// ## Session runtime
///
/// Owns every pipeline stage's state: the interner, the template
/// catalog, the shared cell store, the bytecode buffer, and the
/// machine itself. Symbols, variable values, and label bindings
/// persist across units entered into one session, so an interactive
/// statement can reference anything an earlier statement defined.
pub struct Runtime {
    syms: SymbolTable,
    phrases: PhraseSet,
    vars: Var,
    prog: Program,
    labels: HashSet<Sym>,
    pc: Address,
    state: State,
    started: Instant,
    errors: Vec<Error>,
}

/// What the caller gets back from one execution slice.
pub enum Event {
    /// The machine is idle and ready for the next unit.
    Stopped,
    /// The cycle budget ran out; call again to continue.
    Running,
    /// The unit failed to compile or the machine faulted.
    Errors(Vec<Error>),
    /// A `print` or `time` statement produced a line.
    Print(String),
}

enum State {
    Stopped,
    Running,
}

impl Default for Runtime {
    fn default() -> Runtime {
        Runtime::new()
    }
}

impl Runtime {
    pub fn new() -> Runtime {
        let syms = SymbolTable::new();
        let phrases = PhraseSet::new(&syms.wk);
        Runtime {
            syms,
            phrases,
            vars: Var::new(),
            prog: Program::new(),
            labels: HashSet::new(),
            pc: 0,
            state: State::Stopped,
            started: Instant::now(),
            errors: vec![],
        }
    }

    /// Compile one unit and ready it for execution. Compile always
    /// finishes before the first instruction runs; a failed unit is
    /// rolled out of the buffer and queued as an error event instead.
    /// Returns false for blank input.
    pub fn enter(&mut self, source: &str) -> bool {
        if source.trim().is_empty() {
            return false;
        }
        let mark = self.prog.len();
        match self.compile_unit(source) {
            Ok(()) => {
                self.vars.sync(&self.syms);
                link(self.prog.tail_mut(mark), &self.vars);
                self.pc = mark;
                self.state = State::Running;
                self.started = Instant::now();
            }
            Err(error) => {
                self.prog.truncate(mark);
                self.errors.push(error);
            }
        }
        true
    }

    fn compile_unit(&mut self, source: &str) -> Result<(), Error> {
        let toks = lex(&mut self.syms, source)?;
        compile(
            &mut self.syms,
            &self.phrases,
            &mut self.vars,
            &mut self.prog,
            &mut self.labels,
            &toks,
        )
    }

    /// Run up to `cycles` instructions and report what happened. The
    /// sliced loop keeps an interactive front end responsive; the
    /// machine itself never cancels.
    pub fn execute(&mut self, cycles: usize) -> Event {
        if !self.errors.is_empty() {
            self.state = State::Stopped;
            return Event::Errors(std::mem::take(&mut self.errors));
        }
        if let State::Stopped = self.state {
            return Event::Stopped;
        }
        for _ in 0..cycles {
            let op = match self.prog.get(self.pc) {
                Some(op) => *op,
                None => {
                    self.state = State::Stopped;
                    return Event::Stopped;
                }
            };
            self.pc += 1;
            match op {
                Op::Cpy(d, s) => self.vars.set(d, self.vars.get(s)),
                Op::Neg(d, s) => self.vars.set(d, Operation::negate(self.vars.get(s))),
                Op::Add(d, a, b) => self.binary(Operation::add, d, a, b),
                Op::Sub(d, a, b) => self.binary(Operation::subtract, d, a, b),
                Op::Mul(d, a, b) => self.binary(Operation::multiply, d, a, b),
                Op::Div(d, a, b) => self.binary(Operation::divide, d, a, b),
                Op::Mod(d, a, b) => self.binary(Operation::modulo, d, a, b),
                Op::And(d, a, b) => self.binary(Operation::bit_and, d, a, b),
                Op::Shr(d, a, b) => self.binary(Operation::shift_right, d, a, b),
                Op::Cmp(rel, d, a, b) => {
                    let held = rel.test(self.vars.get(a), self.vars.get(b));
                    self.vars.set(d, if held { 1 } else { 0 });
                }
                Op::Jump(target) => match target {
                    Target::Addr(addr) => self.pc = addr,
                    Target::Sym(_) => return self.unlinked(),
                },
                Op::JumpIf(rel, a, b, target) => {
                    if rel.test(self.vars.get(a), self.vars.get(b)) {
                        match target {
                            Target::Addr(addr) => self.pc = addr,
                            Target::Sym(_) => return self.unlinked(),
                        }
                    }
                }
                Op::Loop(counter, bound, target) => {
                    let next = Operation::add(self.vars.get(counter), 1);
                    self.vars.set(counter, next);
                    if next < self.vars.get(bound) {
                        match target {
                            Target::Addr(addr) => self.pc = addr,
                            Target::Sym(_) => return self.unlinked(),
                        }
                    }
                }
                Op::Print(s) => return Event::Print(format!("{}\n", self.vars.get(s))),
                Op::Time => {
                    let elapsed = self.started.elapsed().as_secs_f64();
                    return Event::Print(format!("time: {:.3}[sec]\n", elapsed));
                }
                Op::End => {
                    self.state = State::Stopped;
                    return Event::Stopped;
                }
            }
        }
        Event::Running
    }

    /// Abandon the current run; the next execute reports `Stopped`.
    pub fn interrupt(&mut self) {
        self.state = State::Stopped;
    }

    /// The session's whole instruction buffer, for listings and tests.
    pub fn ops(&self) -> &[Op] {
        self.prog.ops()
    }

    fn unlinked(&mut self) -> Event {
        self.state = State::Stopped;
        Event::Errors(vec![error!(InternalError; "UNLINKED JUMP")])
    }

    fn binary(&mut self, apply: fn(i64, i64) -> i64, d: Sym, a: Sym, b: Sym) {
        let value = apply(self.vars.get(a), self.vars.get(b));
        self.vars.set(d, value);
    }
}
