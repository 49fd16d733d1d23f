use super::expr::{ExprCompiler, TempPool};
use super::opcode::{Op, Rel, Target};
use super::program::Program;
use super::var::Var;
use crate::error;
use crate::lang::{Bind, Column, Error, PhraseSet, Stmt, Sym, SymbolTable};
use std::collections::HashSet;

type Result<T> = std::result::Result<T, Error>;

/// Deepest allowed `if`/`else` nesting.
pub const MAX_DEPTH: usize = 64;

/// ## Statement compiler
///
/// Drives the template matcher over one unit's token stream and emits
/// one instruction group per recognized statement. Two passes before
/// relocation: label definitions are scanned over the whole stream
/// first, so code generation can reject a jump to a label that exists
/// nowhere; the unit's labels only become visible to later units once
/// the whole unit has compiled.
pub fn compile(
    syms: &mut SymbolTable,
    phrases: &PhraseSet,
    vars: &mut Var,
    prog: &mut Program,
    labels: &mut HashSet<Sym>,
    toks: &[Sym],
) -> Result<()> {
    let mut this = Compiler {
        syms,
        phrases,
        vars,
        prog,
        labels,
        toks,
        temps: TempPool::new(),
        blocks: vec![],
        unit_labels: HashSet::new(),
    };
    this.run()
}

// An open block and the label pending for its close: the else-or-end
// label of an `if`, or the end label of an `else`.
enum Frame {
    If(Sym),
    Else(Sym),
}

struct Compiler<'a> {
    syms: &'a mut SymbolTable,
    phrases: &'a PhraseSet,
    vars: &'a mut Var,
    prog: &'a mut Program,
    labels: &'a mut HashSet<Sym>,
    toks: &'a [Sym],
    temps: TempPool,
    blocks: Vec<Frame>,
    unit_labels: HashSet<Sym>,
}

impl<'a> Compiler<'a> {
    fn run(&mut self) -> Result<()> {
        self.scan_labels();
        let mut pc = 0;
        while self.toks[pc] != self.syms.wk.sentinel {
            let bind = match self.phrases.match_stmt(self.toks, pc) {
                Some(bind) => bind,
                None => return Err(self.syntax_error(pc)),
            };
            pc = self.statement(&bind, pc)?;
        }
        if !self.blocks.is_empty() {
            return Err(error!(BlockImbalance; "UNCLOSED BLOCK AT END OF INPUT"));
        }
        self.prog.push(Op::End)?;
        self.labels.extend(self.unit_labels.drain());
        Ok(())
    }

    // Definition pass: any token directly followed by a colon names a
    // label, so forward jumps can be checked during generation.
    fn scan_labels(&mut self) {
        let colon = self.syms.wk.colon;
        for i in 0..self.toks.len() - 1 {
            if self.toks[i + 1] == colon {
                self.unit_labels.insert(self.toks[i]);
            }
        }
    }

    fn statement(&mut self, bind: &Bind, pc: usize) -> Result<usize> {
        let spans = &bind.spans;
        let col = pc..bind.next;
        match bind.stmt {
            Stmt::LoopStep => {
                let counter = self.tok(&spans[0]);
                let bound = self.tok(&spans[1]);
                let label = self.tok(&spans[2]);
                self.known_label(label, &spans[2])?;
                self.prog
                    .push(Op::Loop(counter, bound, Target::Sym(label)))?;
            }
            Stmt::Let => {
                let op = Op::Cpy(self.tok(&spans[0]), self.tok(&spans[1]));
                self.prog.push(op)?;
            }
            Stmt::LetAdd => {
                let op = Op::Add(self.tok(&spans[0]), self.tok(&spans[1]), self.tok(&spans[2]));
                self.prog.push(op)?;
            }
            Stmt::LetSub => {
                let op = Op::Sub(self.tok(&spans[0]), self.tok(&spans[1]), self.tok(&spans[2]));
                self.prog.push(op)?;
            }
            Stmt::Print => {
                let value = self.expression(&spans[0])?;
                self.prog.push(Op::Print(value))?;
                self.temps.free(value);
            }
            Stmt::Label => {
                let label = self.tok(&spans[0]);
                self.define(label);
            }
            Stmt::Goto => {
                let label = self.tok(&spans[0]);
                self.known_label(label, &spans[0])?;
                self.prog.push(Op::Jump(Target::Sym(label)))?;
            }
            Stmt::IfGoto => {
                let label = self.tok(&spans[1]);
                self.known_label(label, &spans[1])?;
                match self.relational(&spans[0]) {
                    Some((rel, lhs, rhs)) => {
                        self.prog
                            .push(Op::JumpIf(rel, lhs, rhs, Target::Sym(label)))?;
                    }
                    None => {
                        let value = self.expression(&spans[0])?;
                        let zero = self.syms.wk.zero;
                        self.prog
                            .push(Op::JumpIf(Rel::Ne, value, zero, Target::Sym(label)))?;
                        self.temps.free(value);
                    }
                }
            }
            Stmt::If => {
                let after = self.syms.fresh_label()?;
                match self.relational(&spans[0]) {
                    Some((rel, lhs, rhs)) => {
                        self.prog
                            .push(Op::JumpIf(rel.inverse(), lhs, rhs, Target::Sym(after)))?;
                    }
                    None => {
                        let value = self.expression(&spans[0])?;
                        let zero = self.syms.wk.zero;
                        self.prog
                            .push(Op::JumpIf(Rel::Eq, value, zero, Target::Sym(after)))?;
                        self.temps.free(value);
                    }
                }
                if self.blocks.len() >= MAX_DEPTH {
                    return Err(error!(CapacityExceeded, ..&col; "BLOCKS NESTED TOO DEEPLY"));
                }
                self.blocks.push(Frame::If(after));
            }
            Stmt::Else => match self.blocks.pop() {
                Some(Frame::If(pending)) => {
                    let after = self.syms.fresh_label()?;
                    self.prog.push(Op::Jump(Target::Sym(after)))?;
                    self.define(pending);
                    self.blocks.push(Frame::Else(after));
                }
                Some(Frame::Else(_)) | None => {
                    return Err(error!(BlockImbalance, ..&col; "ELSE WITHOUT IF"));
                }
            },
            Stmt::End => match self.blocks.pop() {
                Some(Frame::If(pending)) | Some(Frame::Else(pending)) => self.define(pending),
                None => {
                    return Err(error!(BlockImbalance, ..&col; "UNMATCHED CLOSING BRACE"));
                }
            },
            Stmt::Time => self.prog.push(Op::Time)?,
            Stmt::Expr => {
                if spans[0].start < spans[0].end {
                    let value = self.expression(&spans[0])?;
                    self.temps.free(value);
                }
            }
        }
        Ok(bind.next)
    }

    fn tok(&self, span: &Column) -> Sym {
        self.toks[span.start]
    }

    // Bind a label to the next instruction index through its store
    // cell, where relocation will read it back.
    fn define(&mut self, label: Sym) {
        self.vars.sync(self.syms);
        self.vars.set(label, self.prog.len() as i64);
    }

    fn known_label(&self, label: Sym, col: &Column) -> Result<()> {
        if self.unit_labels.contains(&label) || self.labels.contains(&label) {
            Ok(())
        } else {
            Err(error!(SyntaxError, ..col;
                &format!("UNDEFINED LABEL {}", self.syms.text(label))))
        }
    }

    // A bare `lhs REL rhs` condition turns into one fused conditional
    // jump; anything else goes through the expression compiler.
    fn relational(&self, span: &Column) -> Option<(Rel, Sym, Sym)> {
        if span.end - span.start == 3 {
            if let Some(rel) = Rel::from_sym(&self.syms.wk, self.toks[span.start + 1]) {
                return Some((rel, self.toks[span.start], self.toks[span.start + 2]));
            }
        }
        None
    }

    fn expression(&mut self, span: &Column) -> Result<Sym> {
        ExprCompiler::compile(self.syms, self.prog, &mut self.temps, self.toks, span)
    }

    fn syntax_error(&self, pc: usize) -> Error {
        let mut near = String::new();
        for i in pc..pc + 4 {
            let text = self.syms.text(self.toks[i]);
            if text.is_empty() {
                break;
            }
            if !near.is_empty() {
                near.push(' ');
            }
            near.push_str(text);
        }
        error!(SyntaxError, ..&(pc..pc + 4); &near)
    }
}
