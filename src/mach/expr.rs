use super::opcode::{Op, Rel};
use super::program::Program;
use crate::error;
use crate::lang::{is_hl_name, Column, Error, Sym, SymbolTable};

type Result<T> = std::result::Result<T, Error>;

/// Size of the temporary pool; an expression holding more live
/// intermediates than this fails with `RegisterExhausted`.
pub const MAX_TEMPS: usize = 10;

/// ## Temporary register pool
///
/// Transient cells for intermediate expression results. A slot is
/// taken on demand and returned as soon as a consuming instruction has
/// been emitted. The slots are ordinary store cells with unlexable
/// names, so generated code addresses them like any variable.
pub struct TempPool {
    slots: [Option<Sym>; MAX_TEMPS],
    used: [bool; MAX_TEMPS],
}

impl TempPool {
    pub fn new() -> TempPool {
        TempPool {
            slots: [None; MAX_TEMPS],
            used: [false; MAX_TEMPS],
        }
    }

    pub fn alloc(&mut self, syms: &mut SymbolTable, col: &Column) -> Result<Sym> {
        for slot in 0..MAX_TEMPS {
            if self.used[slot] {
                continue;
            }
            let sym = match self.slots[slot] {
                Some(sym) => sym,
                None => {
                    let sym = syms.intern(&format!("#t{}", slot))?;
                    self.slots[slot] = Some(sym);
                    sym
                }
            };
            self.used[slot] = true;
            return Ok(sym);
        }
        Err(error!(RegisterExhausted, ..col; "EXPRESSION TOO COMPLEX"))
    }

    /// Return a slot to the pool; anything that is not a live
    /// temporary is ignored, so operands can be freed unconditionally.
    pub fn free(&mut self, sym: Sym) {
        for slot in 0..MAX_TEMPS {
            if self.slots[slot] == Some(sym) {
                self.used[slot] = false;
                return;
            }
        }
    }
}

impl Default for TempPool {
    fn default() -> TempPool {
        TempPool::new()
    }
}

// Looser binds lower; assignment is last and right-associative.
const PREC_ASSIGN: u8 = 1;
const PREC_AND: u8 = 2;
const PREC_EQ: u8 = 3;
const PREC_REL: u8 = 4;
const PREC_SHIFT: u8 = 5;
const PREC_SUM: u8 = 6;
const PREC_PROD: u8 = 7;
const PREC_UNARY: u8 = 8;

enum Infix {
    Arith(fn(Sym, Sym, Sym) -> Op),
    Rel(Rel),
}

/// ## Expression compiler
///
/// Precedence climbing over one wildcard span, emitting instructions
/// as it parses; there is no AST. The returned symbol addresses the
/// cell holding the value: a variable, a literal, or a temporary the
/// caller frees once the value is consumed.
pub struct ExprCompiler<'a> {
    syms: &'a mut SymbolTable,
    prog: &'a mut Program,
    temps: &'a mut TempPool,
    toks: &'a [Sym],
    pos: usize,
    end: usize,
}

impl<'a> ExprCompiler<'a> {
    pub fn compile(
        syms: &'a mut SymbolTable,
        prog: &'a mut Program,
        temps: &'a mut TempPool,
        toks: &'a [Sym],
        span: &Column,
    ) -> Result<Sym> {
        let mut this = ExprCompiler {
            syms,
            prog,
            temps,
            toks,
            pos: span.start,
            end: span.end,
        };
        let result = this.climb(PREC_ASSIGN)?;
        if this.pos != this.end {
            let col = this.pos..this.end;
            let text = this.syms.text(this.toks[this.pos]).to_string();
            return Err(error!(SyntaxError, ..&col;
                &format!("UNEXPECTED {} IN EXPRESSION", text)));
        }
        Ok(result)
    }

    fn climb(&mut self, min: u8) -> Result<Sym> {
        let mut lhs = self.primary()?;
        while self.pos < self.end {
            let sym = self.toks[self.pos];
            if sym == self.syms.wk.inc {
                // Postfix increment: the temporary preserves the value
                // from before the bump.
                self.pos += 1;
                let col = self.pos - 1..self.pos;
                let pre = self.temps.alloc(self.syms, &col)?;
                self.prog.push(Op::Cpy(pre, lhs))?;
                self.prog.push(Op::Add(lhs, lhs, self.syms.wk.one))?;
                self.temps.free(lhs);
                lhs = pre;
                continue;
            }
            if sym == self.syms.wk.assign {
                if min > PREC_ASSIGN {
                    break;
                }
                self.pos += 1;
                let rhs = self.climb(PREC_ASSIGN)?;
                self.prog.push(Op::Cpy(lhs, rhs))?;
                self.temps.free(rhs);
                continue;
            }
            match self.infix(sym) {
                Some((prec, kind)) if prec >= min => {
                    self.pos += 1;
                    let col = self.pos - 1..self.pos;
                    let rhs = self.climb(prec + 1)?;
                    let dst = self.temps.alloc(self.syms, &col)?;
                    let op = match kind {
                        Infix::Arith(build) => build(dst, lhs, rhs),
                        Infix::Rel(rel) => Op::Cmp(rel, dst, lhs, rhs),
                    };
                    self.prog.push(op)?;
                    self.temps.free(lhs);
                    self.temps.free(rhs);
                    lhs = dst;
                }
                _ => break,
            }
        }
        Ok(lhs)
    }

    fn primary(&mut self) -> Result<Sym> {
        if self.pos >= self.end {
            let col = self.end..self.end + 1;
            return Err(error!(SyntaxError, ..&col; "MISSING EXPRESSION"));
        }
        let sym = self.toks[self.pos];
        let col = self.pos..self.pos + 1;
        if sym == self.syms.wk.lparen {
            self.pos += 1;
            let value = self.climb(PREC_ASSIGN)?;
            if self.pos >= self.end || self.toks[self.pos] != self.syms.wk.rparen {
                return Err(error!(SyntaxError, ..&col; "UNBALANCED PARENTHESES"));
            }
            self.pos += 1;
            return Ok(value);
        }
        if sym == self.syms.wk.inc {
            self.pos += 1;
            let value = self.climb(PREC_UNARY)?;
            self.prog.push(Op::Add(value, value, self.syms.wk.one))?;
            return Ok(value);
        }
        if sym == self.syms.wk.minus {
            self.pos += 1;
            let value = self.climb(PREC_UNARY)?;
            let dst = self.temps.alloc(self.syms, &col)?;
            self.prog.push(Op::Neg(dst, value))?;
            self.temps.free(value);
            return Ok(dst);
        }
        // A primary must spell like a name; operators and punctuation
        // that reach here (including combinations the lexer accepted
        // but nothing defines) are rejected.
        let leading = self.syms.text(sym).chars().next();
        if !leading.map_or(false, is_hl_name) {
            let text = self.syms.text(sym).to_string();
            return Err(error!(SyntaxError, ..&col;
                &format!("MISSING OPERAND BEFORE {}", text)));
        }
        self.pos += 1;
        Ok(sym)
    }

    fn infix(&self, sym: Sym) -> Option<(u8, Infix)> {
        let wk = &self.syms.wk;
        if sym == wk.star {
            Some((PREC_PROD, Infix::Arith(Op::Mul)))
        } else if sym == wk.slash {
            Some((PREC_PROD, Infix::Arith(Op::Div)))
        } else if sym == wk.percent {
            Some((PREC_PROD, Infix::Arith(Op::Mod)))
        } else if sym == wk.plus {
            Some((PREC_SUM, Infix::Arith(Op::Add)))
        } else if sym == wk.minus {
            Some((PREC_SUM, Infix::Arith(Op::Sub)))
        } else if sym == wk.shr {
            Some((PREC_SHIFT, Infix::Arith(Op::Shr)))
        } else if sym == wk.amp {
            Some((PREC_AND, Infix::Arith(Op::And)))
        } else {
            match Rel::from_sym(wk, sym) {
                Some(rel) if rel == Rel::Eq || rel == Rel::Ne => Some((PREC_EQ, Infix::Rel(rel))),
                Some(rel) => Some((PREC_REL, Infix::Rel(rel))),
                None => None,
            }
        }
    }
}
