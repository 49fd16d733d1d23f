use super::symbol::{Sym, WellKnown};
use super::Column;

/// Statement forms in match priority order. The first template to
/// match at the cursor wins; the two-operand assignment forms and the
/// fused loop idiom sit ahead of the general expression statement so
/// the common cases compile to a single instruction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stmt {
    LoopStep,
    Let,
    LetAdd,
    LetSub,
    Print,
    Label,
    Goto,
    IfGoto,
    If,
    Else,
    End,
    Time,
    Expr,
}

// One element of a statement template.
#[derive(Clone, Copy)]
enum Elem {
    /// Fixed code that must match exactly.
    Lit(Sym),
    /// Single-token wildcard. A slot repeated within one template must
    /// rebind the same token everywhere it appears.
    One(usize),
    /// Expression wildcard; may bind an empty span.
    Expr(usize),
    /// Expression wildcard that must bind at least one token.
    ExprSome(usize),
}

/// Wildcard slots available to one template.
pub const MAX_SLOTS: usize = 4;

/// A successful match: which form, where each wildcard bound, and the
/// cursor position after the consumed tokens.
pub struct Bind {
    pub stmt: Stmt,
    pub spans: [Column; MAX_SLOTS],
    pub next: usize,
}

/// ## Statement template catalog
///
/// The templates are built once per session against that session's
/// interner, so element comparison is plain code equality. Matching is
/// total: an attempt either consumes the whole template or fails with
/// nothing leaking into the caller.
pub struct PhraseSet {
    phrases: Vec<(Stmt, Vec<Elem>)>,
    wk: WellKnown,
}

impl PhraseSet {
    pub fn new(wk: &WellKnown) -> PhraseSet {
        use Elem::*;
        let phrases = vec![
            (
                Stmt::LoopStep,
                vec![
                    One(0),
                    Lit(wk.assign),
                    One(0),
                    Lit(wk.plus),
                    Lit(wk.one),
                    Lit(wk.semi),
                    Lit(wk.kw_if),
                    Lit(wk.lparen),
                    One(0),
                    Lit(wk.lt),
                    One(1),
                    Lit(wk.rparen),
                    Lit(wk.kw_goto),
                    One(2),
                    Lit(wk.semi),
                ],
            ),
            (
                Stmt::Let,
                vec![One(0), Lit(wk.assign), One(1), Lit(wk.semi)],
            ),
            (
                Stmt::LetAdd,
                vec![One(0), Lit(wk.assign), One(1), Lit(wk.plus), One(2), Lit(wk.semi)],
            ),
            (
                Stmt::LetSub,
                vec![One(0), Lit(wk.assign), One(1), Lit(wk.minus), One(2), Lit(wk.semi)],
            ),
            (Stmt::Print, vec![Lit(wk.kw_print), ExprSome(0), Lit(wk.semi)]),
            (Stmt::Label, vec![One(0), Lit(wk.colon)]),
            (Stmt::Goto, vec![Lit(wk.kw_goto), One(0), Lit(wk.semi)]),
            (
                Stmt::IfGoto,
                vec![
                    Lit(wk.kw_if),
                    Lit(wk.lparen),
                    ExprSome(0),
                    Lit(wk.rparen),
                    Lit(wk.kw_goto),
                    One(1),
                    Lit(wk.semi),
                ],
            ),
            (
                Stmt::If,
                vec![
                    Lit(wk.kw_if),
                    Lit(wk.lparen),
                    ExprSome(0),
                    Lit(wk.rparen),
                    Lit(wk.lbrace),
                ],
            ),
            (
                Stmt::Else,
                vec![Lit(wk.rbrace), Lit(wk.kw_else), Lit(wk.lbrace)],
            ),
            (Stmt::End, vec![Lit(wk.rbrace)]),
            (Stmt::Time, vec![Lit(wk.kw_time), Lit(wk.semi)]),
            (Stmt::Expr, vec![Expr(0), Lit(wk.semi)]),
        ];
        PhraseSet {
            phrases,
            wk: wk.clone(),
        }
    }

    /// Try every template at `at`, in priority order.
    pub fn match_stmt(&self, toks: &[Sym], at: usize) -> Option<Bind> {
        for (stmt, elems) in &self.phrases {
            if let Some((spans, next)) = self.match_one(elems, toks, at) {
                return Some(Bind {
                    stmt: *stmt,
                    spans,
                    next,
                });
            }
        }
        None
    }

    fn match_one(
        &self,
        elems: &[Elem],
        toks: &[Sym],
        at: usize,
    ) -> Option<([Column; MAX_SLOTS], usize)> {
        let mut spans: [Column; MAX_SLOTS] = [0..0, 0..0, 0..0, 0..0];
        let mut bound = [false; MAX_SLOTS];
        let mut i = at;
        for elem in elems {
            match *elem {
                Elem::Lit(code) => {
                    if toks[i] != code {
                        return None;
                    }
                    i += 1;
                }
                Elem::One(slot) => {
                    if toks[i] == self.wk.sentinel {
                        return None;
                    }
                    if bound[slot] {
                        if toks[spans[slot].start] != toks[i] {
                            return None;
                        }
                    } else {
                        spans[slot] = i..i + 1;
                        bound[slot] = true;
                    }
                    i += 1;
                }
                Elem::Expr(slot) | Elem::ExprSome(slot) => {
                    let start = i;
                    i = self.scan_expression(toks, i);
                    if matches!(elem, Elem::ExprSome(_)) && i == start {
                        return None;
                    }
                    spans[slot] = start..i;
                    bound[slot] = true;
                }
            }
        }
        Some((spans, i))
    }

    // Walk forward over one expression span: ends at the statement
    // separator, at a comma outside any bracket, or at a closing
    // bracket with no opener in the span. The closer is left for the
    // template's next literal, so an unbalanced one fails the match.
    fn scan_expression(&self, toks: &[Sym], from: usize) -> usize {
        let mut depth = 0usize;
        let mut i = from;
        loop {
            let t = toks[i];
            if t == self.wk.semi || t == self.wk.sentinel {
                return i;
            }
            if t == self.wk.comma && depth == 0 {
                return i;
            }
            if t == self.wk.lparen || t == self.wk.lbracket {
                depth += 1;
            } else if t == self.wk.rparen || t == self.wk.rbracket {
                if depth == 0 {
                    return i;
                }
                depth -= 1;
            }
            i += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::{lex, SymbolTable};

    #[test]
    fn test_fallback_to_expression_statement() {
        let mut syms = SymbolTable::new();
        let phrases = PhraseSet::new(&syms.wk);
        // `goto` with no label cannot match the goto template; the
        // general expression statement picks it up instead.
        let toks = lex(&mut syms, "goto").unwrap();
        let bind = phrases.match_stmt(&toks, 0).unwrap();
        assert_eq!(bind.stmt, Stmt::Expr);
    }

    #[test]
    fn test_no_match_inside_the_padding() {
        let mut syms = SymbolTable::new();
        let phrases = PhraseSet::new(&syms.wk);
        let toks = lex(&mut syms, "a = 1;").unwrap();
        let first_pad = toks.len() - crate::lang::PADDING;
        assert!(phrases.match_stmt(&toks, first_pad).is_none());
    }
}
