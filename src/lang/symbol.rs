use super::Error;
use crate::error;
use std::collections::HashMap;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// Dense code identifying one unique token spelling for the life of a
/// session. Codes are assigned on first sight and never reused.
pub type Sym = usize;

/// Fixed code space; interning past this is a `CapacityExceeded` error.
pub const MAX_SYMBOLS: usize = 1024;

/// ## Symbol interner
///
/// Maps token text to its code and back. Every symbol carries a seed
/// value for its cell in the variable store: numeric spellings seed to
/// their parsed value, everything else to zero. The table persists for
/// a whole session, so symbols from one compiled unit stay visible to
/// the next.
pub struct SymbolTable {
    texts: Vec<Rc<str>>,
    codes: HashMap<Rc<str>, Sym>,
    seeds: Vec<i64>,
    next_label: usize,
    pub wk: WellKnown,
}

/// Codes of the fixed vocabulary, assigned at construction so the
/// matcher and the expression compiler can refer to them without text
/// lookups. The sentinel is code zero and has no lexable spelling.
#[derive(Debug, Default, Clone)]
pub struct WellKnown {
    pub sentinel: Sym,
    pub semi: Sym,
    pub comma: Sym,
    pub colon: Sym,
    pub lparen: Sym,
    pub rparen: Sym,
    pub lbrace: Sym,
    pub rbrace: Sym,
    pub lbracket: Sym,
    pub rbracket: Sym,
    pub assign: Sym,
    pub plus: Sym,
    pub minus: Sym,
    pub star: Sym,
    pub slash: Sym,
    pub percent: Sym,
    pub amp: Sym,
    pub shr: Sym,
    pub inc: Sym,
    pub eq: Sym,
    pub ne: Sym,
    pub lt: Sym,
    pub le: Sym,
    pub gt: Sym,
    pub ge: Sym,
    pub kw_print: Sym,
    pub kw_goto: Sym,
    pub kw_if: Sym,
    pub kw_else: Sym,
    pub kw_time: Sym,
    pub zero: Sym,
    pub one: Sym,
}

impl Default for SymbolTable {
    fn default() -> SymbolTable {
        SymbolTable::new()
    }
}

impl SymbolTable {
    pub fn new() -> SymbolTable {
        let mut table = SymbolTable {
            texts: vec![],
            codes: HashMap::new(),
            seeds: vec![],
            next_label: 0,
            wk: WellKnown::default(),
        };
        table.wk = WellKnown {
            sentinel: table.seed_sym(""),
            semi: table.seed_sym(";"),
            comma: table.seed_sym(","),
            colon: table.seed_sym(":"),
            lparen: table.seed_sym("("),
            rparen: table.seed_sym(")"),
            lbrace: table.seed_sym("{"),
            rbrace: table.seed_sym("}"),
            lbracket: table.seed_sym("["),
            rbracket: table.seed_sym("]"),
            assign: table.seed_sym("="),
            plus: table.seed_sym("+"),
            minus: table.seed_sym("-"),
            star: table.seed_sym("*"),
            slash: table.seed_sym("/"),
            percent: table.seed_sym("%"),
            amp: table.seed_sym("&"),
            shr: table.seed_sym(">>"),
            inc: table.seed_sym("++"),
            eq: table.seed_sym("=="),
            ne: table.seed_sym("!="),
            lt: table.seed_sym("<"),
            le: table.seed_sym("<="),
            gt: table.seed_sym(">"),
            ge: table.seed_sym(">="),
            kw_print: table.seed_sym("print"),
            kw_goto: table.seed_sym("goto"),
            kw_if: table.seed_sym("if"),
            kw_else: table.seed_sym("else"),
            kw_time: table.seed_sym("time"),
            zero: table.seed_sym("0"),
            one: table.seed_sym("1"),
        };
        table
    }

    // Construction-time interning; the fixed vocabulary cannot fill the
    // code space.
    fn seed_sym(&mut self, text: &str) -> Sym {
        debug_assert!(self.texts.len() < MAX_SYMBOLS);
        let text: Rc<str> = text.into();
        let code = self.texts.len();
        self.texts.push(text.clone());
        self.seeds.push(text.parse::<i64>().unwrap_or(0));
        self.codes.insert(text, code);
        code
    }

    /// Code for `text`, existing or newly assigned. Byte-exact and
    /// length-sensitive: `a` and `A` are distinct symbols.
    pub fn intern(&mut self, text: &str) -> Result<Sym> {
        if let Some(code) = self.codes.get(text) {
            return Ok(*code);
        }
        if self.texts.len() >= MAX_SYMBOLS {
            return Err(error!(CapacityExceeded; "SYMBOL TABLE FULL"));
        }
        Ok(self.seed_sym(text))
    }

    /// Mint a label no source program can spell.
    pub fn fresh_label(&mut self) -> Result<Sym> {
        let name = format!("#L{}", self.next_label);
        self.next_label += 1;
        self.intern(&name)
    }

    pub fn text(&self, sym: Sym) -> &str {
        match self.texts.get(sym) {
            Some(text) => text,
            None => "",
        }
    }

    /// Initial cell value for the symbol's slot in the variable store.
    pub fn seed(&self, sym: Sym) -> i64 {
        match self.seeds.get(sym) {
            Some(seed) => *seed,
            None => 0,
        }
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_is_a_bijection() {
        let mut syms = SymbolTable::new();
        let a = syms.intern("apple").unwrap();
        let b = syms.intern("banana").unwrap();
        assert_ne!(a, b);
        assert_eq!(a, syms.intern("apple").unwrap());
        assert_eq!(syms.text(a), "apple");
        assert_eq!(syms.text(b), "banana");
    }

    #[test]
    fn test_numeric_text_seeds_its_cell() {
        let mut syms = SymbolTable::new();
        let n = syms.intern("1984").unwrap();
        assert_eq!(syms.seed(n), 1984);
        let v = syms.intern("year").unwrap();
        assert_eq!(syms.seed(v), 0);
    }

    #[test]
    fn test_code_space_is_bounded() {
        let mut syms = SymbolTable::new();
        let mut last = Ok(0);
        for i in 0..MAX_SYMBOLS {
            last = syms.intern(&format!("v{}", i));
            if last.is_err() {
                break;
            }
        }
        assert_eq!(
            last.unwrap_err().code(),
            crate::lang::ErrorCode::CapacityExceeded
        );
    }

    #[test]
    fn test_fresh_labels_are_distinct() {
        let mut syms = SymbolTable::new();
        let a = syms.fresh_label().unwrap();
        let b = syms.fresh_label().unwrap();
        assert_ne!(a, b);
    }
}
