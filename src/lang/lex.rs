use super::symbol::{Sym, SymbolTable};
use super::Error;
use crate::error;

type Result<T> = std::result::Result<T, Error>;

/// Sentinel codes appended after the final separator so the matcher's
/// fixed look-ahead never runs off the end of the stream.
pub const PADDING: usize = 16;

pub fn lex(syms: &mut SymbolTable, s: &str) -> Result<Vec<Sym>> {
    HlLexer::lex(syms, s)
}

fn is_hl_whitespace(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\r' || c == '\n'
}

// Identifiers and numeric literals are the same token class; whether
// the text parses as a number is decided by the interner's seed.
pub(crate) fn is_hl_name(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_hl_punct(c: char) -> bool {
    matches!(c, '(' | ')' | '{' | '}' | '[' | ']' | ';' | ',')
}

// Any maximal run of these lexes as a single token, so `==`, `>>` and
// `++` come out whole. Unknown runs like `=!` lex fine and are left
// for the matcher to reject.
fn is_hl_operator(c: char) -> bool {
    matches!(
        c,
        '=' | '+' | '-' | '*' | '/' | '%' | '&' | '<' | '>' | '!' | '|' | '^' | '?' | ':' | '~'
    )
}

struct HlLexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl<'a> HlLexer<'a> {
    fn lex(syms: &mut SymbolTable, s: &str) -> Result<Vec<Sym>> {
        let mut lexer = HlLexer {
            chars: s.chars().peekable(),
        };
        let mut tokens: Vec<Sym> = vec![];
        while let Some(pk) = lexer.chars.peek() {
            let ch = *pk;
            if is_hl_whitespace(ch) {
                lexer.chars.next();
            } else if is_hl_punct(ch) {
                lexer.chars.next();
                tokens.push(syms.intern(&ch.to_string())?);
            } else if is_hl_name(ch) {
                let run = lexer.run(is_hl_name);
                tokens.push(syms.intern(&run)?);
            } else if is_hl_operator(ch) {
                let run = lexer.run(is_hl_operator);
                tokens.push(syms.intern(&run)?);
            } else {
                let col = tokens.len()..tokens.len() + 1;
                return Err(error!(LexError, ..&col;
                    &format!("UNRECOGNIZED CHARACTER {:?}", ch)));
            }
        }
        if tokens.last() != Some(&syms.wk.semi) {
            tokens.push(syms.wk.semi);
        }
        for _ in 0..PADDING {
            tokens.push(syms.wk.sentinel);
        }
        Ok(tokens)
    }

    fn run(&mut self, class: fn(char) -> bool) -> String {
        let mut s = String::new();
        while let Some(pk) = self.chars.peek() {
            if !class(*pk) {
                break;
            }
            s.push(*pk);
            self.chars.next();
        }
        s
    }
}
