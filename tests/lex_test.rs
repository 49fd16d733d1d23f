use hl::lang::{lex, ErrorCode, SymbolTable, PADDING};

fn texts(source: &str) -> Vec<String> {
    let mut syms = SymbolTable::new();
    let toks = lex(&mut syms, source).unwrap();
    toks.iter()
        .map(|t| syms.text(*t).to_string())
        .take_while(|t| !t.is_empty())
        .collect()
}

#[test]
fn test_operator_maximal_munch() {
    assert_eq!(texts("a>=b>>2"), vec!["a", ">=", "b", ">>", "2", ";"]);
    assert_eq!(texts("i++ + j"), vec!["i", "++", "+", "j", ";"]);
}

#[test]
fn test_adjacent_operators_lex_as_one_token() {
    // No token table: any run of operator characters is one token,
    // and unknown combinations are the matcher's problem.
    assert_eq!(texts("a==!=b"), vec!["a", "==!=", "b", ";"]);
    assert_eq!(texts("i+++j"), vec!["i", "+++", "j", ";"]);
}

#[test]
fn test_punctuation_is_single_character() {
    assert_eq!(
        texts("(){}[],"),
        vec!["(", ")", "{", "}", "[", "]", ",", ";"]
    );
}

#[test]
fn test_identifiers_and_numbers_share_a_class() {
    assert_eq!(texts("x1 123 12ab _y"), vec!["x1", "123", "12ab", "_y", ";"]);
}

#[test]
fn test_separator_is_synthesized() {
    assert_eq!(texts("print a"), vec!["print", "a", ";"]);
    assert_eq!(texts("print a;"), vec!["print", "a", ";"]);
}

#[test]
fn test_stream_is_sentinel_padded() {
    let mut syms = SymbolTable::new();
    let toks = lex(&mut syms, "a = 1;").unwrap();
    let pad = &toks[toks.len() - PADDING..];
    assert!(pad.iter().all(|t| *t == syms.wk.sentinel));
}

#[test]
fn test_whitespace_is_insignificant() {
    assert_eq!(texts("a\t=\n 1 ;"), texts("a=1;"));
}

#[test]
fn test_unrecognized_character() {
    let mut syms = SymbolTable::new();
    let error = lex(&mut syms, "a = $;").unwrap_err();
    assert_eq!(error.code(), ErrorCode::LexError);
}

#[test]
fn test_interning_is_stable_across_units() {
    let mut syms = SymbolTable::new();
    let first = lex(&mut syms, "a = b;").unwrap();
    let second = lex(&mut syms, "a = b;").unwrap();
    assert_eq!(first, second);
}
