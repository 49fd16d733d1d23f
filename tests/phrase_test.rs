use hl::lang::{lex, Bind, Column, PhraseSet, Stmt, Sym, SymbolTable};

fn matched(source: &str) -> (SymbolTable, Vec<Sym>, Bind) {
    let mut syms = SymbolTable::new();
    let phrases = PhraseSet::new(&syms.wk);
    let toks = lex(&mut syms, source).unwrap();
    let bind = match phrases.match_stmt(&toks, 0) {
        Some(bind) => bind,
        None => panic!("no template matched {:?}", source),
    };
    (syms, toks, bind)
}

fn no_match(source: &str) -> bool {
    let mut syms = SymbolTable::new();
    let phrases = PhraseSet::new(&syms.wk);
    let toks = lex(&mut syms, source).unwrap();
    phrases.match_stmt(&toks, 0).is_none()
}

fn span_text(syms: &SymbolTable, toks: &[Sym], span: &Column) -> String {
    toks[span.clone()]
        .iter()
        .map(|t| syms.text(*t))
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn test_let_round_trip() {
    let (syms, toks, bind) = matched("a = b;");
    assert_eq!(bind.stmt, Stmt::Let);
    assert_eq!(span_text(&syms, &toks, &bind.spans[0]), "a");
    assert_eq!(span_text(&syms, &toks, &bind.spans[1]), "b");
    assert_eq!(bind.next, 4);
}

#[test]
fn test_let_add_and_sub_round_trip() {
    let (syms, toks, bind) = matched("a = b + c;");
    assert_eq!(bind.stmt, Stmt::LetAdd);
    assert_eq!(span_text(&syms, &toks, &bind.spans[2]), "c");
    let (syms, toks, bind) = matched("a = b - c;");
    assert_eq!(bind.stmt, Stmt::LetSub);
    assert_eq!(span_text(&syms, &toks, &bind.spans[1]), "b");
}

#[test]
fn test_loop_step_round_trip() {
    let (syms, toks, bind) = matched("i = i + 1; if (i < 9) goto top;");
    assert_eq!(bind.stmt, Stmt::LoopStep);
    assert_eq!(span_text(&syms, &toks, &bind.spans[0]), "i");
    assert_eq!(span_text(&syms, &toks, &bind.spans[1]), "9");
    assert_eq!(span_text(&syms, &toks, &bind.spans[2]), "top");
    assert_eq!(bind.next, 15);
}

#[test]
fn test_loop_step_needs_one_counter() {
    // Same shape, different counter in the condition: the fused form
    // must not match because slot 0 cannot rebind.
    let (_, _, bind) = matched("i = i + 1; if (j < 9) goto top;");
    assert_eq!(bind.stmt, Stmt::LetAdd);
}

#[test]
fn test_print_round_trip() {
    let (syms, toks, bind) = matched("print a + b;");
    assert_eq!(bind.stmt, Stmt::Print);
    assert_eq!(span_text(&syms, &toks, &bind.spans[0]), "a + b");
}

#[test]
fn test_print_needs_an_expression() {
    let (_, _, bind) = matched("print;");
    // The print template requires a non-empty span, so this falls all
    // the way to the expression statement.
    assert_eq!(bind.stmt, Stmt::Expr);
}

#[test]
fn test_label_round_trip() {
    let (syms, toks, bind) = matched("top:");
    assert_eq!(bind.stmt, Stmt::Label);
    assert_eq!(span_text(&syms, &toks, &bind.spans[0]), "top");
    assert_eq!(bind.next, 2);
}

#[test]
fn test_goto_round_trip() {
    let (syms, toks, bind) = matched("goto top;");
    assert_eq!(bind.stmt, Stmt::Goto);
    assert_eq!(span_text(&syms, &toks, &bind.spans[0]), "top");
}

#[test]
fn test_if_goto_round_trip() {
    let (syms, toks, bind) = matched("if (x + 1) goto out;");
    assert_eq!(bind.stmt, Stmt::IfGoto);
    assert_eq!(span_text(&syms, &toks, &bind.spans[0]), "x + 1");
    assert_eq!(span_text(&syms, &toks, &bind.spans[1]), "out");
}

#[test]
fn test_if_block_round_trip() {
    let (syms, toks, bind) = matched("if (x == 2) {");
    assert_eq!(bind.stmt, Stmt::If);
    assert_eq!(span_text(&syms, &toks, &bind.spans[0]), "x == 2");
}

#[test]
fn test_else_and_close_round_trip() {
    let (_, _, bind) = matched("} else {");
    assert_eq!(bind.stmt, Stmt::Else);
    assert_eq!(bind.next, 3);
    let (_, _, bind) = matched("}");
    assert_eq!(bind.stmt, Stmt::End);
    assert_eq!(bind.next, 1);
}

#[test]
fn test_time_round_trip() {
    let (_, _, bind) = matched("time;");
    assert_eq!(bind.stmt, Stmt::Time);
    assert_eq!(bind.next, 2);
}

#[test]
fn test_expression_statement_is_the_fallback() {
    let (syms, toks, bind) = matched("x++;");
    assert_eq!(bind.stmt, Stmt::Expr);
    assert_eq!(span_text(&syms, &toks, &bind.spans[0]), "x ++");
}

#[test]
fn test_expression_wildcard_respects_nesting() {
    let (syms, toks, bind) = matched("print (a + (b * c)) >> 1;");
    assert_eq!(bind.stmt, Stmt::Print);
    assert_eq!(
        span_text(&syms, &toks, &bind.spans[0]),
        "( a + ( b * c ) ) >> 1"
    );
}

#[test]
fn test_comma_stops_an_expression_wildcard() {
    assert!(no_match("print a, b;"));
}

#[test]
fn test_unbalanced_closer_fails_the_match() {
    assert!(no_match("print a);"));
}
