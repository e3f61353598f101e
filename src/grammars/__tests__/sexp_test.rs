use crate::grammars::sexp::sexp_grammar;

#[test]
fn flat_lists() {
    let parser = sexp_grammar();
    assert!(parser.matches("(a)".chars()));
    assert!(parser.matches("(a b c)".chars()));
    assert!(parser.matches("(plus 1 2)".chars()));
}

#[test]
fn nested_lists() {
    let parser = sexp_grammar();
    assert!(parser.matches("(a (b c) d)".chars()));
    assert!(parser.matches("((a))".chars()));
    assert!(parser.matches("(f (g (h x)))".chars()));
}

#[test]
fn rejects_broken_forms() {
    let parser = sexp_grammar();
    for input in ["", "a", "(", "()", "(a", "a)", "(a))"] {
        assert!(!parser.matches(input.chars()), "accepted {:?}", input);
    }
}

#[test]
fn produces_a_forest() {
    let parser = sexp_grammar();
    assert!(!parser.parses("(a b)".chars()).is_empty());
}
