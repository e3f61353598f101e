//! A tokenizing grammar for a Python-ish character stream: the whole input
//! is a repetition of punctuation tokens and identifiers, each relabelled to
//! a [Tree::Text](crate::Tree::Text) token by a reduction.

use crate::language::Language;
use crate::sugar::{any_of, one_of, token};
use crate::Parser;

/// Build the token stream parser.
pub fn py_grammar() -> Parser<char> {
    let colon = token(Language::ex(':'), "colon");
    let semicolon = token(Language::ex(';'), "semicolon");
    let brace_close = token(Language::ex('}'), "brace-close");
    let brace_open = token(Language::ex('{'), "brace-open");
    let bracket_close = token(Language::ex(']'), "bracket-close");
    let bracket_open = token(Language::ex('['), "bracket-open");
    let paren_close = token(Language::ex(')'), "paren-close");
    let paren_open = token(Language::ex('('), "paren-open");

    let digit = any_of("0123456789");
    let alpha = any_of("abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ");
    let alphanum = Language::alt(alpha.clone(), digit);
    let identifier = Language::cat(alpha, Language::rep(alphanum));

    let python = Language::rep(one_of(vec![
        colon,
        semicolon,
        brace_close,
        brace_open,
        bracket_close,
        bracket_open,
        paren_close,
        paren_open,
        identifier,
    ]));

    Parser::new(python).unwrap()
}
