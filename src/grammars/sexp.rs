//! An S-expression grammar: parenthesized, space separated lists of names,
//! nested arbitrarily deep.

use crate::language::{tie_map, Language};
use crate::sugar::{all, one_or_more};
use crate::{Parser, Tree};
use std::collections::HashMap;
use std::rc::Rc;

/// Build the S-expression parser with the parenthesized form as the start
/// symbol.
pub fn sexp_grammar() -> Parser<char> {
    let po = Language::ex('(');
    let pc = Language::ex(')');

    let character = Language::set(
        ('a'..='z')
            .chain('A'..='Z')
            .chain('0'..='9')
            .chain("+-*/_".chars()),
    );
    let name = one_or_more(character);

    let atom_or_list = Language::alt(Language::knot("sexp"), name);

    let whitespace = Language::red(
        one_or_more(Language::ex(' ')),
        Rc::new(|_: &Tree<char>| Tree::Null),
    );

    // contents -> obj (whitespace obj)*, spelled out with plain combinators:
    // the recursion knot must stay on a structural spine for tying to reach
    // it, so sugar::sep (which wraps a reduction around its list) is avoided.
    let contents = Language::cat(
        atom_or_list.clone(),
        Language::rep(Language::cat(whitespace, atom_or_list)),
    );

    let sexp = all(vec![po, contents, pc]);
    tie_map(&sexp, &HashMap::from([("sexp", sexp.clone())]));

    Parser::new(sexp).unwrap()
}
