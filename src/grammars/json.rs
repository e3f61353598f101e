//! A character level JSON grammar.
//!
//! Numbers, strings, constants, arrays and objects are covered; strings are
//! limited to letters, digits and spaces (no escapes), which keeps the
//! grammar compact while staying inside real JSON. The mutually recursive
//! non-terminals (`value` inside `array`/`object`, the self recursive
//! `digits`, `chars`, `elements` and `members` lists) are written with named
//! knots and closed with one [tie_map] pass.

use crate::language::{tie_map, Language};
use crate::sugar::{all, one_of, text};
use crate::{Lang, Parser};
use std::collections::HashMap;

/// Build the JSON parser with `value` as the start symbol.
pub fn json_grammar() -> Parser<char> {
    let digit: Lang<char> = Language::set('0'..='9');
    let digit19 = Language::set('1'..='9');

    // digits -> digit | digit digits
    let digits = Language::alt(
        digit.clone(),
        Language::cat(digit.clone(), Language::knot("digits")),
    );

    let e = one_of(vec![
        text("e"),
        text("E"),
        text("e-"),
        text("e+"),
        text("E-"),
        text("E+"),
    ]);
    let exp = Language::cat(e, digits.clone());
    let frac = Language::cat(Language::ex('.'), digits.clone());

    let int = one_of(vec![
        digit.clone(),
        Language::cat(digit19.clone(), digits.clone()),
        Language::cat(Language::ex('-'), digit.clone()),
        all(vec![Language::ex('-'), digit19, digits.clone()]),
    ]);

    let number = one_of(vec![
        int.clone(),
        Language::cat(int.clone(), frac.clone()),
        Language::cat(int.clone(), exp.clone()),
        all(vec![int, frac, exp]),
    ]);

    let str_char = one_of(vec![
        Language::set('a'..='z'),
        Language::set('A'..='Z'),
        digit,
        Language::ex(' '),
    ]);
    // chars -> char | char chars
    let chars = Language::alt(
        str_char.clone(),
        Language::cat(str_char, Language::knot("chars")),
    );
    let string = Language::alt(
        text("\"\""),
        all(vec![Language::ex('"'), chars.clone(), Language::ex('"')]),
    );

    let value = one_of(vec![
        string.clone(),
        number,
        Language::knot("object"),
        Language::knot("array"),
        text("true"),
        text("false"),
        text("null"),
    ]);

    // elements -> value | value "," elements
    let elements = Language::alt(
        value.clone(),
        all(vec![value.clone(), Language::ex(','), Language::knot("elements")]),
    );
    let array = Language::alt(
        text("[]"),
        all(vec![Language::ex('['), elements.clone(), Language::ex(']')]),
    );

    let pair = all(vec![string, Language::ex(':'), value.clone()]);
    // members -> pair | pair "," members
    let members = Language::alt(
        pair.clone(),
        all(vec![pair, Language::ex(','), Language::knot("members")]),
    );
    let object = Language::alt(
        text("{}"),
        all(vec![Language::ex('{'), members.clone(), Language::ex('}')]),
    );

    tie_map(
        &value,
        &HashMap::from([
            ("digits", digits),
            ("chars", chars),
            ("elements", elements),
            ("members", members),
            ("array", array),
            ("object", object),
        ]),
    );

    Parser::new(value).unwrap()
}
