//! Convenience constructors layered over the [Language](crate::Language)
//! algebra.
//!
//! Everything here is a pure graph builder: each function assembles a few
//! core nodes and, where it shapes the resulting trees, a reduction. None of
//! the engine's machinery is touched.
//!
//! Functions that install a reduction ([text], [token], [one_or_more], [sep],
//! [bracket]) must not wrap unresolved [knots](crate::Language::knot): the
//! [tie](crate::tie) pass descends only structural combinator children, so a
//! knot hidden behind a reduction would stay untied (and be reported by
//! [Parser::new](crate::Parser::new)). Keep knots under plain `cat`/`alt`
//! spines, as the [grammars](crate::grammars) module does.

use crate::language::Language;
use crate::{Lang, Terminal, Tree};
use std::rc::Rc;

#[cfg(test)]
mod __tests__;

/// Match either the given language, or the empty string.
///
/// # Example
/// ```
/// use lang_dp::sugar::optional;
/// use lang_dp::{Language, Parser};
///
/// let greeting = Language::cat(optional(Language::ex('a')), Language::ex('b'));
/// let parser = Parser::new(greeting).unwrap();
/// assert!(parser.matches("ab".chars()));
/// assert!(parser.matches("b".chars()));
/// ```
pub fn optional<T: Terminal>(l: Lang<T>) -> Lang<T> {
    Language::alt(l, Language::null())
}

/// Match every character of the string in turn, yielding the entire string
/// as a single [Tree::Text] atom.
pub fn text(value: &'static str) -> Lang<char> {
    let mut chars = value.chars();
    let first = match chars.next() {
        Some(c) => Language::ex(c),
        None => return Language::null(),
    };
    let spelled = chars.fold(first, |acc, c| Language::cat(acc, Language::ex(c)));
    Language::red(spelled, Rc::new(move |_: &Tree<char>| Tree::text(value)))
}

/// Concatenate the symbols in order.
///
/// The chain associates to the right, so the first symbol is the head of the
/// outermost pair; [bracket] relies on that shape.
pub fn all<T: Terminal>(symbols: Vec<Lang<T>>) -> Lang<T> {
    let mut rest = symbols.into_iter().rev();
    let last = match rest.next() {
        Some(l) => l,
        None => return Language::null(),
    };
    rest.fold(last, |acc, l| Language::cat(l, acc))
}

/// Match the first of the alternatives — or any of them: alternation is
/// unordered, every successful branch contributes to the forest.
pub fn one_of<T: Terminal>(alternatives: Vec<Lang<T>>) -> Lang<T> {
    let mut rest = alternatives.into_iter();
    let first = match rest.next() {
        Some(l) => l,
        None => return Language::empty(),
    };
    rest.fold(first, |acc, l| Language::alt(acc, l))
}

/// Match any one character of the string.
pub fn any_of(values: &str) -> Lang<char> {
    Language::set(values.chars())
}

/// Match one or more repetitions, collecting the items into a [Tree::Tuple].
pub fn one_or_more<T: Terminal>(l: Lang<T>) -> Lang<T> {
    Language::red(
        Language::cat(l.clone(), Language::rep(l)),
        Rc::new(|t: &Tree<T>| match t {
            Tree::Pair(car, cdr) => Tree::cons((**car).clone(), cdr),
            other => Tree::Tuple(vec![other.clone()]),
        }),
    )
}

/// Match one or more occurrences of `l` separated by `separator`, keeping
/// only the items in the resulting tuple.
///
/// # Example
/// ```
/// use lang_dp::sugar::sep;
/// use lang_dp::{Language, Parser, Tree};
///
/// let list = sep(Language::ex('x'), Language::ex(','));
/// let parser = Parser::new(list).unwrap();
/// let forest = parser.parses("x,x".chars());
/// assert!(forest.contains(&Tree::Tuple(vec![Tree::Leaf('x'), Tree::Leaf('x')])));
/// ```
pub fn sep<T: Terminal>(l: Lang<T>, separator: Lang<T>) -> Lang<T> {
    Language::red(
        Language::cat(l.clone(), Language::rep(Language::cat(separator, l))),
        Rc::new(|t: &Tree<T>| match t {
            Tree::Pair(first, rest) => {
                let mut items = vec![(**first).clone()];
                if let Tree::Tuple(tail) = &**rest {
                    for link in tail {
                        match link {
                            Tree::Pair(_, item) => items.push((**item).clone()),
                            other => items.push(other.clone()),
                        }
                    }
                }
                Tree::Tuple(items)
            }
            other => Tree::Tuple(vec![other.clone()]),
        }),
    )
}

/// Match `open body close`, keeping only the body's tree.
pub fn bracket<T: Terminal>(open: Lang<T>, body: Lang<T>, close: Lang<T>) -> Lang<T> {
    Language::red(
        all(vec![open, body, close]),
        Rc::new(|t: &Tree<T>| match t {
            Tree::Pair(_, rest) => match &**rest {
                Tree::Pair(middle, _) => (**middle).clone(),
                other => other.clone(),
            },
            other => other.clone(),
        }),
    )
}

/// Produce a fixed [Tree::Text] label upon matching a language, discarding
/// the matched shape. The usual way to build a token stream grammar.
pub fn token<T: Terminal>(l: Lang<T>, label: &'static str) -> Lang<T> {
    Language::red(l, Rc::new(move |_: &Tree<T>| Tree::text(label)))
}
