//! A module consist of the combinator algebra the parsing engine operates on.
//!
//! Each [Language] node denotes a set of terminal strings together with the
//! parse trees it yields. Terminal nodes like [Ex](Language::Ex) and
//! [Set](Language::Set) match single symbols, while the non-terminal nodes
//! [Cat](Language::Cat), [Alt](Language::Alt) and [Rep](Language::Rep) combine
//! sub-languages. A recursive grammar is written with [knot](Language::knot)
//! placeholders and closed afterwards with a [tie] pass, so the graph may
//! contain cycles.
//!
//! The algebra is consumed by the rewrites and queries on
//! [Memo](crate::Memo): one derivative step per input symbol, a compaction
//! pass that keeps the graph bounded, and Kleene fixed point queries for
//! nullability and the parse forest.

mod compact;
mod derivative;
mod kleene;
mod pretty;
mod tie;

#[cfg(test)]
mod __tests__;

use crate::{Forest, Lang, Reduction, Terminal};
use once_cell::unsync::OnceCell;
use std::collections::BTreeSet;
use std::fmt::Display;
use std::rc::Rc;

pub(crate) use tie::find_untied;
pub use tie::{tie, tie_map};

/// A language over a terminal alphabet `T`.
///
/// Nodes are immutable once built and freely shareable through [Lang]
/// handles; the only interior mutation is the write-once slot of a
/// [Lazy](Language::Lazy) cell. The engine rewrites graphs by building new
/// nodes, never by editing existing ones.
pub enum Language<T: Terminal> {
    /// The empty set: no strings, not even the empty one.
    Empty,
    /// Exactly the empty string, yielding the unit tree.
    Null,
    /// The empty string, carrying the trees of input already consumed.
    Term(Forest<T>),
    /// Any single terminal.
    Any,
    /// Exactly one given terminal.
    Ex(T),
    /// Any one terminal out of a set.
    Set(BTreeSet<T>),
    /// Concatenation; yields [Tree::Pair](crate::Tree::Pair) products.
    Cat(Lang<T>, Lang<T>),
    /// Alternation; yields the union of both branches.
    Alt(Lang<T>, Lang<T>),
    /// Kleene star; repetition items are collected into
    /// [Tree::Tuple](crate::Tree::Tuple) by the reductions the derivative
    /// injects.
    Rep(Lang<T>),
    /// A reduction mapping the inner language's trees through a function.
    Red(Lang<T>, Reduction<T>),
    /// The empty string if the inner language is nullable, the empty set
    /// otherwise; yields the inner language's trees.
    Delta(Lang<T>),
    /// A suspended computation or an unresolved recursion placeholder.
    Lazy(Thunk<T>),
}

/// A write-once indirection holding either a pending computation or its
/// resolved language.
///
/// Thunks exist for two reasons. The derivative and compaction rewrites wrap
/// their recursive descents in suspension cells so that rewriting a cyclic
/// graph terminates. And a recursive grammar is constructed bottom-up around
/// [knot](Language::knot) placeholders, resolved later by [tie] or [tie_map].
/// The pending description is kept after resolution for diagnostics only.
pub struct Thunk<T: Terminal> {
    pending: Pending<T>,
    value: OnceCell<Lang<T>>,
}

enum Pending<T: Terminal> {
    Derive(Lang<T>, T),
    Compact(Lang<T>),
    Knot(&'static str),
}

impl<T: Terminal> Language<T> {
    pub fn empty() -> Lang<T> {
        Rc::new(Language::Empty)
    }

    pub fn null() -> Lang<T> {
        Rc::new(Language::Null)
    }

    /// Create a matched-input node carrying the given trees.
    ///
    /// `Term` nodes mostly arise from derivation — a matched terminal leaves
    /// `Term({Leaf(c)})` behind — but clients may seed one directly.
    pub fn term(ts: Forest<T>) -> Lang<T> {
        Rc::new(Language::Term(ts))
    }

    pub fn any() -> Lang<T> {
        Rc::new(Language::Any)
    }

    /// Create a terminal symbol matching exactly `c`.
    pub fn ex(c: T) -> Lang<T> {
        Rc::new(Language::Ex(c))
    }

    /// Create a terminal symbol matching any one terminal of `cs`.
    pub fn set<I: IntoIterator<Item = T>>(cs: I) -> Lang<T> {
        Rc::new(Language::Set(cs.into_iter().collect()))
    }

    /// Create the concatenation of `first` and `second`.
    pub fn cat(first: Lang<T>, second: Lang<T>) -> Lang<T> {
        Rc::new(Language::Cat(first, second))
    }

    /// Create the alternation of `first` and `second`.
    pub fn alt(first: Lang<T>, second: Lang<T>) -> Lang<T> {
        Rc::new(Language::Alt(first, second))
    }

    /// Create the Kleene star of `l`.
    pub fn rep(l: Lang<T>) -> Lang<T> {
        Rc::new(Language::Rep(l))
    }

    /// Create a reduction of `l` through `f`.
    ///
    /// The function is carried by identity: sharing one [Reduction] handle
    /// across several nodes makes those nodes comparable for memoization,
    /// while two separately allocated closures never compare equal.
    pub fn red(l: Lang<T>, f: Reduction<T>) -> Lang<T> {
        Rc::new(Language::Red(l, f))
    }

    /// Create a nullability probe of `l`.
    pub fn delta(l: Lang<T>) -> Lang<T> {
        Rc::new(Language::Delta(l))
    }

    /// Create an unresolved recursion placeholder.
    ///
    /// A knot stands for a language that is still being defined. After the
    /// grammar is assembled, [tie] points every reachable knot at the root,
    /// and [tie_map] points named knots at named sub-languages. The name is
    /// used for resolution by [tie_map] and for diagnostics.
    ///
    /// # Example
    /// ```
    /// use lang_dp::language::{tie, Language};
    /// use lang_dp::Parser;
    ///
    /// // B -> "" | B "(" B ")"
    /// let nested = Language::alt(
    ///     Language::null(),
    ///     Language::cat(
    ///         Language::knot("B"),
    ///         Language::cat(
    ///             Language::ex('('),
    ///             Language::cat(Language::knot("B"), Language::ex(')')),
    ///         ),
    ///     ),
    /// );
    /// tie(&nested);
    ///
    /// let parser = Parser::new(nested).unwrap();
    /// assert!(parser.matches("(())()".chars()));
    /// assert!(!parser.matches("(()".chars()));
    /// ```
    pub fn knot(name: &'static str) -> Lang<T> {
        Rc::new(Language::Lazy(Thunk {
            pending: Pending::Knot(name),
            value: OnceCell::new(),
        }))
    }

    /// Suspend a derivative of `l` over `c` if `l` may take part in a cycle,
    /// otherwise signal that it can be taken eagerly.
    pub(crate) fn suspend_derive(l: &Lang<T>, c: T) -> Option<Lang<T>> {
        if l.could_be_lazy() {
            Some(Rc::new(Language::Lazy(Thunk {
                pending: Pending::Derive(l.clone(), c),
                value: OnceCell::new(),
            })))
        } else {
            None
        }
    }

    /// Suspend a compaction of `l` if `l` may take part in a cycle.
    pub(crate) fn suspend_compact(l: &Lang<T>) -> Option<Lang<T>> {
        if l.could_be_lazy() {
            Some(Rc::new(Language::Lazy(Thunk {
                pending: Pending::Compact(l.clone()),
                value: OnceCell::new(),
            })))
        } else {
            None
        }
    }

    /// Conservative laziness check.
    ///
    /// A node must be handled lazily when recursing into it could loop: it is
    /// itself a cell, or one of the combinators whose child slots may hold
    /// cells.
    pub(crate) fn could_be_lazy(&self) -> bool {
        matches!(
            self,
            Language::Lazy(_)
                | Language::Cat(_, _)
                | Language::Alt(_, _)
                | Language::Rep(_)
                | Language::Delta(_)
        )
    }
}

impl<T: Terminal> Thunk<T> {
    /// The resolved language, if this cell has been forced or tied.
    pub fn resolved(&self) -> Option<&Lang<T>> {
        self.value.get()
    }

    /// The knot identifier, when this cell is a recursion placeholder.
    pub fn knot_name(&self) -> Option<&'static str> {
        match self.pending {
            Pending::Knot(name) => Some(name),
            _ => None,
        }
    }
}

impl<T: Terminal> Display for Language<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::Empty => write!(f, "Empty"),
            Language::Null => write!(f, "''"),
            Language::Term(_) => write!(f, "Term"),
            Language::Any => write!(f, "Any"),
            Language::Ex(c) => write!(f, "{:?}", c),
            Language::Set(_) => write!(f, "Set"),
            Language::Cat(_, _) => write!(f, "Cat"),
            Language::Alt(_, _) => write!(f, "Alt"),
            Language::Rep(_) => write!(f, "Rep"),
            Language::Red(_, _) => write!(f, "Red"),
            Language::Delta(_) => write!(f, "Delta"),
            Language::Lazy(thunk) => match &thunk.pending {
                Pending::Knot(name) => write!(f, "{}", name),
                Pending::Derive(_, _) | Pending::Compact(_) => write!(f, "Lazy"),
            },
        }
    }
}
