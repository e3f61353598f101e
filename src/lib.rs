//! Language derivative parsing tool (lang_dp) is a library to recognize and parse
//! context free languages using Brzozowski derivatives of parser combinators.
//!
//! # Overview
//! Most parsing tools restrict the grammar they accept: recursive descent forbids
//! left recursion, LR tools reject ambiguity. Parsing with derivatives takes a
//! different route. A grammar is an ordinary value, a graph of [Language] nodes,
//! and consuming one input symbol rewrites the graph into the grammar of the
//! remaining input. Repeating the rewrite over the whole input and asking whether
//! the final grammar accepts the empty string decides membership; collecting the
//! parse forest of the final grammar enumerates the parse trees. The approach
//! accepts arbitrary context free grammars, including left recursive and
//! ambiguous ones, while staying polynomial for a fixed grammar.
//!
//! # Design
//!
//! The library is built from a small set of cooperating pieces:
//! * [Language] — the combinator algebra. Recursive grammars are closed with
//!   [knot](Language::knot) placeholders and a [tie] pass, so a non-terminal can
//!   appear inside its own definition.
//! * [Memo] — a per-parse session holding the memoization tables of the
//!   [derivative](Memo::derivative) and [compaction](Memo::compact) rewrites and
//!   answering the fixed point queries [nullable](Memo::nullable) and
//!   [trees](Memo::trees) over cyclic graphs.
//! * [Parser] — the driver. It validates the grammar once, then steps the
//!   derivative/compaction loop over the input and reports either a boolean
//!   ([matches](Parser::matches)) or a parse forest ([parses](Parser::parses)).
//! * [sugar] — thin constructors ([optional](sugar::optional),
//!   [text](sugar::text), [sep](sugar::sep), ...) layered over the algebra.
//!
//! # Example
//!
//! A left recursive sum grammar, `S -> "N" | S "+" S`:
//!
//! ```
//! use lang_dp::language::Language;
//! use lang_dp::{tie, Parser, Tree};
//!
//! let number = Language::ex('N');
//! let plus = Language::ex('+');
//!
//! let sum = Language::alt(
//!     number,
//!     Language::cat(
//!         Language::knot("S"),
//!         Language::cat(plus, Language::knot("S")),
//!     ),
//! );
//! tie(&sum);
//!
//! let parser = Parser::new(sum).unwrap();
//!
//! assert!(parser.matches("N".chars()));
//! assert!(parser.matches("N+N+N".chars()));
//! assert!(!parser.matches("N+".chars()));
//!
//! let forest = parser.parses("N+N".chars());
//! assert!(forest.contains(&Tree::Pair(
//!     Tree::Leaf('N').into(),
//!     Tree::Pair(Tree::Leaf('+').into(), Tree::Leaf('N').into()).into(),
//! )));
//! ```
//!
//! # License
//! [lang_dp](crate) is provided under the MIT license.

mod error;
pub mod grammars;
pub mod language;
mod memo;
mod parser;
pub mod sugar;
mod tree;
mod util;

use once_cell::unsync::OnceCell;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;

use memo::{DeriveKey, NodeKey};

pub use language::{tie, tie_map, Language};
pub use util::Log;

/// A marker for the input symbols a grammar consumes.
///
/// Terminals are opaque to the engine: any cheap, hashable, totally ordered
/// value qualifies, and every such value implements the trait automatically.
/// `char` is the usual choice for character level grammars; token enums work
/// equally well for tokenized input.
pub trait Terminal: Copy + Debug + Eq + Hash + Ord + 'static {}

impl<T: Copy + Debug + Eq + Hash + Ord + 'static> Terminal for T {}

/// A shared handle to a [Language] node.
///
/// Grammars are graphs of reference counted nodes; cloning a handle shares the
/// node. Cycles are only ever introduced through [knot](Language::knot) cells.
pub type Lang<T> = Rc<Language<T>>;

/// The set of parse trees a language yields on an input.
pub type Forest<T> = BTreeSet<Tree<T>>;

/// A semantic action carried by reduction nodes.
///
/// Reductions are compared by identity, not by structure: two distinct
/// closures are always distinct reductions, even if they compute the same
/// mapping.
pub type Reduction<T> = Rc<dyn Fn(&Tree<T>) -> Tree<T>>;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// A parse tree produced by [parses](Parser::parses).
pub enum Tree<T> {
    /// The empty match.
    Null,
    /// A consumed terminal.
    Leaf(T),
    /// The product of a concatenation: left tree, right tree.
    Pair(Rc<Tree<T>>, Rc<Tree<T>>),
    /// Items collected by a repetition.
    Tuple(Vec<Tree<T>>),
    /// An atom produced by a reduction, e.g. the [text](crate::sugar::text)
    /// and [token](crate::sugar::token) sugar.
    Text(Rc<str>),
}

#[derive(Debug)]
/// An error returned when a grammar fails validation before parsing starts.
///
/// Parsing itself never errors: input the grammar does not accept simply
/// yields `matches == false` and an empty forest.
pub struct GrammarError {
    message: String,
    what: String,
}

/// The memoization session of a single parse.
///
/// A `Memo` owns the caches that make the derivative approach tractable: the
/// [derivative](Memo::derivative) table, the [compaction](Memo::compact) table
/// together with its re-entry guard, and the shared repetition reduction. The
/// fixed point queries allocate their own table per call.
///
/// Caches grow for the lifetime of the session. Create one `Memo` per parse
/// and drop (or [reset](Memo::reset)) it afterwards; [Parser] does exactly
/// that internally.
pub struct Memo<T: Terminal> {
    derived: HashMap<DeriveKey<T>, Lang<T>>,
    compacted: HashMap<NodeKey<T>, Lang<T>>,
    compacting: HashSet<NodeKey<T>>,
    repeat: Reduction<T>,
}

/// A parser structure to recognize and parse input against a grammar.
///
/// `Parser::new` validates the grammar graph once — every
/// [knot](Language::knot) must have been closed by [tie] or [tie_map] — so
/// that parsing afterwards cannot hit an unresolved recursion placeholder.
pub struct Parser<T: Terminal> {
    root: Lang<T>,
    debugger: OnceCell<Log<&'static str>>,
    #[cfg(debug_assertions)]
    debug_language_map: HashMap<&'static str, Lang<T>>,
}
