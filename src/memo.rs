use crate::{Forest, Lang, Language, Memo, Reduction, Terminal, Tree};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// A language handle compared and hashed by node identity.
///
/// Keys hold a strong handle so an address can never be reused while a cache
/// entry still refers to it.
pub(crate) struct ById<T: Terminal>(pub(crate) Lang<T>);

/// A reduction handle compared and hashed by function identity.
pub(crate) struct ByFn<T: Terminal>(pub(crate) Reduction<T>);

#[derive(Clone, PartialEq, Eq, Hash)]
/// A single-ply structural key: variant tag and payload are compared by
/// value, child slots by identity.
///
/// Equivalent graphs produced in different rewrite orders differ by identity
/// but agree on these keys one ply deep, which is what lets the derivative
/// and compaction caches hit across rewrites. Lazy cells key as themselves.
pub(crate) enum NodeKey<T: Terminal> {
    Empty,
    Null,
    Term(Forest<T>),
    Any,
    Ex(T),
    Set(BTreeSet<T>),
    Cat(ById<T>, ById<T>),
    Alt(ById<T>, ById<T>),
    Rep(ById<T>),
    Red(ById<T>, ByFn<T>),
    Delta(ById<T>),
    Cell(ById<T>),
}

pub(crate) type DeriveKey<T> = (NodeKey<T>, T);

pub(crate) fn node_key<T: Terminal>(l: &Lang<T>) -> NodeKey<T> {
    match &**l {
        Language::Empty => NodeKey::Empty,
        Language::Null => NodeKey::Null,
        Language::Term(ts) => NodeKey::Term(ts.clone()),
        Language::Any => NodeKey::Any,
        Language::Ex(c) => NodeKey::Ex(*c),
        Language::Set(cs) => NodeKey::Set(cs.clone()),
        Language::Cat(a, b) => NodeKey::Cat(ById(a.clone()), ById(b.clone())),
        Language::Alt(a, b) => NodeKey::Alt(ById(a.clone()), ById(b.clone())),
        Language::Rep(a) => NodeKey::Rep(ById(a.clone())),
        Language::Red(a, f) => NodeKey::Red(ById(a.clone()), ByFn(f.clone())),
        Language::Delta(a) => NodeKey::Delta(ById(a.clone())),
        Language::Lazy(_) => NodeKey::Cell(ById(l.clone())),
    }
}

impl<T: Terminal> Memo<T> {
    /// Create a fresh session with empty caches.
    pub fn new() -> Self {
        Self {
            derived: HashMap::new(),
            compacted: HashMap::new(),
            compacting: HashSet::new(),
            repeat: Rc::new(|t: &Tree<T>| match t {
                Tree::Pair(x, y) => Tree::cons((**x).clone(), y),
                other => Tree::Tuple(vec![other.clone()]),
            }),
        }
    }

    /// Drop all cached rewrites, bounding memory between parses of the same
    /// grammar.
    pub fn reset(&mut self) {
        self.derived.clear();
        self.compacted.clear();
        self.compacting.clear();
    }

    /// The reduction collecting repetition items, shared so that every
    /// derivative of the same `Rep` carries one identity.
    pub(crate) fn repeat_reduction(&self) -> Reduction<T> {
        self.repeat.clone()
    }
}

impl<T: Terminal> Default for Memo<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Terminal> Clone for ById<T> {
    fn clone(&self) -> Self {
        ById(self.0.clone())
    }
}

impl<T: Terminal> PartialEq for ById<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: Terminal> Eq for ById<T> {}

impl<T: Terminal> Hash for ById<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Rc::as_ptr(&self.0) as usize).hash(state);
    }
}

impl<T: Terminal> Clone for ByFn<T> {
    fn clone(&self) -> Self {
        ByFn(self.0.clone())
    }
}

impl<T: Terminal> PartialEq for ByFn<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: Terminal> Eq for ByFn<T> {}

impl<T: Terminal> Hash for ByFn<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Rc::as_ptr(&self.0) as *const () as usize).hash(state);
    }
}
