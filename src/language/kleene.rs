//! Fixed point queries over (possibly cyclic) language graphs.
//!
//! Straight structural recursion diverges as soon as a grammar refers to
//! itself, so every query here performs a Kleene ascent: a per-call table is
//! seeded with a bottom value when a node is first entered, a revisit during
//! the same ascent observes the seeded value, and the computed result
//! overwrites the seed on the way out. One ascent suffices for the monotone
//! lattices involved (`bool` and tree sets).

use super::Language;
use crate::memo::ById;
use crate::{Forest, Lang, Memo, Terminal, Tree};
use std::collections::HashMap;

impl<T: Terminal> Memo<T> {
    /// Whether `l` accepts the empty string.
    ///
    /// Bottom is `false`: a recursion that only reaches itself never proves
    /// nullability.
    pub fn nullable(&mut self, l: &Lang<T>) -> bool {
        let mut table = HashMap::new();
        self.nullable_in(l, &mut table)
    }

    fn nullable_in(&mut self, l: &Lang<T>, table: &mut HashMap<ById<T>, bool>) -> bool {
        let id = ById(l.clone());
        if let Some(known) = table.get(&id) {
            return *known;
        }
        table.insert(id.clone(), false);
        let forced = self.force(l);
        let result = match &*forced {
            Language::Empty | Language::Any | Language::Ex(_) | Language::Set(_) => false,
            Language::Null | Language::Term(_) | Language::Rep(_) => true,
            Language::Cat(a, b) => self.nullable_in(a, table) && self.nullable_in(b, table),
            Language::Alt(a, b) => self.nullable_in(a, table) || self.nullable_in(b, table),
            Language::Red(a, _) => self.nullable_in(a, table),
            Language::Delta(a) => self.nullable_in(a, table),
            Language::Lazy(_) => unreachable!("forced"),
        };
        table.insert(id, result);
        result
    }

    /// The parse forest `l` yields on the empty string.
    ///
    /// Bottom is the empty forest. Repetitions yield the unit tree here;
    /// their per-iteration tuples are produced by the reductions the
    /// derivative injects, not by this query.
    pub fn trees(&mut self, l: &Lang<T>) -> Forest<T> {
        let mut table = HashMap::new();
        self.trees_in(l, &mut table)
    }

    fn trees_in(&mut self, l: &Lang<T>, table: &mut HashMap<ById<T>, Forest<T>>) -> Forest<T> {
        let id = ById(l.clone());
        if let Some(known) = table.get(&id) {
            return known.clone();
        }
        table.insert(id.clone(), Forest::new());
        let forced = self.force(l);
        let result = match &*forced {
            Language::Empty | Language::Any | Language::Ex(_) | Language::Set(_) => {
                Forest::new()
            }
            Language::Null | Language::Rep(_) => [Tree::Null].into(),
            Language::Term(ts) => ts.clone(),
            Language::Alt(a, b) => {
                let mut union = self.trees_in(a, table);
                union.extend(self.trees_in(b, table));
                union
            }
            Language::Cat(a, b) => {
                let (xs, ys) = (self.trees_in(a, table), self.trees_in(b, table));
                let mut pairs = Forest::new();
                for x in &xs {
                    for y in &ys {
                        pairs.insert(Tree::pair(x.clone(), y.clone()));
                    }
                }
                pairs
            }
            Language::Red(a, f) => self.trees_in(a, table).iter().map(|t| f(t)).collect(),
            Language::Delta(a) => self.trees_in(a, table),
            Language::Lazy(_) => unreachable!("forced"),
        };
        table.insert(id, result.clone());
        result
    }

    /// Whether `l` denotes the empty set — no input at all is accepted.
    ///
    /// Bottom is `true`: a recursion with no terminal escape accepts
    /// nothing. A conservative oracle, exposed for diagnostics.
    pub fn is_empty(&mut self, l: &Lang<T>) -> bool {
        let mut table = HashMap::new();
        self.is_empty_in(l, &mut table)
    }

    fn is_empty_in(&mut self, l: &Lang<T>, table: &mut HashMap<ById<T>, bool>) -> bool {
        let id = ById(l.clone());
        if let Some(known) = table.get(&id) {
            return *known;
        }
        table.insert(id.clone(), true);
        let forced = self.force(l);
        let result = match &*forced {
            Language::Empty => true,
            Language::Null | Language::Term(_) | Language::Rep(_) => false,
            Language::Any | Language::Ex(_) | Language::Set(_) => false,
            Language::Cat(a, b) => self.is_empty_in(a, table) || self.is_empty_in(b, table),
            Language::Alt(a, b) => self.is_empty_in(a, table) && self.is_empty_in(b, table),
            Language::Red(a, _) => self.is_empty_in(a, table),
            Language::Delta(a) => !self.nullable(a),
            Language::Lazy(_) => unreachable!("forced"),
        };
        table.insert(id, result);
        result
    }

    /// Whether `l` accepts at most the empty string.
    ///
    /// Bottom is `true`. A conservative oracle, exposed for diagnostics.
    pub fn only_null(&mut self, l: &Lang<T>) -> bool {
        let mut table = HashMap::new();
        self.only_null_in(l, &mut table)
    }

    fn only_null_in(&mut self, l: &Lang<T>, table: &mut HashMap<ById<T>, bool>) -> bool {
        let id = ById(l.clone());
        if let Some(known) = table.get(&id) {
            return *known;
        }
        table.insert(id.clone(), true);
        let forced = self.force(l);
        let result = match &*forced {
            Language::Empty | Language::Null | Language::Term(_) => true,
            Language::Any | Language::Ex(_) | Language::Set(_) => false,
            Language::Cat(a, b) => self.only_null_in(a, table) && self.only_null_in(b, table),
            Language::Alt(a, b) => self.only_null_in(a, table) && self.only_null_in(b, table),
            Language::Rep(a) => self.only_null_in(a, table),
            Language::Red(a, _) => self.only_null_in(a, table),
            Language::Delta(_) => true,
            Language::Lazy(_) => unreachable!("forced"),
        };
        table.insert(id, result);
        result
    }
}
