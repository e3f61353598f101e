use super::Language;
use crate::memo::node_key;
use crate::{Lang, Memo, Reduction, Terminal, Tree};
use std::rc::Rc;

/// Look through already-resolved cells without evaluating anything.
///
/// Compaction inspects children one layer of laziness deep; an unresolved
/// suspension is left for a later round.
fn peek<T: Terminal>(l: &Lang<T>) -> &Lang<T> {
    let mut current = l;
    while let Language::Lazy(thunk) = &**current {
        match thunk.value.get() {
            Some(resolved) => current = resolved,
            None => break,
        }
    }
    current
}

fn compose<T: Terminal>(inner: &Reduction<T>, outer: &Reduction<T>) -> Reduction<T> {
    let (inner, outer) = (inner.clone(), outer.clone());
    Rc::new(move |t: &Tree<T>| outer(&inner(t)))
}

/// A reduction pairing every tree with a fixed left component.
fn pair_left<T: Terminal>(t: &Tree<T>) -> Reduction<T> {
    let t = t.clone();
    Rc::new(move |x: &Tree<T>| Tree::pair(t.clone(), x.clone()))
}

/// A reduction pairing every tree with a fixed right component.
fn pair_right<T: Terminal>(t: &Tree<T>) -> Reduction<T> {
    let t = t.clone();
    Rc::new(move |x: &Tree<T>| Tree::pair(x.clone(), t.clone()))
}

impl<T: Terminal> Memo<T> {
    /// Prune a derivative step's debris, preserving the language and its
    /// forest.
    ///
    /// Compaction is a single-ply rewrite: it removes `Empty` dominated
    /// branches, folds matched input through concatenations, and fuses
    /// stacked reductions, suspending any deeper descent in lazy cells.
    /// Without it the graph would grow with every input symbol; with it the
    /// per-step growth stays bounded.
    ///
    /// Memoized on the node for the lifetime of the session. A recursive
    /// re-entry on a node already being compacted returns the node unchanged,
    /// treating it as a fixed point.
    pub fn compact(&mut self, l: &Lang<T>) -> Lang<T> {
        let key = node_key(l);
        if let Some(cached) = self.compacted.get(&key) {
            return cached.clone();
        }
        if !self.compacting.insert(key.clone()) {
            return l.clone();
        }
        let forced = self.force(l);
        let compacted = self.compact_step(&forced);
        self.compacting.remove(&key);
        self.compacted.insert(key, compacted.clone());
        compacted
    }

    fn compact_step(&mut self, l: &Lang<T>) -> Lang<T> {
        match &**l {
            Language::Cat(a, b) => {
                let (pa, pb) = (peek(a), peek(b));
                if matches!(&**pa, Language::Empty) || matches!(&**pb, Language::Empty) {
                    return Language::empty();
                }
                if let Language::Term(ts) = &**pa {
                    if !ts.is_empty() {
                        let rest = self.compact(b);
                        return fold_terms(ts, &rest, pair_left);
                    }
                }
                if let Language::Term(ts) = &**pb {
                    if !ts.is_empty() {
                        let rest = self.compact(a);
                        return fold_terms(ts, &rest, pair_right);
                    }
                }
                Language::cat(self.lazy_compact(a), self.lazy_compact(b))
            }
            Language::Alt(a, b) => {
                if matches!(&**peek(a), Language::Empty) {
                    return self.compact(b);
                }
                if matches!(&**peek(b), Language::Empty) {
                    return self.compact(a);
                }
                Language::alt(self.lazy_compact(a), self.lazy_compact(b))
            }
            Language::Rep(a) => {
                if matches!(&**peek(a), Language::Empty) {
                    // Empty* is exactly the empty string.
                    return Language::null();
                }
                Language::rep(self.lazy_compact(a))
            }
            Language::Red(a, f) => {
                let pa = peek(a);
                match &**pa {
                    Language::Null => Language::term([f(&Tree::Null)].into()),
                    Language::Term(ts) => Language::term(ts.iter().map(|t| f(t)).collect()),
                    Language::Red(b, g) => Language::red(self.compact(b), compose(g, f)),
                    _ => Language::red(self.compact(a), f.clone()),
                }
            }
            Language::Delta(a) => Language::delta(self.lazy_compact(a)),
            Language::Empty
            | Language::Null
            | Language::Term(_)
            | Language::Any
            | Language::Ex(_)
            | Language::Set(_) => l.clone(),
            Language::Lazy(_) => unreachable!("compact_step runs on forced nodes"),
        }
    }

    fn lazy_compact(&mut self, l: &Lang<T>) -> Lang<T> {
        match Language::suspend_compact(l) {
            Some(cell) => cell,
            None => self.compact(l),
        }
    }
}

/// Rewrite `Cat(Term(ts), rest)` (or its mirror image) into reductions over
/// `rest`: the curried pair for a single carried tree, an alternation of
/// curried pairs otherwise.
fn fold_terms<T: Terminal>(
    ts: &crate::Forest<T>,
    rest: &Lang<T>,
    curry: fn(&Tree<T>) -> Reduction<T>,
) -> Lang<T> {
    let mut folded: Option<Lang<T>> = None;
    for t in ts {
        let red = Language::red(rest.clone(), curry(t));
        folded = Some(match folded {
            Some(acc) => Language::alt(acc, red),
            None => red,
        });
    }
    folded.unwrap_or_else(Language::empty)
}
