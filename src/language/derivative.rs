use super::{Language, Pending};
use crate::memo::node_key;
use crate::{Lang, Memo, Terminal, Tree};

impl<T: Terminal> Memo<T> {
    /// Resolve indirections until a structural node is reached.
    ///
    /// Suspended derivatives and compactions are evaluated on first use and
    /// cached in their cell, so repeated forcing is free. Forcing an untied
    /// [knot](Language::knot) is a grammar construction bug and panics;
    /// [Parser::new](crate::Parser::new) rejects such grammars up front.
    pub fn force(&mut self, l: &Lang<T>) -> Lang<T> {
        let mut current = l.clone();
        loop {
            let next = match &*current {
                Language::Lazy(thunk) => match thunk.value.get() {
                    Some(resolved) => resolved.clone(),
                    None => {
                        let resolved = match &thunk.pending {
                            Pending::Derive(inner, c) => {
                                let (inner, c) = (inner.clone(), *c);
                                self.derivative(&inner, c)
                            }
                            Pending::Compact(inner) => {
                                let inner = inner.clone();
                                self.compact(&inner)
                            }
                            Pending::Knot(name) => panic!(
                                "Knot {:?} was never tied. Tie the grammar before parsing.",
                                name
                            ),
                        };
                        // Evaluation may have resolved the cell underneath us;
                        // the first write wins either way.
                        thunk.value.get_or_init(|| resolved).clone()
                    }
                },
                _ => break,
            };
            current = next;
        }
        current
    }

    /// The Brzozowski derivative: the language of what may follow after `l`
    /// consumes the terminal `c`.
    ///
    /// Memoized on the node and the symbol for the lifetime of the session.
    /// Descents into combinator children are suspended in lazy cells rather
    /// than taken directly, so deriving a cyclic grammar terminates; the
    /// suspensions collapse later under [compact](Memo::compact) or a cache
    /// hit.
    pub fn derivative(&mut self, l: &Lang<T>, c: T) -> Lang<T> {
        let key = (node_key(l), c);
        if let Some(cached) = self.derived.get(&key) {
            return cached.clone();
        }
        let forced = self.force(l);
        let derived = self.derive_step(&forced, c);
        self.derived.insert(key, derived.clone());
        derived
    }

    fn derive_step(&mut self, l: &Lang<T>, c: T) -> Lang<T> {
        match &**l {
            Language::Empty
            | Language::Null
            | Language::Term(_)
            | Language::Delta(_) => Language::empty(),
            Language::Any => Language::term([Tree::Leaf(c)].into()),
            Language::Ex(x) => {
                if *x == c {
                    Language::term([Tree::Leaf(c)].into())
                } else {
                    Language::empty()
                }
            }
            Language::Set(cs) => {
                if cs.contains(&c) {
                    Language::term([Tree::Leaf(c)].into())
                } else {
                    Language::empty()
                }
            }
            Language::Alt(a, b) => Language::alt(
                self.lazy_derivative(a, c),
                self.lazy_derivative(b, c),
            ),
            Language::Cat(a, b) => {
                let left = Language::cat(self.lazy_derivative(a, c), b.clone());
                if self.nullable(a) {
                    // The first component may match the empty string, so the
                    // symbol may also belong to the second component. Carry
                    // the first component's trees across.
                    let carried = Language::term(self.trees(a));
                    let right = Language::cat(carried, self.lazy_derivative(b, c));
                    Language::alt(left, right)
                } else {
                    left
                }
            }
            Language::Rep(a) => Language::red(
                Language::cat(self.lazy_derivative(a, c), l.clone()),
                self.repeat_reduction(),
            ),
            Language::Red(a, f) => Language::red(self.derivative(a, c), f.clone()),
            Language::Lazy(_) => unreachable!("derive_step runs on forced nodes"),
        }
    }

    fn lazy_derivative(&mut self, l: &Lang<T>, c: T) -> Lang<T> {
        match Language::suspend_derive(l, c) {
            Some(cell) => cell,
            None => self.derivative(l, c),
        }
    }
}
