use crate::Tree;
use ptree::TreeItem;
use std::borrow::Cow;
use std::fmt::{Debug, Display, Formatter};
use std::rc::Rc;

impl<T> Tree<T> {
    /// Create a concatenation product.
    pub fn pair(left: Tree<T>, right: Tree<T>) -> Self {
        Tree::Pair(Rc::new(left), Rc::new(right))
    }

    /// Create a collected repetition.
    pub fn tuple(items: Vec<Tree<T>>) -> Self {
        Tree::Tuple(items)
    }

    /// Create a text atom.
    pub fn text(value: &str) -> Self {
        Tree::Text(Rc::from(value))
    }
}

impl<T: Clone> Tree<T> {
    /// Prepend one repetition item to the items collected so far.
    ///
    /// A non-tuple `rest` is the unit tree of the repetition's empty tail and
    /// starts a fresh collection.
    pub fn cons(head: Tree<T>, rest: &Tree<T>) -> Tree<T> {
        match rest {
            Tree::Tuple(items) => {
                let mut all = Vec::with_capacity(items.len() + 1);
                all.push(head);
                all.extend(items.iter().cloned());
                Tree::Tuple(all)
            }
            _ => Tree::Tuple(vec![head]),
        }
    }
}

impl<T> Tree<T> {
    fn parts(&self) -> Vec<&Tree<T>> {
        match self {
            Tree::Pair(a, b) => vec![a, b],
            Tree::Tuple(items) => items.iter().collect(),
            _ => Vec::new(),
        }
    }

    /// Collect the consumed terminals of this tree, left to right.
    pub fn leaves(&self) -> Vec<&T> {
        match self {
            Tree::Leaf(c) => vec![c],
            _ => self.parts().iter().flat_map(|part| part.leaves()).collect(),
        }
    }
}

impl<T: PartialEq> Tree<T> {
    /// Whether `other` occurs in this tree, itself included.
    pub fn contains(&self, other: &Tree<T>) -> bool {
        self == other || self.parts().iter().any(|part| part.contains(other))
    }
}

impl<T> Tree<T> {
    /// Search the tree and return the first node matching the predicate.
    pub fn find<P: Fn(&Tree<T>) -> bool>(&self, predicate: &P) -> Option<&Tree<T>> {
        if predicate(self) {
            Some(self)
        } else {
            self.parts()
                .into_iter()
                .find_map(|part| part.find(predicate))
        }
    }
}

impl<T: Debug> Display for Tree<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Tree::Null => write!(f, "''"),
            Tree::Leaf(c) => write!(f, "{:?}", c),
            Tree::Pair(a, b) => write!(f, "({}, {})", a, b),
            Tree::Tuple(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
            Tree::Text(s) => write!(f, "{:?}", s),
        }
    }
}

impl<T: Debug + Clone> TreeItem for Tree<T> {
    type Child = Self;

    fn write_self<W: std::io::Write>(&self, f: &mut W, _: &ptree::Style) -> std::io::Result<()> {
        match self {
            Tree::Null => write!(f, "''"),
            Tree::Leaf(c) => write!(f, "{:?}", c),
            Tree::Pair(_, _) => write!(f, "pair"),
            Tree::Tuple(items) => write!(f, "tuple # {}", items.len()),
            Tree::Text(s) => write!(f, "{:?}", s),
        }
    }

    fn children(&self) -> Cow<[Self::Child]> {
        match self {
            Tree::Pair(a, b) => Cow::from(vec![(**a).clone(), (**b).clone()]),
            Tree::Tuple(items) => Cow::from(&items[..]),
            _ => Cow::from(Vec::new()),
        }
    }
}

impl<T: Debug + Clone> Tree<T> {
    pub fn print(&self) -> Result<(), std::io::Error> {
        ptree::print_tree(self)
    }
}
