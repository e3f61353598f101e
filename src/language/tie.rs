use super::{Language, Pending};
use crate::{Lang, Terminal};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

/// Close a recursive grammar by pointing every reachable
/// [knot](Language::knot) at `root`.
///
/// The walk descends the structural children of `Cat`, `Alt`, `Rep` and
/// `Delta`. Tying is idempotent: a knot that already resolves somewhere is
/// left alone.
pub fn tie<T: Terminal>(root: &Lang<T>) {
    bind(root, &HashMap::new());
}

/// Close a grammar with several mutually recursive non-terminals.
///
/// Knots whose name appears in `bindings` resolve to the bound language;
/// all other knots resolve to `root`. The bound languages are walked as
/// well, so bindings may refer to each other freely.
///
/// # Example
/// ```
/// use lang_dp::language::{tie_map, Language};
/// use lang_dp::Parser;
/// use std::collections::HashMap;
///
/// // list  -> "[" items "]"
/// // items -> "x" | "x" "," items
/// let items = Language::alt(
///     Language::ex('x'),
///     Language::cat(
///         Language::ex('x'),
///         Language::cat(Language::ex(','), Language::knot("items")),
///     ),
/// );
/// let list = Language::cat(
///     Language::ex('['),
///     Language::cat(items.clone(), Language::ex(']')),
/// );
/// tie_map(&list, &HashMap::from([("items", items)]));
///
/// let parser = Parser::new(list).unwrap();
/// assert!(parser.matches("[x,x,x]".chars()));
/// assert!(!parser.matches("[x,]".chars()));
/// ```
pub fn tie_map<T: Terminal>(root: &Lang<T>, bindings: &HashMap<&'static str, Lang<T>>) {
    bind(root, bindings);
}

fn bind<T: Terminal>(root: &Lang<T>, bindings: &HashMap<&'static str, Lang<T>>) {
    let mut stack: Vec<Lang<T>> = vec![root.clone()];
    stack.extend(bindings.values().cloned());
    let mut visited: HashSet<usize> = HashSet::new();
    while let Some(node) = stack.pop() {
        if !visited.insert(Rc::as_ptr(&node) as usize) {
            continue;
        }
        match &*node {
            Language::Cat(a, b) | Language::Alt(a, b) => {
                resolve(a, root, bindings, &mut stack);
                resolve(b, root, bindings, &mut stack);
            }
            Language::Rep(a) | Language::Delta(a) => resolve(a, root, bindings, &mut stack),
            _ => {}
        }
    }
}

fn resolve<T: Terminal>(
    child: &Lang<T>,
    root: &Lang<T>,
    bindings: &HashMap<&'static str, Lang<T>>,
    stack: &mut Vec<Lang<T>>,
) {
    if let Language::Lazy(thunk) = &**child {
        if let Pending::Knot(name) = thunk.pending {
            let target = bindings.get(name).unwrap_or(root);
            // First resolution wins; re-tying is a no-op.
            let _ = thunk.value.set(target.clone());
        }
    } else {
        stack.push(child.clone());
    }
}

/// Search the whole graph, including suspended computations, for a knot that
/// no tie pass has resolved. Returns its name.
pub(crate) fn find_untied<T: Terminal>(root: &Lang<T>) -> Option<&'static str> {
    let mut stack: Vec<Lang<T>> = vec![root.clone()];
    let mut visited: HashSet<usize> = HashSet::new();
    while let Some(node) = stack.pop() {
        if !visited.insert(Rc::as_ptr(&node) as usize) {
            continue;
        }
        match &*node {
            Language::Cat(a, b) | Language::Alt(a, b) => {
                stack.push(a.clone());
                stack.push(b.clone());
            }
            Language::Rep(a) | Language::Delta(a) | Language::Red(a, _) => {
                stack.push(a.clone());
            }
            Language::Lazy(thunk) => match thunk.value.get() {
                Some(resolved) => stack.push(resolved.clone()),
                None => match &thunk.pending {
                    Pending::Knot(name) => return Some(name),
                    Pending::Derive(inner, _) | Pending::Compact(inner) => {
                        stack.push(inner.clone());
                    }
                },
            },
            _ => {}
        }
    }
    None
}
