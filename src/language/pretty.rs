use super::{Language, Pending};
use crate::Terminal;
use std::collections::HashSet;
use std::fmt::{self, Debug, Formatter, Write};

impl<T: Terminal> Language<T> {
    /// Render the grammar graph for inspection.
    ///
    /// Every node is printed once; a re-entered node — a tied recursion or a
    /// shared subgraph — is elided as `...`. Unresolved cells print their
    /// pending computation instead of evaluating it.
    pub fn describe(&self) -> Result<String, std::fmt::Error> {
        let mut rendered = String::new();
        self.describe_into(&mut rendered, &mut HashSet::new())?;
        Ok(rendered)
    }

    fn describe_into(&self, w: &mut dyn Write, seen: &mut HashSet<usize>) -> fmt::Result {
        if !seen.insert(self as *const Self as usize) {
            return w.write_str("...");
        }
        match self {
            Language::Empty => w.write_str("Empty"),
            Language::Null => w.write_str("''"),
            Language::Term(ts) => {
                w.write_str("Term{")?;
                for (i, t) in ts.iter().enumerate() {
                    if i != 0 {
                        w.write_str(", ")?;
                    }
                    write!(w, "{}", t)?;
                }
                w.write_str("}")
            }
            Language::Any => w.write_str("Any"),
            Language::Ex(c) => write!(w, "{:?}", c),
            Language::Set(cs) => {
                w.write_str("Set{")?;
                for (i, c) in cs.iter().enumerate() {
                    if i != 0 {
                        w.write_str(", ")?;
                    }
                    write!(w, "{:?}", c)?;
                }
                w.write_str("}")
            }
            Language::Cat(a, b) => {
                w.write_str("Cat(")?;
                a.describe_into(w, seen)?;
                w.write_str(", ")?;
                b.describe_into(w, seen)?;
                w.write_str(")")
            }
            Language::Alt(a, b) => {
                w.write_str("Alt(")?;
                a.describe_into(w, seen)?;
                w.write_str(", ")?;
                b.describe_into(w, seen)?;
                w.write_str(")")
            }
            Language::Rep(a) => {
                w.write_str("Rep(")?;
                a.describe_into(w, seen)?;
                w.write_str(")")
            }
            Language::Red(a, _) => {
                w.write_str("Red(")?;
                a.describe_into(w, seen)?;
                w.write_str(")")
            }
            Language::Delta(a) => {
                w.write_str("Delta(")?;
                a.describe_into(w, seen)?;
                w.write_str(")")
            }
            Language::Lazy(thunk) => match thunk.value.get() {
                Some(resolved) => resolved.describe_into(w, seen),
                None => match &thunk.pending {
                    Pending::Knot(name) => write!(w, "<{}>", name),
                    Pending::Derive(_, c) => write!(w, "Lazy(derive {:?})", c),
                    Pending::Compact(_) => w.write_str("Lazy(compact)"),
                },
            },
        }
    }
}

impl<T: Terminal> Debug for Language<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.describe_into(f, &mut HashSet::new())
    }
}
