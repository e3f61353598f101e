use crate::language::find_untied;
use crate::{Forest, GrammarError, Lang, Log, Memo, Parser, Terminal};
use once_cell::unsync::OnceCell;

impl<T: Terminal> Parser<T> {
    /// Create a parser over a tied grammar.
    ///
    /// Validation runs once here, so parsing can never stumble over an
    /// unresolved recursion placeholder.
    pub fn new(root: Lang<T>) -> Result<Self, GrammarError> {
        let parser = Self {
            root,
            debugger: OnceCell::new(),
            #[cfg(debug_assertions)]
            debug_language_map: std::collections::HashMap::new(),
        };
        parser.validate()?;
        Ok(parser)
    }

    pub fn validate(&self) -> Result<(), GrammarError> {
        match find_untied(&self.root) {
            Some(name) => Err(GrammarError::new(
                "UntiedKnot".into(),
                format!(
                    "Knot {:?} is not tied to a language. Call tie or tie_map before parsing.",
                    name
                ),
            )),
            None => Ok(()),
        }
    }

    /// Render the grammar this parser runs, cycles elided.
    pub fn grammar(&self) -> Result<String, std::fmt::Error> {
        self.root.describe()
    }

    /// Set a log label to debug the parser based on the level of [Log].
    pub fn set_log(&self, debugger: Log<&'static str>) -> Result<(), String> {
        self.debugger
            .set(debugger)
            .map_err(|err| format!("Debugger {} is already set for this parser.", err))
    }

    /// Whether the grammar accepts the input.
    pub fn matches<I: IntoIterator<Item = T>>(&self, input: I) -> bool {
        let mut memo = Memo::new();
        let rest = self.consume(&mut memo, input);
        let accepted = memo.nullable(&rest);
        self.log_matched(accepted);
        accepted
    }

    /// The parse forest of the input: every tree the grammar yields for it.
    ///
    /// Rejected input yields the empty forest; ambiguous input yields more
    /// than one tree.
    pub fn parses<I: IntoIterator<Item = T>>(&self, input: I) -> Forest<T> {
        let mut memo = Memo::new();
        let rest = self.consume(&mut memo, input);
        let forest = memo.trees(&rest);
        self.log_parsed(forest.len());
        forest
    }

    /// Step the grammar over the input, one derivative and one compaction
    /// per symbol.
    fn consume<I: IntoIterator<Item = T>>(&self, memo: &mut Memo<T>, input: I) -> Lang<T> {
        let mut language = self.root.clone();
        for c in input {
            let derived = memo.derivative(&language, c);
            language = memo.compact(&derived);
            self.log_step(c, &language);
        }
        language
    }

    pub fn add_debug_language(&mut self, _id: &'static str, _language: &Lang<T>) {
        #[cfg(debug_assertions)]
        self.debug_language_map.insert(_id, _language.clone());
    }

    fn log_step(&self, _c: T, _language: &Lang<T>) {
        #[cfg(debug_assertions)]
        if let Some(label) = self.debugger.get() {
            if label.order() >= Log::Verbose(()).order() {
                println!("[{}; Step]: over {:?} -> {:?}", label, _c, _language);
            }
        }
    }

    fn log_matched(&self, _accepted: bool) {
        #[cfg(debug_assertions)]
        if let Some(label) = self.debugger.get() {
            if _accepted {
                if label.order() >= Log::Success(()).order() {
                    println!("[{}; Accepted]", label);
                }
            } else if label.order() >= Log::Result(()).order() {
                println!("[{}; Rejected]", label);
            }
        }
    }

    fn log_parsed(&self, _count: usize) {
        #[cfg(debug_assertions)]
        if let Some(label) = self.debugger.get() {
            if label.order() >= Log::Success(()).order() {
                println!("[{}; Parsed]: {} trees", label, _count);
            }
        }
    }
}

#[cfg(debug_assertions)]
impl<T: Terminal> Parser<T> {
    pub fn get_language(&self, id: &str) -> Option<&Lang<T>> {
        self.debug_language_map.get(id)
    }

    /// Run the matching loop against a registered sub-language, bypassing
    /// the root.
    pub fn debug_matches<I: IntoIterator<Item = T>>(
        &self,
        id: &str,
        input: I,
    ) -> Result<bool, GrammarError> {
        let language = match self.get_language(id) {
            Some(l) => l.clone(),
            None => {
                return Err(GrammarError::new(
                    "UnknownLanguage".into(),
                    format!("Language {} is not added for debugging.", id),
                ));
            }
        };
        let mut memo = Memo::new();
        let mut current = language;
        for c in input {
            let derived = memo.derivative(&current, c);
            current = memo.compact(&derived);
        }
        Ok(memo.nullable(&current))
    }
}
