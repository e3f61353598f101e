use crate::GrammarError;
use std::fmt::{Display, Formatter};

impl GrammarError {
    pub fn new(what: String, message: String) -> Self {
        Self { message, what }
    }
}

impl Display for GrammarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "GrammarError: {}-{}", self.what, self.message)
    }
}
