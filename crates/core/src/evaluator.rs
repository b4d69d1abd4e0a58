//! Evaluator: left-to-right reduction of words against a state
//!
//! `execute_word` is a pure transition `(State, Word) -> Result<State>`.
//! Literals push; names resolve through the dictionary of the state they are
//! applied to, so a definition made earlier in the same reduction is visible
//! to the words after it. Named quotations are re-expanded on every call.
//!
//! Each named-quotation expansion counts one level of depth. Past
//! `EvalConfig::max_depth` the reduction fails with
//! `EvaluationDepthExceeded` instead of overflowing the native stack.

use crate::config::EvalConfig;
use crate::dictionary::Definition;
use crate::error::{EvalError, Result};
use crate::state::State;
use crate::value::Word;
use tracing::trace;

/// If less native stack than this remains, grow before recursing
const RED_ZONE: usize = 100 * 1024;

/// Native stack to allocate per growth
const STACK_PER_RECURSION: usize = 1024 * 1024;

#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    config: EvalConfig,
}

impl Evaluator {
    pub fn new(config: EvalConfig) -> Self {
        Evaluator { config }
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Apply one word to `state`, returning the successor
    pub fn execute_word(&self, state: &State, word: &Word) -> Result<State> {
        self.step(state, word, 0)
    }

    /// Fold `execute_word` over `words`, threading the state through in order
    pub fn execute_quotation(&self, state: &State, words: &[Word]) -> Result<State> {
        self.reduce(state, words, 0)
    }

    fn reduce(&self, state: &State, words: &[Word], depth: usize) -> Result<State> {
        words
            .iter()
            .try_fold(state.clone(), |current, word| self.step(&current, word, depth))
    }

    fn step(&self, state: &State, word: &Word, depth: usize) -> Result<State> {
        trace!(%word, depth, "execute");
        match word {
            Word::Literal(value) => Ok(state.push(value.clone())),
            Word::Name(name) => match state.dictionary().lookup(name) {
                Some(Definition::Primitive(primitive)) => primitive.apply(state),
                Some(Definition::Quotation(body)) => {
                    if depth >= self.config.max_depth {
                        return Err(EvalError::EvaluationDepthExceeded {
                            word: name.clone(),
                            limit: self.config.max_depth,
                        });
                    }
                    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, || {
                        self.reduce(state, body, depth + 1)
                    })
                }
                None => Err(EvalError::UnknownWord(name.clone())),
            },
        }
    }
}

/// `Evaluator::execute_word` with the default configuration
pub fn execute_word(state: &State, word: &Word) -> Result<State> {
    Evaluator::default().execute_word(state, word)
}

/// `Evaluator::execute_quotation` with the default configuration
pub fn execute_quotation(state: &State, words: &[Word]) -> Result<State> {
    Evaluator::default().execute_quotation(state, words)
}
