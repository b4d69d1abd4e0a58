//! Macro recording and the host session
//!
//! A `Recorder` captures dispatched words verbatim while it is open. It lives
//! outside `State`, so the language itself cannot see or alter it.
//!
//! Lifecycle: `Idle -> Recording -> Idle`. Starting while already recording
//! discards the buffer and starts over; sessions never nest.
//!
//! `Session` is what a host drives: it owns the current state, an evaluator
//! and a recorder, and applies one word at a time.

use crate::config::EvalConfig;
use crate::error::Result;
use crate::evaluator::Evaluator;
use crate::state::State;
use crate::value::{Quotation, Symbol, Value, Word};
use tracing::{debug, info};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Recorder {
    #[default]
    Idle,
    Recording(Vec<Word>),
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a fresh capture, discarding anything already buffered
    pub fn start(&mut self) {
        if self.is_recording() {
            debug!("restarting recording");
        }
        *self = Recorder::Recording(Vec::new());
    }

    /// Append `word` if a capture is open
    pub fn record(&mut self, word: &Word) {
        if let Recorder::Recording(buffer) = self {
            buffer.push(word.clone());
        }
    }

    /// Close the capture, returning the words in dispatch order.
    /// `None` if nothing was being recorded.
    pub fn stop(&mut self) -> Option<Quotation> {
        match std::mem::take(self) {
            Recorder::Recording(buffer) => Some(Quotation::from(buffer)),
            Recorder::Idle => None,
        }
    }

    pub fn is_recording(&self) -> bool {
        matches!(self, Recorder::Recording(_))
    }

    /// Words captured so far (empty when idle)
    pub fn buffer(&self) -> &[Word] {
        match self {
            Recorder::Recording(buffer) => buffer,
            Recorder::Idle => &[],
        }
    }
}

/// A host's handle on a running evaluator
///
/// A dispatch that fails leaves the session at its last good state and is not
/// captured by an open recording.
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: State,
    evaluator: Evaluator,
    recorder: Recorder,
}

impl Session {
    pub fn new(state: State) -> Self {
        Self::with_config(state, EvalConfig::default())
    }

    pub fn with_config(state: State, config: EvalConfig) -> Self {
        Session {
            state,
            evaluator: Evaluator::new(config),
            recorder: Recorder::new(),
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn into_state(self) -> State {
        self.state
    }

    /// Apply `word` to the current state
    pub fn dispatch(&mut self, word: Word) -> Result<&State> {
        self.state = self.evaluator.execute_word(&self.state, &word)?;
        self.recorder.record(&word);
        Ok(&self.state)
    }

    pub fn execute_name(&mut self, name: impl Into<String>) -> Result<&State> {
        self.dispatch(Word::Name(name.into()))
    }

    pub fn push_literal(&mut self, value: impl Into<Value>) -> Result<&State> {
        self.dispatch(Word::Literal(value.into()))
    }

    pub fn start_recording(&mut self) {
        info!("recording started");
        self.recorder.start();
    }

    /// Stop recording and push the captured program onto the stack as a
    /// quotation. Returns the quotation, or `None` if no recording was open.
    pub fn stop_recording(&mut self) -> Result<Option<Quotation>> {
        let Some(body) = self.recorder.stop() else {
            return Ok(None);
        };
        info!(words = body.len(), "recording stopped");
        self.state = self
            .evaluator
            .execute_word(&self.state, &Word::lit(body.clone()))?;
        Ok(Some(body))
    }

    pub fn is_recording(&self) -> bool {
        self.recorder.is_recording()
    }

    pub fn recorder(&self) -> &Recorder {
        &self.recorder
    }

    /// Bind the quotation on top of the stack to `name`, the same way a
    /// program would: push `\name`, `swap`, `def`.
    pub fn bind_top(&mut self, name: impl Into<String>) -> Result<&State> {
        let program = [
            Word::lit(Symbol::new(name)),
            Word::name("swap"),
            Word::name("def"),
        ];
        let next = self.evaluator.execute_quotation(&self.state, &program)?;
        for word in &program {
            self.recorder.record(word);
        }
        self.state = next;
        Ok(&self.state)
    }
}
