//! Evaluation state
//!
//! A `State` is an immutable snapshot: stack, dictionary and host slots.
//! Every operation here takes `&self` and returns a successor, so any
//! snapshot a host retains stays valid (undo is just keeping an old one).
//!
//! The stack is addressed top-first: position 0 is the top of stack,
//! position 1 the element beneath it, and so on.

use crate::dictionary::{Definition, Dictionary};
use crate::error::{EvalError, Result};
use crate::value::Value;
use im::{OrdMap, Vector};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct State {
    /// Stored bottom-up so that push/pop work at the back of the vector
    stack: Vector<Value>,
    dictionary: Dictionary,
    /// Host extension fields (e.g. drawing registers)
    slots: OrdMap<String, Value>,
}

impl State {
    /// Empty stack over the given dictionary
    pub fn new(dictionary: Dictionary) -> Self {
        State {
            stack: Vector::new(),
            dictionary,
            slots: OrdMap::new(),
        }
    }

    /// Empty stack over the base primitive set
    pub fn with_prelude() -> Self {
        State::new(Dictionary::prelude())
    }

    /// Replace the stack; `values` are given top-first
    pub fn with_stack(&self, values: impl IntoIterator<Item = Value>) -> Self {
        let top_first: Vec<Value> = values.into_iter().collect();
        let stack: Vector<Value> = top_first.into_iter().rev().collect();
        State {
            stack,
            ..self.clone()
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Value at stack position `n` (0 = top)
    pub fn peek(&self, n: usize) -> Option<&Value> {
        let index = self.depth().checked_sub(n + 1)?;
        self.stack.get(index)
    }

    /// Iterate the stack from the top down
    pub fn stack(&self) -> impl DoubleEndedIterator<Item = &Value> + ExactSizeIterator {
        self.stack.iter().rev()
    }

    /// The stack as a top-first vector
    pub fn to_vec(&self) -> Vec<Value> {
        self.stack().cloned().collect()
    }

    /// Fail with `StackUnderflow` unless at least `required` values are present
    pub fn require(&self, operation: &str, required: usize) -> Result<()> {
        if self.depth() < required {
            return Err(EvalError::underflow(operation, required, self.depth()));
        }
        Ok(())
    }

    pub fn push(&self, value: Value) -> Self {
        let mut next = self.clone();
        next.stack.push_back(value);
        next
    }

    /// Split off the top value, returning it with the remaining state
    pub fn pop(&self) -> Result<(Value, State)> {
        let mut next = self.clone();
        match next.stack.pop_back() {
            Some(value) => Ok((value, next)),
            None => Err(EvalError::underflow("pop", 1, 0)),
        }
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn with_dictionary(&self, dictionary: Dictionary) -> Self {
        State {
            dictionary,
            ..self.clone()
        }
    }

    /// Successor with `name` bound in the dictionary
    pub fn define(&self, name: impl Into<String>, definition: impl Into<Definition>) -> Self {
        self.with_dictionary(self.dictionary.define(name, definition))
    }

    pub fn slot(&self, name: &str) -> Option<&Value> {
        self.slots.get(name)
    }

    pub fn with_slot(&self, name: impl Into<String>, value: Value) -> Self {
        let mut next = self.clone();
        next.slots.insert(name.into(), value);
        next
    }
}
