//! Built-in primitives
//!
//! Each primitive checks the stack shape it needs before touching anything,
//! so a failure never produces a partial successor.
//!
//! Stack effects (top of stack on the right):
//! - `dup`  ( a -- a a )
//! - `swap` ( a b -- b a )
//! - `drop` ( a -- )
//! - `def`  ( \name [body] -- )

use crate::dictionary::{Dictionary, Primitive};
use crate::error::{EvalError, Result};
use crate::state::State;
use crate::value::{Shape, Value};
use std::sync::LazyLock;
use tracing::debug;

pub fn dup(state: &State) -> Result<State> {
    state.require("dup", 1)?;
    let (top, _) = state.pop()?;
    Ok(state.push(top))
}

pub fn swap(state: &State) -> Result<State> {
    state.require("swap", 2)?;
    let (a, rest) = state.pop()?;
    let (b, rest) = rest.pop()?;
    Ok(rest.push(a).push(b))
}

pub fn drop(state: &State) -> Result<State> {
    state.require("drop", 1)?;
    let (_, rest) = state.pop()?;
    Ok(rest)
}

/// Bind the symbol at position 1 to the quotation at position 0
pub fn def(state: &State) -> Result<State> {
    state.require("def", 2)?;
    let (body, rest) = state.pop()?;
    let (name, rest) = rest.pop()?;

    let Value::Quotation(body) = body else {
        return Err(EvalError::mismatch("def", 0, Shape::Quotation, &body));
    };
    let Value::Symbol(name) = name else {
        return Err(EvalError::mismatch("def", 1, Shape::Symbol, &name));
    };

    debug!(name = name.name(), words = body.len(), "def");
    Ok(rest.define(name.name(), body))
}

// Built once so every prelude shares the same primitive objects and
// independently constructed states compare equal.
static PRELUDE: LazyLock<Dictionary> = LazyLock::new(|| {
    [
        Primitive::new("dup", dup),
        Primitive::new("swap", swap),
        Primitive::new("drop", drop),
        Primitive::new("def", def),
    ]
    .into_iter()
    .fold(Dictionary::new(), |dict, p| dict.with_primitive(p))
});

/// The base dictionary
pub fn prelude() -> Dictionary {
    PRELUDE.clone()
}
