//! Host extension primitives
//!
//! The drawing host keeps a fill and a stroke colour alongside the stack.
//! Colours are plain numbers (`0xRRGGBB`) held in state slots. Shape
//! rendering itself is left to whatever front end displays the stack.

use deleg::{Dictionary, EvalError, Primitive, Quotation, Result, Shape, State, Value};
use rand::Rng;

pub const FILL: &str = "fill";
pub const STROKE: &str = "stroke";

/// Keys that a front end binds recorded macros to
pub const FUNCTION_KEYS: [&str; 3] = ["F1", "F2", "F3"];

fn push_color(name: &'static str, color: u32) -> Primitive {
    Primitive::new(name, move |state: &State| {
        Ok(state.push(Value::number(f64::from(color))))
    })
}

fn pop_number(state: &State, operation: &str) -> Result<(f64, State)> {
    state.require(operation, 1)?;
    let (value, rest) = state.pop()?;
    match value.as_number() {
        Some(n) => Ok((n, rest)),
        None => Err(EvalError::mismatch(operation, 0, Shape::Number, &value)),
    }
}

fn set_register(name: &'static str, slot: &'static str) -> Primitive {
    Primitive::new(name, move |state: &State| {
        let (color, rest) = pop_number(state, name)?;
        Ok(rest.with_slot(slot, Value::number(color)))
    })
}

/// ( n -- r ) with r uniform in [0, n)
fn rnd(state: &State) -> Result<State> {
    let (range, rest) = pop_number(state, "rnd")?;
    let r: f64 = rand::thread_rng().r#gen();
    Ok(rest.push(Value::number(r * range)))
}

/// Host bindings layered over the prelude
pub fn host_dictionary() -> Dictionary {
    let dict = [
        push_color("red", 0xff0000),
        push_color("green", 0x00ff00),
        push_color("blue", 0x0000ff),
        set_register("set-fill", FILL),
        set_register("set-stroke", STROKE),
        Primitive::new("rnd", rnd),
    ]
    .into_iter()
    .fold(Dictionary::new(), |dict, p| dict.with_primitive(p));

    FUNCTION_KEYS
        .iter()
        .fold(dict, |dict, key| dict.define(*key, Quotation::default()))
}

/// Initial state for the drawing host: prelude + host bindings, red fill,
/// black stroke
pub fn initial_state() -> State {
    State::new(Dictionary::prelude().merge(&host_dictionary()))
        .with_slot(FILL, Value::number(f64::from(0xff0000u32)))
        .with_slot(STROKE, Value::number(0.0))
}
