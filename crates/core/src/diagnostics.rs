//! Human-readable stack rendering for debugging and tests
//!
//! `<N> v1 v2 ... vN`, where N is the depth and values run bottom to top.

use crate::state::State;
use crate::value::Value;

pub fn show_value(value: &Value) -> String {
    value.to_string()
}

pub fn show_stack(state: &State) -> String {
    let values: Vec<String> = state.stack().rev().map(show_value).collect();
    format!("<{}> {}", state.depth(), values.join(" "))
}
