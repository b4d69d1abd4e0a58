//! Program files
//!
//! A program is a JSON array of steps. Each step is a word in the structured
//! interchange form (`42`, `{"sym": "x"}`, `[1, "swap"]`, `"dup"`) or one of
//! the host commands below, which drive the session instead of the language:
//!
//! - `"@record"` starts a recording
//! - `"@stop"` stops it, pushing the recorded quotation
//! - `{"bind": "F1"}` binds the quotation on top of the stack to `F1`

use deleg::{Session, State, Word};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub enum Step {
    Word(Word),
    Record,
    Stop,
    Bind(String),
}

impl TryFrom<serde_json::Value> for Step {
    type Error = String;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        match &value {
            serde_json::Value::String(s) if s == "@record" => return Ok(Step::Record),
            serde_json::Value::String(s) if s == "@stop" => return Ok(Step::Stop),
            serde_json::Value::Object(map) if map.contains_key("bind") => {
                return match map.get("bind") {
                    Some(serde_json::Value::String(name)) if map.len() == 1 => {
                        Ok(Step::Bind(name.clone()))
                    }
                    _ => Err(format!("Malformed bind step: {}", value)),
                };
            }
            _ => {}
        }
        serde_json::from_value::<Word>(value.clone())
            .map(Step::Word)
            .map_err(|_| format!("Not a word: {}", value))
    }
}

pub fn parse_program(source: &str) -> Result<Vec<Step>, String> {
    serde_json::from_str(source).map_err(|e| format!("Failed to parse program: {}", e))
}

pub fn load_program(path: &Path) -> Result<Vec<Step>, String> {
    let source = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    parse_program(&source)
}

/// Drive `session` through `steps`, stopping at the first failure.
///
/// `on_step` sees the state after each successful step.
pub fn run(
    session: &mut Session,
    steps: &[Step],
    mut on_step: impl FnMut(&State),
) -> Result<(), String> {
    for (index, step) in steps.iter().enumerate() {
        debug!(index, ?step, "step");
        let result = match step {
            Step::Word(word) => session.dispatch(word.clone()).map(|_| ()),
            Step::Record => {
                session.start_recording();
                Ok(())
            }
            Step::Stop => session.stop_recording().map(|body| {
                if body.is_none() {
                    warn!(index, "@stop without @record");
                }
            }),
            Step::Bind(name) => session.bind_top(name.clone()).map(|_| ()),
        };
        result.map_err(|e| format!("step {}: {}", index, e))?;
        on_step(session.state());
    }
    Ok(())
}

/// `42 5 \one-swap [1 swap] def one-swap`
pub fn demo_program() -> Vec<Step> {
    use deleg::Value;
    [
        Word::lit(42),
        Word::lit(5),
        Word::lit(Value::sym("one-swap")),
        Word::lit(vec![Word::lit(1), Word::name("swap")]),
        Word::name("def"),
        Word::name("one-swap"),
    ]
    .into_iter()
    .map(Step::Word)
    .collect()
}
