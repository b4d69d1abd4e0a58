//! Deleg: a small concatenative evaluator
//!
//! Programs are sequences of [`Word`]s reduced left to right against an
//! immutable [`State`] (stack, dictionary, host slots). Each step produces a
//! new state; the input is never modified.
//!
//! ```rust
//! use deleg::{State, Value, Word, execute_quotation, show_stack};
//!
//! let program = vec![
//!     Word::lit(42),
//!     Word::lit(5),
//!     Word::lit(Value::sym("one-swap")),
//!     Word::lit(vec![Word::lit(1), Word::name("swap")]),
//!     Word::name("def"),
//!     Word::name("one-swap"),
//! ];
//! let state = execute_quotation(&State::with_prelude(), &program).unwrap();
//! assert_eq!(show_stack(&state), "<3> 42 1 5");
//! ```
//!
//! # Modules
//!
//! - `value`: Word, Value, Symbol, Quotation
//! - `dictionary`: name -> quotation or primitive, persistent updates
//! - `state`: the per-step snapshot
//! - `primitives`: `dup`, `swap`, `drop`, `def`
//! - `evaluator`: word dispatch and quotation reduction
//! - `recording`: macro capture and the host `Session`
//! - `diagnostics`: stack rendering
//! - `config`: evaluator limits
//! - `error`: typed evaluation failures

pub mod config;
pub mod diagnostics;
pub mod dictionary;
pub mod error;
pub mod evaluator;
pub mod primitives;
pub mod recording;
pub mod state;
pub mod value;

pub use config::EvalConfig;
pub use diagnostics::{show_stack, show_value};
pub use dictionary::{Definition, Dictionary, Primitive, PrimitiveFn};
pub use error::{EvalError, Result};
pub use evaluator::{Evaluator, execute_quotation, execute_word};
pub use recording::{Recorder, Session};
pub use state::State;
pub use value::{Quotation, Shape, Symbol, Value, Word};
