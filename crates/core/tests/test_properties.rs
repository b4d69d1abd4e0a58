//! Behavioural properties of the evaluator
//!
//! Exercised through the public API only, the way a host would drive it.

use deleg::{
    Dictionary, EvalError, Primitive, Quotation, Session, Shape, State, Value, Word,
    execute_quotation, execute_word, show_stack,
};

fn sample_states() -> Vec<State> {
    let base = State::with_prelude();
    vec![
        base.clone(),
        base.with_stack([Value::from(1)]),
        base.with_stack([Value::from(1), Value::from(2)]),
        base.with_stack([
            Value::sym("x"),
            Value::quotation(vec![Word::name("dup")]),
            Value::from(9),
        ]),
    ]
}

fn sample_words() -> Vec<Word> {
    vec![
        Word::lit(7),
        Word::name("dup"),
        Word::name("swap"),
        Word::name("drop"),
        Word::name("def"),
        Word::name("bogus"),
    ]
}

#[test]
fn test_execute_word_never_mutates_input() {
    for state in sample_states() {
        let snapshot = state.clone();
        for word in sample_words() {
            let _ = execute_word(&state, &word);
            assert_eq!(state, snapshot, "state changed after {}", word);
        }
    }
}

#[test]
fn test_dup_swap_drop_algebra() {
    let a = Value::from(1);
    let b = Value::sym("b");
    let rest = [Value::quotation(Vec::new()), Value::from(4)];
    let state = State::with_prelude().with_stack(
        [a.clone(), b.clone()]
            .into_iter()
            .chain(rest.iter().cloned()),
    );

    let dup = execute_word(&state, &Word::name("dup")).unwrap();
    let mut expected = vec![a.clone(), a.clone(), b.clone()];
    expected.extend(rest.iter().cloned());
    assert_eq!(dup.to_vec(), expected);

    let swap = execute_word(&state, &Word::name("swap")).unwrap();
    let mut expected = vec![b.clone(), a.clone()];
    expected.extend(rest.iter().cloned());
    assert_eq!(swap.to_vec(), expected);

    let drop = execute_word(&state, &Word::name("drop")).unwrap();
    let mut expected = vec![b.clone()];
    expected.extend(rest.iter().cloned());
    assert_eq!(drop.to_vec(), expected);
}

#[test]
fn test_definition_round_trip() {
    let program = vec![
        Word::lit(vec![Word::lit(1), Word::name("dup")]),
        Word::lit(Value::sym("double1")),
        Word::name("swap"),
        Word::name("def"),
        Word::name("double1"),
    ];
    let state = execute_quotation(&State::with_prelude(), &program).unwrap();
    assert_eq!(state.to_vec(), vec![Value::from(1), Value::from(1)]);
}

#[test]
fn test_shadowing_builtin() {
    let before = State::with_prelude().push(3.into());
    let plain = execute_word(&before, &Word::name("dup")).unwrap();
    assert_eq!(plain.to_vec(), vec![Value::from(3), Value::from(3)]);

    let program = vec![
        Word::lit(Value::sym("dup")),
        Word::lit(vec![Word::lit(100)]),
        Word::name("def"),
    ];
    let shadowed = execute_quotation(&before, &program).unwrap();
    let after = execute_word(&shadowed, &Word::name("dup")).unwrap();
    assert_eq!(after.to_vec(), vec![Value::from(100), Value::from(3)]);

    // the earlier result is unaffected
    assert_eq!(plain.to_vec(), vec![Value::from(3), Value::from(3)]);
}

#[test]
fn test_underflow_boundary() {
    let empty = State::with_prelude();
    let one = empty.push(1.into());

    for (state, name, required) in [
        (&empty, "dup", 1),
        (&empty, "drop", 1),
        (&empty, "swap", 2),
        (&one, "swap", 2),
    ] {
        assert_eq!(
            execute_word(state, &Word::name(name)).unwrap_err(),
            EvalError::StackUnderflow {
                operation: name.to_string(),
                required,
                actual: state.depth(),
            }
        );
    }
}

#[test]
fn test_unknown_word() {
    assert_eq!(
        execute_word(&State::with_prelude(), &Word::name("bogus")).unwrap_err(),
        EvalError::UnknownWord("bogus".to_string())
    );
}

#[test]
fn test_def_type_mismatch_names_operand() {
    let state = State::with_prelude().with_stack([Value::sym("body"), Value::sym("name")]);
    assert_eq!(
        execute_word(&state, &Word::name("def")).unwrap_err(),
        EvalError::TypeMismatch {
            operation: "def".to_string(),
            position: 0,
            expected: Shape::Quotation,
            actual: Value::sym("body"),
        }
    );
}

#[test]
fn test_recording_fidelity() {
    let start = State::with_prelude().push(8.into());

    let mut session = Session::new(start.clone());
    session.start_recording();
    session.execute_name("dup").unwrap();
    session.push_literal(5).unwrap();
    let body = session.stop_recording().unwrap().unwrap();

    let expected = vec![Word::name("dup"), Word::lit(5)];
    assert_eq!(body.body(), expected.as_slice());
    assert_eq!(
        session.state().peek(0),
        Some(&Value::quotation(expected.clone()))
    );

    // replaying the recording matches dispatching the words directly
    let direct = execute_quotation(&start, &expected).unwrap();
    let with_macro = start.define("macro", body);
    let replayed = execute_word(&with_macro, &Word::name("macro")).unwrap();
    assert_eq!(direct.to_vec(), replayed.to_vec());
}

#[test]
fn test_recording_keeps_names_not_expansions() {
    let start = State::with_prelude().define("macro", Quotation::from(vec![Word::lit(1)]));

    let mut session = Session::new(start);
    session.start_recording();
    session.dispatch(Word::name("macro")).unwrap();
    session
        .dispatch(Word::lit(vec![Word::name("dup")]))
        .unwrap();
    let body = session.stop_recording().unwrap().unwrap();

    assert_eq!(
        body.body(),
        &[
            Word::Name("macro".to_string()),
            Word::Literal(Value::quotation(vec![Word::name("dup")])),
        ]
    );
    // the live run still expanded the macro
    assert_eq!(session.state().peek(2), Some(&Value::from(1)));
}

#[test]
fn test_long_program_shares_structure() {
    let program: Vec<Word> = (0..20_000i32).map(Word::lit).collect();
    let result = execute_quotation(&State::with_prelude(), &program).unwrap();
    assert_eq!(result.depth(), 20_000);
    assert_eq!(result.peek(0), Some(&Value::from(19_999)));

    let defined = (0..2_000i32).fold(result, |state, i| {
        state.define(format!("w{}", i), Quotation::from(vec![Word::lit(i)]))
    });
    assert_eq!(defined.dictionary().len(), 2_004);
}

#[test]
fn test_idempotent_re_expansion() {
    let state = execute_quotation(
        &State::with_prelude().push(2.into()),
        &[
            Word::lit(Value::sym("twice")),
            Word::lit(vec![Word::name("dup"), Word::lit(1), Word::name("swap")]),
            Word::name("def"),
        ],
    )
    .unwrap();

    let first = execute_word(&state, &Word::name("twice")).unwrap();
    let second = execute_word(&state, &Word::name("twice")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_re_expansion_sees_redefinition() {
    let state = State::with_prelude().define("n", Quotation::from(vec![Word::lit(1)]));
    let program = vec![
        Word::name("n"),
        Word::lit(Value::sym("n")),
        Word::lit(vec![Word::lit(2)]),
        Word::name("def"),
        Word::name("n"),
    ];
    let result = execute_quotation(&state, &program).unwrap();
    assert_eq!(result.to_vec(), vec![Value::from(2), Value::from(1)]);
}

#[test]
fn test_host_primitive_extension() {
    let square = Primitive::new("square", |state: &State| {
        let (top, rest) = state.pop()?;
        match top.as_number() {
            Some(n) => Ok(rest.push(Value::number(n * n))),
            None => Err(EvalError::mismatch("square", 0, Shape::Number, &top)),
        }
    });
    let dict = Dictionary::prelude().merge(&Dictionary::new().with_primitive(square));
    let state = State::new(dict);

    let result = execute_quotation(&state, &[Word::lit(3), Word::name("square")]).unwrap();
    assert_eq!(show_stack(&result), "<1> 9");

    let err = execute_quotation(&state, &[Word::lit(Value::sym("x")), Word::name("square")])
        .unwrap_err();
    assert!(matches!(err, EvalError::TypeMismatch { position: 0, .. }));
}
