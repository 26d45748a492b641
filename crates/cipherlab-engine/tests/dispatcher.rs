//! Dispatcher contract tests.
//!
//! These run every algorithm through the public entry point with the default
//! form values and check the `{output, steps}` / `{error}` shapes consumers
//! rely on.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use cipherlab_engine::params::FieldDefault;
use cipherlab_engine::{
    AlgorithmId, Dispatcher, EngineLimits, NoopRecorder, ParamValue, ParameterMap, RunResult, StepTrace,
    params,
};
use pretty_assertions::assert_eq;

/// Parameter map filled from the schema defaults
fn defaults(id: AlgorithmId) -> ParameterMap {
    id.fields()
        .iter()
        .map(|field| {
            let value = match field.default {
                FieldDefault::Text(s) => ParamValue::from(s),
                FieldDefault::Number(n) => ParamValue::from(n),
            };
            (field.name.to_string(), value)
        })
        .collect()
}

fn steps(result: &RunResult) -> Vec<String> {
    result
        .steps()
        .expect("run should succeed")
        .steps()
        .to_vec()
}

#[test]
fn every_algorithm_runs_with_its_defaults() {
    let dispatcher = Dispatcher::default();
    for id in AlgorithmId::ALL {
        let result = dispatcher.run(id.as_str(), &defaults(id));
        assert!(result.is_success(), "{id} failed: {:?}", result.error());
        assert!(!steps(&result).is_empty(), "{id} recorded no steps");
    }
}

#[test]
fn default_outputs() {
    let dispatcher = Dispatcher::default();
    let output = |id: AlgorithmId| {
        dispatcher
            .run_id(id, &defaults(id))
            .output()
            .map(str::to_string)
            .expect("run should succeed")
    };

    assert_eq!(output(AlgorithmId::Caesar), "KHOORZRUOG");
    assert_eq!(output(AlgorithmId::Playfair), "BFCKPDFIMPBZ");
    assert_eq!(output(AlgorithmId::Hill), "FRFMKC");
    assert_eq!(output(AlgorithmId::Vigenere), "OIRSAOXTSRLWF");
    assert_eq!(output(AlgorithmId::Rail), "WECRERDSOEEAIVD");
    assert_eq!(output(AlgorithmId::Des), "228");
    assert_eq!(output(AlgorithmId::Rsa), "Cipher: 2790 | Decrypted: 65");
    assert_eq!(output(AlgorithmId::Dh), "Shared key: 2");
    assert_eq!(output(AlgorithmId::Md5), "6bef93248f48a3f57d5608a43b3292ca");
    assert_eq!(
        output(AlgorithmId::Sha1),
        "ce2421de777acfc540a6e7cb4bb45e697979e11a"
    );
    assert_eq!(
        output(AlgorithmId::Dss),
        "Signature (r, s): (7, 20) | Verify: valid"
    );
}

#[test]
fn feistel_round_lines_follow_the_grammar() {
    let result = Dispatcher::default().run("des", &defaults(AlgorithmId::Des));
    let rounds: Vec<String> = steps(&result)
        .into_iter()
        .filter(|s| s.starts_with("Round ") && !s.starts_with("Round keys"))
        .collect();
    assert_eq!(rounds.len(), 3);
    for (i, line) in rounds.iter().enumerate() {
        let (label, rest) = line.split_once(": ").unwrap();
        assert_eq!(label, format!("Round {}", i + 1));
        let fields: Vec<&str> = rest.split(' ').collect();
        assert_eq!(fields.len(), 5);
        assert!(fields[0].starts_with("k=") && fields[0].len() == 6);
        assert!(fields[1].starts_with("f="));
        assert_eq!(fields[2], "->");
        assert!(fields[3].starts_with("L=") && fields[4].starts_with("R="));
    }
}

#[test]
fn number_theory_steps_end_in_a_value() {
    let dispatcher = Dispatcher::default();
    for id in [AlgorithmId::Rsa, AlgorithmId::Dh, AlgorithmId::Dss] {
        for line in steps(&dispatcher.run_id(id, &defaults(id))) {
            let (_, value) = line.rsplit_once(" = ").unwrap();
            assert!(value.parse::<u64>().is_ok(), "{id}: {line}");
        }
    }
}

#[test]
fn decryption_round_trips_through_dispatch() {
    let dispatcher = Dispatcher::default();
    let cases = [
        ("caesar", params! { "text" => "KHOORZRUOG", "shift" => 3_i64, "mode" => "decrypt" }, "HELLOWORLD"),
        ("vigenere", params! { "text" => "OIRSAOXTSRLWF", "key" => "LEMON", "mode" => "decrypt" }, "DEFENDTHEEAST"),
        ("hill", params! { "text" => "FRFMKC", "matrix" => "3 3 2 5", "mode" => "decrypt" }, "ATTACK"),
        ("playfair", params! { "text" => "BFCKPDFIMPBZ", "key" => "MONARCHY", "mode" => "decrypt" }, "HIDETHEGOLDX"),
        ("rail", params! { "text" => "WECRERDSOEEAIVD", "rails" => "3", "mode" => "decrypt" }, "WEAREDISCOVERED"),
        (
            "rail",
            params! { "text" => "EODASREIERCEWDV", "variant" => "columnar", "key" => "ZEBRA", "mode" => "decrypt" },
            "WEAREDISCOVERED",
        ),
        ("des", params! { "plaintext" => 228_i64, "key" => 43_i64, "rounds" => 3_i64, "mode" => "decrypt" }, "201"),
    ];

    for (id, map, expected) in cases {
        let result = dispatcher.run(id, &map);
        assert_eq!(result.output(), Some(expected), "{id}: {:?}", result.error());
    }
}

#[test]
fn errors_carry_no_output() {
    let dispatcher = Dispatcher::default();
    let cases = [
        ("caesar", params! { "text" => "HI", "shift" => 26_i64 }, "Invalid shift: must be between 0 and 25, got 26"),
        ("des", params! { "plaintext" => 1_i64, "key" => 1_i64, "rounds" => 7_i64 }, "Invalid rounds: must be between 1 and 6, got 7"),
        ("hill", params! { "text" => "HELLO", "matrix" => "2,4,1,2" }, "Key matrix is not invertible mod 26 (determinant 0)"),
        ("rsa", params! { "p" => 61_i64, "q" => 53_i64, "e" => 15_i64, "message" => 65_i64 }, "Invalid key: e = 15 is not coprime to phi = 3120"),
        ("rail", params! { "text" => "HELLO", "rails" => 1_i64 }, "Invalid rails: must be between 2 and 64, got 1"),
        ("nope", ParameterMap::new(), "Unknown algorithm: nope"),
    ];

    for (id, map, message) in cases {
        let result = dispatcher.run(id, &map);
        assert_eq!(result, RunResult::Failure { error: message.to_string() });
        assert_eq!(result.output(), None);
        assert_eq!(result.steps(), None);
    }
}

#[test]
fn a_failed_run_does_not_affect_the_next() {
    let dispatcher = Dispatcher::default();
    let bad = dispatcher.run("dh", &params! { "p" => 21_i64, "g" => 5_i64, "a" => 6_i64, "b" => 15_i64 });
    assert!(!bad.is_success());
    let good = dispatcher.run_id(AlgorithmId::Dh, &defaults(AlgorithmId::Dh));
    assert_eq!(good.output(), Some("Shared key: 2"));
}

#[test]
fn failed_runs_leave_the_recorder_empty() {
    let dispatcher = Dispatcher::default();
    let cases = [
        (
            AlgorithmId::Rsa,
            params! { "p" => 61_i64, "q" => 53_i64, "e" => 17_i64, "message" => 5000_i64 },
            "Invalid message: must be less than n = 3233, got 5000",
        ),
        (
            AlgorithmId::Dss,
            params! {
                "p" => 59_i64, "q" => 29_i64, "g" => 4_i64,
                "x" => 7_i64, "k" => 14_i64, "message" => "verify me",
            },
            "Invalid key: r became 0, choose a different k",
        ),
    ];

    for (id, map, message) in cases {
        let mut trace = StepTrace::new();
        let err = dispatcher.run_with(id, &map, &mut trace).unwrap_err();
        assert_eq!(err.to_string(), message);
        assert!(trace.is_empty(), "{id} leaked {:?}", trace.steps());
    }
}

#[test]
fn run_with_matches_run_id() {
    let dispatcher = Dispatcher::default();
    for id in AlgorithmId::ALL {
        let mut trace = StepTrace::new();
        let output = dispatcher.run_with(id, &defaults(id), &mut trace).unwrap();
        let result = dispatcher.run_id(id, &defaults(id));
        assert_eq!(result.output(), Some(output.as_str()));
        assert_eq!(result.steps(), Some(&trace));

        let quiet = dispatcher.run_with(id, &defaults(id), &mut NoopRecorder).unwrap();
        assert_eq!(quiet, output);
    }
}

#[test]
fn text_limit_is_enforced() {
    let dispatcher = Dispatcher::new(EngineLimits { max_text_chars: 8 });
    let result = dispatcher.run("md5", &params! { "text" => "123456789" });
    assert_eq!(result.error(), Some("Invalid text: longer than 8 characters"));
}

#[test]
fn result_serializes_to_the_wire_shape() {
    let result = Dispatcher::default().run("sha1", &ParameterMap::new());
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["output"], "da39a3ee5e6b4b0d3255bfef95601890afd80709");
    assert_eq!(json["steps"][0], "Message length: 0 chars (0 bytes)");
    assert!(json.get("error").is_none());
}
