// Copyright 2024 The DocAssert Authors
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs;

use json_exact::{
    assert_json_exact, assert_json_exact_with, compare_json_exact, AssertionError, Failure,
    JsonExact, NumericMode, Options, Recorder, Side, SoftAssertions,
};

fn load(file: &str) -> String {
    fs::read_to_string(format!("tests/data/{}", file)).expect("Unable to read file")
}

#[test]
fn test_identical_documents() {
    let json = r#"{"ID":"id","Name":"name"}"#;
    assert!(compare_json_exact(json, json, &[]).is_ok());

    let json = r#"{"ID":null,"Name":null}"#;
    assert!(compare_json_exact(json, json, &["ID"]).is_ok());
}

#[test]
fn test_round_trip_example() {
    let actual = r#"{"id":"1234","entity":{"created_at":"2023-05-04T15:13:15.123456Z","name":"dummy"}}"#;
    let expected = r#"{"id":"","entity":{"created_at":"","name":"dummy"}}"#;
    assert!(compare_json_exact(actual, expected, &["id", "*.created_at"]).is_ok());
}

#[test]
fn test_fixture_with_options_file() {
    let options = Options::from_json_str(&load("options.json")).unwrap();
    let exact = JsonExact::from_options(options);
    exact
        .compare(&load("actual.json"), &load("expected.json"))
        .unwrap();
}

#[test]
fn test_fixture_without_ignores_reports_every_path() {
    let err = compare_json_exact(&load("actual.json"), &load("raw_expected.json"), &[]).unwrap_err();
    let AssertionError::Mismatch(report) = err else {
        panic!("expected a mismatch, got {err:?}");
    };
    assert_eq!(report.differences.len(), 4);
    assert!(report.differences[0].starts_with("json atoms at path \".group.created_at\""));
    assert!(report.diff.contains("-    \"created_at\": \"2024-01-01T00:00:00Z\""));
    assert!(report.diff.contains("+    \"created_at\": \"2023-05-04T15:13:15.123456Z\""));
}

#[test]
fn test_fixture_ignoring_changed_fields() {
    assert!(compare_json_exact(
        &load("actual.json"),
        &load("raw_expected.json"),
        &["id", "group.created_at", "nest.members.created_at"],
    )
    .is_err());

    // expected side is never normalized
    let err = compare_json_exact(
        &load("actual.json"),
        &load("raw_expected.json"),
        &["entity.name"],
    )
    .unwrap_err();
    let AssertionError::Mismatch(report) = err else {
        panic!("expected a mismatch, got {err:?}");
    };
    assert_eq!(report.differences.len(), 5);
}

#[test]
fn test_extra_field_is_a_mismatch() {
    let err = compare_json_exact(r#"{"a":1,"b":2}"#, r#"{"a":1}"#, &[]).unwrap_err();
    let AssertionError::Mismatch(report) = err else {
        panic!("expected a mismatch, got {err:?}");
    };
    assert_eq!(
        report.differences,
        vec!["json atom at path \".b\" is missing from expected".to_string()]
    );
    assert!(report.to_string().starts_with("Compare value is mismatch (-expected +actual):\n"));
}

#[test]
fn test_missing_field_is_a_mismatch() {
    let err = compare_json_exact(r#"{"a":1}"#, r#"{"a":1,"b":2}"#, &[]).unwrap_err();
    assert!(!err.is_fatal());
}

#[test]
fn test_ignored_field_still_has_to_exist() {
    let err = compare_json_exact(r#"{"a":1}"#, r#"{"a":1,"id":""}"#, &["id"]).unwrap_err();
    assert!(matches!(err, AssertionError::Mismatch(_)));
}

#[test]
fn test_numeric_equivalence() {
    assert!(compare_json_exact(r#"{"n":3}"#, r#"{"n":3.0}"#, &[]).is_ok());
    assert!(compare_json_exact(r#"{"n":3.05}"#, r#"{"n":0.0}"#, &["n"]).is_ok());

    let strict = JsonExact::new().numeric_mode(NumericMode::Strict);
    assert!(strict.compare(r#"{"n":3}"#, r#"{"n":3.0}"#).is_err());
    assert!(strict.compare(r#"{"n":3}"#, r#"{"n":3}"#).is_ok());
}

#[test]
fn test_empty_keys_can_be_ignored() {
    assert!(compare_json_exact(r#"{"":{"x":1}}"#, r#"{"":{"x":0}}"#, &[".x"]).is_ok());
    assert!(compare_json_exact(r#"{"":"v"}"#, r#"{"":""}"#, &[""]).is_ok());
}

#[test]
fn test_strict_numbers_keep_float_zero() {
    let strict = JsonExact::new()
        .numeric_mode(NumericMode::Strict)
        .ignore_path("f")
        .ignore_path("i");
    assert!(strict
        .compare(r#"{"f":3.05,"i":7}"#, r#"{"f":0.0,"i":0}"#)
        .is_ok());
    assert!(strict
        .compare(r#"{"f":3.05,"i":7}"#, r#"{"f":0,"i":0}"#)
        .is_err());
}

#[test]
fn test_untargeted_nested_array_with_wildcard_is_fatal() {
    let err = compare_json_exact(r#"{"ts":"x","m":[[1]]}"#, r#"{"ts":"","m":[[1]]}"#, &["*.ts"])
        .unwrap_err();
    assert!(err.is_fatal());
    assert!(matches!(err, AssertionError::UnsupportedShape { ref path } if path == ".m[0]"));
}

#[test]
fn test_array_broadcast() {
    assert!(compare_json_exact(
        r#"{"data":[{"name":"taro","age":10},{"name":"jiro","age":6}]}"#,
        r#"{"data":[{"name":"","age":10},{"name":"","age":6}]}"#,
        &["data.name"],
    )
    .is_ok());
}

#[test]
fn test_wildcard_depth_independence() {
    assert!(compare_json_exact(
        r#"{"a":{"ts":"now"},"b":[{"ts":"later","v":1}]}"#,
        r#"{"a":{"ts":""},"b":[{"ts":"","v":1}]}"#,
        &["*.ts"],
    )
    .is_ok());
}

#[test]
fn test_decode_errors_name_the_side() {
    let err = compare_json_exact(r#"{"a":1"#, r#"{"a":1}"#, &[]).unwrap_err();
    assert!(matches!(err, AssertionError::Decode { side: Side::Actual, .. }));
    assert!(err.is_fatal());

    let err = compare_json_exact(r#"{"a":1}"#, "not json", &[]).unwrap_err();
    assert!(matches!(err, AssertionError::Decode { side: Side::Expected, .. }));
}

#[test]
fn test_non_object_roots_are_rejected() {
    let err = compare_json_exact("[1,2]", "[1,2]", &[]).unwrap_err();
    assert!(matches!(err, AssertionError::NotAnObject { side: Side::Expected }));

    let err = compare_json_exact("3", r#"{"a":1}"#, &[]).unwrap_err();
    assert!(matches!(err, AssertionError::NotAnObject { side: Side::Actual }));
}

#[test]
fn test_invalid_ignore_path_is_fatal() {
    let err = compare_json_exact(r#"{"a":1}"#, r#"{"a":1}"#, &["a.*.b"]).unwrap_err();
    assert!(matches!(err, AssertionError::InvalidIgnorePath { .. }));
    assert!(err.is_fatal());
}

#[test]
fn test_nested_arrays_under_reset_are_fatal() {
    let err = compare_json_exact(r#"{"m":[[1]]}"#, r#"{"m":[[0]]}"#, &["m"]).unwrap_err();
    assert!(matches!(err, AssertionError::UnsupportedShape { .. }));
}

#[test]
fn test_reporter_routing() {
    let mut recorder = Recorder::new();
    assert!(assert_json_exact_with(&mut recorder, r#"{"a":1}"#, r#"{"a":1}"#, &[]));
    assert!(!assert_json_exact_with(&mut recorder, r#"{"a":1}"#, r#"{"a":2}"#, &[]));
    assert!(!assert_json_exact_with(&mut recorder, "{", r#"{"a":2}"#, &[]));

    let failures = recorder.into_failures();
    assert_eq!(failures.len(), 2);
    assert!(matches!(failures[0], Failure::Mismatch(_)));
    assert!(matches!(failures[1], Failure::Fatal(AssertionError::Decode { .. })));
}

#[test]
#[should_panic(expected = "Compare value is mismatch")]
fn test_soft_assertions_keep_going() {
    let mut soft = SoftAssertions::new();
    let exact = JsonExact::new().ignore_path("id");
    exact.assert_with(&mut soft, r#"{"id":1,"a":1}"#, r#"{"id":0,"a":2}"#);
    exact.assert_with(&mut soft, r#"{"id":1,"a":1}"#, r#"{"id":0,"a":1}"#);
    assert_eq!(soft.mismatches().len(), 1);
}

#[test]
fn test_macro() {
    assert_json_exact!(r#"{"a":[1,2]}"#, r#"{"a":[1,2]}"#);
    assert_json_exact!(
        String::from(r#"{"a":{"b":"x"},"c":true}"#),
        r#"{"a":{"b":""},"c":true}"#,
        ignore = ["a"]
    );
}

#[test]
#[should_panic(expected = "-  \"b\": 1")]
fn test_macro_panics_with_diff() {
    assert_json_exact!(r#"{"a":1}"#, r#"{"b":1}"#);
}
