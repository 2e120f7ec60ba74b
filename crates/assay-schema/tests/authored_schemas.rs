//! Realistic, JSON-authored schemas for API parameters.

use assay_schema::{AssertOptions, ErrorKind, Schema, Violation, check};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

/// Create-or-edit user parameters: `id` present means edit.
fn user_schema() -> Schema {
    serde_json::from_value(json!({
        "id": "s:n,r",
        "info": {
            "name": "s",
            "phones": ["s,r"],
            "address": {
                "province": "s,r",
                "city": "s,r",
                "district": "s,r"
            }
        }
    }))
    .expect("user schema parses")
}

fn failure(value: &Value, schema: &Schema) -> Value {
    let error = check(value, schema, AssertOptions::default()).expect_err("should fail");
    serde_json::to_value(error.payload().expect("value failure")).unwrap()
}

#[test]
fn minimal_create_request_passes() {
    let request = json!({"info": {"name": "Ada"}});
    assert!(check(&request, &user_schema(), AssertOptions::default()).is_ok());
}

#[test]
fn full_edit_request_passes() {
    let request = json!({
        "id": 42,
        "info": {
            "name": "Ada",
            "phones": ["555-0100", "555-0101"],
            "address": {"province": "Z", "city": "Y"}
        }
    });
    assert!(check(&request, &user_schema(), AssertOptions::default()).is_ok());
}

#[test]
fn nested_failures_mirror_request_shape() {
    let request = json!({
        "id": true,
        "info": {
            "phones": ["555-0100", 7, null],
            "address": "somewhere",
            "nickname": "A"
        }
    });
    assert_eq!(
        failure(&request, &user_schema()),
        json!({
            "id": "wrongType",
            "info": {
                "name": "emptyValue",
                "phones": {"1": "wrongType", "2": "emptyElementValue"},
                "address": "wrongType",
                "nickname": "uselessProperty"
            }
        })
    );
}

#[test]
fn violations_flatten_with_paths() {
    let request = json!({"info": {"name": 1, "phones": [null]}});
    let error = check(&request, &user_schema(), AssertOptions::default()).unwrap_err();
    let violations = error.payload().unwrap().violations();
    assert_eq!(
        violations,
        vec![
            Violation {
                path: "info.name".into(),
                code: ErrorKind::WrongType,
                message: "type of value is wrong",
            },
            Violation {
                path: "info.phones[0]".into(),
                code: ErrorKind::EmptyElementValue,
                message: "value of element cannot be null or undefined",
            },
        ]
    );
}

#[test]
fn missing_info_reports_its_required_field() {
    assert_eq!(
        failure(&json!({}), &user_schema()),
        json!({"info": {"name": "emptyValue"}})
    );
}

// How each array schema treats an absent field and an empty array.
#[rstest]
#[case(json!(["n", "f"]), false, false)]
#[case(json!(["n", "F"]), false, true)]
#[case(json!(["n"]), false, false)]
#[case(json!(["n,r", "f"]), false, true)]
#[case(json!(["n,r"]), true, true)]
#[case(json!([{"id": "s", "name": "s,r"}]), false, false)]
#[case(json!([{"id": "s,r"}]), true, true)]
#[case(json!([["n"]]), false, false)]
fn array_schema_absence_and_emptiness(
    #[case] schema: Value,
    #[case] absent_ok: bool,
    #[case] empty_ok: bool,
) {
    let schema = Schema::from_json(&schema).unwrap();
    let field = Schema::object([("list", schema)]);

    assert_eq!(check(&json!({}), &field, AssertOptions::default()).is_ok(), absent_ok);
    assert_eq!(
        check(&json!({"list": []}), &field, AssertOptions::default()).is_ok(),
        empty_ok
    );
}

#[test]
fn nested_arrays_reject_empty_inner_arrays() {
    let schema = Schema::from_json(&json!([["n"]])).unwrap();
    assert_eq!(failure(&json!([[1], []]), &schema), json!({"1": "emptyArray"}));
}

#[test]
fn object_elements_are_checked_individually() {
    let schema = Schema::from_json(&json!([{"id": "s", "name": "s,r"}])).unwrap();
    assert_eq!(
        failure(&json!([{"id": "a"}, {"name": "b"}, {"id": "c", "x": 1}]), &schema),
        json!({"1": {"id": "emptyValue"}, "2": {"x": "uselessProperty"}})
    );
}
