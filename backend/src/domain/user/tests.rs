//! Regression coverage for user primitives.

use super::*;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(0)]
#[case(-4)]
fn user_id_rejects_non_positive_values(#[case] raw: i32) {
    assert_eq!(UserId::new(raw), Err(UserValidationError::InvalidId));
}

#[rstest]
fn username_is_trimmed() {
    let username = Username::new("  teacher1 ").expect("valid username");
    assert_eq!(username.as_ref(), "teacher1");
}

#[rstest]
#[case("", UserValidationError::EmptyUsername)]
#[case("   ", UserValidationError::EmptyUsername)]
fn username_rejects_blank_values(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(Username::new(raw), Err(expected));
}

#[rstest]
fn username_rejects_overlong_values() {
    let raw = "u".repeat(USERNAME_MAX + 1);
    assert_eq!(
        Username::new(raw),
        Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX })
    );
}

#[rstest]
#[case("MATH")]
#[case("0701")]
#[case("bio-chem_2.1")]
fn subject_code_accepts_plain_codes(#[case] raw: &str) {
    assert_eq!(SubjectCode::new(raw).expect("valid code").as_ref(), raw);
}

#[rstest]
#[case("", UserValidationError::EmptySubjectCode)]
#[case("MA TH", UserValidationError::SubjectCodeInvalidCharacters)]
#[case("a/b", UserValidationError::SubjectCodeInvalidCharacters)]
#[case("x,y", UserValidationError::SubjectCodeInvalidCharacters)]
fn subject_code_rejects_unsafe_values(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(SubjectCode::new(raw), Err(expected));
}

#[rstest]
fn user_serialises_without_credentials() {
    let user = User::try_from_parts(7, "teacher1", Some("MATH")).expect("valid user");
    let value = serde_json::to_value(&user).expect("serialise user");
    assert_eq!(
        value,
        json!({ "id": 7, "username": "teacher1", "subjectCode": "MATH" })
    );
}

#[rstest]
fn user_without_subject_serialises_null() {
    let user = User::try_from_parts(3, "unassigned", None).expect("valid user");
    let value = serde_json::to_value(&user).expect("serialise user");
    assert_eq!(value.get("subjectCode"), Some(&serde_json::Value::Null));
}

#[rstest]
fn user_round_trips_through_json() {
    let user = User::try_from_parts(9, "teacher2", Some("PHYSICS")).expect("valid user");
    let text = serde_json::to_string(&user).expect("serialise user");
    let decoded: User = serde_json::from_str(&text).expect("deserialise user");
    assert_eq!(decoded, user);
}
