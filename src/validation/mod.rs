//! Local form checks run before any request goes out.
//!
//! Each validator walks an ordered list of checks and reports the first one
//! that fails. Records are plain JSON objects so loosely-typed form input
//! (missing keys, text where a number is expected) is judged the same way
//! whether it came from a typed draft or from a file.

mod error;
pub mod patterns;

pub use error::{ValidationError, GENERAL_ERROR_MESSAGE, NO_COURSES_ERROR, SIGN_UP_ERROR_MESSAGE};

use serde_json::Value;

use patterns::{
    is_present, is_valid_course_code, is_valid_email, is_valid_name, is_valid_password,
    is_valid_year, is_valid_zid,
};

pub type ValidationResult = Result<(), ValidationError>;

/// True when any top-level value is the empty string. Zero, `false` and empty
/// arrays are not empty here.
pub fn has_empty_value(record: &Value) -> bool {
    match record {
        Value::Object(map) => map.values().any(|v| matches!(v, Value::String(s) if s.is_empty())),
        _ => false,
    }
}

fn text<'a>(record: &'a Value, key: &str) -> &'a str {
    record.get(key).and_then(Value::as_str).unwrap_or("")
}

/// zID, first name, last name, email, password length, confirmation, then empty fields
pub fn validate_sign_up(record: &Value) -> ValidationResult {
    if !is_valid_zid(text(record, "zId")) {
        return Err(ValidationError::InvalidZid);
    }
    if !is_valid_name(text(record, "firstName")) {
        return Err(ValidationError::InvalidFirstName);
    }
    if !is_valid_name(text(record, "lastName")) {
        return Err(ValidationError::InvalidLastName);
    }
    if !is_valid_email(text(record, "email")) {
        return Err(ValidationError::InvalidEmail);
    }
    if !is_valid_password(text(record, "password")) {
        return Err(ValidationError::InvalidPassword);
    }
    if record.get("password") != record.get("confirmedPassword") {
        return Err(ValidationError::NonMatchingPassword);
    }
    if has_empty_value(record) {
        return Err(ValidationError::MissingFields);
    }
    Ok(())
}

pub fn validate_login(record: &Value) -> ValidationResult {
    if !is_valid_email(text(record, "email")) {
        return Err(ValidationError::InvalidEmail);
    }
    if has_empty_value(record) {
        return Err(ValidationError::MissingFields);
    }
    Ok(())
}

fn entries_complete(list: &Value) -> bool {
    list.as_array().map_or(true, |items| {
        items
            .iter()
            .all(|item| is_present(item.get("name")) && is_present(item.get("weight")))
    })
}

pub fn validate_course_data(
    course: &Value,
    skills: &Value,
    knowledge: &Value,
    topics: &Value,
) -> ValidationResult {
    if has_empty_value(course) {
        return Err(ValidationError::RequiredFields);
    }
    if !is_valid_course_code(text(course, "code")) {
        return Err(ValidationError::InvalidCourseCode);
    }
    if !course.get("year").map_or(false, is_valid_year) {
        return Err(ValidationError::InvalidYear);
    }
    if !skills.is_array() || !knowledge.is_array() || !topics.is_array() {
        return Err(ValidationError::InvalidCollections);
    }
    if !entries_complete(skills) || !entries_complete(knowledge) {
        return Err(ValidationError::IncompleteCourseEntry);
    }
    Ok(())
}

pub fn validate_project_data(
    project: &Value,
    skills: &Value,
    knowledge: &Value,
    topics: &Value,
) -> ValidationResult {
    if has_empty_value(project) {
        return Err(ValidationError::RequiredFields);
    }
    if !skills.is_array() || !topics.is_array() || !knowledge.is_array() {
        return Err(ValidationError::InvalidCollections);
    }
    if !entries_complete(skills) {
        return Err(ValidationError::IncompleteSkill);
    }
    if !entries_complete(knowledge) {
        return Err(ValidationError::IncompleteKnowledge);
    }
    Ok(())
}

/// Names on the profile intro and account preference forms
pub fn validate_profile_names(first_name: &str, last_name: &str) -> ValidationResult {
    if !is_valid_name(first_name) {
        return Err(ValidationError::InvalidFirstName);
    }
    if !is_valid_name(last_name) {
        return Err(ValidationError::InvalidLastName);
    }
    Ok(())
}

pub fn validate_email(email: &str) -> ValidationResult {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

pub fn validate_new_password(password: &str) -> ValidationResult {
    if is_valid_password(password) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPassword)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sign_up() -> Value {
        json!({
            "zId": "z1234567",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@unsw.edu.au",
            "password": "password123",
            "confirmedPassword": "password123",
        })
    }

    fn course() -> Value {
        json!({
            "name": "Programming Fundamentals",
            "code": "COMP1511",
            "year": "2023",
            "term": "T3",
            "school": "School of Computer Science and Engineering",
            "thumbnail": "https://example.com/t.png",
            "description": "Intro course",
            "topics": [],
            "skills": [],
            "knowledge": [],
        })
    }

    #[test]
    fn empty_value_check_is_loose() {
        assert!(!has_empty_value(&json!({"a": 0, "b": []})));
        assert!(!has_empty_value(&json!({"a": false, "b": null})));
        assert!(has_empty_value(&json!({"a": ""})));
        assert!(!has_empty_value(&json!({})));
    }

    #[test]
    fn valid_sign_up_passes() {
        assert_eq!(validate_sign_up(&sign_up()), Ok(()));
    }

    #[test]
    fn sign_up_reports_first_failing_check() {
        let mut record = sign_up();
        record["zId"] = json!("5555");
        record["firstName"] = json!("");
        assert_eq!(validate_sign_up(&record), Err(ValidationError::InvalidZid));
        assert_eq!(
            validate_sign_up(&record).unwrap_err().to_string(),
            "Please enter a valid zID"
        );
    }

    #[test]
    fn sign_up_check_order() {
        let mut record = sign_up();
        record["lastName"] = json!("L0velace");
        record["email"] = json!("bad");
        assert_eq!(validate_sign_up(&record), Err(ValidationError::InvalidLastName));

        let mut record = sign_up();
        record["password"] = json!("short");
        record["confirmedPassword"] = json!("different");
        assert_eq!(validate_sign_up(&record), Err(ValidationError::InvalidPassword));

        let mut record = sign_up();
        record["confirmedPassword"] = json!("password124");
        assert_eq!(validate_sign_up(&record), Err(ValidationError::NonMatchingPassword));

        let mut record = sign_up();
        record["extra"] = json!("");
        assert_eq!(validate_sign_up(&record), Err(ValidationError::MissingFields));
    }

    #[test]
    fn login_checks_email_then_fields() {
        assert_eq!(
            validate_login(&json!({"email": "nope", "password": ""})),
            Err(ValidationError::InvalidEmail)
        );
        assert_eq!(
            validate_login(&json!({"email": "a@b.co", "password": ""})),
            Err(ValidationError::MissingFields)
        );
        assert_eq!(validate_login(&json!({"email": "a@b.co", "password": "pw"})), Ok(()));
    }

    #[test]
    fn course_code_must_be_four_upper_letters_and_four_digits() {
        let none = json!([]);
        let mut record = course();
        assert_eq!(validate_course_data(&record, &none, &none, &none), Ok(()));

        record["code"] = json!("comp1511");
        assert_eq!(
            validate_course_data(&record, &none, &none, &none),
            Err(ValidationError::InvalidCourseCode)
        );

        record["code"] = json!("COMP151");
        assert_eq!(
            validate_course_data(&record, &none, &none, &none),
            Err(ValidationError::InvalidCourseCode)
        );
    }

    #[test]
    fn course_empty_field_wins_over_bad_code() {
        let none = json!([]);
        let mut record = course();
        record["code"] = json!("bad");
        record["term"] = json!("");
        assert_eq!(
            validate_course_data(&record, &none, &none, &none),
            Err(ValidationError::RequiredFields)
        );
    }

    #[test]
    fn course_year_and_collections() {
        let none = json!([]);
        let mut record = course();
        record["year"] = json!("12345");
        assert_eq!(
            validate_course_data(&record, &none, &none, &none),
            Err(ValidationError::InvalidYear)
        );

        let record = course();
        assert_eq!(
            validate_course_data(&record, &json!({"Python": 5}), &none, &none),
            Err(ValidationError::InvalidCollections)
        );
    }

    #[test]
    fn course_entries_need_name_and_weight() {
        let none = json!([]);
        let record = course();
        let skills = json!([{"name": "Python", "weight": 50}]);
        let knowledge = json!([{"name": "C", "weight": ""}]);
        assert_eq!(
            validate_course_data(&record, &skills, &knowledge, &none),
            Err(ValidationError::IncompleteCourseEntry)
        );
        let knowledge = json!([{"name": "C", "weight": "20"}]);
        assert_eq!(validate_course_data(&record, &skills, &knowledge, &none), Ok(()));
    }

    #[test]
    fn project_entries_checked_skills_first() {
        let project = json!({"name": "Tracker", "client": "Jane", "topics": []});
        let topics = json!(["fitness"]);
        let skills = json!([{"name": "", "weight": 10}]);
        let knowledge = json!([{"name": "React"}]);
        assert_eq!(
            validate_project_data(&project, &skills, &knowledge, &topics),
            Err(ValidationError::IncompleteSkill)
        );
        let skills = json!([{"name": "writing", "weight": 10}]);
        assert_eq!(
            validate_project_data(&project, &skills, &knowledge, &topics),
            Err(ValidationError::IncompleteKnowledge)
        );
        assert_eq!(
            validate_project_data(&project, &skills, &json!("React"), &topics),
            Err(ValidationError::InvalidCollections)
        );
    }

    #[test]
    fn zero_weight_counts_as_missing() {
        let project = json!({"name": "Tracker"});
        let skills = json!([{"name": "writing", "weight": 0}]);
        assert_eq!(
            validate_project_data(&project, &skills, &json!([]), &json!([])),
            Err(ValidationError::IncompleteSkill)
        );
    }
}
