//! Request and response shapes of the platform API.
//!
//! Response models default every field so partially filled records from the
//! backend still decode.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::transform::{to_mapping, to_sequence};
use crate::types::{WeightMap, WeightedEntry};
use crate::validation::{
    patterns::{numeric, MAX_YEAR}, validate_course_data, validate_login, validate_profile_names,
    validate_project_data, validate_sign_up, ValidationError, ValidationResult,
};

/// Loosely-typed view of a form, as the validators expect it
pub(crate) fn to_record<T: Serialize>(form: &T) -> Value {
    serde_json::to_value(form).unwrap_or(Value::Null)
}

fn field<'a>(record: &'a Value, key: &str) -> &'a Value {
    record.get(key).unwrap_or(&Value::Null)
}

// ---- auth ----

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> ValidationResult {
        validate_login(&to_record(self))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpForm {
    pub z_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirmed_password: String,
}

impl SignUpForm {
    pub fn validate(&self) -> ValidationResult {
        validate_sign_up(&to_record(self))
    }

    /// Registration body; the confirmation never leaves the client
    pub fn to_payload(&self) -> Value {
        json!({
            "zId": self.z_id,
            "firstName": self.first_name,
            "lastName": self.last_name,
            "email": self.email,
            "password": self.password,
        })
    }
}

/// Token and role handed out by login and account verification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthGrant {
    pub token: String,
    pub user_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Message {
    pub message: String,
}

// ---- courses ----

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseSummary {
    pub name: String,
    pub code: String,
    pub school: Option<String>,
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct CourseList {
    pub courses: Vec<CourseSummary>,
}

/// One offering of a course as the course page shows it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Course {
    pub name: String,
    pub code: String,
    pub uoc: Option<u32>,
    pub topics: Vec<String>,
    pub description: String,
    pub skills: WeightMap,
    pub knowledge: WeightMap,
    pub thumbnail: Option<String>,
    pub school: Option<String>,
    pub current_version: Option<Value>,
    pub available_versions: Vec<Value>,
    pub current_year: Option<i64>,
    pub current_term: Option<String>,
    pub available_year_terms: Vec<(i64, String)>,
}

impl Course {
    /// Key of the offering currently shown, when the backend reported one
    pub fn key(&self) -> Option<CourseKey> {
        match (self.current_year, &self.current_term) {
            (Some(year), Some(term)) => Some(CourseKey::new(self.code.clone(), year, term.clone())),
            _ => None,
        }
    }
}

/// Identifies one offering: code, year and term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseKey {
    pub code: String,
    pub year: i64,
    pub term: String,
}

impl CourseKey {
    pub fn new(code: impl Into<String>, year: i64, term: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            year,
            term: term.into(),
        }
    }
}

/// Add/edit course form contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseDraft {
    pub name: String,
    pub code: String,
    /// Starts out blank, like the empty form field
    pub year: Value,
    pub term: String,
    pub school: String,
    pub thumbnail: String,
    pub description: String,
    pub topics: Vec<String>,
    pub skills: Vec<WeightedEntry>,
    pub knowledge: Vec<WeightedEntry>,
}

impl Default for CourseDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            code: String::new(),
            year: json!(""),
            term: String::new(),
            school: String::new(),
            thumbnail: String::new(),
            description: String::new(),
            topics: Vec::new(),
            skills: Vec::new(),
            knowledge: Vec::new(),
        }
    }
}

impl CourseDraft {
    /// Pre-fill an edit form from a fetched course
    pub fn from_course(course: &Course) -> Self {
        Self {
            name: course.name.clone(),
            code: course.code.clone(),
            year: course.current_year.map(Value::from).unwrap_or_else(|| json!("")),
            term: course.current_term.clone().unwrap_or_default(),
            school: course.school.clone().unwrap_or_default(),
            thumbnail: course.thumbnail.clone().unwrap_or_default(),
            description: course.description.clone(),
            topics: course.topics.clone(),
            skills: to_sequence(&course.skills),
            knowledge: to_sequence(&course.knowledge),
        }
    }

    pub fn validate(&self) -> ValidationResult {
        if self.year.is_null() {
            return Err(ValidationError::RequiredFields);
        }
        let record = to_record(self);
        validate_course_data(
            &record,
            field(&record, "skills"),
            field(&record, "knowledge"),
            field(&record, "topics"),
        )
    }

    /// Year as an integer, truncating any fraction. A null year is not a year.
    pub fn year(&self) -> Result<i64, ValidationError> {
        Some(&self.year)
            .filter(|year| !year.is_null())
            .and_then(numeric)
            .filter(|y| (0.0..=MAX_YEAR).contains(y))
            .map(|y| y.trunc() as i64)
            .ok_or(ValidationError::InvalidYear)
    }

    pub fn key(&self) -> Result<CourseKey, ValidationError> {
        Ok(CourseKey::new(self.code.clone(), self.year()?, self.term.clone()))
    }

    /// Wire body: integer year, skills/knowledge as maps
    pub fn to_payload(&self) -> Result<Value, ValidationError> {
        Ok(json!({
            "name": self.name,
            "code": self.code,
            "year": self.year()?,
            "term": self.term,
            "topics": self.topics,
            "description": self.description,
            "thumbnail": self.thumbnail,
            "school": self.school,
            "skills": to_mapping(&self.skills),
            "knowledge": to_mapping(&self.knowledge),
        }))
    }
}

// ---- projects ----

/// Dashboard card; `knowledge` holds names ranked by weight
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSummary {
    pub id: i64,
    pub name: String,
    pub client: Option<String>,
    pub thumbnail: Option<String>,
    pub skills: WeightMap,
    pub knowledge: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Group {
    pub id: i64,
    pub group_name: String,
    pub members: Vec<String>,
}

impl Group {
    pub fn has_member(&self, z_id: &str) -> bool {
        self.members.iter().any(|m| m == z_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub client: Option<String>,
    pub skills: WeightMap,
    pub knowledge: WeightMap,
    pub thumbnail: Option<String>,
    pub scope: Option<String>,
    pub topics: Vec<String>,
    pub percentage_match: Option<f64>,
    pub missing_knowledge: Vec<String>,
    pub missing_skills: Vec<String>,
    pub requirements: Option<String>,
    pub outcomes: Option<String>,
    pub groups: Vec<Group>,
}

impl Project {
    pub fn is_member(&self, z_id: &str) -> bool {
        self.groups.iter().any(|g| g.has_member(z_id))
    }
}

/// Add project form contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectDraft {
    pub name: String,
    pub client: String,
    pub thumbnail: String,
    pub requirements: String,
    pub scope: String,
    pub outcomes: String,
    pub topics: Vec<String>,
    pub skills: Vec<WeightedEntry>,
    pub knowledge: Vec<WeightedEntry>,
}

impl ProjectDraft {
    pub fn validate(&self) -> ValidationResult {
        let record = to_record(self);
        validate_project_data(
            &record,
            field(&record, "skills"),
            field(&record, "knowledge"),
            field(&record, "topics"),
        )
    }

    pub fn to_payload(&self) -> Value {
        json!({
            "name": self.name,
            "client": self.client,
            "skills": to_mapping(&self.skills),
            "knowledge": to_mapping(&self.knowledge),
            "thumbnail": self.thumbnail,
            "scope": self.scope,
            "requirements": self.requirements,
            "topics": self.topics,
            "outcomes": self.outcomes,
        })
    }
}

// ---- profile ----

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileSummary {
    #[serde(rename = "zID", alias = "zId")]
    pub z_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub headline: Option<String>,
    pub summary: Option<String>,
    pub profile_path: Option<String>,
    pub user_type: Option<Value>,
}

/// Profile intro / account preference form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileIntro {
    pub first_name: String,
    pub last_name: String,
    pub headline: String,
    pub summary: String,
}

impl ProfileIntro {
    pub fn validate(&self) -> ValidationResult {
        validate_profile_names(&self.first_name, &self.last_name)
    }
}

/// A course listed on a user's profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileCourse {
    pub course_code: String,
    pub year_date: i64,
    pub term: String,
}

// ---- admin ----

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserRow {
    #[serde(rename = "zID")]
    pub z_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub user_type: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AdminCourseRow {
    pub course_code: String,
    pub course_name: String,
    pub year_date: i64,
    pub term: String,
    pub school: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AdminProjectRow {
    pub id: i64,
    pub project_name: String,
    pub client: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Dashboard {
    pub user_count: IndexMap<String, u64>,
    pub course_count: u64,
    pub project_count: u64,
}
