/// Shared types used across the codebase

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// HTTP verbs the platform API accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Platform roles. Wire strings contain spaces for the compound roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserType {
    #[serde(rename = "student")]
    Student,
    #[serde(rename = "academic")]
    Academic,
    #[serde(rename = "casual academic")]
    CasualAcademic,
    #[serde(rename = "course admin")]
    CourseAdmin,
    #[serde(rename = "admin")]
    Admin,
}

impl UserType {
    pub const ALL: [UserType; 5] = [
        UserType::Student,
        UserType::Academic,
        UserType::CasualAcademic,
        UserType::CourseAdmin,
        UserType::Admin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Student => "student",
            UserType::Academic => "academic",
            UserType::CasualAcademic => "casual academic",
            UserType::CourseAdmin => "course admin",
            UserType::Admin => "admin",
        }
    }

    /// Roles allowed to add courses and projects
    pub fn can_add(&self) -> bool {
        matches!(self, UserType::Academic | UserType::Admin)
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], " ");
        UserType::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| format!("unknown user type '{}'", s))
    }
}

/// Weight of a skill or knowledge entry. Edit forms hold text, the API holds numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Weight {
    Number(Number),
    Text(String),
}

impl Weight {
    /// Numeric value, coercing numeric text
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Weight::Number(n) => n.as_f64(),
            Weight::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Weight::Number(n) => Value::Number(n.clone()),
            Weight::Text(s) => Value::String(s.clone()),
        }
    }
}

impl From<i64> for Weight {
    fn from(v: i64) -> Self {
        Weight::Number(Number::from(v))
    }
}

impl From<u32> for Weight {
    fn from(v: u32) -> Self {
        Weight::Number(Number::from(v))
    }
}

impl From<&str> for Weight {
    fn from(v: &str) -> Self {
        Weight::Text(v.to_string())
    }
}

impl From<String> for Weight {
    fn from(v: String) -> Self {
        Weight::Text(v)
    }
}

/// One row of an editable skills/knowledge list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedEntry {
    pub name: String,
    pub weight: Weight,
}

impl WeightedEntry {
    pub fn new(name: impl Into<String>, weight: impl Into<Weight>) -> Self {
        Self {
            name: name.into(),
            weight: weight.into(),
        }
    }
}

/// Wire form of skills/knowledge: name -> weight, in insertion order
pub type WeightMap = IndexMap<String, Weight>;
