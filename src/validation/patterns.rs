use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

// ASCII classes only; `\d` in `regex` would also accept other Unicode digits
static ZID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^z[0-9]{7}$").expect("valid zID pattern"));
static NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z]+$").expect("valid name pattern"));
static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email pattern")
});
static COURSE_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{4}[0-9]{4}$").expect("valid course code pattern"));

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_YEAR: f64 = 9999.0;

pub fn is_valid_zid(z_id: &str) -> bool {
    ZID.is_match(z_id)
}

pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && NAME.is_match(name)
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

pub fn is_valid_course_code(code: &str) -> bool {
    COURSE_CODE.is_match(code)
}

/// Length counted in UTF-16 code units, as browser form fields report it
pub fn is_valid_password(password: &str) -> bool {
    password.encode_utf16().count() >= MIN_PASSWORD_LEN
}

/// Year given as a number or numeric text, within 0..=9999
pub fn is_valid_year(year: &Value) -> bool {
    numeric(year).map_or(false, |y| (0.0..=MAX_YEAR).contains(&y))
}

/// Loose numeric reading of a form value
pub fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Null => Some(0.0),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Whether a form value counts as filled in: `""`, `0`, `null`, `false` do not
pub fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map_or(true, |v| v != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}
