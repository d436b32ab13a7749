use thiserror::Error;

/// Form validation failures. Display strings are shown to users as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    // Sign up / login
    #[error("Please enter a valid zID")]
    InvalidZid,

    #[error("Please enter a first name")]
    InvalidFirstName,

    #[error("Please enter a last name")]
    InvalidLastName,

    #[error("Please enter a valid email")]
    InvalidEmail,

    #[error("Passwords must be greater than 7 characters")]
    InvalidPassword,

    #[error("Passwords don't match")]
    NonMatchingPassword,

    #[error("Please enter all fields")]
    MissingFields,

    // Course / project drafts
    #[error("All Fields are required.")]
    RequiredFields,

    #[error("Enter a valid course code.")]
    InvalidCourseCode,

    #[error("Enter a valid year.")]
    InvalidYear,

    #[error("Topics, Skills and/or knowledge are incorrect.")]
    InvalidCollections,

    #[error("Each skill and knowledge should have a name and a weight.")]
    IncompleteCourseEntry,

    #[error("Each skill should have a name and a weight.")]
    IncompleteSkill,

    #[error("Each knowledge should have a name and a weight.")]
    IncompleteKnowledge,
}

impl ValidationError {
    pub fn message(&self) -> String {
        self.to_string()
    }
}

// Other user-facing messages
pub const SIGN_UP_ERROR_MESSAGE: &str = "Invalid details";
pub const NO_COURSES_ERROR: &str = "No courses could be found at this time!";
pub const GENERAL_ERROR_MESSAGE: &str = "Something went wrong, please try again!";
