use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::model::apperror::{ApplicationError, ErrorType};

pub const MIN_AGE: i32 = 18;
pub const MAX_AGE: i32 = 60;
pub const MIN_PASSWORD_LENGTH: usize = 6;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9+_.-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,6}$").unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/**
 * A registered user as stored in the `users` table.
 */
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub username: String,
    pub age: i32,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
}

impl User {
    pub fn new(id: i32, username: String, age: i32, email: String, password: String) -> Self {
        User { id, username, age, email, password }
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("User").field("id", &self.id).field("username", &self.username).field("age", &self.age).field("email", &self.email).field("password", &"***").finish()
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "-----------")?;
        writeln!(f, "User Details")?;
        writeln!(f, "-----------")?;
        writeln!(f, "Id : {}", self.id)?;
        writeln!(f, "Username : {}", self.username)?;
        writeln!(f, "Age : {}", self.age)?;
        write!(f, "Email : {}", self.email)
    }
}

/**
 * Registration request before it has been validated and stored.
 */
#[derive(Clone)]
pub struct UserRegistrationInputType {
    pub username: String,
    pub age: i32,
    pub email: String,
    pub password: String,
}

impl UserRegistrationInputType {
    pub fn new(username: String, age: i32, email: String, password: String) -> Self {
        UserRegistrationInputType { username, age, email, password }
    }

    /**
     * Validates the registration fields in order and stops at the first failure.
     * Username uniqueness needs the database and is checked by the service.
     *
     * # Returns
     * The input with a trimmed username or a validation error.
     */
    pub fn validate(self) -> Result<Self, ApplicationError> {
        let username = self.username.trim().to_string();
        if username.is_empty() {
            return Err(ApplicationError::new(ErrorType::Validation, "Username cannot be empty"));
        }
        if !(MIN_AGE..=MAX_AGE).contains(&self.age) {
            return Err(ApplicationError::new(ErrorType::Validation, format!("Age must be between {MIN_AGE} and {MAX_AGE}.")));
        }
        if !email_regex().is_match(&self.email) {
            return Err(ApplicationError::new(ErrorType::Validation, "Invalid email format."));
        }
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ApplicationError::new(ErrorType::Validation, format!("Password too weak. Must be at least {MIN_PASSWORD_LENGTH} characters.")));
        }
        Ok(UserRegistrationInputType { username, ..self })
    }
}

impl fmt::Debug for UserRegistrationInputType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("UserRegistrationInputType").field("username", &self.username).field("age", &self.age).field("email", &self.email).finish_non_exhaustive()
    }
}
