use std::fmt;

/**
 * Represents the type of error that can occur within the application.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorType {
    /**
     * Configuration, logging or database pool could not be set up.
     */
    Initialization,
    /**
     * Input did not pass a business rule.
     */
    Validation,
    NotFound,
    /**
     * Natural key or primary key already taken.
     */
    ConstraintViolation,
    /**
     * Operation not allowed in the current state, e.g. renting a rented vehicle.
     */
    InvalidState,
    /**
     * Data file could not be read or parsed.
     */
    FileAccess,
    DatabaseError,
    /**
     * Console read or write failed.
     */
    Io,
    /**
     * Standard input was closed while a value was expected.
     */
    EndOfInput,
}

/**
 * Represents an error that occurs within the application.
 */
#[derive(Debug, Clone)]
pub struct ApplicationError {
    /**
     * Error type.
     */
    pub error_type: ErrorType,
    /**
     * Error message describing problem.
     */
    pub message: String,
}

impl ApplicationError {
    /**
     * Creates a new ApplicationError.
     *
     * #Arguments
     * `error_type`: The type of error.
     * `message`: A description of the error.
     */
    pub fn new(error_type: ErrorType, message: impl Into<String>) -> Self {
        ApplicationError { error_type, message: message.into() }
    }
}

impl fmt::Display for ApplicationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApplicationError {}

impl From<ApplicationError> for std::io::Error {
    fn from(error: ApplicationError) -> Self {
        std::io::Error::other(error.message)
    }
}
