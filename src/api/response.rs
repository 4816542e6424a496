use serde::Serialize;

use crate::model::apperror::{ApplicationError, ErrorType};

/**
 * Status code of a successful response.
 */
pub const SUCCESS_CODE: u16 = 200;

/**
 * Status code of every failed response, whatever the error type.
 */
pub const ERROR_CODE: u16 = 400;

/**
 * Envelope returned by every controller operation.
 *
 * Either `data` is set and `status_code` is `SUCCESS_CODE`, or `error_message` is set and `status_code` is `ERROR_CODE`.
 */
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response<T> {
    /**
     * `SUCCESS_CODE` or `ERROR_CODE`.
     */
    pub status_code: u16,
    /**
     * Result data of a successful operation.
     */
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /**
     * Message describing why the operation failed.
     */
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl<T> Response<T> {
    /**
     * Creates a successful response.
     */
    pub fn success(data: T) -> Self {
        Response { status_code: SUCCESS_CODE, data: Some(data), error_message: None }
    }

    /**
     * Creates a failed response.
     */
    pub fn error(error_message: impl Into<String>) -> Self {
        Response { status_code: ERROR_CODE, data: None, error_message: Some(error_message.into()) }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == SUCCESS_CODE
    }

    /**
     * Converts the envelope back into a `Result`.
     *
     * # Returns
     * The data of a successful response, otherwise an `ApplicationError` carrying the error message.
     */
    pub fn into_result(self) -> Result<T, ApplicationError> {
        match (self.status_code, self.data) {
            (SUCCESS_CODE, Some(data)) => Ok(data),
            _ => Err(ApplicationError::new(ErrorType::Validation, self.error_message.unwrap_or_else(|| "Unknown error".to_string()))),
        }
    }
}

impl<T> From<Result<T, ApplicationError>> for Response<T> {
    fn from(result: Result<T, ApplicationError>) -> Self {
        match result {
            Ok(data) => Response::success(data),
            Err(err) => {
                tracing::debug!("Request failed with {:?}: {}", err.error_type, err.message);
                Response::error(err.message)
            }
        }
    }
}
