use sqlx::PgConnection;
use tracing::{Instrument, instrument};

use crate::dao::handle_database_error;
use crate::model::{
    apperror::{ApplicationError, ErrorType},
    users::{User, UserRegistrationInputType},
};

/**
 * Database response type for querying a user: id, username, age, email, password.
 */
pub type QueryUserDbResp = (i32, String, i32, String, String);

/**
 * SQL query to add a new user. The id is generated by the database.
 */
const INSERT_USER: &str = "INSERT INTO users (username, age, email, password) VALUES ($1, $2, $3, $4) RETURNING id";

/**
 * SQL query to find a user by username.
 */
const GET_USER_BY_USERNAME: &str = "SELECT id, username, age, email, password FROM users WHERE username = $1";

/**
 * DAO for user-related database operations.
 */
pub struct UserDao {}

impl UserDao {
    /**
     * Creates a new instance of `UserDao`.
     *
     * # Returns
     * A new instance of `UserDao`.
     */
    pub fn new() -> Self {
        UserDao {}
    }

    /**
     * Stores a new user.
     *
     * # Arguments
     * `transaction`: The database transaction to execute the query within.
     * `user_input`: The validated registration input.
     *
     * # Returns
     * A Result containing the stored `User` with its generated id, or an `ApplicationError`.
     */
    #[instrument(skip(self, transaction), fields(result))]
    pub async fn save_user(&self, transaction: &mut PgConnection, user_input: UserRegistrationInputType) -> Result<User, ApplicationError> {
        let span = tracing::Span::current();
        let generated_id: (i32,) = sqlx::query_as(INSERT_USER)
            .bind(&user_input.username)
            .bind(user_input.age)
            .bind(&user_input.email)
            .bind(&user_input.password)
            .fetch_one(transaction)
            .instrument(span)
            .await
            .map_err(|err| handle_database_error(err.as_database_error(), &format!("Username '{}' is already taken", user_input.username)))?;
        tracing::debug!("Stored user {} with id {}", user_input.username, generated_id.0);
        Ok(User::new(generated_id.0, user_input.username, user_input.age, user_input.email, user_input.password))
    }

    /**
     * Retrieves a user by username.
     *
     * # Arguments
     * `connection`: The database connection.
     * `username`: The username to look for.
     *
     * # Returns
     * A Result containing the user if found, or an `ApplicationError`.
     */
    #[instrument(skip(self, connection), fields(result))]
    pub async fn get_user_by_username(&self, connection: &mut PgConnection, username: &str) -> Result<Option<User>, ApplicationError> {
        let span = tracing::Span::current();
        let result: Option<QueryUserDbResp> = sqlx::query_as(GET_USER_BY_USERNAME)
            .bind(username)
            .fetch_optional(connection)
            .instrument(span)
            .await
            .map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to execute query to get user: {err}")))?;
        Ok(result.map(|row| User::new(row.0, row.1, row.2, row.3, row.4)))
    }
}
