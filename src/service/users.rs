use sqlx::{Pool, Postgres};
use tracing::{Instrument, instrument};

use crate::{
    dao::users::UserDao,
    model::{
        apperror::{ApplicationError, ErrorType},
        users::{User, UserRegistrationInputType},
    },
};

/**
 * Represents the service for registering users.
 */
pub struct UserService {
    /**
     * The DAO for user operations.
     */
    user_dao: UserDao,
    /**
     * Optional connection pool for database operations. Optional so validation can run without a database.
     */
    connection_pool: Option<Pool<Postgres>>,
}

impl UserService {
    /**
     * Creates a new instance of `UserService`.
     *
     * # Arguments
     * `user_dao`: The DAO for user operations.
     * `connection_pool`: Optional connection pool for database operations.
     *
     * # Returns
     * A new instance of `UserService`.
     */
    pub fn new(user_dao: UserDao, connection_pool: Option<Pool<Postgres>>) -> Self {
        UserService { user_dao, connection_pool }
    }

    /**
     * Registers a new user. Fields are validated in order and the first failure is reported,
     * then the username is checked for uniqueness before the user is stored.
     *
     * # Arguments
     * `user_input`: The registration input.
     *
     * # Returns
     * A Result containing the stored `User` or an `ApplicationError`.
     */
    #[instrument(skip(self, user_input), fields(username = %user_input.username))]
    pub async fn register_user(&self, user_input: UserRegistrationInputType) -> Result<User, ApplicationError> {
        let span = tracing::Span::current();
        let user_input = user_input.validate()?;
        let Some(connection_pool) = &self.connection_pool else {
            return Err(ApplicationError::new(ErrorType::DatabaseError, "No database connection available"));
        };
        let mut transaction = connection_pool.begin().await.map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to begin transaction: {err}")))?;
        match self.store_unique_user(&mut transaction, user_input).instrument(span).await {
            Ok(user) => {
                transaction.commit().await.map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to commit transaction: {err}")))?;
                tracing::info!("Registered user {} with id {}", user.username, user.id);
                Ok(user)
            }
            Err(err) => {
                transaction.rollback().await.map_err(|err| ApplicationError::new(ErrorType::DatabaseError, format!("Failed to rollback transaction: {err}")))?;
                Err(err)
            }
        }
    }

    async fn store_unique_user(&self, transaction: &mut sqlx::PgConnection, user_input: UserRegistrationInputType) -> Result<User, ApplicationError> {
        if self.user_dao.get_user_by_username(&mut *transaction, &user_input.username).await?.is_some() {
            return Err(ApplicationError::new(ErrorType::ConstraintViolation, format!("Username '{}' is already taken", user_input.username)));
        }
        self.user_dao.save_user(transaction, user_input).await
    }
}
