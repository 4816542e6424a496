use tracing::{Instrument, instrument};

use crate::{
    api::response::Response,
    model::users::{User, UserRegistrationInputType},
    service::users::UserService,
};

/**
 * Controller for the user registration application.
 */
pub struct UserController {
    user_service: UserService,
}

impl UserController {
    pub fn new(user_service: UserService) -> Self {
        UserController { user_service }
    }

    /**
     * Registers a new user.
     *
     * # Arguments
     * `user_input`: The registration input.
     *
     * # Returns
     * A `Response` carrying the stored `User`, or the first validation failure.
     */
    #[instrument(skip(self, user_input), fields(service = "registerUser", username = %user_input.username))]
    pub async fn register_user(&self, user_input: UserRegistrationInputType) -> Response<User> {
        let span = tracing::Span::current();
        if user_input.age <= 0 {
            return Response::error("Invalid value for parameters");
        }
        Response::from(self.user_service.register_user(user_input).instrument(span).await)
    }
}
