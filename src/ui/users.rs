use std::io::{BufRead, Write};

use crate::{
    api::users::UserController,
    model::{apperror::ApplicationError, users::UserRegistrationInputType},
    ui::console::Console,
};

/**
 * Reads the registration form and registers the user.
 */
pub async fn run<R: BufRead, W: Write>(console: &mut Console<R, W>, controller: &UserController) -> Result<(), ApplicationError> {
    let username = console.prompt("Enter username: ")?;
    let age: i32 = console.read_value("Enter age: ")?;
    let email = console.prompt("Enter email: ")?;
    let password = console.prompt("Enter password: ")?;
    let response = controller.register_user(UserRegistrationInputType::new(username, age, email, password)).await;
    console.show(&response, |user| format!("User registered successfully\n{user}"))?;
    Ok(())
}
