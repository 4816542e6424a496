pub mod apperror;
pub mod config;
pub mod customers;
pub mod money;
pub mod products;
pub mod students;
pub mod users;
pub mod vehicles;
